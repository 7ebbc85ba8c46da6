//! Single pass scans, kept as a reference for the binary counter finders.

/// Position of the leftmost minimal element of `seq`, or `seq.len()` if `seq` is empty.
pub fn min_element<T, C>(seq: &[T], cmp: C) -> usize
where
    C: Fn(&T, &T) -> bool,
{
    if seq.is_empty() {
        return seq.len();
    }
    let mut current = 0;
    for position in 1..seq.len() {
        if cmp(&seq[position], &seq[current]) {
            current = position;
        }
    }
    current
}

/// Positions of the minimum and the second minimum of `seq`, tracking both in one pass.
///
/// Same contract as [`crate::find_min12`].
pub fn min_element12<T, C>(seq: &[T], cmp: C) -> (usize, usize)
where
    C: Fn(&T, &T) -> bool,
{
    if seq.len() < 2 {
        // the only element, or end
        return (0, 0);
    }
    let (mut min1, mut min2) = if cmp(&seq[1], &seq[0]) { (1, 0) } else { (0, 1) };
    for position in 2..seq.len() {
        if cmp(&seq[position], &seq[min2]) {
            if cmp(&seq[position], &seq[min1]) {
                min2 = min1;
                min1 = position;
            } else {
                min2 = position;
            }
        }
    }
    (min1, min2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_element() {
        let v = vec![3, 8, 0, 7, 9, 1, 2, 5];
        assert_eq!(min_element(&v, |a, b| a < b), 2);
        assert_eq!(min_element::<i32, _>(&[], |a, b| a < b), 0);
    }

    #[test]
    fn test_min_element12() {
        let v = vec![3, 8, 0, 7, 9, 1, 2, 5];
        assert_eq!(min_element12(&v, |a, b| a < b), (2, 5));
        assert_eq!(min_element12(&[1, 1], |a, b| a < b), (0, 1));
        assert_eq!(min_element12(&[4], |a, b| a < b), (0, 0));
    }
}
