use std::fmt::Display;
use std::path::Path;

use binary_counter::{BinaryCounter, BinaryOperation, RepeatableOperation};
use serde::Serialize;

/// A single application of the counter's operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Combine {
    pub left: String,
    pub right: String,
    pub out: String,
}

/// Wraps an operation, remembering every call made to it until the calls are drained.
pub struct Recording<Op> {
    op: Op,
    combines: Vec<Combine>,
}

impl<Op> Recording<Op> {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            combines: Vec::new(),
        }
    }

    /// Take the calls recorded since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<Combine> {
        std::mem::take(&mut self.combines)
    }

    /// The wrapped operation
    pub fn inner(&self) -> &Op {
        &self.op
    }
}

impl<T: Display, Op: BinaryOperation<T>> BinaryOperation<T> for Recording<Op> {
    fn combine(&mut self, x: T, y: T) -> T {
        let left = x.to_string();
        let right = y.to_string();
        let out = self.op.combine(x, y);
        self.combines.push(Combine {
            left,
            right,
            out: out.to_string(),
        });
        out
    }
}

impl<T: Display, Op: RepeatableOperation<T>> RepeatableOperation<T> for Recording<Op> {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "typ", rename_all = "snake_case")]
pub enum VizAction {
    // add an input, carrying through the occupied digits
    Add {
        input: String,
        combines: Vec<Combine>,
        // digits after the add, lowest first, `None` for the sentinel
        digits: Vec<Option<String>>,
    },
    // fold the occupied digits into the result
    Reduce {
        combines: Vec<Combine>,
        out: String,
    },
    // info text display!
    InfoCard {
        info_header: String,
        info_txt: String,
    },
}

/// Everything a [`CounterViz`] saw, ready to be serialized.
#[derive(Clone, Debug, Serialize)]
pub struct Viz {
    zero_txt: String,
    actions: Vec<VizAction>,
}

impl Viz {
    pub fn actions(&self) -> &[VizAction] {
        &self.actions
    }

    /// Prepend an info card
    pub fn label(mut self, info_header: String, info_txt: String) -> Self {
        let mut actions = vec![VizAction::InfoCard {
            info_header,
            info_txt,
        }];
        actions.extend(self.actions);
        self.actions = actions;

        self
    }

    /// Append the actions of `next`, separated by an info card
    pub fn fuse(self, next: Self, info_header: String, info_txt: String) -> Self {
        let mut actions = self.actions;
        actions.push(VizAction::InfoCard {
            info_header,
            info_txt,
        });
        actions.extend(next.actions);

        Self {
            zero_txt: self.zero_txt,
            actions,
        }
    }

    /// Write the trace to `path` as JSON.
    pub fn finish(self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let to_write = serialize_json(&self)?;
        std::fs::write(path, to_write)?;
        tracing::info!(path = %path.display(), actions = self.actions.len(), "wrote counter trace");
        Ok(())
    }
}

pub fn serialize_json(v: &Viz) -> serde_json::Result<String> {
    serde_json::to_string(v)
}

/// A [`BinaryCounter`] that records the carry cascade of every `add` and the final `reduce`.
///
/// ```rust
/// # use binary_counter_visualize::visualize::{CounterViz, VizAction};
/// let mut counter = CounterViz::new(|x: u32, y: u32| x.min(y), u32::MAX);
/// for x in [5, 3, 8] {
///     counter.add(x);
/// }
/// assert_eq!(counter.reduce(), 3);
///
/// let viz = counter.into_viz();
/// match &viz.actions()[1] {
///     VizAction::Add { combines, digits, .. } => {
///         assert_eq!(combines.len(), 1);
///         assert_eq!(digits, &vec![None, Some("3".to_string())]);
///     }
///     other => panic!("unexpected action {:?}", other),
/// }
/// ```
pub struct CounterViz<T, Op> {
    counter: BinaryCounter<T, Recording<Op>>,
    actions: Vec<VizAction>,
}

impl<T, Op> CounterViz<T, Op>
where
    T: PartialEq + Clone + Display,
    Op: BinaryOperation<T>,
{
    pub fn new(op: Op, zero: T) -> Self {
        Self {
            counter: BinaryCounter::new(Recording::new(op), zero),
            actions: Vec::new(),
        }
    }

    pub fn add(&mut self, x: T) {
        let input = x.to_string();
        self.counter.add(x);
        let combines = self.counter.operation_mut().drain();
        let digits = self.digits();
        self.actions.push(VizAction::Add {
            input,
            combines,
            digits,
        });
    }

    pub fn counter(&self) -> &BinaryCounter<T, Recording<Op>> {
        &self.counter
    }

    pub fn into_viz(self) -> Viz {
        Viz {
            zero_txt: self.counter.zero().to_string(),
            actions: self.actions,
        }
    }

    fn digits(&self) -> Vec<Option<String>> {
        let zero = self.counter.zero();
        self.counter
            .slots()
            .iter()
            .map(|slot| (slot != zero).then(|| slot.to_string()))
            .collect()
    }
}

impl<T, Op> CounterViz<T, Op>
where
    T: PartialEq + Clone + Display,
    Op: RepeatableOperation<T>,
{
    pub fn reduce(&mut self) -> T {
        let out = self.counter.reduce();
        let combines = self.counter.operation_mut().drain();
        self.actions.push(VizAction::Reduce {
            combines,
            out: out.to_string(),
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binary_counter::min::MinOp;

    fn concat_viz(words: &[&str]) -> CounterViz<String, impl FnMut(String, String) -> String> {
        let mut counter = CounterViz::new(|x: String, y: String| x + &y, String::new());
        for w in words {
            counter.add(w.to_string());
        }
        counter
    }

    #[test]
    fn records_carry_cascade() {
        let mut counter = concat_viz(&["a", "b", "c", "d"]);
        assert_eq!(counter.reduce(), "abcd");

        let viz = counter.into_viz();
        assert_eq!(viz.actions().len(), 5);
        assert_eq!(
            viz.actions()[3],
            VizAction::Add {
                input: "d".to_string(),
                combines: vec![
                    Combine {
                        left: "c".to_string(),
                        right: "d".to_string(),
                        out: "cd".to_string(),
                    },
                    Combine {
                        left: "ab".to_string(),
                        right: "cd".to_string(),
                        out: "abcd".to_string(),
                    },
                ],
                digits: vec![None, None, Some("abcd".to_string())],
            }
        );
        assert_eq!(
            viz.actions()[4],
            VizAction::Reduce {
                combines: Vec::new(),
                out: "abcd".to_string(),
            }
        );
    }

    #[test]
    fn recording_wraps_min_op() {
        let data = [7, 2, 9, 2];
        let mut counter = CounterViz::new(MinOp::new(&data, |a: &i32, b: &i32| a < b), data.len());
        for position in 0..data.len() {
            counter.add(position);
        }
        assert_eq!(counter.reduce(), 1);

        let min = counter.counter().operation().inner();
        // tie between positions 1 and 3 keeps the left one
        assert!(!min.less(3, 1));
        assert!(min.less(1, 0));
    }

    #[test]
    fn label_and_fuse_insert_info_cards() {
        let first = concat_viz(&["x"]).into_viz();
        let second = concat_viz(&["y", "z"]).into_viz();

        let viz = first
            .label("start".to_string(), "one input".to_string())
            .fuse(second, "next".to_string(), "two inputs".to_string());

        let kinds: Vec<&str> = viz
            .actions()
            .iter()
            .map(|a| match a {
                VizAction::Add { .. } => "add",
                VizAction::Reduce { .. } => "reduce",
                VizAction::InfoCard { .. } => "info",
            })
            .collect();
        assert_eq!(kinds, vec!["info", "add", "info", "add", "add"]);
    }

    #[test]
    fn serializes_tagged_actions() {
        let mut counter = concat_viz(&["p", "q", "r"]);
        counter.reduce();
        let json = serialize_json(&counter.into_viz()).unwrap();

        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["zero_txt"], "");
        let actions = v["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0]["typ"], "add");
        assert_eq!(actions[0]["digits"][0], "p");
        assert_eq!(actions[1]["combines"][0]["out"], "pq");
        assert!(actions[1]["digits"][0].is_null());
        assert_eq!(actions[3]["typ"], "reduce");
        assert_eq!(actions[3]["out"], "pqr");
    }
}
