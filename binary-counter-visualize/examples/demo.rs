use binary_counter::{find_min, find_min12, linear, min::MinOp};
use binary_counter_visualize::visualize::CounterViz;

fn report(name: &str, data: &[i32]) {
    let less = |a: &i32, b: &i32| a < b;

    let min = find_min(data, less);
    if min == data.len() {
        println!("{}: no elements", name);
        return;
    }
    println!("{}: min is {} at {}", name, data[min], min);

    let (min1, min2) = find_min12(data, less);
    if min1 == min2 {
        println!("{}: no second element", name);
    } else {
        println!(
            "{}: min is {} at {}, second min is {} at {}",
            name, data[min1], min1, data[min2], min2
        );
    }

    assert_eq!(min, linear::min_element(data, less));
    assert_eq!((min1, min2), linear::min_element12(data, less));
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let data = vec![9, 13, 7, 124, 32, 17, 8, 32, 3, 237, 417, 41, 42, 13, 14, 15];
    report("sixteen", &data);
    report("eight", &[3, 8, 0, 7, 9, 1, 2, 5]);
    report("one", &[42]);
    report("empty", &[]);

    // pass a path to write the carry cascades of the sixteen element run as JSON
    if let Some(path) = std::env::args().nth(1) {
        let mut counter = CounterViz::new(MinOp::new(&data, |a: &i32, b: &i32| a < b), data.len());
        for position in 0..data.len() {
            counter.add(position);
        }
        let min = counter.reduce();
        let viz = counter.into_viz().label(
            "min by binary counter".to_string(),
            format!("{} positions, min at {}", data.len(), min),
        );
        if let Err(e) = viz.finish(&path) {
            eprintln!("failed to write {}: {}", path, e);
            std::process::exit(1);
        }
        println!("wrote counter trace to {}", path);
    }
}
