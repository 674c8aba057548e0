use std::time::Instant;

use f0_estimator::F0Estimator;

fn main() {
    let mut estimator = F0Estimator::new(0.8, 0.1).expect("valid accuracy parameters");

    // 1,000,001 distinct values, each seen twice (once per direction).
    let ascending = (0..=1_000_000u32).map(|i| format!("a{i}"));
    let descending = (0..=1_000_000u32).rev().map(|i| format!("a{i}"));
    let stream: Vec<String> = ascending.chain(descending).collect();

    println!("estimating distinct values in {} items", stream.len());

    estimator
        .set_threshold(stream.len() as u64)
        .expect("valid stream length bound");
    println!(
        "items kept in memory: {}",
        estimator.threshold().expect("threshold just set")
    );

    let started = Instant::now();
    for item in stream {
        if !estimator.process_item(item) {
            eprintln!("estimator failed to process the stream");
            return;
        }
    }
    println!("cost: {:?}", started.elapsed());

    match estimator.estimate() {
        Ok(estimate) => println!("estimated distinct items: {estimate:.0}"),
        Err(err) => eprintln!("estimation failed: {err}"),
    }
}
