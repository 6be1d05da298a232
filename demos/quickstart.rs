//! Quickstart example demonstrating the selection pipeline.
//!
//! Run with: cargo run --example quickstart

use spendcast::core::Series;
use spendcast::selection::{default_candidates, Selector};

fn main() {
    println!("=== spendcast Quickstart ===\n");

    // 1. Five years of synthetic monthly spend: trend plus seasonality
    let values: Vec<f64> = (0..60)
        .map(|i| {
            200.0                                                        // base level
            + 1.5 * i as f64                                             // linear trend
            + 12.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin() // yearly cycle
            + 2.0 * (i as f64 * 0.7).cos()                               // noise
        })
        .collect();

    let series = Series::monthly(values, 2020, 1).unwrap();
    println!(
        "Created series: {} observations, {} to {}",
        series.len(),
        series.label(0),
        series.label(series.len() - 1)
    );

    // 2. Evaluate the default candidate set
    println!("\n--- Evaluating candidates (horizon = 12) ---");
    let selection = Selector::new()
        .select(&series, default_candidates(series.frequency()), 12)
        .unwrap();

    println!("{:>28} {:>12}", "Model", "RMSE");
    println!("{:-<41}", "");
    for result in &selection.ranking {
        println!("{:>28} {:>12.4}", result.name, result.rmse);
    }
    for failure in &selection.failures {
        println!("{:>28}   failed: {}", failure.name, failure.error);
    }

    // 3. Print the winning forecast with its intervals
    let best = selection.best().unwrap();
    println!("\n--- Winner: {} ---", best.name);
    println!(
        "{:>10} {:>12} {:>12} {:>12}",
        "Period", "Lower", "Forecast", "Upper"
    );
    println!("{:-<50}", "");

    let forecast = &best.forecast;
    let lower = forecast.lower().unwrap();
    let upper = forecast.upper().unwrap();
    for (h, &pred) in forecast.point().iter().enumerate() {
        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2}",
            series.label(series.len() + h),
            lower[h],
            pred,
            upper[h]
        );
    }

    println!("\n=== Quickstart Complete ===");
}
