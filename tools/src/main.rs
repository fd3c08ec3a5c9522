//! datagen-runner: one-shot fixture generator for the SaaS churn dataset.
//!
//! Usage:
//!   datagen-runner
//!   datagen-runner --seed 12345 --customers 5000 --out data/raw

use anyhow::Result;
use saasgen_core::{export, pipeline, DatasetConfig};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = DatasetConfig::default();
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.n_customers = parse_arg(&args, "--customers", config.n_customers);
    let out_dir: PathBuf = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| PathBuf::from(&w[1]))
        .unwrap_or_else(|| PathBuf::from("data").join("raw"));

    println!("saasgen — synthetic SaaS churn dataset");
    println!("  seed:      {}", config.seed);
    println!("  customers: {}", config.n_customers);
    println!("  range:     {} .. {}", config.start_date, config.end_date);
    println!("  out:       {}", out_dir.display());
    println!();

    let dataset = pipeline::generate(&config)?;
    export::write_dataset(&dataset, &out_dir)?;

    print_summary(&dataset, &out_dir);
    Ok(())
}

fn print_summary(dataset: &saasgen_core::Dataset, out_dir: &std::path::Path) {
    println!("=== RUN SUMMARY ===");
    println!("  at-risk actives: {}", dataset.at_risk.len());
    for (table, rows) in dataset.row_counts() {
        println!("  {table:<20} {rows:>8} rows");
    }
    println!();
    println!("Files in {}:", out_dir.display());
    for file in export::TABLE_FILES {
        println!(" - {file}");
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
