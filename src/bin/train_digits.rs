//! Train the default 400/25/10 network on a headerless CSV and print the
//! training-set accuracy.
//!
//! Usage: `train_digits <data.csv> [lambda] [iterations]`
//!
//! Each row is 400 pixel values followed by a label in `1..=10`. Set
//! `RUST_LOG=debug` to see the per-iteration cost.
use std::{env, process::ExitCode, str::FromStr};

use backprop_cg::network::prelude::*;
use backprop_cg::optimization::prelude::CgOptions;

fn parse_arg<T: FromStr>(arg: Option<String>, default: T, name: &str) -> Result<T, String> {
    match arg {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| format!("invalid {name}: '{s}'")),
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: train_digits <data.csv> [lambda] [iterations]")?;
    let lambda = parse_arg(args.next(), 1.0, "lambda")?;
    let length = parse_arg(args.next(), 50i64, "iterations")?;

    let cg = CgOptions::with_length(length).map_err(|e| e.to_string())?;
    let opts = TrainingOptions::new(NetworkShape::default(), lambda, cg, 100)
        .map_err(|e| e.to_string())?;
    let data = load_csv(&path, opts.shape.labels).map_err(|e| e.to_string())?;
    log::info!("loaded {} examples from {}", data.len(), path);

    let report = train(&data, &opts).map_err(|e| e.to_string())?;
    println!("Cost: {:.6}", report.outcome.value);
    println!("Training Set Accuracy: {:.2}%", report.accuracy * 100.0);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
