//! One-shot crop recommendation
//!
//! Usage: cargo run --bin recommend -- <N> <P> <K> <temperature> <humidity> <ph> <rainfall>
//!
//! Prints the recommendation as JSON. Exit codes: 1 start-up failure,
//! 2 invalid measurements, 3 internal error.

use anyhow::{bail, Context};
use crop_recommender::{Feature, RawMeasurements, RecommendError, ServiceConfig};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn parse_args(args: &[String]) -> anyhow::Result<RawMeasurements> {
    if args.len() != Feature::ALL.len() {
        bail!(
            "expected {} values ({}), got {}",
            Feature::ALL.len(),
            Feature::ALL.map(|f| f.column()).join(" "),
            args.len()
        );
    }

    let mut raw = RawMeasurements::default();
    for (feature, arg) in Feature::ALL.iter().zip(args) {
        let value: f64 = arg
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", feature.name(), arg))?;
        raw.set(*feature, value);
    }
    Ok(raw)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender=warn,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let raw = parse_args(&args)?;

    let service = ServiceConfig::from_env().build_service()?;

    match service.recommend(&raw) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(RecommendError::Validation(e)) => {
            eprintln!("Invalid measurements:");
            for violation in &e.violations {
                eprintln!("  - {}", violation);
            }
            Ok(ExitCode::from(2))
        }
        Err(RecommendError::UnknownCrop(_)) => {
            eprintln!("Internal error: recommendation could not be resolved");
            Ok(ExitCode::from(3))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_in_column_order() {
        let raw = parse_args(&args(&["90", "42", "43", "20.87", "82", "6.5", "202.94"])).unwrap();
        assert_eq!(raw, RawMeasurements::new(90.0, 42.0, 43.0, 20.87, 82.0, 6.5, 202.94));
    }

    #[test]
    fn test_parse_args_rejects_wrong_arity_and_text() {
        assert!(parse_args(&args(&["90", "42"])).is_err());
        assert!(parse_args(&args(&["90", "42", "43", "warm", "82", "6.5", "202.94"])).is_err());
    }
}
