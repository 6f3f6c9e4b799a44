//! demo_report_summary - Print a per-suite summary of a Surefire report.
//!
//! This demo reads a single XML report and prints one row per suite with
//! its test, failure, error, skip and flake counts, followed by the first
//! line of detail for every unsuccessful test case.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --example demo_report_summary <TEST-report.xml>
//! ```

use std::env;
use std::process;

use surefire_report::reader::parse_file;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <report.xml>", args[0]);
        process::exit(1);
    }

    let report = match parse_file(&args[1]) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args[1], e);
            process::exit(1);
        }
    };

    if !report.is_valid() {
        println!("{} is a failsafe summary, not a test report", args[1]);
        return;
    }

    println!(
        "{:<50} {:>6} {:>6} {:>6} {:>6} {:>6} {:>9}",
        "Suite", "Tests", "Fail", "Error", "Skip", "Flake", "Time(s)"
    );
    for suite in &report.suites {
        println!(
            "{:<50} {:>6} {:>6} {:>6} {:>6} {:>6} {:>9.3}",
            suite.full_class_name(),
            suite.number_of_tests(),
            suite.number_of_failures,
            suite.number_of_errors,
            suite.number_of_skipped,
            suite.number_of_flakes,
            suite.time_elapsed_seconds
        );
    }

    for suite in &report.suites {
        for case in suite.iter_unsuccessful() {
            if let Some(detail) = &case.outcome {
                let first_line = detail
                    .lines
                    .first()
                    .map(String::as_str)
                    .or(detail.message.as_deref())
                    .unwrap_or("");
                println!("{} [{}] {}", case.full_name, detail.kind.as_str(), first_line);
            }
        }
    }
}
