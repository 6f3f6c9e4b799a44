//! Surefire test report library for Rust.
//!
//! This crate reads the XML test reports written by Maven Surefire, Failsafe
//! and other JUnit-style runners into test suite records with their cases,
//! timings and failure details.
//!
//! # Features
//!
//! - **Streaming Reader**: Event-driven parsing over `quick-xml`, one element
//!   at a time.
//! - **Suite Resolution**: Test cases whose `classname` differs from the
//!   enclosing `<testsuite>` are grouped into suites of their own.
//! - **Locale-aware Times**: `time` values written with grouping or decimal
//!   commas are read correctly.
//! - **Serde Support**: Optional serialization with the `serde` feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use surefire_report::parse;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("TEST-org.example.CalculatorTest.xml").unwrap();
//! let report = parse(BufReader::new(file)).unwrap();
//!
//! for suite in &report.suites {
//!     for case in suite.iter_unsuccessful() {
//!         println!("{}: {:?}", case.full_name, case.outcome);
//!     }
//! }
//! ```
//!
//! # Event API
//!
//! Events can also be fed to the state machine directly:
//!
//! ```rust
//! use surefire_report::reader::{ReportEvent, SuiteParser};
//!
//! let mut parser = SuiteParser::new();
//! parser
//!     .handle_event(ReportEvent::Start {
//!         name: "testsuite".to_string(),
//!         attrs: vec![
//!             ("name".to_string(), "org.example.FooTest".to_string()),
//!             ("time".to_string(), "0.5".to_string()),
//!         ],
//!     })
//!     .unwrap();
//! let report = parser.finish();
//! assert_eq!(report.suites[0].name(), "FooTest");
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - Suite and test case records
//! - [`reader`] - Streaming XML parser
//! - [`numeric`] - Locale-aware decimal parsing
//! - [`detail`] - Stack-trace line splitting
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod detail;
pub mod error;
pub mod numeric;
pub mod objects;
pub mod reader;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use numeric::NumberLocale;
pub use objects::{OutcomeDetail, OutcomeKind, TestCaseRecord, TestSuiteRecord};
pub use reader::{
    parse, parse_file, parse_with_config, ParseWarning, ParsedReport, ParserConfig, ReportEvent,
    ReportEventReader, SuiteParser,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
