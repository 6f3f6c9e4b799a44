//! Report object types.
//!
//! - [`TestSuiteRecord`] - A suite of test cases keyed by class name
//! - [`TestCaseRecord`] - A single test case with timing and outcome
//! - [`OutcomeDetail`] - Failure, error or skip information for a case

mod testcase;
mod testsuite;

pub use testcase::{OutcomeDetail, OutcomeKind, TestCaseRecord};
pub use testsuite::TestSuiteRecord;
