//! TestSuiteRecord - a group of test cases keyed by class name.
//!
//! A suite is either created from a `<testsuite>` element or synthesized
//! when a `<testcase>` names a class that has not been seen yet.

use crate::objects::testcase::TestCaseRecord;

/// A test suite with its cases and outcome counters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestSuiteRecord {
    /// Fully qualified class name, unique within one parse
    full_class_name: String,
    /// Elapsed time in seconds
    pub time_elapsed_seconds: f64,
    /// Number of `<error>` outcomes
    pub number_of_errors: usize,
    /// Number of `<failure>` outcomes
    pub number_of_failures: usize,
    /// Number of `<skipped>` outcomes
    pub number_of_skipped: usize,
    /// Number of `<flakyFailure>` and `<flakyError>` elements
    pub number_of_flakes: usize,
    /// Cases in document order
    cases: Vec<TestCaseRecord>,
}

impl TestSuiteRecord {
    /// Creates an empty suite for the given class name.
    pub fn new(full_class_name: impl Into<String>) -> Self {
        Self {
            full_class_name: full_class_name.into(),
            ..Default::default()
        }
    }

    /// Returns the fully qualified class name.
    pub fn full_class_name(&self) -> &str {
        &self.full_class_name
    }

    /// Returns the short name: the last dotted segment of the class name.
    pub fn name(&self) -> &str {
        match self.full_class_name.rfind('.') {
            Some(pos) => &self.full_class_name[pos + 1..],
            None => &self.full_class_name,
        }
    }

    /// Returns everything before the last dot, or an empty string.
    pub fn package_name(&self) -> &str {
        match self.full_class_name.rfind('.') {
            Some(pos) => &self.full_class_name[..pos],
            None => "",
        }
    }

    /// Returns the number of tests, always equal to the number of cases.
    pub fn number_of_tests(&self) -> usize {
        self.cases.len()
    }

    /// Appends a finished case.
    pub fn append_case(&mut self, case: TestCaseRecord) {
        self.cases.push(case);
    }

    /// Returns the cases in document order.
    pub fn cases(&self) -> &[TestCaseRecord] {
        &self.cases
    }

    /// Consumes the suite, returning its cases.
    pub fn into_cases(self) -> Vec<TestCaseRecord> {
        self.cases
    }

    /// Returns an iterator over cases that did not pass.
    pub fn iter_unsuccessful(&self) -> impl Iterator<Item = &TestCaseRecord> {
        self.cases.iter().filter(|case| !case.is_successful())
    }
}
