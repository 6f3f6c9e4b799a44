//! TestCaseRecord - a single test method from a report.

/// Which outcome element was recorded for a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeKind {
    /// `<failure>`: an assertion failed
    Failure,
    /// `<error>`: the test threw an unexpected exception
    Error,
    /// `<skipped>`: the test was not run
    Skipped,
}

impl OutcomeKind {
    /// Returns the XML element name for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Failure => "failure",
            OutcomeKind::Error => "error",
            OutcomeKind::Skipped => "skipped",
        }
    }
}

/// Detail attached to a failed, errored or skipped test case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeDetail {
    /// Outcome element that produced this detail
    pub kind: OutcomeKind,
    /// The `message` attribute, if any
    pub message: Option<String>,
    /// The `type` attribute, usually an exception class name
    pub r#type: Option<String>,
    /// Body text of the element, one entry per line
    pub lines: Vec<String>,
}

impl OutcomeDetail {
    /// Creates a detail with no body lines.
    pub fn new(kind: OutcomeKind, message: Option<String>, r#type: Option<String>) -> Self {
        Self {
            kind,
            message,
            r#type,
            lines: Vec::new(),
        }
    }
}

/// A test case parsed from a `<testcase>` element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestCaseRecord {
    /// Test method name
    pub name: String,
    /// Fully qualified class name of the owning suite
    pub full_class_name: String,
    /// Short class name of the owning suite
    pub class_name: String,
    /// `full_class_name.name`
    pub full_name: String,
    /// Elapsed time in seconds
    pub time_seconds: f64,
    /// Failure, error or skip detail
    pub outcome: Option<OutcomeDetail>,
}

impl TestCaseRecord {
    /// Creates a case with the given name and no owner yet.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fills in the owner-derived names from a suite's class names.
    pub fn set_owner(&mut self, full_class_name: &str, class_name: &str) {
        self.full_class_name = full_class_name.to_string();
        self.class_name = class_name.to_string();
        self.full_name = format!("{}.{}", full_class_name, self.name);
    }

    /// Returns true when no failure, error or skip was recorded.
    pub fn is_successful(&self) -> bool {
        self.outcome.is_none()
    }

    /// Returns true if the case recorded a `<failure>`.
    pub fn has_failure(&self) -> bool {
        self.outcome_kind() == Some(OutcomeKind::Failure)
    }

    /// Returns true if the case recorded an `<error>`.
    pub fn has_error(&self) -> bool {
        self.outcome_kind() == Some(OutcomeKind::Error)
    }

    /// Returns true if the case was skipped.
    pub fn is_skipped(&self) -> bool {
        self.outcome_kind() == Some(OutcomeKind::Skipped)
    }

    fn outcome_kind(&self) -> Option<OutcomeKind> {
        self.outcome.as_ref().map(|detail| detail.kind)
    }
}
