//! Streaming test report reader.
//!
//! This module turns Surefire/JUnit XML into [`TestSuiteRecord`]s. It uses
//! `quick-xml` to pull events from the document and feeds them one at a time
//! into a [`SuiteParser`], which resolves the suite each test case belongs to
//! and aggregates counts and times.
//!
//! # Example
//!
//! ```rust,no_run
//! use surefire_report::reader::parse_file;
//!
//! let report = parse_file("target/surefire-reports/TEST-org.example.FooTest.xml").unwrap();
//! if report.is_valid() {
//!     for suite in &report.suites {
//!         println!(
//!             "{}: {} tests, {} failures",
//!             suite.full_class_name(),
//!             suite.number_of_tests(),
//!             suite.number_of_failures
//!         );
//!     }
//! }
//! ```

use crate::detail::split_lines;
use crate::error::{Error, Result};
use crate::numeric::{parse_decimal, NumberLocale};
use crate::objects::{OutcomeDetail, OutcomeKind, TestCaseRecord, TestSuiteRecord};
use log::{debug, warn};
use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

/// An XML event, as consumed by [`SuiteParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// Element start with its attributes in document order
    Start {
        /// Qualified element name
        name: String,
        /// Attribute `(name, value)` pairs, values unescaped
        attrs: Vec<(String, String)>,
    },
    /// Character data, including CDATA sections
    Text(String),
    /// Element end
    End {
        /// Qualified element name
        name: String,
    },
}

/// Pull-based event source over any `BufRead`.
///
/// Self-closing elements are delivered as a start event followed by an end
/// event. Comments, processing instructions and the XML declaration are
/// skipped. Reaching the end of input with no root element, or with
/// elements still open, is an [`Error::IncompleteDocument`].
pub struct ReportEventReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// Names of the elements currently open, outermost first
    open: Vec<String>,
    seen_root: bool,
    done: bool,
}

impl<R: BufRead> ReportEventReader<R> {
    /// Creates a new event reader from a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        let config = xml_reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;

        Self {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            open: Vec::new(),
            seen_root: false,
            done: false,
        }
    }

    /// Reads the next event the parser cares about.
    fn read_next(&mut self) -> Result<Option<ReportEvent>> {
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf)? {
                XmlEvent::Start(ref e) => {
                    let name = str::from_utf8(e.name().as_ref())?.to_string();
                    let attrs = Self::extract_attrs(e)?;
                    self.seen_root = true;
                    self.open.push(name.clone());
                    ReportEvent::Start { name, attrs }
                }
                XmlEvent::End(ref e) => {
                    let name = str::from_utf8(e.name().as_ref())?.to_string();
                    self.open.pop();
                    ReportEvent::End { name }
                }
                XmlEvent::Text(ref e) => ReportEvent::Text(e.unescape()?.into_owned()),
                XmlEvent::CData(ref e) => ReportEvent::Text(str::from_utf8(e.as_ref())?.to_string()),
                XmlEvent::Eof => return Self::check_complete(self.seen_root, &self.open).map(|()| None),
                _ => continue,
            };
            return Ok(Some(event));
        }
    }

    /// Fails unless a root element was read and every element was closed.
    fn check_complete(seen_root: bool, open: &[String]) -> Result<()> {
        if !seen_root {
            return Err(Error::IncompleteDocument(
                "no root element found".to_string(),
            ));
        }
        match open.last() {
            Some(name) => Err(Error::IncompleteDocument(format!(
                "input ended inside <{}>",
                name
            ))),
            None => Ok(()),
        }
    }

    /// Extracts attributes from a BytesStart element as owned data.
    fn extract_attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attrs.push((key, value));
        }
        Ok(attrs)
    }
}

impl<R: BufRead> Iterator for ReportEventReader<R> {
    type Item = Result<ReportEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_next() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Locale used to read `time` attributes and elements
    pub locale: NumberLocale,
}

impl ParserConfig {
    /// Returns a copy of this configuration using `locale` for numbers.
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// An attribute was absent and a default value was used instead
    MissingAttribute {
        /// Element the attribute was expected on
        element: String,
        /// Name of the absent attribute
        attribute: String,
    },
}

impl ParseWarning {
    fn missing_attribute(element: &str, attribute: &str) -> Self {
        ParseWarning::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MissingAttribute { element, attribute } => {
                write!(f, "no {} attribute found on {} element", attribute, element)
            }
        }
    }
}

/// The outcome of parsing one report document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedReport {
    /// Suites in the order they were first seen
    pub suites: Vec<TestSuiteRecord>,
    /// False when the document is a failsafe summary rather than a report
    pub valid: bool,
    /// Non-fatal problems, in document order
    pub warnings: Vec<ParseWarning>,
}

impl ParsedReport {
    /// Returns true if the document was a test suite report.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Consumes the report, returning its suites.
    pub fn into_suites(self) -> Vec<TestSuiteRecord> {
        self.suites
    }

    /// Returns the suite with the given fully qualified class name.
    pub fn suite(&self, full_class_name: &str) -> Option<&TestSuiteRecord> {
        self.suites
            .iter()
            .find(|suite| suite.full_class_name() == full_class_name)
    }
}

/// Maps a fully qualified class name to its suite's position in the output.
#[derive(Debug, Default)]
pub struct SuiteIndex {
    positions: HashMap<String, usize>,
}

impl SuiteIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of the suite for `class_name`.
    pub fn get(&self, class_name: &str) -> Option<usize> {
        self.positions.get(class_name).copied()
    }

    /// Records `class_name` at `position`, replacing any earlier entry.
    pub fn insert(&mut self, class_name: impl Into<String>, position: usize) {
        self.positions.insert(class_name.into(), position);
    }

    /// Removes the entry for `class_name`. Only used once parsing is over.
    pub fn remove(&mut self, class_name: &str) -> Option<usize> {
        self.positions.remove(class_name)
    }
}

/// Mutable state carried between events.
///
/// Suite handles are positions into the output sequence; they stay valid
/// because suites are only appended until the parse finishes.
#[derive(Debug)]
struct ParseState {
    /// Suite created by the most recent `<testsuite>`
    default_suite: Option<usize>,
    /// Suite new cases are attributed to
    current_suite: Option<usize>,
    /// Case between its start and end tags
    open_case: Option<TestCaseRecord>,
    /// Text collected for the innermost element that needs it
    buffer: Option<String>,
    /// Cleared by `<failsafe-summary>`
    valid: bool,
}

impl ParseState {
    fn new() -> Self {
        Self {
            default_suite: None,
            current_suite: None,
            open_case: None,
            buffer: None,
            valid: true,
        }
    }
}

/// Event-driven parser building suites from a report document.
///
/// Feed events with [`SuiteParser::handle_event`] and call
/// [`SuiteParser::finish`] once the source is exhausted. Each document
/// needs its own parser.
#[derive(Debug)]
pub struct SuiteParser {
    config: ParserConfig,
    state: ParseState,
    suites: Vec<TestSuiteRecord>,
    index: SuiteIndex,
    warnings: Vec<ParseWarning>,
}

impl Default for SuiteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteParser {
    /// Creates a parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with a custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            state: ParseState::new(),
            suites: Vec::new(),
            index: SuiteIndex::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns false once a `<failsafe-summary>` element has been seen.
    pub fn is_valid(&self) -> bool {
        self.state.valid
    }

    /// Processes one event.
    ///
    /// After the document has been found not to be a suite report, every
    /// event is ignored.
    pub fn handle_event(&mut self, event: ReportEvent) -> Result<()> {
        if !self.state.valid {
            return Ok(());
        }

        match event {
            ReportEvent::Start { name, attrs } => self.handle_start(&name, &attrs),
            ReportEvent::Text(text) => {
                self.handle_text(&text);
                Ok(())
            }
            ReportEvent::End { name } => self.handle_end(&name),
        }
    }

    fn handle_start(&mut self, name: &str, attrs: &[(String, String)]) -> Result<()> {
        match name {
            "testsuite" => self.start_suite(attrs),
            "testcase" => self.start_case(attrs),
            "failure" => self.start_outcome(OutcomeKind::Failure, attrs),
            "error" => self.start_outcome(OutcomeKind::Error, attrs),
            "skipped" => self.start_outcome(OutcomeKind::Skipped, attrs),
            "flakyFailure" | "flakyError" => {
                self.current_suite_mut(name)?.number_of_flakes += 1;
                Ok(())
            }
            "failsafe-summary" => {
                debug!("failsafe summary found, document is not a test suite report");
                self.state.valid = false;
                Ok(())
            }
            "time" => {
                self.state.buffer = Some(String::new());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if let Some(buffer) = self.state.buffer.as_mut() {
            buffer.push_str(text);
        }
    }

    fn handle_end(&mut self, name: &str) -> Result<()> {
        match name {
            "testcase" => {
                self.state.buffer = None;
                let case = self.state.open_case.take().ok_or_else(|| {
                    Error::UnexpectedElement("</testcase> without an open <testcase>".to_string())
                })?;
                self.current_suite_mut(name)?.append_case(case);
            }
            "failure" | "error" => {
                let text = self.state.buffer.take().unwrap_or_default();
                if let Some(detail) = self
                    .state
                    .open_case
                    .as_mut()
                    .and_then(|case| case.outcome.as_mut())
                {
                    detail.lines = split_lines(&text).map(str::to_string).collect();
                }
            }
            "time" => {
                let text = self.state.buffer.take().unwrap_or_default();
                let position = self.state.default_suite.ok_or_else(|| {
                    Error::UnexpectedElement("<time> outside any <testsuite>".to_string())
                })?;
                let seconds = self.parse_seconds(&text)?;
                self.suites[position].time_elapsed_seconds = seconds;
            }
            _ => {}
        }
        Ok(())
    }

    fn start_suite(&mut self, attrs: &[(String, String)]) -> Result<()> {
        let name = match attr(attrs, "name") {
            Some(name) => name,
            None => {
                self.warn(ParseWarning::missing_attribute("testsuite", "name"));
                ""
            }
        };
        let full_class_name = match attr(attrs, "group") {
            Some(group) if !group.is_empty() => format!("{}.{}", group, name),
            _ => name.to_string(),
        };

        let mut suite = TestSuiteRecord::new(full_class_name);
        match attr(attrs, "time") {
            Some(time) => suite.time_elapsed_seconds = self.parse_seconds(time)?,
            None => self.warn(ParseWarning::missing_attribute("testsuite", "time")),
        }

        let position = self.push_suite(suite);
        self.state.default_suite = Some(position);
        self.state.current_suite = Some(position);
        Ok(())
    }

    fn start_case(&mut self, attrs: &[(String, String)]) -> Result<()> {
        if let Some(open) = &self.state.open_case {
            return Err(Error::UnexpectedElement(format!(
                "<testcase> nested inside test case {}",
                open.full_name
            )));
        }

        let name = attr(attrs, "name").ok_or_else(|| Error::MissingAttribute {
            element: "testcase".to_string(),
            attribute: "name".to_string(),
        })?;

        if let Some(class_name) = attr(attrs, "classname") {
            let position = match self.index.get(class_name) {
                Some(position) => position,
                None => {
                    debug!("creating suite {} from testcase classname", class_name);
                    self.push_suite(TestSuiteRecord::new(class_name))
                }
            };
            self.state.current_suite = Some(position);
        }

        let position = self.state.current_suite.ok_or_else(|| {
            Error::UnexpectedElement(format!(
                "<testcase name=\"{}\"> without classname outside any <testsuite>",
                name
            ))
        })?;

        let time = match attr(attrs, "time") {
            Some(time) => self.parse_seconds(time)?,
            None => 0.0,
        };

        let mut case = TestCaseRecord::with_name(name);
        let suite = &mut self.suites[position];
        case.set_owner(suite.full_class_name(), suite.name());
        case.time_seconds = time;

        // Only synthesized suites sum their cases; a <testsuite> declares its own time.
        if self.state.default_suite != Some(position) {
            suite.time_elapsed_seconds += time;
        }

        self.state.open_case = Some(case);
        self.state.buffer = Some(String::new());
        Ok(())
    }

    fn start_outcome(&mut self, kind: OutcomeKind, attrs: &[(String, String)]) -> Result<()> {
        let case = self.state.open_case.as_mut().ok_or_else(|| {
            Error::UnexpectedElement(format!("<{}> outside any <testcase>", kind.as_str()))
        })?;
        if case.outcome.is_some() {
            return Err(Error::UnexpectedElement(format!(
                "second outcome <{}> in test case {}",
                kind.as_str(),
                case.full_name
            )));
        }

        let message = attr(attrs, "message").map(str::to_string);
        case.outcome = Some(match kind {
            OutcomeKind::Skipped => OutcomeDetail::new(
                kind,
                Some(message.unwrap_or_else(|| "skipped".to_string())),
                Some("skipped".to_string()),
            ),
            OutcomeKind::Failure | OutcomeKind::Error => {
                OutcomeDetail::new(kind, message, attr(attrs, "type").map(str::to_string))
            }
        });

        let suite = self.current_suite_mut(kind.as_str())?;
        match kind {
            OutcomeKind::Failure => suite.number_of_failures += 1,
            OutcomeKind::Error => suite.number_of_errors += 1,
            OutcomeKind::Skipped => suite.number_of_skipped += 1,
        }

        if kind != OutcomeKind::Skipped {
            self.state.buffer = Some(String::new());
        }
        Ok(())
    }

    /// Finishes the parse, dropping the `<testsuite>` wrapper suite when all
    /// of its cases were moved to suites of their own.
    pub fn finish(mut self) -> ParsedReport {
        if let Some(default) = self.state.default_suite {
            if self.state.current_suite != Some(default)
                && self.suites[default].number_of_tests() == 0
            {
                let removed = self.suites.remove(default);
                self.index.remove(removed.full_class_name());
                debug!("omitting empty suite {}", removed.full_class_name());
            }
        }

        ParsedReport {
            suites: self.suites,
            valid: self.state.valid,
            warnings: self.warnings,
        }
    }

    fn push_suite(&mut self, suite: TestSuiteRecord) -> usize {
        let position = self.suites.len();
        self.index.insert(suite.full_class_name(), position);
        self.suites.push(suite);
        position
    }

    fn current_suite_mut(&mut self, element: &str) -> Result<&mut TestSuiteRecord> {
        match self.state.current_suite {
            Some(position) => Ok(&mut self.suites[position]),
            None => Err(Error::UnexpectedElement(format!(
                "<{}> outside any <testsuite>",
                element
            ))),
        }
    }

    fn parse_seconds(&self, text: &str) -> Result<f64> {
        parse_decimal(text, self.config.locale)
    }

    fn warn(&mut self, warning: ParseWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Looks up an attribute value by name.
fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Parses a complete report document with the default configuration.
pub fn parse<R: BufRead>(reader: R) -> Result<ParsedReport> {
    parse_with_config(reader, ParserConfig::default())
}

/// Parses a complete report document.
///
/// Either the whole document parses, or an error is returned and nothing
/// built so far escapes.
pub fn parse_with_config<R: BufRead>(reader: R, config: ParserConfig) -> Result<ParsedReport> {
    let mut parser = SuiteParser::with_config(config);
    for event in ReportEventReader::from_reader(reader) {
        parser.handle_event(event?)?;
    }
    Ok(parser.finish())
}

/// Opens and parses a UTF-8 report file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedReport> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}
