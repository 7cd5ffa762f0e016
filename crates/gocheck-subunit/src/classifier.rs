// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification
//!
//! gocheck reports each test with a handful of fixed line shapes:
//!
//! ```text
//! ****** Running testSuite.TestExists
//! PASS: /src/apt_test.go:34: testSuite.TestSuccess      0.005s
//! FAIL: /src/install_test.go:85: testSuite.TestFail
//! SKIP: /src/info_test.go:36: testSuite.TestSkip (skip reason)
//! SKIP: /src/info_test.go:36: testSuite.TestSkip
//! ```
//!
//! [`LineClassifier`] maps one line to a [`Classification`] or `None`. The
//! rules are tried in order and the first match wins, so the inline-reason
//! SKIP rule is always consulted before the bare one.

use regex::Regex;

use crate::error::ReportError;
use crate::event::TestStatus;

const RUNNING_PATTERN: &str = r"^\*{6} Running (?P<id>\S+)\s*$";
const PASS_PATTERN: &str = r"^PASS: (?P<loc>.+?:\d+): (?P<id>\S+)\s+\d+(?:\.\d+)?s\s*$";
const FAIL_PATTERN: &str = r"^(?:FAIL|PANIC): (?P<loc>.+?:\d+): (?P<id>\S+)\s*$";
const SKIP_REASON_PATTERN: &str =
    r"^SKIP: (?P<loc>.+?:\d+): (?P<id>\S+) \((?P<reason>.*)\)\s*$";
const SKIP_PATTERN: &str = r"^SKIP: (?P<loc>.+?:\d+): (?P<id>\S.*?)\s*$";

/// Method-name prefixes of fixture methods
const FIXTURE_PREFIXES: [&str; 2] = ["SetUp", "TearDown"];

/// The recognized shape of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineShape {
    /// `****** Running <id>`
    Running,
    /// `PASS: <loc>: <id>  <duration>`
    Pass,
    /// `FAIL: <loc>: <id>` (also `PANIC:`)
    Fail,
    /// `SKIP: <loc>: <id> (<reason>)`
    SkipWithReason(String),
    /// `SKIP: <loc>: <text>`, where the text is a test id or a
    /// continuation reason
    Skip,
}

/// A classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Which shape matched
    pub shape: LineShape,
    /// Test identifier, or the raw text of a bare SKIP line
    pub test_id: String,
    /// `<file>:<line>` location, absent on `Running` lines
    pub location: Option<String>,
}

impl Classification {
    /// Subunit status for this line
    #[must_use]
    pub fn status(&self) -> TestStatus {
        match self.shape {
            LineShape::Running => TestStatus::Exists,
            LineShape::Pass => TestStatus::Success,
            LineShape::Fail => TestStatus::Fail,
            LineShape::SkipWithReason(_) | LineShape::Skip => TestStatus::Skip,
        }
    }

    /// Inline skip reason, if the line carried one
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match &self.shape {
            LineShape::SkipWithReason(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    Running,
    Pass,
    Fail,
    SkipWithReason,
    Skip,
}

#[derive(Debug, Clone)]
struct Rule {
    kind: RuleKind,
    regex: Regex,
}

/// Classifies single lines of gocheck output
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Vec<Rule>,
}

impl LineClassifier {
    /// Build the classifier from its fixed rule set
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPattern` if one of the rules does not
    /// compile. This never depends on test output.
    pub fn new() -> Result<Self, ReportError> {
        let table = [
            (RuleKind::Running, RUNNING_PATTERN),
            (RuleKind::Pass, PASS_PATTERN),
            (RuleKind::Fail, FAIL_PATTERN),
            (RuleKind::SkipWithReason, SKIP_REASON_PATTERN),
            (RuleKind::Skip, SKIP_PATTERN),
        ];

        let rules = table
            .into_iter()
            .map(|(kind, pattern)| {
                Ok(Rule {
                    kind,
                    regex: compile(pattern)?,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        Ok(Self { rules })
    }

    /// Classify one line (without its trailing newline)
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<Classification> {
        self.rules.iter().find_map(|rule| {
            let caps = rule.regex.captures(line)?;
            let test_id = caps.name("id")?.as_str().to_string();
            let location = caps.name("loc").map(|m| m.as_str().to_string());

            let shape = match rule.kind {
                RuleKind::Running => LineShape::Running,
                RuleKind::Pass => LineShape::Pass,
                RuleKind::Fail => LineShape::Fail,
                RuleKind::SkipWithReason => {
                    LineShape::SkipWithReason(caps.name("reason")?.as_str().to_string())
                }
                RuleKind::Skip => LineShape::Skip,
            };

            Some(Classification {
                shape,
                test_id,
                location,
            })
        })
    }
}

/// Compile a line pattern
///
/// # Errors
///
/// Returns `ReportError::InvalidPattern` if the pattern is malformed.
pub fn compile(pattern: &str) -> Result<Regex, ReportError> {
    Regex::new(pattern).map_err(|source| ReportError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Match `text` against `pattern`
///
/// # Errors
///
/// Returns `ReportError::InvalidPattern` if the pattern is malformed, so a
/// broken pattern is never mistaken for a non-matching line.
pub fn match_string(pattern: &str, text: &str) -> Result<bool, ReportError> {
    Ok(compile(pattern)?.is_match(text))
}

/// Method part of a dotted `Suite.Method` identifier
#[must_use]
pub fn method_name(test_id: &str) -> &str {
    test_id.rsplit('.').next().unwrap_or(test_id)
}

/// Whether the test id names a `SetUp*` or `TearDown*` fixture method
#[must_use]
pub fn is_fixture(test_id: &str) -> bool {
    let method = method_name(test_id);
    FIXTURE_PREFIXES
        .iter()
        .any(|prefix| method.starts_with(prefix))
}

/// Whether the text of a bare SKIP line reads as a dotted test id rather
/// than a continuation reason
#[must_use]
pub fn is_test_id(text: &str) -> bool {
    !text.is_empty() && !text.contains(char::is_whitespace) && text.contains('.')
}
