//! Table-driven greeting cases loaded from TOML.
//!
//! ```toml
//! [[case]]
//! name = "bob"
//! input = "Bob"
//! expected = "Hello Bob!"
//!
//! # `expected` defaults to the greeting contract
//! [[case]]
//! name = "alice"
//! input = "Alice"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{HarnessError, Result};
use crate::greeting::greet;
use crate::harness::{TestRunner, greeting_case};

/// One row of a suite file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteCase {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub expected: Option<String>,
}

impl SuiteCase {
    /// The expected greeting, falling back to `greet(input)`.
    pub fn expected(&self) -> String {
        self.expected.clone().unwrap_or_else(|| greet(&self.input))
    }
}

/// A parsed suite file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteFile {
    #[serde(rename = "case", default)]
    pub cases: Vec<SuiteCase>,
}

impl SuiteFile {
    /// Parses a suite from TOML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let suite: SuiteFile =
            toml::from_str(content).map_err(|source| HarnessError::ParseSuite {
                path: origin.to_path_buf(),
                source,
            })?;

        if suite.cases.is_empty() {
            return Err(HarnessError::EmptySuite);
        }
        Ok(suite)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading suite");
        let content = std::fs::read_to_string(path).map_err(|source| HarnessError::ReadSuite {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    pub fn into_runner(self) -> TestRunner {
        self.cases.into_iter().fold(TestRunner::new(), |runner, case| {
            let expected = case.expected();
            runner.with_case(greeting_case(case.name, case.input, expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<SuiteFile> {
        SuiteFile::from_toml_str(content, Path::new("inline.toml"))
    }

    #[test]
    fn parses_cases_in_order() {
        let suite = parse(
            r#"
            [[case]]
            name = "bob"
            input = "Bob"
            expected = "Hello Bob!"

            [[case]]
            name = "alice"
            input = "Alice"
            "#,
        )
        .expect("valid suite");

        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.cases[0].name, "bob");
        assert_eq!(suite.cases[1].expected, None);
    }

    #[test]
    fn missing_expected_defaults_to_greeting() {
        let case = SuiteCase {
            name: "alice".to_string(),
            input: "Alice".to_string(),
            expected: None,
        };
        assert_eq!(case.expected(), "Hello Alice!");
    }

    #[test]
    fn empty_suite_is_rejected() {
        assert!(matches!(parse(""), Err(HarnessError::EmptySuite)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse(
            r#"
            [[case]]
            name = "bob"
            input = "Bob"
            expect = "Hello Bob!"
            "#,
        )
        .expect_err("typo should fail");
        assert!(matches!(err, HarnessError::ParseSuite { .. }));
        assert!(err.to_string().contains("inline.toml"));
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = parse("[[case]]\nname = \"bob\"\n").expect_err("input is required");
        assert!(matches!(err, HarnessError::ParseSuite { .. }));
    }

    #[test]
    fn runner_counts_mismatches() {
        let report = parse(
            r#"
            [[case]]
            name = "right"
            input = "Bob"

            [[case]]
            name = "wrong"
            input = "Bob"
            expected = "Hi Bob!"
            "#,
        )
        .expect("valid suite")
        .into_runner()
        .run();

        assert_eq!(report.total(), 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results()[1].name, "wrong");
    }
}
