//! Aggregated run results, their rendering, and the exit status they map to.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::harness::{CaseResult, Outcome};

/// Highest exit status used for failing cases.
///
/// Failure counts above this are clamped so they never wrap around to a
/// success status or collide with [`EXIT_HARNESS_ERROR`].
pub const EXIT_FAILURE_CAP: u8 = 124;

/// Exit status when the harness itself could not run (bad suite, unwritable
/// report, usage error).
pub const EXIT_HARNESS_ERROR: u8 = 125;

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per case plus a summary.
    #[default]
    Text,
    /// A machine-readable JSON document.
    Json,
}

/// Results of one run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    results: Vec<CaseResult>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    cases: Vec<JsonCase<'a>>,
}

#[derive(Serialize)]
struct JsonCase<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    duration_ms: f64,
}

impl TestReport {
    pub fn new(results: Vec<CaseResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    /// Number of failed or panicked cases.
    pub fn failure_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// The process exit status for this run: `0` on success, otherwise the
    /// failure count clamped to [`EXIT_FAILURE_CAP`].
    ///
    /// ```
    /// use greeting_lib::{greeting_case, TestRunner};
    ///
    /// let report = TestRunner::new()
    ///     .with_case(greeting_case("wrong", "Bob", "Hi Bob!"))
    ///     .run();
    /// assert_eq!(report.exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> u8 {
        let failures = self.failure_count();
        u8::try_from(failures)
            .unwrap_or(EXIT_FAILURE_CAP)
            .min(EXIT_FAILURE_CAP)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
        }
    }

    /// Renders the report and writes it to `path`.
    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<()> {
        let rendered = self.render(format)?;
        std::fs::write(path, rendered).map_err(|source| HarnessError::WriteReport {
            path: path.to_path_buf(),
            source,
        })
    }

    fn render_text(&self) -> String {
        let mut out = String::new();

        for result in &self.results {
            // Writing into a String cannot fail.
            let _ = match &result.outcome {
                Outcome::Passed => writeln!(out, "ok      {}", result.name),
                Outcome::Failed { message } => {
                    writeln!(out, "FAILED  {}: {message}", result.name)
                }
                Outcome::Panicked { message } => {
                    writeln!(out, "PANIC   {}: {message}", result.name)
                }
            };
        }

        out.push('\n');
        if self.is_success() {
            let _ = writeln!(out, "OK ({})", self.total());
        } else {
            let _ = writeln!(
                out,
                "FAILURES!!!\nTests run: {}, Failures: {}",
                self.total(),
                self.failure_count()
            );
        }
        out
    }

    fn render_json(&self) -> Result<String> {
        let cases = self
            .results
            .iter()
            .map(|r| JsonCase {
                name: &r.name,
                status: match r.outcome {
                    Outcome::Passed => "passed",
                    Outcome::Failed { .. } => "failed",
                    Outcome::Panicked { .. } => "panicked",
                },
                message: r.outcome.message(),
                duration_ms: r.duration.as_secs_f64() * 1000.0,
            })
            .collect();

        let doc = JsonReport {
            total: self.total(),
            passed: self.passed_count(),
            failed: self.failure_count(),
            cases,
        };
        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        Ok(json)
    }
}
