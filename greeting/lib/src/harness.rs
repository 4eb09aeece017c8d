//! Test case registry and runner.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::greeting::greet;
use crate::report::TestReport;

/// Name and input of the case every default run carries.
const DEFAULT_CASE_NAME: &str = "greets_bob";
const DEFAULT_CASE_INPUT: &str = "Bob";
const DEFAULT_CASE_EXPECTED: &str = "Hello Bob!";

/// The result of running a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every assertion held.
    Passed,
    /// An assertion did not hold.
    Failed {
        /// What was expected and what was observed.
        message: String,
    },
    /// The case body panicked before producing an outcome.
    Panicked {
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    /// The failure message, if the case did not pass.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed { message } | Outcome::Panicked { message } => Some(message),
        }
    }
}

/// Compares two strings, recording a mismatch instead of aborting.
///
/// ## Examples
///
/// ```
/// use greeting_lib::{assert_text_eq, Outcome};
///
/// assert_eq!(assert_text_eq("Hello Bob!", "Hello Bob!"), Outcome::Passed);
/// assert!(!assert_text_eq("Hello Bob!", "Hi Bob!").is_passed());
/// ```
pub fn assert_text_eq(actual: &str, expected: &str) -> Outcome {
    if actual == expected {
        Outcome::Passed
    } else {
        Outcome::Failed {
            message: format!("expected {expected:?}, got {actual:?}"),
        }
    }
}

/// A named check registered with a [`TestRunner`].
pub struct TestCase {
    name: String,
    body: Box<dyn Fn() -> Outcome>,
}

impl TestCase {
    pub fn new(name: impl Into<String>, body: impl Fn() -> Outcome + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the body, converting a panic into [`Outcome::Panicked`].
    fn execute(&self) -> Outcome {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)())) {
            Ok(outcome) => outcome,
            Err(payload) => Outcome::Panicked {
                message: panic_message(payload.as_ref()),
            },
        }
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Builds a case that checks `greet(input)` against `expected`.
pub fn greeting_case(
    name: impl Into<String>,
    input: impl Into<String>,
    expected: impl Into<String>,
) -> TestCase {
    let input = input.into();
    let expected = expected.into();
    TestCase::new(name, move || assert_text_eq(&greet(&input), &expected))
}

/// The recorded result of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub outcome: Outcome,
    pub duration: Duration,
}

/// Runs registered cases synchronously, in registration order.
#[derive(Debug, Default)]
pub struct TestRunner {
    cases: Vec<TestCase>,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner holding the single canonical case: `greet("Bob")` is
    /// `"Hello Bob!"`.
    pub fn default_suite() -> Self {
        Self::new().with_case(greeting_case(
            DEFAULT_CASE_NAME,
            DEFAULT_CASE_INPUT,
            DEFAULT_CASE_EXPECTED,
        ))
    }

    pub fn register(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn with_case(mut self, case: TestCase) -> Self {
        self.register(case);
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Runs every case, even after a failure, and aggregates the results.
    #[tracing::instrument(skip(self), fields(cases = self.cases.len()))]
    pub fn run(&self) -> TestReport {
        let mut results = Vec::with_capacity(self.cases.len());

        for case in &self.cases {
            let started = Instant::now();
            let outcome = case.execute();
            let duration = started.elapsed();

            match &outcome {
                Outcome::Passed => debug!(case = case.name(), ?duration, "case passed"),
                Outcome::Failed { message } => {
                    warn!(case = case.name(), %message, "case failed")
                }
                Outcome::Panicked { message } => {
                    warn!(case = case.name(), %message, "case panicked")
                }
            }

            results.push(CaseResult {
                name: case.name().to_string(),
                outcome,
                duration,
            });
        }

        let report = TestReport::new(results);
        info!(
            total = report.total(),
            failed = report.failure_count(),
            "run finished"
        );
        report
    }
}
