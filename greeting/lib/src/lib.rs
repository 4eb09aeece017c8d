//! Greeting function plus a small registry-based test harness.
//!
//! The harness runs named cases in registration order and aggregates their
//! outcomes into a [`TestReport`] whose [`TestReport::exit_code`] is meant to
//! become the process exit status, so a failing check can never look like
//! a successful one.
//!
//! ## Core Pieces
//!
//! - [`greet`] - Formats `"Hello <name>!"`
//! - [`TestCase`] / [`Outcome`] - A named check and its result
//! - [`TestRunner`] - Registers cases and runs them
//! - [`TestReport`] - Aggregated results, rendering and exit status
//! - [`SuiteFile`] - Table-driven greeting cases loaded from TOML
//!
//! ## Examples
//!
//! ```rust
//! use greeting_lib::{greet, TestRunner};
//!
//! assert_eq!(greet("Bob"), "Hello Bob!");
//!
//! let report = TestRunner::default_suite().run();
//! assert!(report.is_success());
//! assert_eq!(report.exit_code(), 0);
//! ```

mod error;
mod greeting;
mod harness;
mod report;
mod suite;

pub use error::{HarnessError, Result};
pub use greeting::greet;
pub use harness::{CaseResult, Outcome, TestCase, TestRunner, assert_text_eq, greeting_case};
pub use report::{EXIT_FAILURE_CAP, EXIT_HARNESS_ERROR, ReportFormat, TestReport};
pub use suite::{SuiteCase, SuiteFile};
