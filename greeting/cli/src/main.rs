//! CLI for greeting people and checking the greeting contract.
//!
//! ## Usage
//!
//! ```bash
//! # Print a greeting
//! greet say Bob
//!
//! # Run the built-in check (exit status is the failure count)
//! greet check
//!
//! # Check a single expectation
//! greet check --name Bob --expect "Hello Bob!"
//!
//! # Run a TOML suite and keep a JSON report
//! greet check --suite cases.toml --format json --report report.json
//!
//! # Generate shell completions
//! source <(COMPLETE=bash greet)
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use greeting_lib::{
    EXIT_HARNESS_ERROR, HarnessError, ReportFormat, SuiteFile, TestRunner, greet, greeting_case,
};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Greet people and check that greetings come out right
#[derive(Debug, Parser)]
#[command(name = "greet", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the greeting for a name
    Say {
        /// Name to greet
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Run greeting checks; the exit status is the number of failures
    Check {
        /// Load cases from a TOML suite file
        #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath, conflicts_with_all = ["name", "expect"])]
        suite: Option<PathBuf>,

        /// Name to greet in an ad-hoc check
        #[arg(short, long, value_name = "NAME", requires = "expect")]
        name: Option<String>,

        /// Expected greeting for an ad-hoc check
        #[arg(short, long, value_name = "TEXT")]
        expect: Option<String>,

        /// Output format printed to stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the rendered report to this file
        #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Error)]
enum GreetError {
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("unknown shell: {0}. Supported: bash, zsh, fish, powershell, elvish")]
    UnknownShell(String),
}

const DEFAULT_NAME: &str = "Bob";

const AFTER_HELP: &str = "\
EXIT STATUS:
  check exits with 0 when every case passes, otherwise with the number of
  failed cases (capped at 124). 125 means the check could not run at all.

SHELL COMPLETIONS:
  Bash (~/.bashrc):
    source <(COMPLETE=bash greet)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh greet)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish greet | source

EXAMPLES:
  greet say Bob                         # Hello Bob!
  greet check                           # built-in check
  greet check --expect \"Hi Bob!\"        # fails, exit status 1
  greet check --suite cases.toml -f json
";

fn main() -> ExitCode {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        return match generate_completions(&shell_name) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(EXIT_HARNESS_ERROR)
            }
        };
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too and must keep exiting 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_HARNESS_ERROR);
        }
    };

    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "check aborted");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_HARNESS_ERROR)
        }
    }
}

/// Initializes stderr logging.
///
/// Priority: RUST_LOG env var > verbose flag > default (warn).
fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Executes a subcommand and returns the exit status it maps to.
fn run(command: Commands) -> Result<u8, GreetError> {
    match command {
        Commands::Say { name } => {
            println!("{}", greet(&name));
            Ok(0)
        }
        Commands::Check {
            suite,
            name,
            expect,
            format,
            report,
        } => {
            let runner = build_runner(suite, name, expect)?;
            debug!(cases = runner.len(), "running checks");

            let report_data = runner.run();
            let format = ReportFormat::from(format);
            print!("{}", report_data.render(format)?);

            if let Some(path) = report {
                report_data.write_to(&path, format)?;
            }

            Ok(report_data.exit_code())
        }
    }
}

/// Picks the cases to run: a suite file, one ad-hoc case, or the default.
fn build_runner(
    suite: Option<PathBuf>,
    name: Option<String>,
    expect: Option<String>,
) -> Result<TestRunner, GreetError> {
    if let Some(path) = suite {
        return Ok(SuiteFile::load(&path)?.into_runner());
    }

    Ok(match expect {
        Some(expected) => {
            let name = name.unwrap_or_else(|| DEFAULT_NAME.to_string());
            let label = format!("greet_{}", name.to_lowercase().replace(' ', "_"));
            TestRunner::new().with_case(greeting_case(label, name, expected))
        }
        None => TestRunner::default_suite(),
    })
}

/// Generate shell completions to stdout.
fn generate_completions(shell_name: &str) -> Result<(), GreetError> {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => return Err(GreetError::UnknownShell(shell_name.to_string())),
    };

    clap_complete::generate(shell, &mut Cli::command(), "greet", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_runner_is_the_bob_check() {
        let runner = build_runner(None, None, None).unwrap();
        let report = runner.run();
        assert_eq!(report.total(), 1);
        assert_eq!(report.results()[0].name, "greets_bob");
        assert!(report.is_success());
    }

    #[test]
    fn ad_hoc_runner_defaults_name_to_bob() {
        let report = build_runner(None, None, Some("Hi Bob!".to_string()))
            .unwrap()
            .run();
        assert_eq!(report.results()[0].name, "greet_bob");
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn ad_hoc_label_is_derived_from_name() {
        let report = build_runner(
            None,
            Some("Bob Smith".to_string()),
            Some("Hello Bob Smith!".to_string()),
        )
        .unwrap()
        .run();
        assert_eq!(report.results()[0].name, "greet_bob_smith");
        assert!(report.is_success());
    }

    #[test]
    fn unknown_shell_is_rejected() {
        assert!(matches!(
            generate_completions("tcsh"),
            Err(GreetError::UnknownShell(_))
        ));
    }

    #[test]
    fn missing_suite_is_a_harness_error() {
        let err = build_runner(Some(PathBuf::from("/no/such/suite.toml")), None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            GreetError::Harness(HarnessError::ReadSuite { .. })
        ));
    }
}
