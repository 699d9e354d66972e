//! Command-line interface.

use std::path::PathBuf;

use apiprobe_application::SuiteKind;
use apiprobe_infrastructure::Overrides;
use clap::{Parser, ValueEnum};

/// HTTP contract-verification harness for the appointment-scheduling API.
#[derive(Debug, Parser)]
#[command(name = "apiprobe", version, long_about = None)]
pub struct Cli {
    /// TOML configuration file (default: ./apiprobe.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the target API, e.g. http://localhost:8000/api
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Account used for registration and login
    #[arg(long, value_name = "USER")]
    pub username: Option<String>,

    /// Password of that account
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Also write the results as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Suite to run
    #[arg(value_enum)]
    pub suite: SuiteSelection,
}

impl Cli {
    /// Flags that override configuration values.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Which built-in suites to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteSelection {
    /// Endpoint contract checks
    Backend,
    /// 422 investigation and concurrent burst
    Investigate,
    /// Frontend request simulation
    Frontend,
    /// All three, in that order
    All,
}

impl SuiteSelection {
    /// Suites in execution order.
    #[must_use]
    pub fn kinds(self) -> Vec<SuiteKind> {
        match self {
            Self::Backend => vec![SuiteKind::Backend],
            Self::Investigate => vec![SuiteKind::Investigate],
            Self::Frontend => vec![SuiteKind::Frontend],
            Self::All => SuiteKind::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags_and_suite() {
        let cli = Cli::try_parse_from([
            "apiprobe",
            "--base-url",
            "http://127.0.0.1:9000/api",
            "--username",
            "owner@example.com",
            "-v",
            "all",
        ])
        .unwrap_or_else(|e| unreachable!("valid arguments rejected: {e}"));

        assert!(cli.verbose);
        assert_eq!(cli.suite, SuiteSelection::All);
        assert_eq!(
            cli.overrides(),
            Overrides {
                base_url: Some("http://127.0.0.1:9000/api".to_string()),
                username: Some("owner@example.com".to_string()),
                password: None,
            }
        );
        assert_eq!(
            cli.suite.kinds(),
            vec![SuiteKind::Backend, SuiteKind::Investigate, SuiteKind::Frontend]
        );
    }

    #[test]
    fn test_unknown_suite_is_rejected() {
        assert!(Cli::try_parse_from(["apiprobe", "smoke"]).is_err());
        assert!(Cli::try_parse_from(["apiprobe"]).is_err());
    }
}
