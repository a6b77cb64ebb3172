//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for triage results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Decision, both reasonings and the patient summary
    Full,
    /// Only the decision block
    Summary,
    /// Only the patient-facing summary
    Patient,
    /// JSON output
    Json,
}

impl From<OutputFormat> for triage_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => triage_domain::OutputFormat::Full,
            OutputFormat::Summary => triage_domain::OutputFormat::Summary,
            OutputFormat::Patient => triage_domain::OutputFormat::Patient,
            OutputFormat::Json => triage_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for triage-consensus
#[derive(Parser, Debug)]
#[command(name = "triage-consensus")]
#[command(author, version, about = "ESI triage by nurse/doctor consensus")]
#[command(long_about = r#"
Triage Consensus estimates an Emergency Severity Index (ESI 1-5) for a patient
complaint. A triage nurse pass proposes a level, an ER physician pass reviews
it, and the two take turns (at most two physician reviews) until they agree.

Configuration files are loaded from (in priority order):
1. TRIAGE_* environment variables (e.g. TRIAGE_BACKEND__MODEL)
2. --config <path>     Explicit config file
3. ./triage.toml       Project-level config
4. ~/.config/triage-consensus/config.toml   Global config

Example:
  triage-consensus "chest pain radiating to left arm, shortness of breath"
  echo "twisted ankle, can walk" | triage-consensus -o patient
  triage-consensus --list
"#)]
pub struct Cli {
    /// The patient note to triage (read from stdin when omitted)
    pub note: Option<String>,

    /// Output format (defaults to the configured format, then "full")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not store this assessment
    #[arg(long)]
    pub no_store: bool,

    /// List stored assessments, newest first, and exit
    #[arg(long, conflicts_with_all = ["note", "clear_history"])]
    pub list: bool,

    /// Delete all stored assessments and exit
    #[arg(long, conflicts_with = "note")]
    pub clear_history: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_note_and_flags() {
        let cli = Cli::try_parse_from(["triage-consensus", "-vv", "-o", "json", "--no-store", "fever"]).unwrap();
        assert_eq!(cli.note.as_deref(), Some("fever"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.no_store);
    }

    #[test]
    fn test_list_conflicts_with_note() {
        assert!(Cli::try_parse_from(["triage-consensus", "--list", "fever"]).is_err());
        assert!(Cli::try_parse_from(["triage-consensus", "--list"]).unwrap().list);
    }

    #[test]
    fn test_format_converts_to_domain() {
        assert_eq!(
            triage_domain::OutputFormat::from(OutputFormat::Patient),
            triage_domain::OutputFormat::Patient
        );
    }
}
