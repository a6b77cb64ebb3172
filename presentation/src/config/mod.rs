//! Presentation-level configuration
//!
//! Resolves how results are rendered from CLI flags and file settings.

use triage_domain::OutputFormat;

/// Output settings after CLI flags have been applied over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub show_progress: bool,
}

/// How turn progress is shown on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Hidden,
    /// One line per event, for pipes and log captures
    Plain,
    Spinner,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI format wins over the file format. JSON output never shows progress.
    pub fn resolve(
        cli_format: Option<OutputFormat>,
        file_format: Option<OutputFormat>,
        color: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            show_progress: !quiet && format != OutputFormat::Json,
        }
    }

    /// Spinners only render on a terminal; redirected stderr gets plain lines.
    pub fn progress_mode(&self, stderr_is_terminal: bool) -> ProgressMode {
        match (self.show_progress, stderr_is_terminal) {
            (false, _) => ProgressMode::Hidden,
            (true, true) => ProgressMode::Spinner,
            (true, false) => ProgressMode::Plain,
        }
    }
}
