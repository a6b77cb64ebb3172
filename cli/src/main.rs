//! CLI entrypoint for Triage Consensus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use triage_application::{
    AssessmentRepository, NoProgress, ProgressNotifier, RunTriageError, SubmissionOutcome,
    SubmitAssessmentError, SubmitAssessmentUseCase,
};
use triage_domain::OutputFormat;
use triage_infrastructure::config::FileLoggingConfig;
use triage_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, JsonlAssessmentRepository, ResilientGateway,
};
use triage_presentation::{
    Cli, ConsoleFormatter, OutputConfig, ProgressMode, ProgressReporter, SimpleProgress,
};

const EXIT_REJECTED: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(cli.verbose, &config.logging)?;
    info!("Starting Triage Consensus");

    for warning in config.validate() {
        warn!("Config: {}", warning);
    }

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.parse_format().0,
        config.output.color,
        cli.quiet,
    );
    ConsoleFormatter::set_color(output.color && std::io::stdout().is_terminal());

    let repository = open_repository(&config, cli.no_store);

    if cli.list || cli.clear_history {
        let repository = repository.context("Assessment storage is disabled")?;
        if cli.list {
            print!("{}", ConsoleFormatter::format_history(&repository.list()?));
        } else {
            let removed = repository.clear()?;
            println!("Removed {} stored assessment(s)", removed);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let note = read_note(cli.note)?;

    // === Dependency Injection ===
    let gemini = GeminiGateway::from_env(&config.backend.api_key_env, &config.backend.model)?
        .with_base_url(&config.backend.base_url);
    let gateway = Arc::new(ResilientGateway::new(gemini, config.backend.behavior()));

    let mut use_case = SubmitAssessmentUseCase::new(gateway);
    if let Some(repository) = repository {
        use_case = use_case.with_repository(repository);
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let progress: Box<dyn ProgressNotifier> =
        match output.progress_mode(std::io::stderr().is_terminal()) {
            ProgressMode::Spinner => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
            ProgressMode::Hidden => Box::new(NoProgress),
        };

    let outcome = match use_case
        .execute_with_progress(&note, progress.as_ref(), &cancel)
        .await
    {
        Ok(outcome) => outcome,
        Err(SubmitAssessmentError::Triage(RunTriageError::Cancelled)) => {
            eprintln!("Cancelled");
            return Ok(ExitCode::from(EXIT_CANCELLED));
        }
        Err(e) => return Err(e.into()),
    };

    match outcome {
        SubmissionOutcome::Rejected { reason } => {
            eprintln!("{}", ConsoleFormatter::format_rejection(&reason));
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        SubmissionOutcome::Completed {
            decision,
            patient_summary,
            stored_id,
        } => {
            let rendered = match output.format {
                OutputFormat::Full => {
                    ConsoleFormatter::format(&note, &decision, &patient_summary, stored_id.as_ref())
                }
                OutputFormat::Summary => ConsoleFormatter::format_summary(&decision),
                OutputFormat::Patient => patient_summary.clone(),
                OutputFormat::Json => {
                    ConsoleFormatter::format_json(&decision, &patient_summary, stored_id.as_ref())
                }
            };
            println!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Install the tracing subscriber: stderr always, plus a file when configured.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => logging
            .level
            .as_deref()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &logging.log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create log directory {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_repository(config: &FileConfig, no_store: bool) -> Option<Arc<dyn AssessmentRepository>> {
    if no_store || !config.storage.enabled {
        return None;
    }
    let path = config.storage.resolved_path()?;
    info!(path = %path.display(), "Using assessment store");
    Some(Arc::new(JsonlAssessmentRepository::new(path)))
}

/// The note from the argument, or all of stdin when it is piped
fn read_note(arg: Option<String>) -> Result<String> {
    if let Some(note) = arg {
        return Ok(note);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("Patient note is required. Pass it as an argument or pipe it on stdin.");
    }

    let mut note = String::new();
    stdin
        .read_to_string(&mut note)
        .context("Failed to read patient note from stdin")?;
    Ok(note)
}
