//! Progress reporting for triage negotiations

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use triage_application::ports::progress::ProgressNotifier;
use triage_domain::{FinalDecision, Role, StructuredAssessment};

/// Reports progress with a spinner per role turn
pub struct ProgressReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn turn_prefix(role: Role, cycle: u32) -> String {
        format!("Round {}: {}", cycle, role.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn level_text(assessment: &StructuredAssessment) -> String {
    assessment
        .esi_level
        .map(|level| format!("ESI {}", level))
        .unwrap_or_else(|| "no level".to_string())
}

impl ProgressNotifier for ProgressReporter {
    fn on_turn_start(&self, role: Role, cycle: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::turn_prefix(role, cycle));
        pb.set_message("thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut current) = self.current.lock() {
            *current = Some(pb);
        }
    }

    fn on_turn_complete(&self, _role: Role, assessment: &StructuredAssessment) {
        if let Ok(mut current) = self.current.lock()
            && let Some(pb) = current.take()
        {
            pb.finish_with_message(format!(
                "{} {} (confidence: {})",
                "v".green(),
                level_text(assessment),
                assessment.confidence
            ));
        }
    }

    fn on_agreement_evaluated(&self, agreed: bool, cycle: u32) {
        if agreed {
            eprintln!("  {} consensus reached in round {}", "=".green(), cycle);
        } else {
            eprintln!("  {} no agreement in round {}", "~".yellow(), cycle);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_turn_start(&self, role: Role, cycle: u32) {
        eprintln!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::turn_prefix(role, cycle).bold()
        );
    }

    fn on_turn_complete(&self, _role: Role, assessment: &StructuredAssessment) {
        eprintln!("  {} {}", "v".green(), level_text(assessment));
    }

    fn on_negotiation_complete(&self, decision: &FinalDecision) {
        eprintln!(
            "{} ESI {} after {} physician review(s)\n",
            "=>".cyan(),
            decision.esi_level,
            decision.iterations
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::extract;

    #[test]
    fn test_turn_prefix() {
        assert_eq!(
            ProgressReporter::turn_prefix(Role::Doctor, 2),
            "Round 2: ER Physician"
        );
    }

    #[test]
    fn test_level_text() {
        assert_eq!(level_text(&extract("ESI Level: 3")), "ESI 3");
        assert_eq!(level_text(&extract("nothing")), "no level");
    }

    #[test]
    fn test_reporter_turn_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_turn_start(Role::Nurse, 1);
        assert!(reporter.current.lock().unwrap().is_some());
        reporter.on_turn_complete(Role::Nurse, &extract("ESI Level: 2"));
        assert!(reporter.current.lock().unwrap().is_none());
    }
}
