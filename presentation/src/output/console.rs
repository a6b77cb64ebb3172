//! Console output formatter for triage results

use colored::Colorize;
use serde_json::json;
use triage_application::{AssessmentId, AssessmentRecord};
use triage_domain::{FinalDecision, FinalLevel};

/// Formats triage results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this formatter renders
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the complete result
    pub fn format(
        note: &str,
        decision: &FinalDecision,
        patient_summary: &str,
        stored_id: Option<&AssessmentId>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("ESI Triage Result"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Patient Note:".cyan().bold(), note));

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&Self::decision_block(decision));

        output.push_str(&Self::section_header("Triage Nurse"));
        output.push_str(&format!("{}\n", Self::or_none(&decision.nurse_reasoning)));

        output.push_str(&Self::section_header("ER Physician"));
        output.push_str(&format!("{}\n", Self::or_none(&decision.doctor_reasoning)));

        output.push_str(&Self::section_header("Patient Summary"));
        output.push_str(patient_summary);

        output.push_str(&format!("\n{} {}\n", "Stored:".dimmed(), Self::stored_label(stored_id)));
        output.push_str(&Self::footer());

        output
    }

    /// Format the decision block only (concise output)
    pub fn format_summary(decision: &FinalDecision) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Triage Decision ===".cyan().bold()));
        output.push_str(&Self::decision_block(decision));
        output
    }

    /// Format as JSON
    pub fn format_json(
        decision: &FinalDecision,
        patient_summary: &str,
        stored_id: Option<&AssessmentId>,
    ) -> String {
        let value = json!({
            "decision": decision,
            "patient_summary": patient_summary,
            "stored_id": stored_id,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a note refused by input screening
    pub fn format_rejection(reason: &str) -> String {
        format!("{} {}", "Rejected:".red().bold(), reason)
    }

    /// Format stored assessments, one line each
    pub fn format_history(records: &[AssessmentRecord]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No stored assessments.".dimmed());
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&format!(
                "{}  {}  {}  {}\n",
                record.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                Self::level_badge(record.decision.esi_level),
                record.decision.consensus_kind.label(),
                Self::truncate(&record.note, 60),
            ));
            output.push_str(&format!("    {}\n", record.id.to_string().dimmed()));
        }
        output
    }

    fn decision_block(decision: &FinalDecision) -> String {
        let consensus = if decision.consensus_kind.is_consensus() {
            decision.consensus_kind.label().green()
        } else {
            decision.consensus_kind.label().yellow()
        };

        format!(
            "{} {} ({})\n{} {}\n{} {}\n",
            "ESI Level:".bold(),
            Self::level_badge(decision.esi_level),
            decision.description,
            "Consensus:".bold(),
            consensus,
            "Physician reviews:".bold(),
            decision.iterations,
        )
    }

    fn level_badge(level: FinalLevel) -> String {
        let text = level.to_string();
        match level.level().map(|l| l.value()) {
            Some(1) | Some(2) => text.red().bold().to_string(),
            Some(3) => text.yellow().bold().to_string(),
            Some(_) => text.green().bold().to_string(),
            None => text.dimmed().to_string(),
        }
    }

    fn stored_label(stored_id: Option<&AssessmentId>) -> String {
        stored_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "not stored".to_string())
    }

    fn or_none(text: &str) -> &str {
        if text.trim().is_empty() { "(no response)" } else { text }
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if single_line.chars().count() <= max_chars {
            single_line
        } else {
            let cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", cut)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_domain::{ConsensusKind, EsiLevel, PatientNote, translate};

    fn decision() -> FinalDecision {
        let level = FinalLevel::Determined(EsiLevel::EMERGENT);
        FinalDecision {
            esi_level: level,
            description: level.description().to_string(),
            consensus_kind: ConsensusKind::MutualAgreement,
            nurse_reasoning: "Possible ACS.".to_string(),
            doctor_reasoning: String::new(),
            iterations: 1,
        }
    }

    #[test]
    fn test_format_full_contains_sections() {
        let decision = decision();
        let summary = translate(&decision);
        let output = ConsoleFormatter::format("chest pain", &decision, &summary, None);

        assert!(output.contains("chest pain"));
        assert!(output.contains("Possible ACS."));
        assert!(output.contains("(no response)"));
        assert!(output.contains("Yes - Mutual Agreement"));
        assert!(output.contains("Your Triage Result"));
        assert!(output.contains("not stored"));
    }

    #[test]
    fn test_format_json_shape() {
        let decision = decision();
        let id = AssessmentId::new();
        let output = ConsoleFormatter::format_json(&decision, "summary", Some(&id));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["decision"]["esi_level"], 2);
        assert_eq!(value["decision"]["consensus_kind"], "mutual_agreement");
        assert_eq!(value["patient_summary"], "summary");
        assert_eq!(value["stored_id"], id.to_string());
    }

    #[test]
    fn test_format_json_without_id() {
        let output = ConsoleFormatter::format_json(&decision(), "s", None);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["stored_id"].is_null());
    }

    #[test]
    fn test_format_history() {
        assert!(ConsoleFormatter::format_history(&[]).contains("No stored assessments."));

        let note = PatientNote::try_new("a very long note ".repeat(10)).unwrap();
        let record = AssessmentRecord::new(&note, decision());
        let output = ConsoleFormatter::format_history(&[record.clone()]);
        assert!(output.contains(&record.id.to_string()));
        assert!(output.contains("..."));
    }

    #[test]
    fn test_truncate_collapses_whitespace() {
        assert_eq!(ConsoleFormatter::truncate("a\n  b", 10), "a b");
        assert_eq!(ConsoleFormatter::truncate("abcdefghij", 6), "abc...");
    }
}
