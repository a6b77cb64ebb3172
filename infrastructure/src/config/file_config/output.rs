//! Output configuration from TOML (`[output]` section)

use super::ConfigWarning;
use serde::{Deserialize, Serialize};
use triage_domain::OutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// "full", "summary", "patient" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parse `format`, returning a warning when it is not recognized.
    pub fn parse_format(&self) -> (Option<OutputFormat>, Option<ConfigWarning>) {
        match self.format.as_deref().map(str::parse::<OutputFormat>) {
            None => (None, None),
            Some(Ok(format)) => (Some(format), None),
            Some(Err(e)) => (
                None,
                Some(ConfigWarning::new(
                    "output.format",
                    format!("{}, falling back to 'full'", e),
                )),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "patient"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.parse_format().0, Some(OutputFormat::Patient));
    }

    #[test]
    fn test_unknown_format_warns() {
        let config = FileOutputConfig {
            format: Some("synthesis".to_string()),
            color: true,
        };
        let (format, warning) = config.parse_format();
        assert_eq!(format, None);
        assert_eq!(warning.unwrap().field, "output.format");
    }
}
