//! Output formatting for different formats.

use clap::ValueEnum;
use scanguard::{Rejection, ValidationResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable text
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, json"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Outcome of checking one target, flattened for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    /// What was checked, as given on the command line
    pub target: String,
    /// Whether the target may be scanned
    pub allowed: bool,
    /// Address the scanner should connect to, when one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_ip: Option<String>,
    /// Host name of the target, when one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Stable rejection code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    /// Rejection message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckReport {
    /// Report for a URL validation outcome.
    pub fn from_outcome(target: &str, outcome: Result<ValidationResult, Rejection>) -> Self {
        match outcome {
            Ok(result) => Self {
                target: target.to_string(),
                allowed: true,
                resolved_ip: result.resolved_ip,
                hostname: result.hostname,
                code: None,
                reason: None,
            },
            Err(rejection) => Self::rejected(target, &rejection),
        }
    }

    /// Report for a rejected target.
    pub fn rejected(target: &str, rejection: &Rejection) -> Self {
        Self {
            target: target.to_string(),
            allowed: false,
            resolved_ip: None,
            hostname: None,
            code: Some(rejection.code()),
            reason: Some(rejection.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn rejected_report_carries_code() {
        let rejection = Rejection::DisallowedProtocol {
            scheme: "ftp".into(),
        };
        let report = CheckReport::from_outcome("ftp://example.com", Err(rejection));
        assert!(!report.allowed);
        assert_eq!(report.code, Some("disallowed_protocol"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["allowed"], false);
        assert!(json.get("resolved_ip").is_none());
    }

    #[test]
    fn allowed_report_keeps_resolution() {
        let result = ValidationResult {
            original_url: "https://example.com".into(),
            resolved_ip: Some("93.184.216.34".into()),
            hostname: Some("example.com".into()),
        };
        let report = CheckReport::from_outcome("https://example.com", Ok(result));
        assert!(report.allowed);
        assert_eq!(report.resolved_ip.as_deref(), Some("93.184.216.34"));
        assert!(report.code.is_none());
    }
}
