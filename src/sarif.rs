//! Typed subset of SARIF v2.1.0, the findings-interchange format emitted by
//! most static analysis tools.
//!
//! Only the fields the conversion needs are modeled; everything else in the
//! document is ignored rather than validated. Shape problems that make the
//! conversion impossible (unparseable JSON, no runs) are fatal; absent
//! optional fields degrade to documented fallbacks downstream.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SarifError {
    #[error("input is not a valid SARIF document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("SARIF document contains no runs")]
    NoRuns,
}

/// The top-level SARIF log object.
#[derive(Debug, Clone, Deserialize)]
pub struct SarifLog {
    #[serde(default)]
    pub runs: Vec<SarifRun>,
}

impl SarifLog {
    /// Parse a serialized SARIF document.
    pub fn parse(input: &str) -> Result<Self, SarifError> {
        let log: SarifLog = serde_json::from_str(input)?;
        if log.runs.is_empty() {
            return Err(SarifError::NoRuns);
        }
        Ok(log)
    }

    /// The run the conversion consumes. Multi-run documents are not
    /// supported; only the first run is read.
    pub fn first_run(&self) -> &SarifRun {
        &self.runs[0]
    }
}

/// A single analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

impl SarifRun {
    pub fn tool_name(&self) -> &str {
        &self.tool.driver.name
    }

    pub fn rules(&self) -> &[SarifRule] {
        &self.tool.driver.rules
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarifDriver {
    #[serde(default = "unknown_tool")]
    pub name: String,
    #[serde(default)]
    pub rules: Vec<SarifRule>,
}

fn unknown_tool() -> String {
    "unknown".to_string()
}

/// A rule descriptor from the tool's rule catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: String,
    pub short_description: Option<SarifMessage>,
    pub full_description: Option<SarifMessage>,
}

impl SarifRule {
    /// Best available description: full text first, short text second.
    /// An empty text does not shadow the next fallback.
    pub fn description(&self) -> &str {
        [&self.full_description, &self.short_description]
            .into_iter()
            .flatten()
            .map(|m| m.text.as_str())
            .find(|t| !t.is_empty())
            .unwrap_or("")
    }
}

/// One reported occurrence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub message: Option<SarifMessage>,
    /// Severity hint present in some schema variants ("note"/"warning"/"error")
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub locations: Vec<SarifLocation>,
}

impl SarifResult {
    pub fn message_text(&self) -> &str {
        self.message.as_ref().map(|m| m.text.as_str()).unwrap_or("")
    }

    /// The first physical location, if any was reported.
    pub fn primary_location(&self) -> Option<&SarifPhysicalLocation> {
        self.locations.first().and_then(|l| l.physical_location.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarifMessage {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: Option<SarifPhysicalLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: Option<SarifArtifactLocation>,
    pub region: Option<SarifRegion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SarifArtifactLocation {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let input = r#"{
            "version": "2.1.0",
            "runs": [{
                "tool": {"driver": {"name": "ESLint", "rules": [
                    {"id": "no-eval", "shortDescription": {"text": "Disallow eval"}}
                ]}},
                "results": [{
                    "ruleId": "no-eval",
                    "message": {"text": "eval can be harmful."},
                    "locations": [{"physicalLocation": {
                        "artifactLocation": {"uri": "src/app.js"},
                        "region": {"startLine": 10}
                    }}]
                }]
            }]
        }"#;
        let log = SarifLog::parse(input).unwrap();
        let run = log.first_run();
        assert_eq!(run.tool_name(), "ESLint");
        assert_eq!(run.rules()[0].description(), "Disallow eval");
        let result = &run.results[0];
        assert_eq!(result.message_text(), "eval can be harmful.");
        let loc = result.primary_location().unwrap();
        assert_eq!(loc.region.as_ref().unwrap().start_line, Some(10));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            SarifLog::parse("not json"),
            Err(SarifError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_empty_runs() {
        assert!(matches!(
            SarifLog::parse(r#"{"runs": []}"#),
            Err(SarifError::NoRuns)
        ));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let input = r#"{"runs": [{"tool": {"driver": {"name": "t"}}, "results": [{}]}]}"#;
        let log = SarifLog::parse(input).unwrap();
        let result = &log.first_run().results[0];
        assert_eq!(result.rule_id, None);
        assert_eq!(result.message_text(), "");
        assert!(result.primary_location().is_none());
    }

    #[test]
    fn rule_description_falls_back_to_short_text() {
        let rule = SarifRule {
            id: "r".to_string(),
            short_description: Some(SarifMessage { text: "short".to_string() }),
            full_description: None,
        };
        assert_eq!(rule.description(), "short");
    }

    #[test]
    fn empty_full_description_does_not_shadow_short_text() {
        let rule = SarifRule {
            id: "r".to_string(),
            short_description: Some(SarifMessage { text: "short".to_string() }),
            full_description: Some(SarifMessage { text: String::new() }),
        };
        assert_eq!(rule.description(), "short");

        let bare = SarifRule {
            id: "r".to_string(),
            short_description: Some(SarifMessage { text: String::new() }),
            full_description: None,
        };
        assert_eq!(bare.description(), "");
    }
}
