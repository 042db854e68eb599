pub mod merger;
pub mod paths;
pub mod rules;
pub mod severity;
pub mod summary;

use tracing::{debug, info};

use crate::config::{EngineConfig, LineFrom};
use crate::report::annotation::{
    Annotation, InsightReport, Severity, SeverityCounts, Verdict, ANNOTATION_TYPE,
};
use crate::sarif::{SarifError, SarifLog, SarifResult};
use rules::RuleIndex;
use severity::{severity_from_level, SeverityClassifier, Strategy};

/// The core conversion engine. Orchestrates mapping, deduplication,
/// aggregation, and report assembly for one SARIF document.
pub struct Engine {
    config: EngineConfig,
    classifier: SeverityClassifier,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            config,
            classifier: SeverityClassifier::new(),
        }
    }

    /// Run the full conversion pipeline on a serialized SARIF document.
    pub fn run(&self, input: &str) -> Result<InsightReport, SarifError> {
        let log = SarifLog::parse(input)?;
        let run = log.first_run();

        let tool = run.tool_name().to_string();
        info!("Converting {} results from {}", run.results.len(), tool);

        // Step 1: index the rule catalog
        let index = RuleIndex::build(run.rules());

        // Step 2: map each raw result to a normalized annotation
        let raw: Vec<Annotation> = run
            .results
            .iter()
            .map(|result| self.map_result(result, &index))
            .collect();

        // Step 3: dedup by identity key and sort by severity
        let annotations = merger::merge_annotations(raw);
        info!("Annotations after dedup: {}", annotations.len());

        // Step 4: aggregate statistics and decide the verdict (pre-truncation)
        let counts = SeverityCounts::from_annotations(&annotations);
        let verdict = self.verdict(&counts);
        let summary = format_summary(&tool, &counts);

        // Step 5: cap the delivered list, preserving severity order
        let mut annotations = annotations;
        if annotations.len() > self.config.max_annotations {
            debug!(
                "Truncating {} annotations to {}",
                annotations.len(),
                self.config.max_annotations
            );
            annotations.truncate(self.config.max_annotations);
        }

        Ok(InsightReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            scan_id: scan_id(&tool),
            title: format!("{tool} security scan"),
            tool,
            verdict,
            summary,
            annotations,
            counts,
        })
    }

    /// Convert one raw result into an annotation with all fallbacks applied.
    fn map_result(&self, result: &SarifResult, index: &RuleIndex) -> Annotation {
        let rule_id = result.rule_id.clone().unwrap_or_default();

        let rule_text = index.description(&rule_id);
        let text = if rule_text.is_empty() {
            result.message_text()
        } else {
            rule_text
        };

        let severity = match self.config.strategy {
            Strategy::Keywords => self.classifier.classify(&rule_id, text),
            Strategy::LevelHints => severity_from_level(result.level.as_deref()),
        };

        let location = result.primary_location();
        let uri = location
            .and_then(|l| l.artifact_location.as_ref())
            .and_then(|a| a.uri.as_deref());
        let path = paths::normalize_path(uri, &self.config.working_dir);

        let region = location.and_then(|l| l.region.as_ref());
        let line = region
            .and_then(|r| match self.config.line_from {
                LineFrom::End => r.end_line.or(r.start_line),
                LineFrom::Start => r.start_line.or(r.end_line),
            })
            .unwrap_or(1);

        Annotation {
            external_id: Annotation::generate_id(&rule_id, &path, line),
            annotation_type: ANNOTATION_TYPE.to_string(),
            severity,
            summary: summary::summarize(text),
            details: text.trim().to_string(),
            path,
            line,
            rule_id,
        }
    }

    /// Pass/fail policy. CRITICAL always fails; HIGH fails unless the
    /// verdict was narrowed to critical-only.
    fn verdict(&self, counts: &SeverityCounts) -> Verdict {
        let highest = counts.highest();
        let failed = if self.config.fail_on_critical && !self.config.fail_on_high {
            highest >= Severity::Critical
        } else {
            highest >= Severity::High
        };
        if failed {
            Verdict::Failed
        } else {
            Verdict::Passed
        }
    }
}

/// Scan identifier: tool name lowercased with all whitespace removed.
pub fn scan_id(tool: &str) -> String {
    tool.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// The formatted multi-line summary block.
fn format_summary(tool: &str, counts: &SeverityCounts) -> String {
    let mut out = format!(
        "Scan results for {tool}:\n\n\
         Critical: {}\n\
         High: {}\n\
         Medium: {}\n\
         Low: {}\n\
         Total: {}\n\n\
         Highest severity: {}",
        counts.critical,
        counts.high,
        counts.medium,
        counts.low,
        counts.total,
        counts.highest(),
    );
    if !counts.by_rule.is_empty() {
        out.push_str("\n\nFindings by rule:");
        for (rule, count) in &counts.by_rule {
            out.push_str(&format!("\n  {rule}: {count}"));
        }
    }
    out
}
