use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Annotation type tag, constant for the whole run.
pub const ANNOTATION_TYPE: &str = "VULNERABILITY";

/// Severity rank of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall pass/fail decision for the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Passed => "PASSED",
            Verdict::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single normalized annotation, the unit the engine produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    /// Deterministic ID (hash-based) e.g. "REMORA-a1b2c3d4"
    pub external_id: String,

    /// Annotation type tag (always [`ANNOTATION_TYPE`])
    pub annotation_type: String,

    /// Severity rank, never absent
    pub severity: Severity,

    /// Bounded title (≤ 450 characters)
    pub summary: String,

    /// Full, unbounded description text
    pub details: String,

    /// Repository-relative forward-slash path ("unknown" when unreported)
    pub path: String,

    /// 1-based line number
    pub line: u32,

    /// Rule that produced the finding, e.g. "js/sql-injection"
    pub rule_id: String,
}

impl Annotation {
    /// Generate a deterministic ID from the identity key (rule, path, line)
    pub fn generate_id(rule_id: &str, path: &str, line: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(rule_id.as_bytes());
        hasher.update(path.as_bytes());
        hasher.update(line.to_string().as_bytes());
        let result = hasher.finalize();
        let hex = format!("{:x}", result);
        format!("REMORA-{}", &hex[..8])
    }

    /// Identity key used for deduplication
    pub fn identity(&self) -> (String, String, u32) {
        (self.rule_id.clone(), self.path.clone(), self.line)
    }
}

/// The final report payload handed to rendering or delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// remora version
    pub version: String,

    /// When the conversion ran
    pub timestamp: String,

    /// Scan identifier derived from the tool name (lowercased, no whitespace)
    pub scan_id: String,

    /// Name of the tool that produced the input report
    pub tool: String,

    /// Report title
    pub title: String,

    /// Overall verdict
    pub verdict: Verdict,

    /// Formatted multi-line summary block
    pub summary: String,

    /// Annotations, severity-ordered, capped at the configured maximum
    pub annotations: Vec<Annotation>,

    /// Count statistics
    pub counts: SeverityCounts,
}

/// Per-severity statistics, zero-filled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,

    /// Per-rule breakdown, rule id → occurrence count
    pub by_rule: BTreeMap<String, usize>,
}

impl SeverityCounts {
    pub fn from_annotations(annotations: &[Annotation]) -> Self {
        let mut counts = SeverityCounts {
            total: annotations.len(),
            critical: 0,
            high: 0,
            medium: 0,
            low: 0,
            by_rule: BTreeMap::new(),
        };
        for a in annotations {
            match a.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
            *counts.by_rule.entry(a.rule_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Highest severity present, LOW when there are no annotations
    pub fn highest(&self) -> Severity {
        if self.critical > 0 {
            Severity::Critical
        } else if self.high > 0 {
            Severity::High
        } else if self.medium > 0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}
