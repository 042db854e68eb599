use regex::Regex;

use crate::report::annotation::Severity;

/// How severity is assigned to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Infer from keyword classes over rule id + descriptive text (default)
    #[default]
    Keywords,
    /// Map the SARIF `level` hint directly (note/warning/error)
    LevelHints,
}

/// One ordered pattern class: the first class that matches decides.
struct SeverityClass {
    severity: Severity,
    pattern: Regex,
}

/// Keyword-based severity classifier.
///
/// Matches lowercased `rule_id + " " + text` against ordered phrase classes;
/// anything unmatched is LOW.
pub struct SeverityClassifier {
    classes: Vec<SeverityClass>,
}

impl SeverityClassifier {
    pub fn new() -> Self {
        let classes = vec![
            SeverityClass {
                severity: Severity::Critical,
                pattern: Regex::new(concat!(
                    r"remote.code.execution|\brce\b|command.injection|",
                    r"prototype.pollution|sql.injection|\bsqli\b|",
                    r"path.traversal|directory.traversal|",
                    r"arbitrary.file.write|account.takeover",
                ))
                .unwrap(),
            },
            SeverityClass {
                severity: Severity::High,
                pattern: Regex::new(concat!(
                    r"cross.site.request.forgery|\bcsrf\b|",
                    r"cross.site.scripting|\bxss\b|",
                    r"auth(entication)?.bypass|authorization|",
                    r"hard.?coded.(secret|credential|password|key)|",
                    r"\btoken\b|\bjwt\b|insecure.deserialization|open.redirect",
                ))
                .unwrap(),
            },
            SeverityClass {
                severity: Severity::Medium,
                pattern: Regex::new(concat!(
                    r"missing.integrity|subresource.integrity|",
                    r"\bmd5\b|\bsha-?1\b|weak.(crypto|cipher|hash)|",
                    r"insecure.configuration|",
                    r"(tls|ssl|certificate).(verification|validation).disabled|",
                    r"disable[ds]?.(tls|ssl|certificate)|",
                    r"\binsecure\b|\baudit\b",
                ))
                .unwrap(),
            },
        ];
        SeverityClassifier { classes }
    }

    /// Classify from rule id and descriptive text.
    pub fn classify(&self, rule_id: &str, text: &str) -> Severity {
        let haystack = format!("{rule_id} {text}").to_lowercase();
        for class in &self.classes {
            if class.pattern.is_match(&haystack) {
                return class.severity;
            }
        }
        Severity::Low
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a SARIF level hint to a severity, for schema variants that carry one.
/// `note` → LOW, `warning` → MEDIUM, `error` → HIGH; anything else is LOW.
pub fn severity_from_level(level: Option<&str>) -> Severity {
    match level.map(|l| l.to_lowercase()) {
        Some(ref l) if l == "error" => Severity::High,
        Some(ref l) if l == "warning" => Severity::Medium,
        _ => Severity::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_injection_is_critical() {
        let c = SeverityClassifier::new();
        assert_eq!(
            c.classify("js/sql-injection", "SQL injection via string concatenation"),
            Severity::Critical
        );
    }

    #[test]
    fn critical_class_wins_over_later_classes() {
        let c = SeverityClassifier::new();
        // mentions both command injection (critical) and xss (high)
        assert_eq!(
            c.classify("r", "command injection leading to XSS"),
            Severity::Critical
        );
    }

    #[test]
    fn xss_and_hardcoded_secrets_are_high() {
        let c = SeverityClassifier::new();
        assert_eq!(c.classify("r", "reflected cross-site scripting"), Severity::High);
        assert_eq!(c.classify("r", "hardcoded secret in source"), Severity::High);
        assert_eq!(c.classify("r", "JWT signature not verified"), Severity::High);
    }

    #[test]
    fn weak_crypto_is_medium() {
        let c = SeverityClassifier::new();
        assert_eq!(c.classify("r", "use of MD5 hash"), Severity::Medium);
        assert_eq!(c.classify("r", "TLS verification disabled"), Severity::Medium);
        assert_eq!(c.classify("npm/audit", ""), Severity::Medium);
    }

    #[test]
    fn unmatched_text_defaults_to_low() {
        let c = SeverityClassifier::new();
        assert_eq!(c.classify("style/indent", "inconsistent indentation"), Severity::Low);
        assert_eq!(c.classify("", ""), Severity::Low);
    }

    #[test]
    fn rule_id_alone_can_classify() {
        let c = SeverityClassifier::new();
        assert_eq!(c.classify("py/path-traversal", ""), Severity::Critical);
    }

    #[test]
    fn level_hints_map_three_levels() {
        assert_eq!(severity_from_level(Some("error")), Severity::High);
        assert_eq!(severity_from_level(Some("warning")), Severity::Medium);
        assert_eq!(severity_from_level(Some("note")), Severity::Low);
        assert_eq!(severity_from_level(None), Severity::Low);
        assert_eq!(severity_from_level(Some("Error")), Severity::High);
    }
}
