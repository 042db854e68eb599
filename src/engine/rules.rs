use std::collections::HashMap;

use crate::sarif::SarifRule;

/// Lookup from rule id to rule metadata, built from the run's rule catalog.
///
/// Duplicate ids keep the last occurrence. Unknown ids resolve to nothing;
/// the caller degrades to an empty description.
pub struct RuleIndex<'a> {
    rules: HashMap<&'a str, &'a SarifRule>,
}

impl<'a> RuleIndex<'a> {
    pub fn build(catalog: &'a [SarifRule]) -> Self {
        let mut rules = HashMap::with_capacity(catalog.len());
        for rule in catalog {
            rules.insert(rule.id.as_str(), rule);
        }
        RuleIndex { rules }
    }

    pub fn get(&self, id: &str) -> Option<&'a SarifRule> {
        self.rules.get(id).copied()
    }

    /// Description for a rule id, empty when the id is unknown.
    pub fn description(&self, id: &str) -> &'a str {
        self.get(id).map(|r| r.description()).unwrap_or("")
    }
}
