use std::collections::HashMap;

use crate::report::annotation::Annotation;

/// Deduplicate and sort annotations.
///
/// Duplicates share the identity key `(rule_id, path, line)`; the later
/// occurrence's content replaces the earlier one's, at the earlier one's
/// position. The sort is stable on severity alone (critical first), so ties
/// keep the order established by deduplication.
pub fn merge_annotations(annotations: Vec<Annotation>) -> Vec<Annotation> {
    let mut merged: Vec<Annotation> = Vec::with_capacity(annotations.len());
    let mut index: HashMap<(String, String, u32), usize> = HashMap::new();

    for annotation in annotations {
        match index.get(&annotation.identity()) {
            Some(&pos) => merged[pos] = annotation,
            None => {
                index.insert(annotation.identity(), merged.len());
                merged.push(annotation);
            }
        }
    }

    merged.sort_by(|a, b| b.severity.cmp(&a.severity));
    merged
}
