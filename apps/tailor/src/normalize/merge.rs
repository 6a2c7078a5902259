//! Order-preserving merge of resume and job-description list sections.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::lenient::truthy;

/// How two list entries are judged to be the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKey<'a> {
    /// Compare by one field (e.g. `name`, `title`); entries missing that field
    /// fall back to structural comparison.
    Field(&'a str),
    /// Compare whole entries.
    Structural,
}

/// Identity of a list entry. Text keys and other JSON values live in separate
/// namespaces, so `{"name": 1}` and `{"name": "1"}` stay distinct.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupKey {
    Text(String),
    Json(String),
}

/// Concatenates `a` then `b`, skipping every entry whose dedup key was already
/// emitted. The first occurrence wins, so `a` takes precedence over `b`.
pub fn merge_list(a: &[Value], b: &[Value], key: MergeKey<'_>) -> Vec<Value> {
    let mut seen = HashSet::new();
    a.iter()
        .chain(b)
        .filter(|item| seen.insert(dedup_key(item, key)))
        .cloned()
        .collect()
}

fn dedup_key(item: &Value, key: MergeKey<'_>) -> DedupKey {
    match key {
        MergeKey::Field(field) => match item.get(field) {
            Some(Value::String(s)) if !s.is_empty() => DedupKey::Text(s.clone()),
            Some(value) if truthy(value) => DedupKey::Json(value.to_string()),
            _ => structural(item),
        },
        MergeKey::Structural => structural(item),
    }
}

// A whole entry's serialization is text, the same as a string field value.
fn structural(item: &Value) -> DedupKey {
    DedupKey::Text(item.to_string())
}
