//! Seed/local reconciliation for the post collection.
//!
//! Two lists of posts are combined keyed by identifier: seed entries go in
//! first, then local entries overwrite any seed entry sharing an id. The
//! routine only adds and overwrites, it never deletes, and the output is
//! sorted by date descending using plain string comparison.

use std::collections::HashMap;

use serde_json::Value;

use super::Post;

/// Merge seed and local post collections, local winning on id conflict.
///
/// Entries that are not JSON objects with a numeric `id` are silently
/// dropped. Relative order among equal dates is unspecified.
#[must_use]
pub fn merge_posts(seed: &[Value], local: &[Value]) -> Vec<Post> {
    let mut by_id: HashMap<i64, Post> = HashMap::new();

    for value in seed.iter().chain(local.iter()) {
        if let Some(post) = admit(value) {
            by_id.insert(post.id, post);
        }
    }

    let mut merged: Vec<Post> = by_id.into_values().collect();
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

/// Parse a raw stored collection. Invalid JSON or anything that is not an
/// array yields an empty collection, never an error.
#[must_use]
pub fn parse_posts(raw: &str) -> Vec<Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Admit a single stored entry. Requires an object with a numeric id;
/// all other fields degrade to empty values rather than rejecting the
/// entry.
fn admit(value: &Value) -> Option<Post> {
    let id = value.get("id")?.as_i64()?;
    Some(Post {
        id,
        title: str_field(value, "title"),
        author: str_field(value, "author"),
        content: str_field(value, "content"),
        date: str_field(value, "date"),
        files: value
            .get("files")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn str_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
