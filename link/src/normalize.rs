//! Snapshot normalization for list payloads.
//!
//! Both APIs are loose about list shapes: the same endpoint may return a
//! JSON array or an id-keyed object, and record ordering is not guaranteed.
//! This module centralizes the rules so every consumer sees the same thing:
//! an ordered sequence sorted by `createdAt` descending (ties stable in
//! input order), deduplicated by `_id`.

use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;

/// Flatten an array-or-map payload into a record list.
///
/// Objects are treated as id-keyed maps and contribute their values in
/// iteration order; any other shape (including `null`) yields an empty list.
fn collect_records(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    }
}

fn created_at(record: &Value) -> Option<DateTime<Utc>> {
    record
        .get("createdAt")
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn record_id(record: &Value) -> Option<&str> {
    record
        .get("_id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// Normalize a raw list payload into typed records.
///
/// Rules, in order:
/// 1. accept a JSON array or an id-keyed object (empty/other → empty list);
/// 2. drop records whose `_id` was already seen (first occurrence wins);
/// 3. sort by `createdAt` descending; records without a parseable
///    `createdAt` sort after all dated ones; ties keep input order;
/// 4. deserialize each record, dropping (with a warning) any that still
///    fail after the models' lenient defaults.
pub fn normalize_list<T: DeserializeOwned>(payload: Value) -> Vec<T> {
    let mut records = collect_records(payload);

    let mut seen: HashSet<String> = HashSet::new();
    records.retain(|record| match record_id(record) {
        Some(id) => seen.insert(id.to_string()),
        // Records without an id cannot be deduplicated; keep them.
        None => true,
    });

    // Vec::sort_by is stable, so ties preserve input order.
    let mut keyed: Vec<(Option<DateTime<Utc>>, Value)> = records
        .into_iter()
        .map(|r| (created_at(&r), r))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut out = Vec::with_capacity(keyed.len());
    for (_, record) in keyed {
        match serde_json::from_value::<T>(record) {
            Ok(item) => out.push(item),
            Err(e) => warn!("[NORMALIZE] Dropping malformed record: {}", e),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Job, JobStatus};
    use serde_json::json;

    fn job(id: &str, created: &str) -> Value {
        json!({
            "_id": id,
            "owner": "u1",
            "dataset_name": "ds",
            "status": "pending",
            "createdAt": created
        })
    }

    #[test]
    fn array_sorted_newest_first() {
        let payload = json!([
            job("a", "2026-05-01T10:00:00Z"),
            job("b", "2026-05-03T10:00:00Z"),
            job("c", "2026-05-02T10:00:00Z"),
        ]);
        let jobs: Vec<Job> = normalize_list(payload);
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn keyed_object_equivalent_to_array() {
        let a = json!([
            job("a", "2026-05-01T10:00:00Z"),
            job("b", "2026-05-03T10:00:00Z"),
        ]);
        let m = json!({
            "a": job("a", "2026-05-01T10:00:00Z"),
            "b": job("b", "2026-05-03T10:00:00Z"),
        });
        let from_array: Vec<Job> = normalize_list(a);
        let from_map: Vec<Job> = normalize_list(m);
        assert_eq!(from_array, from_map);
    }

    #[test]
    fn ties_keep_input_order() {
        let payload = json!([
            job("first", "2026-05-01T10:00:00Z"),
            job("second", "2026-05-01T10:00:00Z"),
            job("third", "2026-05-01T10:00:00Z"),
        ]);
        let jobs: Vec<Job> = normalize_list(payload);
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn duplicate_ids_first_occurrence_wins() {
        let payload = json!([
            json!({"_id": "a", "dataset_name": "kept", "createdAt": "2026-05-01T10:00:00Z"}),
            json!({"_id": "a", "dataset_name": "dropped", "createdAt": "2026-05-02T10:00:00Z"}),
        ]);
        let jobs: Vec<Job> = normalize_list(payload);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].dataset_name, "kept");
    }

    #[test]
    fn undated_records_sort_last() {
        let payload = json!([
            json!({"_id": "undated"}),
            job("dated", "2026-05-01T10:00:00Z"),
            json!({"_id": "garbage-date", "createdAt": "yesterday-ish"}),
        ]);
        let jobs: Vec<Job> = normalize_list(payload);
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, ["dated", "undated", "garbage-date"]);
    }

    #[test]
    fn empty_and_non_list_payloads_yield_empty() {
        assert!(normalize_list::<Job>(json!([])).is_empty());
        assert!(normalize_list::<Job>(json!(null)).is_empty());
        assert!(normalize_list::<Job>(json!("nope")).is_empty());
    }

    #[test]
    fn lenient_records_survive() {
        // Only an id: every other field defaults instead of rejecting.
        let jobs: Vec<Job> = normalize_list(json!([{ "_id": "bare" }]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Unknown);
    }

    #[test]
    fn dataset_lists_normalize_both_shapes() {
        let payload = json!({
            "d2": {"_id": "d2", "name": "newer", "createdAt": "2026-05-02T00:00:00Z", "chunks": []},
            "d1": {"_id": "d1", "name": "older", "createdAt": "2026-05-01T00:00:00Z", "chunks": []},
        });
        let datasets: Vec<Dataset> = normalize_list(payload);
        assert_eq!(datasets[0].name, "newer");
        assert_eq!(datasets[1].name, "older");
    }
}
