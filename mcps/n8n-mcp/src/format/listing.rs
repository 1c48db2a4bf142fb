//! Per-item views for list tools
//!
//! A list tool picks a [`Verbosity`] from its `raw` flag and maps each
//! upstream item through the matching view function.

use chrono::DateTime;
use serde_json::{json, Map, Value};

use crate::types::ExecutionStatus;

/// How much of each upstream item to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Minimal,
    Raw,
}

impl Verbosity {
    pub fn from_raw_flag(raw: Option<bool>) -> Self {
        if raw.unwrap_or(false) {
            Verbosity::Raw
        } else {
            Verbosity::Minimal
        }
    }
}

/// Execution list entry
pub fn execution_view(item: &Value, verbosity: Verbosity) -> Value {
    if verbosity == Verbosity::Raw {
        return item.clone();
    }

    let started_at = item.get("startedAt").and_then(Value::as_str);
    let stopped_at = item.get("stoppedAt").and_then(Value::as_str);
    let status = ExecutionStatus::normalize(item.get("status").and_then(Value::as_str));

    let mut view = Map::new();
    view.insert("id".into(), id_value(item.get("id")));
    view.insert("workflowId".into(), id_value(item.get("workflowId")));
    view.insert("status".into(), json!(status));
    view.insert("mode".into(), item.get("mode").cloned().unwrap_or(Value::Null));
    view.insert("startedAt".into(), json!(started_at));
    view.insert("stoppedAt".into(), json!(stopped_at));
    if let Some(duration) = duration_ms(started_at, stopped_at) {
        view.insert("duration".into(), json!(duration));
    }
    Value::Object(view)
}

/// Workflow list entry
pub fn workflow_view(item: &Value, verbosity: Verbosity) -> Value {
    if verbosity == Verbosity::Raw {
        return item.clone();
    }

    let tags: Vec<Value> = item
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(|t| t.get("name").or(Some(t)))
                .filter(|t| t.is_string())
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    let node_count = item
        .get("nodes")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    json!({
        "id": id_value(item.get("id")),
        "name": item.get("name").cloned().unwrap_or(Value::Null),
        "active": item.get("active").and_then(Value::as_bool).unwrap_or(false),
        "tags": tags,
        "nodeCount": node_count,
        "createdAt": item.get("createdAt").cloned().unwrap_or(Value::Null),
        "updatedAt": item.get("updatedAt").cloned().unwrap_or(Value::Null),
    })
}

fn id_value(id: Option<&Value>) -> Value {
    match id {
        Some(Value::Number(n)) => Value::String(n.to_string()),
        Some(Value::String(s)) => Value::String(s.clone()),
        _ => Value::Null,
    }
}

fn duration_ms(started_at: Option<&str>, stopped_at: Option<&str>) -> Option<i64> {
    let started = DateTime::parse_from_rfc3339(started_at?).ok()?;
    let stopped = DateTime::parse_from_rfc3339(stopped_at?).ok()?;
    Some((stopped - started).num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_execution() -> Value {
        json!({
            "id": 101,
            "workflowId": "wf-1",
            "status": "crashed",
            "mode": "trigger",
            "startedAt": "2025-10-29T10:00:00.000Z",
            "stoppedAt": "2025-10-29T10:00:01.000Z",
            "data": { "resultData": { "runData": {} } }
        })
    }

    #[test]
    fn test_verbosity_from_flag() {
        assert_eq!(Verbosity::from_raw_flag(None), Verbosity::Minimal);
        assert_eq!(Verbosity::from_raw_flag(Some(false)), Verbosity::Minimal);
        assert_eq!(Verbosity::from_raw_flag(Some(true)), Verbosity::Raw);
    }

    #[test]
    fn test_minimal_execution_view() {
        let view = execution_view(&upstream_execution(), Verbosity::Minimal);

        assert_eq!(view["id"], "101");
        assert_eq!(view["status"], "error");
        assert_eq!(view["duration"], 1000);
        assert!(view.get("data").is_none());
    }

    #[test]
    fn test_raw_execution_view_is_verbatim() {
        let item = upstream_execution();
        assert_eq!(execution_view(&item, Verbosity::Raw), item);
    }

    #[test]
    fn test_running_execution_has_no_duration() {
        let view = execution_view(
            &json!({ "id": "1", "status": "running", "startedAt": "2025-10-29T10:00:00.000Z" }),
            Verbosity::Minimal,
        );
        assert_eq!(view["status"], "running");
        assert!(view.get("duration").is_none());
    }

    #[test]
    fn test_minimal_workflow_view() {
        let view = workflow_view(
            &json!({
                "id": "abc",
                "name": "Daily report",
                "active": true,
                "tags": [{ "id": "1", "name": "reports" }],
                "nodes": [{ "name": "Start" }, { "name": "Send" }],
                "connections": {},
                "createdAt": "2025-01-01T00:00:00.000Z"
            }),
            Verbosity::Minimal,
        );

        assert_eq!(view["name"], "Daily report");
        assert_eq!(view["tags"], json!(["reports"]));
        assert_eq!(view["nodeCount"], 2);
        assert!(view.get("connections").is_none());
        assert!(view["updatedAt"].is_null());
    }
}
