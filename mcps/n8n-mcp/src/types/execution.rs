//! Upstream execution record
//!
//! The shape returned by `GET /executions/{id}?includeData=true`. Per-node
//! results live under `data.resultData.runData`, keyed by the node's display
//! name, each holding the list of runs of that node.

use chrono::DateTime;
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Normalized execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Error,
    Waiting,
    Running,
    Canceled,
}

impl ExecutionStatus {
    pub const ALL: [ExecutionStatus; 5] = [
        ExecutionStatus::Success,
        ExecutionStatus::Error,
        ExecutionStatus::Waiting,
        ExecutionStatus::Running,
        ExecutionStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::Error => "error",
            ExecutionStatus::Waiting => "waiting",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Canceled => "canceled",
        }
    }

    /// Strict, case-insensitive parse of one of the five known statuses
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == lowered)
    }

    /// Normalize an upstream status. Anything outside the known set
    /// (`crashed`, `new`, `unknown`, missing) becomes `Error`.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(ExecutionStatus::Error)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a node's first run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Success,
    Error,
}

/// One execution as returned by the n8n API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub finished: Option<bool>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub stopped_at: Option<String>,
    #[serde(default)]
    pub data: Option<ExecutionData>,
    #[serde(default)]
    pub workflow_data: Option<WorkflowData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionData {
    #[serde(default)]
    pub result_data: Option<ResultData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    #[serde(default)]
    pub run_data: RunData,
    #[serde(default)]
    pub last_node_executed: Option<String>,
}

/// Workflow snapshot stored with the execution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowData {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowNode {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

/// Per-node run history, in upstream key order.
///
/// Entries that are not an array of run objects are rejected at parse time
/// (logged and remembered in [`RunData::rejected`]); a `runData` that is not
/// an object at all parses as empty.
#[derive(Debug, Clone, Default)]
pub struct RunData {
    nodes: IndexMap<String, Vec<NodeRun>>,
    rejected: Vec<String>,
}

impl RunData {
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        let mut run_data = RunData::default();

        for (name, value) in raw {
            match serde_json::from_value::<Vec<NodeRun>>(value) {
                Ok(runs) => {
                    run_data.nodes.insert(name, runs);
                }
                Err(e) => {
                    warn!(node = %name, error = %e, "rejecting malformed runData entry");
                    run_data.rejected.push(name);
                }
            }
        }

        run_data
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names with their runs, in upstream order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeRun])> {
        self.nodes
            .iter()
            .map(|(name, runs)| (name.as_str(), runs.as_slice()))
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// The authoritative (first) run of a node
    pub fn first_run(&self, node_name: &str) -> Option<&NodeRun> {
        self.nodes.get(node_name).and_then(|runs| runs.first())
    }

    pub fn contains(&self, node_name: &str) -> bool {
        self.nodes.contains_key(node_name)
    }

    /// Names of entries dropped because they did not match the run shape
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

impl<'de> Deserialize<'de> for RunData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(raw) => Ok(RunData::from_raw(raw)),
            Value::Null => Ok(RunData::default()),
            other => {
                warn!(kind = json_kind(&other), "runData is not an object, ignoring it");
                Ok(RunData::default())
            }
        }
    }
}

/// One run of one node
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRun {
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub data: Option<NodeRunData>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub execution_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub start_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRunData {
    /// Output branches; each branch is an array of items
    #[serde(default)]
    pub main: Option<Value>,
}

impl NodeRun {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn status(&self) -> NodeStatus {
        if self.has_error() {
            NodeStatus::Error
        } else {
            NodeStatus::Success
        }
    }

    /// Items of the first output branch; empty when absent or not an array
    pub fn first_branch_items(&self) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|d| d.main.as_ref())
            .and_then(Value::as_array)
            .and_then(|branches| branches.first())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recorded end time, else start + execution time
    pub fn resolved_end_time(&self) -> Option<i64> {
        self.end_time.or_else(|| match (self.start_time, self.execution_time) {
            (Some(start), Some(elapsed)) => start.checked_add(elapsed),
            _ => None,
        })
    }
}

impl Execution {
    pub fn run_data(&self) -> Option<&RunData> {
        self.data
            .as_ref()
            .and_then(|d| d.result_data.as_ref())
            .map(|r| &r.run_data)
    }

    pub fn normalized_status(&self) -> ExecutionStatus {
        ExecutionStatus::normalize(self.status.as_deref())
    }

    /// `stoppedAt - startedAt` in milliseconds, when both parse
    pub fn duration_ms(&self) -> Option<i64> {
        let started = DateTime::parse_from_rfc3339(self.started_at.as_deref()?).ok()?;
        let stopped = DateTime::parse_from_rfc3339(self.stopped_at.as_deref()?).ok()?;
        Some((stopped - started).num_milliseconds())
    }

    fn workflow_node(&self, node_name: &str) -> Option<&WorkflowNode> {
        self.workflow_data
            .as_ref()
            .and_then(|w| w.nodes.iter().find(|n| n.name == node_name))
    }

    /// Node type from the run record, else the workflow snapshot, else "unknown"
    pub fn node_type(&self, node_name: &str, run: Option<&NodeRun>) -> String {
        run.and_then(|r| r.node_type.clone())
            .or_else(|| self.workflow_node(node_name).and_then(|n| n.node_type.clone()))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Declared parameters, resolved like [`Execution::node_type`]
    pub fn node_parameters(&self, node_name: &str, run: Option<&NodeRun>) -> Map<String, Value> {
        run.and_then(|r| r.parameters.clone())
            .or_else(|| self.workflow_node(node_name).and_then(|n| n.parameters.clone()))
            .unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accept ids as strings or numbers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {}",
            json_kind(&other)
        ))),
    }
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {}",
            json_kind(&other)
        ))),
    }
}

/// Millisecond values arrive as integers, floats, or ISO-8601 strings
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.parse::<i64>().ok().or_else(|| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.timestamp_millis())
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn execution(value: Value) -> Execution {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(ExecutionStatus::normalize(Some("success")), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::normalize(Some("RUNNING")), ExecutionStatus::Running);
        assert_eq!(ExecutionStatus::normalize(Some("canceled")), ExecutionStatus::Canceled);
        assert_eq!(ExecutionStatus::normalize(Some("crashed")), ExecutionStatus::Error);
        assert_eq!(ExecutionStatus::normalize(Some("new")), ExecutionStatus::Error);
        assert_eq!(ExecutionStatus::normalize(Some("unknown")), ExecutionStatus::Error);
        assert_eq!(ExecutionStatus::normalize(None), ExecutionStatus::Error);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let exec = execution(json!({ "id": 12345, "workflowId": 7 }));
        assert_eq!(exec.id, "12345");
        assert_eq!(exec.workflow_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_duration() {
        let exec = execution(json!({
            "id": "1",
            "startedAt": "2025-10-29T10:00:00.000Z",
            "stoppedAt": "2025-10-29T10:00:05.000Z"
        }));
        assert_eq!(exec.duration_ms(), Some(5000));

        let running = execution(json!({
            "id": "1",
            "startedAt": "2025-10-29T10:00:00.000Z",
            "stoppedAt": null
        }));
        assert_eq!(running.duration_ms(), None);
    }

    #[test]
    fn test_run_data_keeps_order_and_rejects_malformed() {
        let exec = execution(json!({
            "id": "1",
            "data": { "resultData": { "runData": {
                "Start": [{ "data": { "main": [[{ "json": {} }]] } }],
                "Broken": "not-a-run-list",
                "Loop": [],
                "HTTP Request": [{ "error": { "message": "boom" } }]
            }}}
        }));

        let run_data = exec.run_data().unwrap();
        let names: Vec<&str> = run_data.node_names().collect();
        assert_eq!(names, vec!["Start", "Loop", "HTTP Request"]);
        assert_eq!(run_data.rejected().to_vec(), vec!["Broken".to_string()]);
        assert!(run_data.first_run("Loop").is_none());
        assert_eq!(
            run_data.first_run("HTTP Request").unwrap().status(),
            NodeStatus::Error
        );
    }

    #[test]
    fn test_non_object_run_data_is_empty() {
        let exec = execution(json!({
            "id": "1",
            "data": { "resultData": { "runData": [1, 2, 3] } }
        }));
        assert!(exec.run_data().unwrap().is_empty());
    }

    #[test]
    fn test_first_branch_items() {
        let run: NodeRun = serde_json::from_value(json!({
            "data": { "main": [[{ "a": 1 }, { "a": 2 }], [{ "b": 1 }]] }
        }))
        .unwrap();
        assert_eq!(run.first_branch_items().len(), 2);

        let null_branch: NodeRun =
            serde_json::from_value(json!({ "data": { "main": [null] } })).unwrap();
        assert!(null_branch.first_branch_items().is_empty());

        let no_data = NodeRun::default();
        assert!(no_data.first_branch_items().is_empty());
    }

    #[test]
    fn test_lenient_timing_fields() {
        let run: NodeRun = serde_json::from_value(json!({
            "startTime": 1_761_732_000_000_i64,
            "executionTime": 12.4
        }))
        .unwrap();
        assert_eq!(run.execution_time, Some(12));
        assert_eq!(run.resolved_end_time(), Some(1_761_732_000_012));
    }

    #[test]
    fn test_end_time_overflow_is_none() {
        let run: NodeRun = serde_json::from_value(json!({
            "startTime": i64::MAX,
            "executionTime": 5
        }))
        .unwrap();
        assert_eq!(run.resolved_end_time(), None);
    }

    #[test]
    fn test_run_data_order_from_raw_body() {
        let body = r#"{
            "id": "1",
            "data": { "resultData": { "runData": {
                "Zeta": [{}],
                "Alpha": [{}],
                "Mid": [{}]
            }}}
        }"#;
        let value: Value = serde_json::from_str(body).unwrap();
        let exec = execution(value);

        let names: Vec<&str> = exec.run_data().unwrap().node_names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_node_type_resolution() {
        let exec = execution(json!({
            "id": "1",
            "workflowData": { "nodes": [
                { "name": "Start", "type": "n8n-nodes-base.manualTrigger", "parameters": { "a": 1 } }
            ]}
        }));

        assert_eq!(exec.node_type("Start", None), "n8n-nodes-base.manualTrigger");
        assert_eq!(exec.node_parameters("Start", None)["a"], 1);
        assert_eq!(exec.node_type("Other", None), "unknown");

        let run = NodeRun {
            node_type: Some("n8n-nodes-base.set".into()),
            ..NodeRun::default()
        };
        assert_eq!(exec.node_type("Start", Some(&run)), "n8n-nodes-base.set");
    }
}
