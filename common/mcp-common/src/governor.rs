//! Response size governance and pagination
//!
//! Tool output is read by a language model with a finite context window.
//! [`SizeGovernor`] keeps a serialized payload under a character budget by
//! shrinking collections or dropping verbose keys; [`paginate`] slices
//! list-shaped output deterministically.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Default maximum serialized size of a tool payload, in characters
pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 100_000;

/// Arrays are shrunk to fit this fraction of the budget
const ARRAY_TARGET_RATIO: f64 = 0.8;

/// Keys dropped from oversized objects, most verbose first
pub const LOW_VALUE_KEYS: &[&str] = &[
    "executionLogs",
    "logs",
    "rawExecution",
    "rawData",
    "debugInfo",
    "debug",
    "stackTrace",
    "verbose",
];

/// Serialized length of a JSON value in characters
pub fn serialized_len(value: &Value) -> usize {
    serde_json::to_string(value)
        .map(|s| s.chars().count())
        .unwrap_or(0)
}

/// Enforces a maximum serialized size on tool payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeGovernor {
    max_chars: usize,
}

impl Default for SizeGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESPONSE_CHARS)
    }
}

impl SizeGovernor {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Bound `value` to the budget.
    ///
    /// Within budget the value is returned unchanged. An oversized array keeps
    /// the longest prefix that fits 80% of the budget, estimated from the
    /// average element size, and never fewer than one element. An oversized
    /// object loses its [`LOW_VALUE_KEYS`]; if it is still too large it is
    /// returned as it stands. This never fails.
    pub fn apply(&self, value: Value) -> Value {
        let size = serialized_len(&value);
        if size <= self.max_chars {
            return value;
        }

        match value {
            Value::Array(mut items) if !items.is_empty() => {
                let total = items.len();
                let average = (size / total).max(1);
                let target = (self.max_chars as f64 * ARRAY_TARGET_RATIO) as usize;
                let keep = (target / average).clamp(1, total);

                debug!(size, total, keep, max = self.max_chars, "truncating oversized array");
                items.truncate(keep);
                Value::Array(items)
            }
            Value::Object(mut map) => {
                let dropped: Vec<&str> = LOW_VALUE_KEYS
                    .iter()
                    .copied()
                    .filter(|key| map.remove(*key).is_some())
                    .collect();

                let value = Value::Object(map);
                let remaining = serialized_len(&value);
                if remaining > self.max_chars {
                    warn!(
                        size = remaining,
                        max = self.max_chars,
                        ?dropped,
                        "response still exceeds size budget, returning best effort"
                    );
                } else {
                    debug!(size, remaining, ?dropped, "dropped verbose keys from response");
                }
                value
            }
            other => {
                warn!(size, max = self.max_chars, "scalar response exceeds size budget");
                other
            }
        }
    }
}

/// Pagination metadata reported next to a page of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// One page of a list-shaped result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

/// Slice `items` to `[offset, offset + limit)`
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Page<T> {
    let total = items.len();
    let page: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let has_more = offset.saturating_add(page.len()) < total;

    Page {
        items: page,
        pagination: PageInfo {
            total,
            limit,
            offset,
            has_more,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_within_budget_unchanged() {
        let value = json!({ "id": "1", "logs": ["a"] });
        let governor = SizeGovernor::new(1_000);
        assert_eq!(governor.apply(value.clone()), value);
    }

    #[test]
    fn test_array_truncated_to_fit() {
        let items: Vec<Value> = (0..100).map(|i| json!({ "index": i, "pad": "x".repeat(90) })).collect();
        let value = Value::Array(items);
        let governor = SizeGovernor::new(1_000);

        let limited = governor.apply(value);
        let kept = limited.as_array().unwrap();
        assert!(!kept.is_empty());
        assert!(kept.len() < 100);
        assert!(serialized_len(&limited) <= 1_000);
        assert_eq!(kept[0]["index"], 0);
    }

    #[test]
    fn test_array_keeps_at_least_one() {
        let value = json!([{ "pad": "x".repeat(500) }, { "pad": "y".repeat(500) }]);
        let governor = SizeGovernor::new(100);

        let limited = governor.apply(value);
        assert_eq!(limited.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_object_drops_low_value_keys() {
        let value = json!({
            "id": "1",
            "executionLogs": "x".repeat(2_000),
            "debugInfo": "y".repeat(2_000)
        });
        let governor = SizeGovernor::new(500);

        let limited = governor.apply(value);
        assert_eq!(limited["id"], "1");
        assert!(limited.get("executionLogs").is_none());
        assert!(limited.get("debugInfo").is_none());
    }

    #[test]
    fn test_oversized_object_returned_best_effort() {
        let value = json!({ "payload": "z".repeat(2_000) });
        let governor = SizeGovernor::new(100);

        let limited = governor.apply(value.clone());
        assert_eq!(limited, value);
    }

    #[test]
    fn test_paginate_middle_page() {
        let page = paginate((0..10).collect::<Vec<_>>(), 3, 3);
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.pagination.total, 10);
        assert!(page.pagination.has_more);
    }

    #[test]
    fn test_paginate_last_page() {
        let page = paginate((0..10).collect::<Vec<_>>(), 5, 8);
        assert_eq!(page.items, vec![8, 9]);
        assert!(!page.pagination.has_more);
    }

    #[test]
    fn test_paginate_offset_past_end() {
        let page = paginate(vec!["a", "b"], 5, 10);
        assert!(page.items.is_empty());
        assert!(!page.pagination.has_more);
    }
}
