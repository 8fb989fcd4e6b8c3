use serde_json::Value;

use super::{cell, shape, Shape};

/// Fields that hold the answer of a command, checked in order.
const ANSWER_KEYS: [&str; 8] = [
    "label",
    "id",
    "messages",
    "completion_pct",
    "managed_funds",
    "warnings",
    "total",
    "total_risks",
];

/// The single value a script would want: the answer field of an object, the
/// ids of a record list, or the value itself.
pub fn render(value: &Value) -> String {
    match shape(value) {
        Shape::Envelope { result, .. } => render(result),
        Shape::Fields(map) => ANSWER_KEYS
            .iter()
            .find_map(|k| map.get(*k).filter(|v| !v.is_null()))
            .map(cell)
            .or_else(|| map.iter().next().map(|(k, v)| format!("{}: {}", k, cell(v))))
            .unwrap_or_default(),
        Shape::Rows(rows) => rows
            .iter()
            .map(|row| row.get("id").map(cell).unwrap_or_else(|| cell(row)))
            .collect::<Vec<_>>()
            .join("\n"),
        Shape::Scalar(v) => cell(v),
    }
}
