mod csv_out;
mod minimal;
mod table;

use serde_json::{Map, Value};
use std::io;

use crate::OutputFormat;

/// Print a command's JSON value in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => println!("{}", table::render(value)),
        OutputFormat::Csv => {
            if let Err(e) = csv_out::write(io::stdout().lock(), value) {
                eprintln!("CSV output error: {}", e);
            }
        }
        OutputFormat::Minimal => println!("{}", minimal::render(value)),
    }
}

/// Command output reduced to the layouts the text formatters know.
enum Shape<'a> {
    /// Computation envelope, or a backend reply wrapped as `{"result": ...}`.
    Envelope {
        result: &'a Value,
        warnings: Vec<&'a str>,
        methodology: Option<&'a str>,
    },
    Rows(&'a [Value]),
    Fields(&'a Map<String, Value>),
    Scalar(&'a Value),
}

fn shape(value: &Value) -> Shape<'_> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => Shape::Envelope {
                result,
                warnings: map
                    .get("warnings")
                    .and_then(Value::as_array)
                    .map(|ws| ws.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default(),
                methodology: map.get("methodology").and_then(Value::as_str),
            },
            None => Shape::Fields(map),
        },
        Value::Array(rows) => Shape::Rows(rows),
        other => Shape::Scalar(other),
    }
}

/// Keys of every object row, in first-seen order.
fn columns(rows: &[Value]) -> Vec<&str> {
    let mut cols: Vec<&str> = Vec::new();
    for row in rows.iter().filter_map(Value::as_object) {
        for key in row.keys() {
            if !cols.contains(&key.as_str()) {
                cols.push(key);
            }
        }
    }
    cols
}

/// Text for one cell. Null is blank and lists of scalars are joined with `; `.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            items.iter().map(cell).collect::<Vec<_>>().join("; ")
        }
        other => other.to_string(),
    }
}
