use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, columns, shape, Shape};

pub fn render(value: &Value) -> String {
    match shape(value) {
        Shape::Envelope {
            result,
            warnings,
            methodology,
        } => {
            let mut out = render(result);
            if !warnings.is_empty() {
                out.push_str("\n\nWarnings:");
                for w in warnings {
                    out.push_str("\n  - ");
                    out.push_str(w);
                }
            }
            if let Some(m) = methodology {
                out.push_str("\n\nMethodology: ");
                out.push_str(m);
            }
            out
        }
        Shape::Rows(rows) => rows_table(rows),
        Shape::Fields(map) => fields_table(map),
        Shape::Scalar(v) => cell(v),
    }
}

fn fields_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), cell(val)]);
    }
    Table::from(builder).to_string()
}

/// Object rows become a table; bare values print one per line.
fn rows_table(rows: &[Value]) -> String {
    if rows.is_empty() {
        return "(empty)".to_string();
    }
    let cols = columns(rows);
    if cols.is_empty() {
        return rows.iter().map(cell).collect::<Vec<_>>().join("\n");
    }
    let mut builder = Builder::default();
    builder.push_record(cols.iter().copied());
    for row in rows {
        builder.push_record(cols.iter().map(|c| row.get(*c).map(cell).unwrap_or_default()));
    }
    Table::from(builder).to_string()
}
