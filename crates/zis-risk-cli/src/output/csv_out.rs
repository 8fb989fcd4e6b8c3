use serde_json::Value;
use std::io::Write;

use super::{cell, columns, shape, Shape};

/// Rows become one record each; an object becomes `field,value` pairs.
pub fn write<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    let body = match shape(value) {
        Shape::Envelope { result, .. } => result,
        _ => value,
    };
    match body {
        Value::Array(rows) => {
            let cols = columns(rows);
            if cols.is_empty() {
                wtr.write_record(["value"])?;
                for row in rows {
                    wtr.write_record([cell(row)])?;
                }
            } else {
                wtr.write_record(&cols)?;
                for row in rows {
                    wtr.write_record(cols.iter().map(|c| row.get(*c).map(cell).unwrap_or_default()))?;
                }
            }
        }
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.clone(), cell(val)])?;
            }
        }
        other => wtr.write_record([cell(other)])?,
    }
    wtr.flush()?;
    Ok(())
}
