pub mod config;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use zis_risk_core::RiskRecord;

/// `--input` files ending in `.yaml` or `.yml` are YAML; other files and
/// piped stdin are JSON.
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    if !path.is_file() {
        return Err(format!("Input file not found: {}", path.display()).into());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("Failed to parse '{}': {}", path.display(), e).into())
}

/// JSON document from `reader`; `None` when it holds only whitespace.
fn read_piped<T: DeserializeOwned, R: Read>(mut reader: R) -> Result<Option<T>, Box<dyn Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Command input from `--input <file>`, else piped stdin. `None` when
/// neither supplies a document.
pub fn read_optional_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn Error>> {
    if let Some(path) = path {
        return read_file(Path::new(path)).map(Some);
    }
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_piped(io::stdin().lock())
}

pub fn read_input<T: DeserializeOwned>(path: Option<&str>, what: &str) -> Result<T, Box<dyn Error>> {
    read_optional_input(path)?
        .ok_or_else(|| format!("--input <file> or stdin required for {}", what).into())
}

/// A risk collection given either as a bare array or as `{"risks": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RiskCollection {
    Bare(Vec<RiskRecord>),
    Wrapped { risks: Vec<RiskRecord> },
}

pub fn read_risks(path: Option<&str>) -> Result<Vec<RiskRecord>, Box<dyn Error>> {
    let collection: RiskCollection = read_input(path, "the risk collection")?;
    Ok(match collection {
        RiskCollection::Bare(risks) => risks,
        RiskCollection::Wrapped { risks } => risks,
    })
}
