use std::fs;
use std::path::Path;

use zis_risk_core::dashboard::DashboardConfig;

/// Load dashboard configuration. `.json` files are read as JSON, anything
/// else as YAML. Without a path the defaults apply.
pub fn load_dashboard_config(
    path: Option<&str>,
) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path, e))?;
    parse_config(Path::new(path), &contents)
}

fn parse_config(
    path: &Path,
    contents: &str,
) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let config = if is_json {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?
    } else {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?
    };
    Ok(config)
}
