use reforma_core::ReformConfig;
use std::path::Path;

use super::file;

/// Load reference parameters from a JSON or YAML file, or the built-in
/// defaults when no path is given. The result is validated before use.
pub fn load_config(path: Option<&str>) -> Result<ReformConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ReformConfig::default());
    };

    let contents = file::read_text(path)?;
    let config: ReformConfig = if is_yaml(path) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    } else {
        ReformConfig::from_json(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    };
    config.validate()?;
    tracing::debug!(path, "loaded reform configuration");
    Ok(config)
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extension_detection() {
        assert!(is_yaml("reform.yaml"));
        assert!(is_yaml("conf/Reform.YML"));
        assert!(!is_yaml("reform.json"));
        assert!(!is_yaml("reform"));
    }

    #[test]
    fn test_no_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, ReformConfig::default());
    }
}
