//! Reading schema files from disk.
//!
//! Schemas may be written as JSON, YAML or TOML; the format is picked from the
//! file extension.

use crate::domain::{GeneratorError, GeneratorResult, Schema};
use std::path::Path;

const SCHEMA_EXTENSIONS: [&str; 4] = ["json", "yaml", "yml", "toml"];

pub fn load_schema(path: impl AsRef<Path>) -> GeneratorResult<Schema> {
    let path = path.as_ref();
    let load_error = |reason: String| GeneratorError::SchemaLoad {
        path: path.to_path_buf(),
        reason,
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;

    match ext.as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| load_error(e.to_string())),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string())),
        "toml" => toml::from_str(&content).map_err(|e| load_error(e.to_string())),
        other => Err(load_error(format!("unsupported schema file extension '{}'", other))),
    }
}

/// Every schema file directly inside `dir`, keyed by file stem, sorted by path.
pub fn load_schemas_from_dir(dir: impl AsRef<Path>) -> Result<Vec<(String, Schema)>, anyhow::Error> {
    let pattern = format!("{}/*", dir.as_ref().display());
    let mut schemas = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => {
                let supported = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SCHEMA_EXTENSIONS.contains(&ext));
                if !supported {
                    continue;
                }
                let name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default()
                    .to_string();
                tracing::debug!("Loading schema {} from {}", name, path.display());
                schemas.push((name, load_schema(&path)?));
            }
            Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
        }
    }
    Ok(schemas)
}
