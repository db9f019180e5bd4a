//! File-backed collaborators
//!
//! Loaders for the two data files the simulator needs from outside:
//! the user goal list and the record database. Format is chosen by file
//! extension (`.json`, `.yaml`/`.yml`, and `.toml` where supported).

mod database;
mod goals;

pub use database::RecordDatabase;
pub use goals::GoalList;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                message: "Unsupported file extension (expected json, yaml, yml or toml)"
                    .to_string(),
            }),
        }
    }
}

/// Read and deserialize a data file
pub(crate) fn read_structured<T: DeserializeOwned>(
    path: &Path,
    format: FileFormat,
) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    let parsed = match format {
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("goals.JSON")).unwrap(),
            FileFormat::Json
        );
        assert_eq!(
            FileFormat::from_path(Path::new("goals.yml")).unwrap(),
            FileFormat::Yaml
        );
        assert_eq!(
            FileFormat::from_path(Path::new("goals.toml")).unwrap(),
            FileFormat::Toml
        );
        assert!(FileFormat::from_path(Path::new("goals.p")).is_err());
        assert!(FileFormat::from_path(Path::new("goals")).is_err());
    }
}
