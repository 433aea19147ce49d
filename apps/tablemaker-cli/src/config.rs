use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tablemaker.yaml";

/// Project configuration (`tablemaker.yaml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablemakerConfig {
    /// Folder searched recursively for table CSVs
    pub csv_folder: String,

    /// Folder that receives persisted table objects
    pub object_folder: String,

    /// Folder that receives generated Rust source
    pub source_root: String,

    /// Stop binding a table at its first invalid row
    pub fail_fast: bool,
}

impl Default for TablemakerConfig {
    fn default() -> Self {
        Self {
            csv_folder: "Tables".to_string(),
            object_folder: "Resources/Tables".to_string(),
            source_root: "src".to_string(),
            fail_fast: false,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub csv_folder: Option<String>,
    pub object_folder: Option<String>,
    pub source_root: Option<String>,
    pub fail_fast: bool,
}

impl TablemakerConfig {
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        // An empty file deserializes as null rather than an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load `path` if given (it must exist), else `tablemaker.yaml` if present, else defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::ConfigNotFound(path.to_path_buf()));
                }
                Self::read(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read(default_path)
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> CliResult<Self> {
        debug!("Reading config {}", path.display());
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(csv_folder) = overrides.csv_folder {
            self.csv_folder = csv_folder;
        }
        if let Some(object_folder) = overrides.object_folder {
            self.object_folder = object_folder;
        }
        if let Some(source_root) = overrides.source_root {
            self.source_root = source_root;
        }
        self.fail_fast |= overrides.fail_fast;
        self
    }

    pub fn csv_folder(&self) -> PathBuf {
        PathBuf::from(&self.csv_folder)
    }

    pub fn object_folder(&self) -> PathBuf {
        PathBuf::from(&self.object_folder)
    }

    pub fn source_root(&self) -> PathBuf {
        PathBuf::from(&self.source_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = TablemakerConfig::from_yaml("source_root: game/src\n").unwrap();
        assert_eq!(config.source_root, "game/src");
        assert_eq!(config.csv_folder, "Tables");
        assert_eq!(config.object_folder, "Resources/Tables");
        assert!(!config.fail_fast);

        assert_eq!(
            TablemakerConfig::from_yaml("").unwrap(),
            TablemakerConfig::default()
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = TablemakerConfig::from_yaml("csv_folders: Data\n");
        assert!(matches!(result, Err(CliError::Yaml(_))));
    }

    #[test]
    fn test_overrides_win() {
        let config = TablemakerConfig::from_yaml("csv_folder: Data\nfail_fast: true\n")
            .unwrap()
            .apply(ConfigOverrides {
                csv_folder: Some("Other".to_string()),
                source_root: Some("gen".to_string()),
                ..Default::default()
            });

        assert_eq!(config.csv_folder(), PathBuf::from("Other"));
        assert_eq!(config.source_root(), PathBuf::from("gen"));
        assert_eq!(config.object_folder(), PathBuf::from("Resources/Tables"));
        // A flag can enable fail-fast but never disable a configured one
        assert!(config.fail_fast);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        assert!(matches!(
            TablemakerConfig::load(Some(&path)),
            Err(CliError::ConfigNotFound(_))
        ));

        let path = dir.path().join("tablemaker.yaml");
        fs::write(&path, "object_folder: out\n").unwrap();
        let config = TablemakerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.object_folder, "out");
    }
}
