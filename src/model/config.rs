use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default backing file name
pub const DEFAULT_STORE_FILE: &str = "project.txt";

/// Configuration from plaintask.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the task store lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing file. Relative paths resolve against the config file's
    /// directory (or the working directory when no config file was read).
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Resolve a relative `path` against `base`
    pub fn resolved_against(&self, base: &Path) -> StoreConfig {
        if self.path.is_absolute() {
            self.clone()
        } else {
            StoreConfig {
                path: base.join(&self.path),
            }
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Highlight near deadlines, completed and high-priority tasks
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { color: true }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store.path, PathBuf::from("project.txt"));
        assert!(config.display.color);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str("[display]\ncolor = false\n").unwrap();
        assert!(!config.display.color);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_resolved_against() {
        let rel = StoreConfig::new("tasks.txt");
        assert_eq!(
            rel.resolved_against(Path::new("/home/me")).path,
            PathBuf::from("/home/me/tasks.txt")
        );
        let abs = StoreConfig::new("/var/tasks.txt");
        assert_eq!(abs.resolved_against(Path::new("/home/me")), abs);
    }
}
