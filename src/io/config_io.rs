use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, DEFAULT_STORE_FILE};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "plaintask.toml";

const CONFIG_TEMPLATE: &str = r##"# plaintask configuration

[store]
# Backing file holding one task per line. Relative paths are resolved
# against the directory containing this file.
path = "{store}"

[display]
# Highlight near deadlines (red), completed tasks (green) and
# high-priority tasks (red) in listings.
color = true
"##;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Load configuration.
///
/// With an explicit path the file must exist. Otherwise `plaintask.toml` in
/// `dir` is used if present, and built-in defaults if not. The store path
/// comes back resolved against the config file's directory (or `dir`).
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (dir.join(CONFIG_FILE_NAME), false),
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            let mut config = Config::default();
            config.store = config.store.resolved_against(dir);
            return Ok(config);
        }
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };

    let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.clone(),
        source,
    })?;
    let base = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => dir.to_path_buf(),
    };
    config.store = config.store.resolved_against(&base);
    tracing::debug!(path = %path.display(), store = %config.store.path.display(), "loaded config");
    Ok(config)
}

/// Render the commented config template
pub fn config_template() -> String {
    CONFIG_TEMPLATE.replace("{store}", DEFAULT_STORE_FILE)
}

/// Write the config template and an empty backing file into `dir`.
/// Refuses to overwrite an existing config unless `force` is set; an
/// existing backing file is never truncated.
pub fn write_initial_files(dir: &Path, force: bool) -> Result<(PathBuf, PathBuf), ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        return Err(ConfigError::AlreadyExists(config_path));
    }
    fs::write(&config_path, config_template()).map_err(|source| ConfigError::WriteError {
        path: config_path.clone(),
        source,
    })?;

    let store_path = dir.join(DEFAULT_STORE_FILE);
    if !store_path.exists() {
        fs::write(&store_path, "").map_err(|source| ConfigError::WriteError {
            path: store_path.clone(),
            source,
        })?;
    }
    Ok((config_path, store_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.store.path, tmp.path().join("project.txt"));
        assert!(config.display.color);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(tmp.path(), Some(&tmp.path().join("other.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_store_path_relative_to_config_file() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("conf");
        fs::create_dir_all(&sub).unwrap();
        let cfg = sub.join("custom.toml");
        fs::write(&cfg, "[store]\npath = \"mine.txt\"\n").unwrap();
        let config = load_config(tmp.path(), Some(&cfg)).unwrap();
        assert_eq!(config.store.path, sub.join("mine.txt"));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[store\n").unwrap();
        let err = load_config(tmp.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(&config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_initial_files_respects_force() {
        let tmp = TempDir::new().unwrap();
        let (cfg, store) = write_initial_files(tmp.path(), false).unwrap();
        assert!(cfg.exists());
        assert_eq!(fs::read_to_string(&store).unwrap(), "");

        fs::write(&store, "1,a,b,c,01/01/2027,Low,Pending,d\n").unwrap();
        assert!(matches!(
            write_initial_files(tmp.path(), false),
            Err(ConfigError::AlreadyExists(_))
        ));
        write_initial_files(tmp.path(), true).unwrap();
        // Existing tasks survive a forced re-init
        assert!(fs::read_to_string(&store).unwrap().starts_with("1,"));
    }
}
