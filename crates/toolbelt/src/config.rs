use crate::prelude::*;
use std::path::{Path, PathBuf};
use toolbelt_core::config::{parse_config, Config};

const APP_DIR: &str = "toolbelt";

/// Resolved configuration plus the directory trackers write to.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub data_dir: PathBuf,
}

impl Settings {
    /// `--config` must exist when given; the default location may be absent.
    /// The data directory comes from `--data-dir`, then the config file, then
    /// the platform data directory.
    pub fn load(global: &crate::Global) -> Result<Self> {
        let config = load_config(global.config.as_deref(), default_config_path())?;
        let data_dir = resolve_data_dir(global.data_dir.clone(), &config)?;
        if global.verbose {
            log::info!("data directory: {}", data_dir.display());
        }
        Ok(Self { config, data_dir })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

pub fn load_config(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<Config> {
    let path = match (explicit, fallback) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(Error::Config(f!("{} does not exist", path.display())).into());
            }
            path.to_path_buf()
        }
        (None, Some(path)) if path.exists() => path,
        _ => {
            log::debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    };

    log::debug!("loading config from {}", path.display());
    let raw = std::fs::read_to_string(&path)
        .with_context(|| f!("Failed to read {}", path.display()))?;
    parse_config(&raw).map_err(|e| Error::Config(f!("{}: {e}", path.display())).into())
}

pub fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = flag.or_else(|| config.data_dir.clone()) {
        return Ok(dir);
    }
    dirs_next::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| Error::Config("Unable to determine a data directory; pass --data-dir".into()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, Some(dir.path().join("config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml")), None).is_err());
    }

    #[test]
    fn test_reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "json_indent = 4\nwater_goal_ml = 3000\n").unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.json_indent, 4);
        assert_eq!(config.water_goal_ml, 3000);
    }

    #[test]
    fn test_invalid_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "css_indent = 99").unwrap();
        let err = load_config(None, Some(path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_data_dir_precedence() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        assert_eq!(
            resolve_data_dir(Some(PathBuf::from("/from/flag")), &config).unwrap(),
            PathBuf::from("/from/flag")
        );
        assert_eq!(
            resolve_data_dir(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }
}
