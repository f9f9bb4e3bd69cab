//! User configuration
//!
//! The shell reads an optional `config.toml` and hands its contents to
//! [`parse_config`]. Every field has a default, so an empty file (or no file at
//! all) yields [`Config::default`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

const MAX_INDENT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per level for `format json`.
    pub json_indent: usize,
    /// Spaces per level for `format css`.
    pub css_indent: usize,
    /// Spaces used to indent clause bodies in `format sql`.
    pub sql_indent: usize,
    /// Daily goal for the water intake tracker.
    pub water_goal_ml: u32,
    /// Where stateful tools keep their lists. Falls back to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json_indent: 2,
            css_indent: 2,
            sql_indent: 2,
            water_goal_ml: 2000,
            data_dir: None,
        }
    }
}

/// Parse and validate a TOML configuration document.
pub fn parse_config(raw: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(raw).map_err(|e| ToolError::parse(format!("Invalid config file: {e}")))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    for (name, value) in [
        ("json_indent", config.json_indent),
        ("css_indent", config.css_indent),
        ("sql_indent", config.sql_indent),
    ] {
        if value > MAX_INDENT {
            return Err(ToolError::invalid(format!(
                "{name} must be between 0 and {MAX_INDENT}, got {value}"
            )));
        }
    }

    if config.water_goal_ml == 0 {
        return Err(ToolError::invalid("water_goal_ml must be greater than 0"));
    }

    Ok(())
}
