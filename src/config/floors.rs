//! Floor layout loading from config.toml
//!
//! The building layout is configuration data. A `config.toml` may carry a full replacement
//! table:
//!
//! ```toml
//! [[floors]]
//! floor = 2
//! grade = 9
//! sections = ["A", "B", "C", "D", "E", "F"]
//! ```
//!
//! When the file or its `floors` table is absent the standard layout is used. A supplied table
//! must cover every class exactly once or loading fails.

use crate::{
    core::{
        class::{Grade, Section},
        floor::{Floor, FloorLayout, FloorRule},
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "ATTENDANCE_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Replacement floor rules; `None` keeps the standard layout
    #[serde(default)]
    pub floors: Option<Vec<FloorRuleConfig>>,
}

/// One `[[floors]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct FloorRuleConfig {
    /// Floor number (2, 3 or 4)
    pub floor: i32,
    /// Grade number (7, 8 or 9)
    pub grade: i32,
    /// Section letters of that grade on this floor
    pub sections: Vec<String>,
}

impl FloorRuleConfig {
    fn into_rule(self) -> Result<FloorRule> {
        let floor = Floor::try_from(self.floor)?;
        let grade = Grade::from_number(self.grade).ok_or_else(|| Error::Config {
            message: format!("Unknown grade {} in floor {} rule", self.grade, self.floor),
        })?;
        let sections = self
            .sections
            .iter()
            .map(|raw| {
                Section::parse(raw).ok_or_else(|| Error::Config {
                    message: format!("Unknown section {raw:?} in floor {} rule", self.floor),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FloorRule {
            floor,
            grade,
            sections,
        })
    }
}

impl Config {
    /// Builds the floor layout this configuration describes.
    pub fn floor_layout(&self) -> Result<FloorLayout> {
        match &self.floors {
            None => Ok(FloorLayout::default()),
            Some(rules) => {
                let rules = rules
                    .iter()
                    .cloned()
                    .map(FloorRuleConfig::into_rule)
                    .collect::<Result<Vec<_>>>()?;
                FloorLayout::new(rules)
            }
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the floor layout from `ATTENDANCE_CONFIG` (default `./config.toml`).
///
/// A missing file is not an error: the standard layout applies.
pub fn load_floor_layout() -> Result<FloorLayout> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        tracing::info!("No config file at {}, using standard floor layout", path);
        return Ok(FloorLayout::default());
    }

    let layout = load_config(&path)?.floor_layout()?;
    tracing::info!("Loaded floor layout from {}", path);
    Ok(layout)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    const MOVED_9G: &str = r#"
        [[floors]]
        floor = 2
        grade = 9
        sections = ["A", "B", "C", "D", "E", "F", "G"]

        [[floors]]
        floor = 3
        grade = 8
        sections = ["A", "B", "C", "D", "E", "F"]

        [[floors]]
        floor = 4
        grade = 7
        sections = ["A", "B", "C", "D", "E", "F", "G"]

        [[floors]]
        floor = 4
        grade = 8
        sections = ["g"]
    "#;

    #[test]
    fn test_empty_config_uses_standard_layout() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.floor_layout().unwrap(), FloorLayout::default());
    }

    #[test]
    fn test_parse_floor_rules() {
        let config: Config = toml::from_str(MOVED_9G).unwrap();
        let layout = config.floor_layout().unwrap();
        assert_eq!(layout.resolve(9, "G").unwrap(), Floor::Second);
        assert_eq!(layout.resolve(8, "G").unwrap(), Floor::Fourth);
        assert_eq!(layout.rules().len(), 4);
    }

    #[test]
    fn test_incomplete_rules_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[floors]]
            floor = 2
            grade = 9
            sections = ["A"]
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.floor_layout(),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_unknown_floor_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[floors]]
            floor = 5
            grade = 9
            sections = ["A"]
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.floor_layout(),
            Err(Error::InvalidFloor { floor: 5 })
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MOVED_9G.as_bytes()).unwrap();

        let layout = load_config(file.path()).unwrap().floor_layout().unwrap();
        assert_eq!(layout.resolve(9, "G").unwrap(), Floor::Second);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
