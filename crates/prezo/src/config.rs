use anyhow::{Context, Result};
use serde::Deserialize;

use crate::input::DEFAULT_HOT_ZONE;
use crate::layout::TransformStyle;

pub const CONFIG_ELEMENT_ID: &str = "prezo-config";

const MAX_PRESENT_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stage_selector: String,

    pub slide_selector: String,

    /// Delay before a newly current slide gets its `present` class, so its
    /// transition is not skipped.
    pub present_delay_ms: u32,

    pub hot_zone: f64,

    pub fullscreen: bool,

    /// Forces a transform strategy instead of detecting one.
    pub transform: Option<TransformStyle>,

    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_selector: "#slideshow".to_string(),
            slide_selector: "#slideshow>section".to_string(),
            present_delay_ms: 10,
            hot_zone: DEFAULT_HOT_ZONE,
            fullscreen: true,
            transform: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse and validate a YAML document. Blank input gives the defaults.
    pub fn from_yaml(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(source).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stage_selector.trim().is_empty() {
            anyhow::bail!("Invalid stage_selector: must not be empty.");
        }
        if self.slide_selector.trim().is_empty() {
            anyhow::bail!("Invalid slide_selector: must not be empty.");
        }
        if !(self.hot_zone > 0.0 && self.hot_zone <= 0.5) {
            anyhow::bail!(
                "Invalid hot_zone: {}. Must be greater than 0 and at most 0.5.",
                self.hot_zone
            );
        }
        if self.present_delay_ms > MAX_PRESENT_DELAY_MS {
            anyhow::bail!(
                "Invalid present_delay_ms: {}. Must be at most {MAX_PRESENT_DELAY_MS}.",
                self.present_delay_ms
            );
        }
        parse_level(&self.log_level)?;
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        parse_level(&self.log_level).unwrap_or(log::Level::Info)
    }
}

fn parse_level(name: &str) -> Result<log::Level> {
    match name {
        "error" => Ok(log::Level::Error),
        "warn" => Ok(log::Level::Warn),
        "info" => Ok(log::Level::Info),
        "debug" => Ok(log::Level::Debug),
        "trace" => Ok(log::Level::Trace),
        _ => anyhow::bail!(
            "Invalid log_level: {name}. Must be 'error', 'warn', 'info', 'debug', or 'trace'."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_yaml("present_delay_ms: 25\nhot_zone: 0.25\n").unwrap();
        assert_eq!(config.present_delay_ms, 25);
        assert_eq!(config.hot_zone, 0.25);
        assert_eq!(config.stage_selector, "#slideshow");
        assert!(config.fullscreen);
    }

    #[test]
    fn test_transform_override() {
        let config = Config::from_yaml("transform: scale3d").unwrap();
        assert_eq!(config.transform, Some(TransformStyle::Scale3d));
        let config = Config::from_yaml("transform: scale").unwrap();
        assert_eq!(config.transform, Some(TransformStyle::Scale2d));
        assert!(Config::from_yaml("transform: rotate").is_err());
    }

    #[test]
    fn test_invalid_hot_zone() {
        for value in ["0", "0.6", "-0.1"] {
            let err = Config::from_yaml(&format!("hot_zone: {value}")).unwrap_err();
            assert!(err.to_string().contains("hot_zone"), "{err}");
        }
    }

    #[test]
    fn test_invalid_delay_and_selector() {
        assert!(Config::from_yaml("present_delay_ms: 5000").is_err());
        assert!(Config::from_yaml("slide_selector: ''").is_err());
    }

    #[test]
    fn test_log_level() {
        let config = Config::from_yaml("log_level: debug").unwrap();
        assert_eq!(config.log_level(), log::Level::Debug);
        assert!(Config::from_yaml("log_level: loud").is_err());
        assert_eq!(Config::default().log_level(), log::Level::Info);
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(Config::from_yaml("hot_zone: [1, 2").is_err());
    }
}
