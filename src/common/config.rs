//! User configuration, loaded once at startup and passed around as an
//! immutable record. The tiling core never reads ambient state; everything
//! configurable arrives through [`Config`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which side of the screen the master window occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterPosition {
    Left,
    Right,
}

/// Geometry parameters of the master-stack layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Fraction of the working width given to the master window, in (0, 1).
    pub master_size: f64,
    pub master_position: MasterPosition,
    /// Gap in pixels between windows and at the screen border.
    pub padding: i32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            master_size: 0.65,
            master_position: MasterPosition::Right,
            padding: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutSettings,
    /// Window classes excluded from tiling.
    pub ignore_list: Vec<String>,
    /// Window classes inserted at the master position when first opened.
    pub register_as_root: Vec<String>,
    pub tiling_enabled: bool,
    pub logging_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            ignore_list: ["krunner", "yakuake", "spectacle", "plasmashell"]
                .map(String::from)
                .to_vec(),
            register_as_root: ["vscodium", "codium", "code", "brave-browser"]
                .map(String::from)
                .to_vec(),
            tiling_enabled: true,
            logging_enabled: true,
        }
    }
}

impl Config {
    /// Loads and normalizes a config file. Missing fields fall back to the
    /// defaults above.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.normalize();
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Loads the config from the default location, falling back to defaults
    /// if no file exists there.
    pub fn load_or_default() -> anyhow::Result<Config> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reptile").join("config.toml"))
    }

    /// Clamps out-of-range values and canonicalizes the class lists so that
    /// matching can stay a plain comparison.
    pub fn normalize(&mut self) {
        if !(self.layout.master_size > 0.0 && self.layout.master_size < 1.0) {
            self.layout.master_size = LayoutSettings::default().master_size;
        }
        self.layout.padding = self.layout.padding.max(0);
        for list in [&mut self.ignore_list, &mut self.register_as_root] {
            for class in list.iter_mut() {
                *class = class.trim().to_lowercase();
            }
        }
    }

    /// Whether the class is excluded from tiling. Windows without a resource
    /// name are host artifacts and always ignored.
    pub fn ignores(&self, class: &str) -> bool {
        let class = class.trim().to_lowercase();
        class.is_empty() || self.ignore_list.iter().any(|entry| *entry == class)
    }

    /// Whether a newly opened window of this class starts as master.
    pub fn registers_as_root(&self, class: &str) -> bool {
        let class = class.trim().to_lowercase();
        self.register_as_root.iter().any(|entry| *entry == class)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_settings() {
        let config = Config::default();
        assert_eq!(config.layout.master_size, 0.65);
        assert_eq!(config.layout.master_position, MasterPosition::Right);
        assert_eq!(config.layout.padding, 10);
        assert!(config.tiling_enabled);
        assert!(config.ignores("krunner"));
        assert!(config.registers_as_root("code"));
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let mut config: Config = toml::from_str(
            r#"
            ignore_list = ["Foo "]

            [layout]
            master_size = 0.5
            master_position = "left"
            "#,
        )
        .unwrap();
        config.normalize();
        assert_eq!(config.layout.master_size, 0.5);
        assert_eq!(config.layout.master_position, MasterPosition::Left);
        assert_eq!(config.layout.padding, 10);
        assert!(config.ignores("foo"));
        assert!(!config.ignores("krunner"));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let mut config = Config::default();
        config.layout.master_size = 0.5;
        config.layout.master_position = MasterPosition::Left;
        config.ignore_list.push("steam".to_string());
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn class_matching_is_case_insensitive() {
        let config = Config::default();
        assert!(config.ignores("KRunner"));
        assert!(config.registers_as_root(" Brave-Browser "));
        assert!(!config.registers_as_root("firefox"));
    }

    #[test]
    fn empty_class_is_always_ignored() {
        assert!(Config::default().ignores(""));
        assert!(Config::default().ignores("   "));
    }

    #[test]
    fn out_of_range_master_size_falls_back() {
        let mut config = Config::default();
        config.layout.master_size = 1.5;
        config.normalize();
        assert_eq!(config.layout.master_size, 0.65);

        config.layout.master_size = 0.0;
        config.normalize();
        assert_eq!(config.layout.master_size, 0.65);
    }

    #[test]
    fn negative_padding_is_clamped() {
        let mut config = Config::default();
        config.layout.padding = -5;
        config.normalize();
        assert_eq!(config.layout.padding, 0);
    }
}
