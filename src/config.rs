//! Configuration file support for tfbs-explorer
//!
//! Reads from .tfbs-explorer/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::{Layout, Size};
use crate::view::TfCounts;

pub const CONFIG_DIR: &str = ".tfbs-explorer";

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Where the summary document lives
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DataConfig {
    /// Default: viz_data/tfbs_summary_top40.json
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

/// TF-count control settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ViewConfig {
    /// Values offered by the TF-count selector
    /// Default: [10, 20, 30, 40]
    #[serde(default = "default_tf_counts")]
    pub tf_counts: Vec<usize>,

    /// Default: 40
    #[serde(default = "default_tf_count")]
    pub default_tf_count: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Initial panel sizes, used until a front end reports its own
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_heatmap_width")]
    pub heatmap_width: f64,
    #[serde(default = "default_heatmap_height")]
    pub heatmap_height: f64,
    #[serde(default = "default_bars_width")]
    pub bars_width: f64,
    #[serde(default = "default_bars_height")]
    pub bars_height: f64,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("viz_data/tfbs_summary_top40.json")
}

fn default_tf_counts() -> Vec<usize> {
    TfCounts::default().values().to_vec()
}

fn default_tf_count() -> usize {
    40
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_heatmap_width() -> f64 {
    960.0
}

fn default_heatmap_height() -> f64 {
    560.0
}

fn default_bars_width() -> f64 {
    960.0
}

fn default_bars_height() -> f64 {
    320.0
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tf_counts: default_tf_counts(),
            default_tf_count: default_tf_count(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            heatmap_width: default_heatmap_width(),
            heatmap_height: default_heatmap_height(),
            bars_width: default_bars_width(),
            bars_height: default_bars_height(),
        }
    }
}

impl Config {
    /// Load config from .tfbs-explorer/config.toml
    /// Returns default config if file doesn't exist or doesn't parse
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            if let Some(config) = Self::load_from(&path) {
                tracing::debug!(path = %path.display(), "loaded config");
                return config;
            }
            tracing::warn!(path = %path.display(), "ignoring unreadable config");
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        toml::from_str(&contents).ok()
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        Self::find_config_from(&current_dir)
    }

    fn find_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
            .find(|path| path.exists())
    }

    pub fn tf_counts(&self) -> TfCounts {
        TfCounts::new(self.view.tf_counts.clone())
    }

    pub fn layout(&self) -> Layout {
        Layout {
            heatmap: Size::new(self.layout.heatmap_width, self.layout.heatmap_height),
            bars: Size::new(self.layout.bars_width, self.layout.bars_height),
            ..Layout::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("viz_data/tfbs_summary_top40.json"));
        assert_eq!(config.view.tf_counts, vec![10, 20, 30, 40]);
        assert_eq!(config.view.default_tf_count, 40);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.layout(), Layout::default());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[view]
tf_counts = [5, 15]
default_tf_count = 15

[server]
port = 9100
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tf_counts().values(), &[5, 15]);
        assert_eq!(config.view.default_tf_count, 15);
        assert_eq!(config.server.port, 9100);
        // untouched sections keep their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.layout.bars_height, 320.0);
    }

    #[test]
    fn test_layout_from_config() {
        let config: Config = toml::from_str("[layout]\nheatmap_width = 640\n").unwrap();
        let layout = config.layout();
        assert_eq!(layout.heatmap, Size::new(640.0, 560.0));
        assert_eq!(layout.mini, Layout::default().mini);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_DIR).join("config.toml"),
            "[data]\npath = \"elsewhere.json\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::find_config_from(&nested).unwrap();
        let config = Config::load_from(&found).unwrap();
        assert_eq!(config.data.path, PathBuf::from("elsewhere.json"));
    }

    #[test]
    fn test_unparsable_config_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[view\ntf_counts = ").unwrap();
        assert!(Config::load_from(&path).is_none());
    }
}
