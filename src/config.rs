use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub spacing: SpacingConfig,
    pub highlight: HighlightConfig,
    pub clipboard: ClipboardConfig,
}

/// Spacer heights inserted after top-level blocks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    pub heading: String,
    pub body: String,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            heading: "30px".to_string(),
            body: "24px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enabled: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: "InspiredGitHub".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Program and arguments; the fragment is written to its stdin.
    pub command: Vec<String>,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: ["xclip", "-selection", "clipboard", "-t", "text/html"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// The bundled `default_config.toml`, validated by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}
