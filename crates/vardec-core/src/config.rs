//! Configuration file loading for vardec.
//!
//! Reads `.vardec/vardec.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::LanguageId;

pub const CONFIG_DIR: &str = ".vardec";
pub const CONFIG_FILE: &str = "vardec.json";

/// Top-level vardec configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VardecConfig {
    /// Annotate automatically when a document is opened or activated.
    #[serde(default = "default_true")]
    pub auto_annotate: bool,
    /// Tab width used when the editing surface does not report one.
    #[serde(default = "default_tab_size")]
    pub tab_size: u32,
    /// Quiet period after the last edit before a pass runs.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Append remaining use counts to hint labels.
    #[serde(default)]
    pub show_use_counts: bool,
    #[serde(default = "default_hint_prefix")]
    pub hint_prefix: String,
    /// Languages to analyze. Empty means every supported language.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_tab_size() -> u32 {
    4
}
fn default_settle_ms() -> u64 {
    500
}
fn default_hint_prefix() -> String {
    "↳ ".to_string()
}

impl Default for VardecConfig {
    fn default() -> Self {
        Self {
            auto_annotate: true,
            tab_size: default_tab_size(),
            settle_ms: default_settle_ms(),
            show_use_counts: false,
            hint_prefix: default_hint_prefix(),
            languages: vec![],
            ignore_patterns: vec![],
        }
    }
}

impl VardecConfig {
    /// Load configuration from `vardec.json` inside the given config directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Write the configuration as pretty JSON, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(config_dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(config_dir.join(CONFIG_FILE), json)
    }

    /// Whether `language` is enabled. Entries may use either vardec names
    /// (`tsx`) or editor identifiers (`typescriptreact`).
    pub fn is_enabled(&self, language: LanguageId) -> bool {
        self.languages.is_empty()
            || self.languages.iter().any(|l| {
                l == language.as_str() || LanguageId::from_editor_id(l) == Some(language)
            })
    }
}
