//! Configuration
//!
//! Loaded from `trackr.toml` in the working directory when present, then
//! overridden by environment variables. Everything has a safe default: with
//! no config at all the pipeline runs with the heuristic ranker and a local
//! file store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default config file name
pub const CONFIG_FILE: &str = "trackr.toml";

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".trackr/data")
}

const fn default_fetch_timeout() -> u64 {
    10
}

const fn default_port() -> u16 {
    8080
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Generative model used for live ranking
    #[serde(default = "default_model")]
    pub llm_model: String,

    /// API key for the generative backend; blank disables live ranking
    #[serde(default)]
    pub gemini_api_key: String,

    /// Master switch for live ranking
    #[serde(default)]
    pub enable_live_llm: bool,

    /// Root directory for the file stores
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Per-request fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// API server listen port
    #[serde(default = "default_port")]
    pub server_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_model: default_model(),
            gemini_api_key: String::new(),
            enable_live_llm: false,
            data_dir: default_data_dir(),
            fetch_timeout_secs: default_fetch_timeout(),
            server_port: default_port(),
        }
    }
}

impl Config {
    /// Load config from `trackr.toml` (if present) plus env overrides
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::load_file(Path::new(CONFIG_FILE)).unwrap_or_default();
        config.apply_env();
        config
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring malformed {}: {err}", path.display());
                None
            },
        }
    }

    /// Environment variables win over the file
    ///
    /// `GEMINI_API_KEY`, `TRACKR_MODEL`, `TRACKR_ENABLE_LIVE_LLM`,
    /// `TRACKR_DATA_DIR`, `TRACKR_PORT`.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                self.gemini_api_key = key;
            }
        }
        if let Ok(model) = std::env::var("TRACKR_MODEL") {
            if !model.trim().is_empty() {
                self.llm_model = model;
            }
        }
        if let Ok(flag) = std::env::var("TRACKR_ENABLE_LIVE_LLM") {
            self.enable_live_llm = matches!(flag.trim(), "1" | "true" | "yes");
        }
        if let Ok(dir) = std::env::var("TRACKR_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(port) = std::env::var("TRACKR_PORT") {
            if let Ok(parsed) = port.trim().parse() {
                self.server_port = parsed;
            }
        }
    }
}
