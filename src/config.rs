use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub tts_url: Option<String>,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "default_narration_enabled")]
    pub narration_enabled: bool,
    #[serde(default = "default_audio_player")]
    pub audio_player: Vec<String>,
    #[serde(default)]
    pub sound_dir: Option<String>,
}

fn default_theme() -> String {
    "arctic-night".to_string()
}
fn default_api_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}
fn default_model() -> String {
    "anthropic/claude-haiku-4-5-20251001".to_string()
}
fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_tts_voice() -> String {
    "aria".to_string()
}
fn default_narration_enabled() -> bool {
    true
}
fn default_audio_player() -> Vec<String> {
    vec!["mpv".to_string(), "--really-quiet".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            api_base_url: default_api_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            tts_url: None,
            tts_voice: default_tts_voice(),
            narration_enabled: default_narration_enabled(),
            audio_player: default_audio_player(),
            sound_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("floe")
            .join("config.toml")
    }
}
