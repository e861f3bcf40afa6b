use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;

use crate::config::Config;

/// Narration synthesis: text in, playable clip file out. Clips are cached
/// under the data dir keyed by voice + text, so repeated read-alouds of the
/// same step never refetch. Returns None on any failure; the caller skips the
/// step (the audio queue's error-skip semantics cover late failures).
pub struct SpeechSynthesizer {
    endpoint: Option<String>,
    voice: String,
    timeout_secs: u64,
    cache_dir: Option<PathBuf>,
}

impl SpeechSynthesizer {
    pub fn from_config(config: &Config) -> Self {
        let cache_dir = dirs::data_dir().map(|d| d.join("floe").join("narration"));
        Self {
            endpoint: config.tts_url.clone(),
            voice: config.tts_voice.clone(),
            timeout_secs: config.request_timeout_secs,
            cache_dir,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn synthesize(&self, text: &str) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;
        fs::create_dir_all(cache_dir).ok()?;

        let path = cache_dir.join(format!("{}.mp3", clip_key(&self.voice, text)));
        if path.exists() {
            return Some(path);
        }

        let bytes = self.fetch(text)?;
        fs::write(&path, bytes).ok()?;
        Some(path)
    }

    #[cfg(feature = "network")]
    fn fetch(&self, text: &str) -> Option<Vec<u8>> {
        let endpoint = self.endpoint.as_ref()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .ok()?;
        let response = client
            .post(endpoint)
            .json(&serde_json::json!({ "text": text, "voice": self.voice }))
            .send()
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.bytes().ok().map(|b| b.to_vec())
    }

    #[cfg(not(feature = "network"))]
    fn fetch(&self, _text: &str) -> Option<Vec<u8>> {
        None
    }
}

fn clip_key(voice: &str, text: &str) -> String {
    let mut hasher = DefaultHasher::new();
    voice.hash(&mut hasher);
    text.hash(&mut hasher);
    let prefix: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(24)
        .collect();
    format!("{}-{:016x}", prefix.to_lowercase(), hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_key_is_stable_and_filesystem_safe() {
        let a = clip_key("aria", "Let's try again!");
        let b = clip_key("aria", "Let's try again!");
        assert_eq!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn clip_key_varies_by_voice_and_text() {
        assert_ne!(clip_key("aria", "hello"), clip_key("finn", "hello"));
        assert_ne!(clip_key("aria", "hello"), clip_key("aria", "goodbye"));
    }
}
