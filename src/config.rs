use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "textaug.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub builtin_sample_path: String,
    pub sample_words: u32,
    pub discard_stale_responses: bool,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            builtin_sample_path: "dataset/tiny-shakespeare.txt".to_string(),
            sample_words: 100,
            discard_stale_responses: false,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Config, String> {
        let config = toml::from_str::<Config>(contents).map_err(|e| e.to_string())?;
        if config.server_url.trim().is_empty() {
            return Err("server_url must not be empty".to_string());
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, String> {
    match fs::read_to_string(file_path) {
        Ok(contents) => Config::from_toml_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", file_path, e)),
        Err(e) => Err(format!(
            "Failed to read {}: {}. Please ensure it exists.",
            file_path, e
        )),
    }
}

/// A missing file is not an error here: the defaults point at a local backend.
pub fn load_config_or_default(file_path: &str) -> Result<Config, String> {
    if Path::new(file_path).exists() {
        load_config_from_file(file_path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sample_words, 100);
        assert_eq!(config.builtin_sample_path, "dataset/tiny-shakespeare.txt");
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = Config::from_toml_str(
            "server_url = \"http://backend:9000\"\ndiscard_stale_responses = true\nrequest_timeout_secs = 30\n",
        )
        .unwrap();
        assert_eq!(config.server_url, "http://backend:9000");
        assert!(config.discard_stale_responses);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.sample_words, 100);
    }

    #[test]
    fn blank_server_url_is_rejected() {
        assert!(Config::from_toml_str("server_url = \"  \"").is_err());
    }

    #[test]
    fn wrong_types_are_reported() {
        let err = Config::from_toml_str("sample_words = \"many\"").unwrap_err();
        assert!(err.contains("sample_words"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_or_default("definitely/not/here/textaug.toml").unwrap();
        assert_eq!(config, Config::default());
        assert!(load_config_from_file("definitely/not/here/textaug.toml").is_err());
    }
}
