use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BACKEND_URL_ENV: &str = "ART_ANALYZE_BACKEND_URL";

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_origin() -> String {
    "app://art-analyze".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_top_k() -> u32 {
    3
}

fn default_threshold() -> f32 {
    0.2
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Sent as the `Origin` header so the backend's CORS rules see a stable caller.
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_true")]
    pub use_gpt_summary: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub start_signed_in: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            url: default_backend_url(),
            origin: default_origin(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            max_bytes: default_max_bytes(),
            top_k: default_top_k(),
            threshold: default_threshold(),
            use_gpt_summary: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1180,
            height: 820,
            min_width: 720,
            min_height: 560,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Config {
    /// Loads the user config, falling back to defaults, then applies
    /// environment overrides.
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        let mut config = if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("{:#}. Using defaults.", e);
                    Config::default()
                }
            }
        } else {
            // Create config directory if it doesn't exist
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            Config::default()
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.apply_backend_override(&url);
        }

        config
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Error parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_backend_override(&mut self, url: &str) {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            tracing::info!("Backend URL overridden from {}: {}", BACKEND_URL_ENV, url);
            self.backend.url = url.to_string();
        }
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_config_dir() -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config/art-analyze")
        } else {
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.upload.top_k, 3);
        assert!((config.upload.threshold - 0.2).abs() < f32::EPSILON);
        assert!(config.upload.use_gpt_summary);
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert!(!config.auth.start_signed_in);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
            [backend]
            url = "https://api.example.com"

            [upload]
            top_k = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.url, "https://api.example.com");
        assert_eq!(config.backend.timeout_secs, 120);
        assert_eq!(config.upload.top_k, 5);
        assert!(config.upload.use_gpt_summary);
        assert_eq!(config.window.width, 1180);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nurl = 3").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Error parsing"));
    }

    #[test]
    fn test_backend_override_trims_trailing_slash() {
        let mut config = Config::default();
        config.apply_backend_override("http://10.0.0.2:9000/ ");
        assert_eq!(config.backend.url, "http://10.0.0.2:9000");

        config.apply_backend_override("   ");
        assert_eq!(config.backend.url, "http://10.0.0.2:9000");
    }

    #[test]
    fn test_timeout_never_zero() {
        let mut backend = BackendConfig::default();
        backend.timeout_secs = 0;
        assert_eq!(backend.timeout(), Duration::from_secs(1));
    }
}
