use std::io::ErrorKind;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub assist: AssistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where the persisted store blob lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

/// Generative-text assist settings. A missing `api_key` disables outbound calls.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_assist_model")]
    pub model: String,
    #[serde(default = "default_assist_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_assist_timeout")]
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_assist_model(),
            endpoint: default_assist_endpoint(),
            timeout_secs: default_assist_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_data_dir() -> String { "data".into() }
fn default_assist_model() -> String { "gemini-2.5-flash".into() }
fn default_assist_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".into() }
fn default_assist_timeout() -> u64 { 30 }
fn default_log_format() -> String { "compact".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from file when present, otherwise start from defaults; env overrides apply either way.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(&config_path())
    }

    /// Only a missing file falls back to defaults. Unreadable or malformed files are errors.
    pub fn load_or_default_from(path: &str) -> Result<Self> {
        let mut cfg = match std::fs::read_to_string(path) {
            Ok(content) => load_from_str(&content).map_err(|e| anyhow!("{path}: {e}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => AppConfig::default(),
            Err(e) => return Err(anyhow!("{path}: {e}")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.assist.normalize_from_env();
        self.assist.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        Ok(())
    }
}

impl AssistConfig {
    /// Fill the credential from `API_KEY` or `GEMINI_API_KEY` when the file leaves it out.
    pub fn normalize_from_env(&mut self) {
        let missing = self.api_key.as_deref().map(|k| k.trim().is_empty()).unwrap_or(true);
        if missing {
            self.api_key = std::env::var("API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(anyhow!("assist.model is empty"));
        }
        let lower = self.endpoint.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("assist.endpoint must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("assist.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.assist.model, "gemini-2.5-flash");
        assert!(cfg.assist.api_key.is_none());
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn parses_all_sections() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            data_dir = "/var/lib/biblio"

            [assist]
            api_key = "k"
            model = "m"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.data_dir, "/var/lib/biblio");
        assert_eq!(cfg.assist.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.assist.model, "m");
        assert_eq!(cfg.assist.timeout_secs, 5);
    }

    #[test]
    fn server_section_may_set_port_only() {
        let cfg = load_from_str("[server]\nport = 9000\n[storage]\ndata_dir = \"/srv/biblio\"").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.data_dir, "/srv/biblio");
    }

    fn temp_config_path(name: &str) -> String {
        let path = std::env::temp_dir().join(format!("biblioshare-{}-{}.toml", name, uuid::Uuid::new_v4()));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_config_path("absent");
        let _ = std::fs::remove_file(&path);
        let cfg = AppConfig::load_or_default_from(&path).unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(!cfg.storage.data_dir.trim().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error_not_defaults() {
        let path = temp_config_path("malformed");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n[storage]\ndata_dir = \"/srv/biblio\"\n").unwrap();
        let err = AppConfig::load_or_default_from(&path).expect_err("bad port must not be ignored");
        assert!(err.to_string().contains(&path));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn server_normalize_fills_worker_threads() {
        let mut s = ServerConfig { host: " ".into(), port: 1, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }

    #[test]
    fn server_normalize_rejects_port_zero() {
        let mut s = ServerConfig { host: "h".into(), port: 0, worker_threads: None };
        assert!(s.normalize().is_err());
    }

    #[test]
    fn assist_validate_rejects_bad_endpoint() {
        let a = AssistConfig { endpoint: "ftp://x".into(), ..AssistConfig::default() };
        assert!(a.validate().is_err());
        let a = AssistConfig { timeout_secs: 0, ..AssistConfig::default() };
        assert!(a.validate().is_err());
        assert!(AssistConfig::default().validate().is_ok());
    }
}
