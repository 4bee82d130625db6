use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub docs: DocsConfig,
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

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }

/// Which gate runs in front of a resource's write routes before the store
/// sees the body.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Structural check against the resource's request schema.
    Schema,
    /// No gate; the body goes straight to the store.
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_users_mode")]
    pub users: ValidationMode,
    #[serde(default = "default_products_mode")]
    pub products: ValidationMode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { users: default_users_mode(), products: default_products_mode() }
    }
}

fn default_users_mode() -> ValidationMode { ValidationMode::Schema }
fn default_products_mode() -> ValidationMode { ValidationMode::Disabled }

#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_enabled")]
    pub enabled: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self { enabled: default_docs_enabled() }
    }
}

fn default_docs_enabled() -> bool { true }

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

fn default_log_format() -> String { "compact".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from the config file; fall back to defaults plus environment
    /// overrides when there is no file. A file that exists but does not parse
    /// is an error.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("{path}: {e}"))?
        } else {
            let mut cfg = AppConfig::default();
            cfg.server.apply_env();
            cfg
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.logging.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
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

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<()> {
        let format = self.format.trim().to_ascii_lowercase();
        match format.as_str() {
            "" => self.format = default_log_format(),
            "compact" | "json" => self.format = format,
            other => return Err(anyhow!("logging.format must be \"compact\" or \"json\", got {other:?}")),
        }
        Ok(())
    }
}
