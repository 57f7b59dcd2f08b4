use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Create the `items` table at startup if it does not exist.
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Which backend the server runs with. Exactly one is active per process.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum StorageMode {
    #[serde(rename = "in-mem")]
    InMemory,
    #[serde(rename = "json-store")]
    JsonFile,
    #[serde(rename = "pgdb")]
    Postgres,
}

impl std::str::FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "in-mem" => Ok(Self::InMemory),
            "json-store" => Ok(Self::JsonFile),
            "pgdb" => Ok(Self::Postgres),
            other => Err(anyhow!("unknown storage mode '{other}' (expected in-mem, json-store or pgdb)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: Option<StorageMode>,
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    /// Load `config.toml` if present (defaults otherwise), apply env overrides, then validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())?;
        self.server.normalize()?;
        self.storage.validate()?;
        // The database section only matters when the relational backend is selected.
        if self.storage.mode == Some(StorageMode::Postgres) {
            self.database.validate()?;
        }
        Ok(())
    }

    /// Environment variables take precedence over values from the TOML file.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.apply_env(&env);
        self.storage.apply_env(&env)?;
        self.database.apply_env(&env);
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if let Some(host) = env("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = env("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = env("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(mode) = env("STORAGE_MODE") {
            self.mode = Some(mode.parse()?);
        }
        if let Some(path) = env("JSON_STORE_PATH") {
            self.json_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let Some(mode) = self.mode else {
            return Err(anyhow!("no storage mode configured; set storage.mode or STORAGE_MODE to in-mem, json-store or pgdb"));
        };
        if mode == StorageMode::JsonFile {
            let path = self
                .json_path
                .as_ref()
                .ok_or_else(|| anyhow!("storage.json_path is required for json-store mode"))?;
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                return Err(anyhow!("storage.json_path must point to a .json file, got {}", path.display()));
            }
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = env("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.url = url;
        }
        if let Some(flag) = env("DB_RUN_MIGRATIONS") {
            self.run_migrations = matches!(flag.trim(), "1" | "true" | "yes");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
