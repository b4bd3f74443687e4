use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Connection parameters for the delivery store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "password".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

impl DbConfig {
    /// Overrides from the flat `DB_*` environment variables. Each is optional
    /// and independently overridable; unset or unparsable values keep the
    /// current setting.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("DB_HOST") {
            self.host = v;
        }
        if let Ok(v) = std::env::var("DB_PORT") {
            if let Ok(p) = v.parse() {
                self.port = p;
            }
        }
        if let Ok(v) = std::env::var("DB_NAME") {
            self.name = v;
        }
        if let Ok(v) = std::env::var("DB_USER") {
            self.user = v;
        }
        if let Ok(v) = std::env::var("DB_PASSWORD") {
            self.password = v;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            db: DbConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("ANALYTICS__").split("__"));
        let mut cfg: Config = figment.extract()?;
        cfg.db.apply_env_overrides();
        Ok(cfg)
    }
}
