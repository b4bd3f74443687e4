pub mod analytics;

pub use analytics::AnalyticsRepository;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DbConfig;

/// Build a lazily-connecting pool from the configured parameters. No
/// connection is attempted until the first request acquires one, so the
/// service starts even when the store is down.
pub fn connect_lazy(cfg: &DbConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .database(&cfg.name)
        .username(&cfg.user)
        .password(&cfg.password);

    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .connect_lazy_with(options)
}
