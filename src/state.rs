use crate::{
    config::Config,
    repo::{self, AnalyticsRepository},
};

/// Shared state handed to every handler. Holds the lazily-connecting pool;
/// handlers acquire a connection per request and release it on drop.
#[derive(Clone)]
pub struct AppState {
    pub repo: AnalyticsRepository,
}

impl AppState {
    pub fn new(cfg: &Config) -> Self {
        let pool = repo::connect_lazy(&cfg.db);
        Self {
            repo: AnalyticsRepository::new(pool),
        }
    }
}
