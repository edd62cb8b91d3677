//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::openai::OpenAiClient;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    openai: OpenAiClient,
}

impl AppState {
    /// Create the application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let openai = OpenAiClient::new(&config.openai);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                openai,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// `OpenAI` client.
    #[must_use]
    pub fn openai(&self) -> &OpenAiClient {
        &self.inner.openai
    }
}
