//! Service context - dependency container for services
//!
//! Holds the repositories and settings the services need. Storage access is
//! injected here rather than reached through a process-wide handle, so tests
//! can swap in an in-memory store.

use std::sync::Arc;

use dm_common::{AppConfig, HistoryConfig};
use dm_core::traits::{ChatMessageRepository, MessageRateCounter};
use dm_db::{PgChatMessageRepository, PgPool};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    message_repo: Arc<dyn ChatMessageRepository>,
    rate_counter: Arc<dyn MessageRateCounter>,
    history: HistoryConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        message_repo: Arc<dyn ChatMessageRepository>,
        rate_counter: Arc<dyn MessageRateCounter>,
        history: HistoryConfig,
    ) -> Self {
        Self {
            message_repo,
            rate_counter,
            history,
        }
    }

    /// Wire the PostgreSQL repository into both roles
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Self {
        let repo = Arc::new(
            PgChatMessageRepository::new(pool).with_query_timeout(config.database.query_timeout()),
        );
        Self::new(repo.clone(), repo, config.history.clone())
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn ChatMessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the send-rate counter
    pub fn rate_counter(&self) -> &dyn MessageRateCounter {
        self.rate_counter.as_ref()
    }

    /// Get the paging and rate-window settings
    pub fn history(&self) -> &HistoryConfig {
        &self.history
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("history", &self.history)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    message_repo: Option<Arc<dyn ChatMessageRepository>>,
    rate_counter: Option<Arc<dyn MessageRateCounter>>,
    history: Option<HistoryConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_repo(mut self, repo: Arc<dyn ChatMessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn rate_counter(mut self, counter: Arc<dyn MessageRateCounter>) -> Self {
        self.rate_counter = Some(counter);
        self
    }

    pub fn history(mut self, history: HistoryConfig) -> Self {
        self.history = Some(history);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.rate_counter
                .ok_or_else(|| ServiceError::validation("rate_counter is required"))?,
            self.history.unwrap_or_default(),
        ))
    }
}
