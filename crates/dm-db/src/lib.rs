//! # dm-db
//!
//! Database layer implementing the direct-message repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Row models with SQLx `FromRow` derives
//! - Model → entity mappers, including the aggregated reaction decoder
//! - The message history and send-rate repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use dm_core::traits::ChatMessageRepository;
//! use dm_core::MessagePageQuery;
//! use dm_db::pool::{create_pool, DatabaseConfig};
//! use dm_db::PgChatMessageRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = create_pool(&config).await?;
//!     let repo = PgChatMessageRepository::new(pool).with_query_timeout(config.query_timeout);
//!
//!     let page = repo
//!         .get_message_page(42, "chat-1", MessagePageQuery::new(50, Utc::now())?)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool, MIGRATIONS_DIR};
pub use repositories::PgChatMessageRepository;
