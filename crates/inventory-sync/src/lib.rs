//! Inventory Sync
//!
//! Client-side core of the inventory manager:
//! - model: canonical item and category records
//! - normalize: raw payload shapes to canonical records
//! - remote: the REST store behind an async repository trait
//! - collection: in-memory lists kept in step with remote CRUD calls
//!
//! Logging goes through the `log` facade; the host installs a logger.

pub mod collection;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod remote;

pub use collection::{InventoryStore, SyncStatus};
pub use config::{ApiConfig, ApiConfigBuilder, ConfigError};
pub use error::{Operation, SyncError, SyncResult};
pub use model::{default_categories, Category, InventoryItem, Quantity, DESCRIPTION_LIMIT};
pub use normalize::{normalize_category, normalize_item};
pub use remote::{RemoteRepository, RestRepository};
