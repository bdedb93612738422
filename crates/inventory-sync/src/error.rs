//! Sync Error Types
//!
//! Every remote failure names the operation it interrupted, so a message like
//! `update inventory 42 failed: HTTP error 404` can be shown or logged as-is.
//!
//! # Error Categories
//!
//! - `Network` - the request never produced a response
//! - `Status` - the store answered with a non-2xx status
//! - `Malformed` - the body could not be encoded or did not have the expected shape
//! - `MissingId` - a single-item call was made for a record the store never identified
//! - `Config` - the client was configured with an unusable base URL

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;

/// Common result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Remote operation a failure belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    LoadCategories,
    LoadInventories,
    GetInventory(String),
    CreateInventory,
    UpdateInventory(String),
    DeleteInventory(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::LoadCategories => f.write_str("load categories"),
            Operation::LoadInventories => f.write_str("load inventories"),
            Operation::GetInventory(id) => with_id(f, "get inventory", id),
            Operation::CreateInventory => f.write_str("create inventory"),
            Operation::UpdateInventory(id) => with_id(f, "update inventory", id),
            Operation::DeleteInventory(id) => with_id(f, "delete inventory", id),
        }
    }
}

fn with_id(f: &mut fmt::Formatter<'_>, verb: &str, id: &str) -> fmt::Result {
    if id.is_empty() {
        f.write_str(verb)
    } else {
        write!(f, "{} {}", verb, id)
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{operation} failed: network error: {message}")]
    Network { operation: Operation, message: String },

    #[error("{operation} failed: HTTP error {status}")]
    Status { operation: Operation, status: u16 },

    #[error("{operation} failed: unexpected response: {message}")]
    Malformed { operation: Operation, message: String },

    #[error("{0} refused: the item has no id")]
    MissingId(Operation),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    pub fn network(operation: Operation, cause: impl fmt::Display) -> Self {
        Self::Network {
            operation,
            message: cause.to_string(),
        }
    }

    pub fn status(operation: Operation, status: u16) -> Self {
        Self::Status { operation, status }
    }

    pub fn malformed(operation: Operation, cause: impl fmt::Display) -> Self {
        Self::Malformed {
            operation,
            message: cause.to_string(),
        }
    }

    /// The interrupted operation, if the error came from a remote call
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            Self::Network { operation, .. }
            | Self::Status { operation, .. }
            | Self::Malformed { operation, .. }
            | Self::MissingId(operation) => Some(operation),
            Self::Config(_) => None,
        }
    }
}
