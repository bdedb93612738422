//! Synchronized Collection
//!
//! In-memory copy of the remote inventory, kept in step with remote CRUD
//! calls. Local state changes only after the remote call succeeded, and no
//! lock is held across an await, so independent operations can interleave
//! freely. Two updates to the same id land in whatever order their responses
//! arrive.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Operation, SyncError, SyncResult};
use crate::model::{default_categories, Category, InventoryItem};
use crate::normalize::{normalize_category, normalize_item};
use crate::remote::RemoteRepository;


/// Shared loading/error status for the list loads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pending: usize,
    /// Last inventory load failure, cleared by the next successful load
    pub error: Option<String>,
}

impl SyncStatus {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// Owner of the canonical item and category lists for one session
pub struct InventoryStore<R> {
    remote: R,
    items: RwLock<Vec<InventoryItem>>,
    categories: RwLock<Vec<Category>>,
    status: RwLock<SyncStatus>,
}

impl<R: RemoteRepository> InventoryStore<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            items: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
            status: RwLock::new(SyncStatus::default()),
        }
    }

    // ========================
    // Snapshots
    // ========================

    pub fn items(&self) -> Vec<InventoryItem> {
        read(&self.items).clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        read(&self.categories).clone()
    }

    pub fn status(&self) -> SyncStatus {
        read(&self.status).clone()
    }

    /// Name of the category with the given id
    pub fn category_name(&self, id: &str) -> Option<String> {
        read(&self.categories)
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.clone())
    }

    // ========================
    // List Loads
    // ========================

    /// Replace the categories with the remote list.
    ///
    /// Never fails: an empty, malformed or unreachable remote list is
    /// replaced by the built-in defaults.
    pub async fn load_categories(&self) -> Vec<Category> {
        let _loading = self.begin_load();

        let categories = match self.remote.list_categories().await {
            Ok(payload) => {
                let categories = categories_from_payload(&payload);
                if categories.is_empty() {
                    log::warn!("remote returned no usable categories, using built-in list");
                }
                categories
            }
            Err(err) => {
                log::warn!("{}; using built-in categories", err);
                Vec::new()
            }
        };
        let categories = if categories.is_empty() {
            default_categories()
        } else {
            categories
        };

        *write(&self.categories) = categories.clone();
        categories
    }

    /// Replace the items with the remote list.
    ///
    /// Never fails: on any error the list becomes empty and the error is
    /// recorded in [`SyncStatus::error`].
    pub async fn load_inventories(&self) -> Vec<InventoryItem> {
        let _loading = self.begin_load();

        let items: SyncResult<Vec<InventoryItem>> = match self.remote.list_inventories().await {
            Ok(Value::Array(entries)) => Ok(entries.iter().map(normalize_item).collect()),
            Ok(other) => Err(SyncError::malformed(
                Operation::LoadInventories,
                format!("expected a list, got {}", kind(&other)),
            )),
            Err(err) => Err(err),
        };

        let items = match items {
            Ok(items) => {
                write(&self.status).error = None;
                items
            }
            Err(err) => {
                log::error!("{}", err);
                write(&self.status).error = Some(err.to_string());
                Vec::new()
            }
        };

        *write(&self.items) = items.clone();
        items
    }

    // ========================
    // Single-Item Operations
    // ========================

    /// Fetch one item. Does not touch the local list.
    pub async fn get_by_id(&self, id: &str) -> SyncResult<InventoryItem> {
        let operation = Operation::GetInventory(id.to_string());
        require_id(&operation, id).map_err(logged)?;
        let payload = self.remote.get_inventory(id).await.map_err(logged)?;
        record_from_payload(operation, &payload).map_err(logged)
    }

    /// Create an item remotely and append the stored version.
    pub async fn create<T: Serialize + ?Sized>(&self, item: &T) -> SyncResult<InventoryItem> {
        let operation = Operation::CreateInventory;
        let body = to_body(&operation, item).map_err(logged)?;
        let payload = self.remote.create_inventory(&body).await.map_err(logged)?;
        let created = record_from_payload(operation, &payload).map_err(logged)?;

        write(&self.items).push(created.clone());
        Ok(created)
    }

    /// Update an item remotely and patch the local copy, if there still is one.
    pub async fn update<T: Serialize + ?Sized>(&self, id: &str, item: &T) -> SyncResult<InventoryItem> {
        let operation = Operation::UpdateInventory(id.to_string());
        require_id(&operation, id).map_err(logged)?;
        let body = to_body(&operation, item).map_err(logged)?;
        let payload = self.remote.update_inventory(id, &body).await.map_err(logged)?;
        let updated = record_from_payload(operation, &payload).map_err(logged)?;

        match write(&self.items).iter_mut().find(|local| local.id == id) {
            Some(local) => *local = updated.clone(),
            None => log::debug!("item {} updated remotely but no longer held locally", id),
        }
        Ok(updated)
    }

    /// Delete an item remotely and drop the local copy.
    ///
    /// An empty id is refused: every id-less record would match it locally.
    pub async fn delete(&self, id: &str) -> SyncResult<bool> {
        require_id(&Operation::DeleteInventory(id.to_string()), id).map_err(logged)?;
        self.remote.delete_inventory(id).await.map_err(logged)?;
        write(&self.items).retain(|item| item.id != id);
        Ok(true)
    }

    fn begin_load(&self) -> LoadingGuard<'_> {
        write(&self.status).pending += 1;
        LoadingGuard { status: &self.status }
    }
}

/// Marks a list load as finished when dropped, including when the load
/// future itself is dropped mid-flight.
struct LoadingGuard<'a> {
    status: &'a RwLock<SyncStatus>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut status = write(self.status);
        status.pending = status.pending.saturating_sub(1);
    }
}

fn categories_from_payload(payload: &Value) -> Vec<Category> {
    match payload {
        Value::Array(entries) => entries
            .iter()
            .filter_map(normalize_category)
            .filter(|category| !category.name.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn require_id(operation: &Operation, id: &str) -> SyncResult<()> {
    if id.is_empty() {
        return Err(SyncError::MissingId(operation.clone()));
    }
    Ok(())
}

/// Single-record responses must at least be objects.
fn record_from_payload(operation: Operation, payload: &Value) -> SyncResult<InventoryItem> {
    match payload {
        Value::Object(_) => Ok(normalize_item(payload)),
        other => Err(SyncError::malformed(
            operation,
            format!("expected an object, got {}", kind(other)),
        )),
    }
}

fn to_body<T: Serialize + ?Sized>(operation: &Operation, item: &T) -> SyncResult<Value> {
    serde_json::to_value(item).map_err(|e| SyncError::malformed(operation.clone(), e))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn logged(err: SyncError) -> SyncError {
    log::error!("{}", err);
    err
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
