//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod inventory_editor;
mod inventory_list;
mod status_line;

pub use delete_confirm_button::DeleteConfirmButton;
pub use inventory_editor::InventoryEditor;
pub use inventory_list::InventoryList;
pub use status_line::StatusLine;
