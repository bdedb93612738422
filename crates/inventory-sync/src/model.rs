//! Canonical Records
//!
//! Stable-shaped item and category records used everywhere after a payload
//! has been through the normalizer.

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum description length, in characters
pub const DESCRIPTION_LIMIT: usize = 255;

/// Built-in categories used when the remote store has none to offer
const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    ("1", "Exercise machines"),
    ("2", "Dumbbells and barbells"),
    ("3", "Gymnastics"),
    ("4", "Ball sports"),
    ("5", "Tourism and camping"),
    ("6", "Sportswear"),
    ("7", "Pool and swimming"),
    ("8", "Tennis and badminton"),
    ("9", "Miscellaneous"),
];

// ========================
// Quantity
// ========================

/// Stock level of an item.
///
/// A value the remote store sent that does not read as a number is kept
/// verbatim in `Unparsed` instead of being coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Number(f64),
    Unparsed(Value),
}

impl Quantity {
    pub fn is_number(&self) -> bool {
        matches!(self, Quantity::Number(_))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Number(0.0)
    }
}

impl From<u32> for Quantity {
    fn from(n: u32) -> Self {
        Quantity::Number(f64::from(n))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Unparsed(Value::String(raw)) => f.write_str(raw),
            Quantity::Unparsed(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Number(n) => serialize_number(*n, serializer),
            Quantity::Unparsed(raw) => raw.serialize(serializer),
        }
    }
}

/// Integral values go out as JSON integers so `3` does not come back as `3.0`.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}

// ========================
// InventoryItem
// ========================

/// Inventory item as held by the client
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryItem {
    /// Remote identifier, empty until the store assigns one
    pub id: String,
    pub name: String,
    /// Category id or name, whichever the remote store used
    pub category: String,
    /// Unit price, never negative
    pub price: f64,
    pub quantity: Quantity,
    /// At most [`DESCRIPTION_LIMIT`] characters
    pub description: String,
    /// Photo URLs in display order
    pub photos: Vec<String>,
    /// Single avatar URL when the payload carried one instead of a gallery
    pub avatar: Option<String>,
    /// Index into `photos` of the main photo
    pub avatar_index: usize,
}

impl InventoryItem {
    /// Compatibility alias of `quantity`; the two never diverge.
    pub fn count(&self) -> &Quantity {
        &self.quantity
    }

    /// URL of the main photo, if the item has one at `avatar_index`.
    pub fn avatar_url(&self) -> Option<&str> {
        self.photos.get(self.avatar_index).map(String::as_str)
    }
}

impl Serialize for InventoryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InventoryItem", 10)?;
        if self.id.is_empty() {
            state.skip_field("id")?;
        } else {
            state.serialize_field("id", &self.id)?;
        }
        state.serialize_field("name", &self.name)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("price", &Number(self.price))?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("count", &self.quantity)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("photos", &self.photos)?;
        match &self.avatar {
            Some(avatar) => state.serialize_field("avatar", avatar)?,
            None => state.skip_field("avatar")?,
        }
        state.serialize_field("avatarIndex", &self.avatar_index)?;
        state.end()
    }
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

// ========================
// Category
// ========================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The fixed fallback category list, ids `"1"` through `"9"`.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name)| Category::new(*id, *name))
        .collect()
}
