//! Payload Normalizer
//!
//! Turns the loosely-shaped records served by the remote store into
//! canonical [`InventoryItem`] and [`Category`] values.
//!
//! Each raw shape is an explicit struct listing every field name the store
//! has been seen using. Canonical fields are then resolved through a fixed
//! priority order:
//!
//! | Field          | Sources, first usable wins                          |
//! |----------------|-----------------------------------------------------|
//! | `name`         | `name`, `title`                                     |
//! | `category`     | `category`, `categoryName`                          |
//! | `quantity`     | `quantity`, `count`, else `0`                       |
//! | `description`  | `description`, `desc`                               |
//! | `photos`       | `photos`, `images`, `gallery`, `image`/`photo`/`avatar` |
//! | `avatarIndex`  | `avatarIndex`, `mainPhotoIndex`, else `0`           |

use serde::Deserialize;
use serde_json::Value;

use crate::model::{truncate_chars, Category, InventoryItem, Quantity, DESCRIPTION_LIMIT};

/// Normalize one raw item. Never fails: `null` or a non-object yields an
/// empty-shaped item.
pub fn normalize_item(raw: &Value) -> InventoryItem {
    RawInventoryItem::from_value(raw)
        .map(|item| item.normalize())
        .unwrap_or_default()
}

/// Normalize one raw category. `null` and non-objects yield `None` so callers
/// can filter them out.
pub fn normalize_category(raw: &Value) -> Option<Category> {
    RawCategory::from_value(raw).map(|category| category.normalize())
}

// ========================
// Raw Shapes
// ========================

/// Every field an item payload may carry. Absent and `null` both land as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInventoryItem {
    id: Option<Value>,
    name: Option<Value>,
    title: Option<Value>,
    category: Option<Value>,
    category_name: Option<Value>,
    price: Option<Value>,
    quantity: Option<Value>,
    count: Option<Value>,
    description: Option<Value>,
    desc: Option<Value>,
    photos: Option<Value>,
    images: Option<Value>,
    gallery: Option<Value>,
    image: Option<Value>,
    photo: Option<Value>,
    avatar: Option<Value>,
    avatar_index: Option<Value>,
    main_photo_index: Option<Value>,
}

impl RawInventoryItem {
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::Object(_) => Self::deserialize(raw).ok(),
            _ => None,
        }
    }

    pub fn normalize(&self) -> InventoryItem {
        let photos = self.resolve_photos();
        let avatar = if photos.is_some() {
            None
        } else {
            first_text(&[&self.avatar, &self.image, &self.photo])
        };
        let photos = photos
            .or_else(|| first_text(&[&self.image, &self.photo, &self.avatar]).map(|url| vec![url]))
            .unwrap_or_default();

        let description = first_text(&[&self.description, &self.desc]).unwrap_or_default();

        InventoryItem {
            id: first_text(&[&self.id]).unwrap_or_default(),
            name: first_text(&[&self.name, &self.title]).unwrap_or_default(),
            category: first_text(&[&self.category, &self.category_name]).unwrap_or_default(),
            price: self.resolve_price(),
            quantity: self.resolve_quantity(),
            description: truncate_chars(&description, DESCRIPTION_LIMIT),
            photos,
            avatar,
            avatar_index: self.resolve_avatar_index(),
        }
    }

    /// Name used in diagnostics
    fn label(&self) -> String {
        first_text(&[&self.id, &self.name, &self.title]).unwrap_or_else(|| "untitled".to_string())
    }

    fn resolve_quantity(&self) -> Quantity {
        let (field, raw) = match (&self.quantity, &self.count) {
            (Some(quantity), _) => ("quantity", quantity),
            (None, Some(count)) => ("count", count),
            (None, None) => return Quantity::Number(0.0),
        };

        match coerce_number(raw) {
            Some(n) => Quantity::Number(n),
            None => {
                log::warn!("item {} has invalid {}: {}; keeping it as-is", self.label(), field, raw);
                Quantity::Unparsed(raw.clone())
            }
        }
    }

    fn resolve_price(&self) -> f64 {
        self.price
            .as_ref()
            .and_then(parse_float)
            .filter(|price| price.is_finite() && *price > 0.0)
            .unwrap_or(0.0)
    }

    /// First photo list holding at least one URL, or `None` so the single-URL
    /// fallback applies. Non-string entries are skipped.
    fn resolve_photos(&self) -> Option<Vec<String>> {
        [&self.photos, &self.images, &self.gallery]
            .into_iter()
            .find_map(|list| match list {
                Some(Value::Array(entries)) => Some(
                    entries
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|url| !url.is_empty())
                        .map(str::to_owned)
                        .collect::<Vec<_>>(),
                )
                .filter(|urls| !urls.is_empty()),
                _ => None,
            })
    }

    fn resolve_avatar_index(&self) -> usize {
        [&self.avatar_index, &self.main_photo_index]
            .into_iter()
            .find_map(|index| index.as_ref().and_then(Value::as_u64))
            .and_then(|index| usize::try_from(index).ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    id: Option<Value>,
    title: Option<Value>,
    name: Option<Value>,
}

impl RawCategory {
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::Object(_) => Self::deserialize(raw).ok(),
            _ => None,
        }
    }

    pub fn normalize(&self) -> Category {
        Category {
            id: first_text(&[&self.id]).unwrap_or_default(),
            name: first_text(&[&self.title, &self.name]).unwrap_or_default(),
        }
    }
}

// ========================
// Coercion Helpers
// ========================

/// First candidate holding a non-empty string or non-zero number.
fn first_text(candidates: &[&Option<Value>]) -> Option<String> {
    candidates
        .iter()
        .copied()
        .find_map(|candidate| candidate.as_ref().and_then(text_value))
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Whole-value numeric coercion: blank strings read as zero, booleans as 0/1,
/// anything with trailing garbage is rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Prefix numeric coercion: reads the longest leading decimal literal of a
/// string, so `"19.99 USD"` is `19.99`.
fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s.trim_start()),
        _ => None,
    }
}

fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_null_item_is_empty_shaped() {
        let item = normalize_item(&Value::Null);
        assert_eq!(item, InventoryItem::default());
        assert_eq!(item.quantity, Quantity::Number(0.0));
        assert!(item.photos.is_empty());
    }

    #[test]
    fn test_non_object_item_is_empty_shaped() {
        assert_eq!(normalize_item(&json!([1, 2, 3])), InventoryItem::default());
        assert_eq!(normalize_item(&json!("bench")), InventoryItem::default());
    }

    #[test]
    fn test_missing_quantity_and_count_is_zero() {
        let item = normalize_item(&json!({ "id": "1", "name": "Mat" }));
        assert_eq!(item.quantity, Quantity::Number(0.0));
        assert_eq!(item.count(), &item.quantity);
    }

    #[test]
    fn test_numeric_quantity_sets_count() {
        for raw in [json!(4), json!("4"), json!(" 4 ")] {
            let item = normalize_item(&json!({ "quantity": raw }));
            assert_eq!(item.quantity, Quantity::Number(4.0));
            assert_eq!(item.count(), &Quantity::Number(4.0));
        }
    }

    #[test]
    fn test_quantity_preferred_over_count() {
        let item = normalize_item(&json!({ "quantity": 2, "count": 9 }));
        assert_eq!(item.quantity, Quantity::Number(2.0));
    }

    #[test]
    fn test_null_quantity_falls_back_to_count() {
        let item = normalize_item(&json!({ "quantity": null, "count": "7" }));
        assert_eq!(item.quantity, Quantity::Number(7.0));
    }

    #[test]
    fn test_invalid_quantity_is_kept_verbatim() {
        let item = normalize_item(&json!({ "name": "Rope", "quantity": "lots" }));
        assert_eq!(item.quantity, Quantity::Unparsed(json!("lots")));
        assert_eq!(item.count(), &Quantity::Unparsed(json!("lots")));
    }

    #[test]
    fn test_invalid_quantity_is_logged() {
        testing_logger::setup();

        normalize_item(&json!({ "id": "7", "quantity": "lots" }));
        normalize_item(&json!({ "id": "8", "quantity": 3 }));

        testing_logger::validate(|captured| {
            let warnings: Vec<_> = captured
                .iter()
                .filter(|entry| entry.level == log::Level::Warn)
                .collect();
            assert_eq!(warnings.len(), 1);
            assert!(warnings[0].body.contains("item 7 has invalid quantity"));
            assert!(warnings[0].body.contains("\"lots\""));
        });
    }

    #[test]
    fn test_invalid_count_is_kept_verbatim() {
        let item = normalize_item(&json!({ "count": { "boxes": 2 } }));
        assert_eq!(item.quantity, Quantity::Unparsed(json!({ "boxes": 2 })));
    }

    #[test]
    fn test_blank_and_boolean_quantities_coerce() {
        assert_eq!(normalize_item(&json!({ "quantity": "" })).quantity, Quantity::Number(0.0));
        assert_eq!(normalize_item(&json!({ "quantity": true })).quantity, Quantity::Number(1.0));
    }

    #[test]
    fn test_price_parsing() {
        let price = |raw: Value| normalize_item(&json!({ "price": raw })).price;
        assert_eq!(price(json!("19.99")), 19.99);
        assert_eq!(price(json!(12)), 12.0);
        assert_eq!(price(json!("7.5 USD")), 7.5);
        assert_eq!(price(json!("1e3")), 1000.0);
        assert_eq!(price(json!(".5")), 0.5);
        assert_eq!(price(json!("free")), 0.0);
        assert_eq!(price(json!(null)), 0.0);
        assert_eq!(price(json!(-3)), 0.0);
        assert_eq!(price(json!([])), 0.0);
    }

    #[test]
    fn test_name_and_category_aliases() {
        let item = normalize_item(&json!({
            "id": 15,
            "title": "Treadmill",
            "categoryName": "Exercise machines",
        }));
        assert_eq!(item.id, "15");
        assert_eq!(item.name, "Treadmill");
        assert_eq!(item.category, "Exercise machines");
    }

    #[test]
    fn test_empty_name_falls_through_to_title() {
        let item = normalize_item(&json!({ "name": "", "title": "Ball" }));
        assert_eq!(item.name, "Ball");
    }

    #[test]
    fn test_description_truncated_to_limit() {
        let long = "x".repeat(400);
        let item = normalize_item(&json!({ "description": long }));
        assert_eq!(item.description.chars().count(), 255);

        let short = normalize_item(&json!({ "desc": "Short" }));
        assert_eq!(short.description, "Short");
    }

    #[test]
    fn test_photo_priority() {
        let item = normalize_item(&json!({
            "photos": [],
            "images": ["a.jpg", "b.jpg"],
            "gallery": ["c.jpg"],
            "image": "d.jpg",
        }));
        assert_eq!(item.photos, vec!["a.jpg", "b.jpg"]);
        assert_eq!(item.avatar, None);
        assert_eq!(item.avatar_index, 0);
    }

    #[test]
    fn test_single_photo_fallback() {
        let item = normalize_item(&json!({ "photo": "p.jpg", "avatar": "av.jpg" }));
        assert_eq!(item.photos, vec!["p.jpg"]);
        assert_eq!(item.avatar.as_deref(), Some("av.jpg"));
        assert_eq!(item.avatar_url(), Some("p.jpg"));
    }

    #[test]
    fn test_photo_list_without_urls_falls_through() {
        let item = normalize_item(&json!({ "photos": [null, 3], "image": "d.jpg" }));
        assert_eq!(item.photos, vec!["d.jpg"]);
        assert_eq!(item.avatar.as_deref(), Some("d.jpg"));

        let item = normalize_item(&json!({ "photos": [""], "gallery": [{}, "g.jpg"] }));
        assert_eq!(item.photos, vec!["g.jpg"]);
        assert_eq!(item.avatar, None);
    }

    #[test]
    fn test_no_photos() {
        let item = normalize_item(&json!({ "name": "Net" }));
        assert!(item.photos.is_empty());
        assert_eq!(item.avatar, None);
        assert_eq!(item.avatar_url(), None);
    }

    #[test]
    fn test_explicit_avatar_index_respected() {
        let item = normalize_item(&json!({ "photos": ["a", "b", "c"], "mainPhotoIndex": 2 }));
        assert_eq!(item.avatar_index, 2);

        let item = normalize_item(&json!({ "photos": ["a", "b"], "avatarIndex": 1, "mainPhotoIndex": 0 }));
        assert_eq!(item.avatar_index, 1);

        let item = normalize_item(&json!({ "photos": ["a"], "avatarIndex": -1 }));
        assert_eq!(item.avatar_index, 0);
    }

    #[test]
    fn test_category_null_is_none() {
        assert_eq!(normalize_category(&Value::Null), None);
        assert_eq!(normalize_category(&json!(42)), None);
    }

    #[test]
    fn test_category_title_preferred_over_name() {
        let category = normalize_category(&json!({ "id": "3", "title": "Gymnastics", "name": "gym" }));
        assert_eq!(category, Some(Category::new("3", "Gymnastics")));

        let category = normalize_category(&json!({ "id": 4, "name": "Swimming" }));
        assert_eq!(category, Some(Category::new("4", "Swimming")));
    }

    #[test]
    fn test_category_without_name_keeps_empty_name() {
        let category = normalize_category(&json!({ "name": "" })).unwrap();
        assert!(category.name.is_empty());
    }
}
