//! Persisted layout format: one JSON array of placed items under one key.

use crate::{BoardResult, PlacedItem};

/// Key the layout is stored under.
pub const LAYOUT_KEY: &str = "placed_flags";

/// Serialize the placed items.
///
/// # Errors
///
/// Returns [`crate::BoardError::Serialization`] if serialization fails.
pub fn encode_layout(items: &[PlacedItem]) -> BoardResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Deserialize placed items.
///
/// # Errors
///
/// Returns [`crate::BoardError::Serialization`] if the data is not an array of
/// placed items.
pub fn decode_layout(json: &str) -> BoardResult<Vec<PlacedItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize stored data, treating missing or corrupt data as an empty board.
#[must_use]
pub fn decode_layout_lenient(stored: Option<&str>) -> Vec<PlacedItem> {
    let Some(json) = stored else {
        return Vec::new();
    };
    if json.trim().is_empty() {
        return Vec::new();
    }
    match decode_layout(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Discarding corrupt stored layout: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogItem, Category};

    fn sample() -> Vec<PlacedItem> {
        vec![
            PlacedItem::new(
                CatalogItem::new("A", "Alfa", "flags/a.svg", Category::Primary)
                    .with_keywords(["diver"]),
                37.0,
                37.0,
            ),
            PlacedItem::new(
                CatalogItem::new("3", "Terrathree", "pennants/3.svg", Category::Secondary),
                120.5,
                88.25,
            ),
        ]
    }

    #[test]
    fn test_encode_is_json_array() {
        let json = encode_layout(&sample()).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let array = value.as_array().expect("array");
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["type"], "3");
    }

    #[test]
    fn test_decode_preserves_order_and_ids() {
        let items = sample();
        let decoded = decode_layout(&encode_layout(&items).expect("encode")).expect("decode");
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_lenient_missing_is_empty() {
        assert!(decode_layout_lenient(None).is_empty());
        assert!(decode_layout_lenient(Some("   ")).is_empty());
    }

    #[test]
    fn test_lenient_corrupt_is_empty() {
        assert!(decode_layout_lenient(Some("{ not json")).is_empty());
        assert!(decode_layout_lenient(Some(r#"{"type":"A"}"#)).is_empty());
        assert!(decode_layout_lenient(Some(r#"[{"id":"nope","left":1}]"#)).is_empty());
    }
}
