//! Board items - catalog descriptors and their placed instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BoardError, BoardResult, GridConfig};

/// Unique identifier for a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidId`] if the string is not a UUID.
    pub fn parse(value: &str) -> BoardResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|e| BoardError::InvalidId(format!("{value}: {e}")))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which section of the catalog an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Alphabet flags.
    Primary,
    /// Numeral pennants and substitutes.
    Secondary,
}

/// An immutable catalog descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable key distinguishing the visual/semantic kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Image reference (URI or asset path).
    pub image: String,
    /// Catalog section.
    pub category: Category,
    /// Extra search terms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl CatalogItem {
    /// Create a catalog item without keywords.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            image: image.into(),
            category,
            keywords: Vec::new(),
        }
    }

    /// Set the search keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match against kind, name and keywords.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.kind.to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&query))
    }
}

/// Edge rectangle of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

/// Edge overlap below this many pixels counts as touching, not overlapping.
const OVERLAP_TOLERANCE: f32 = 0.01;

impl Bounds {
    /// Edges of an item centered at `(center_x, center_y)` under the given grid sizing.
    #[must_use]
    pub fn around(center_x: f32, center_y: f32, config: &GridConfig) -> Self {
        let half_w = config.half_width();
        let half_h = config.half_height();
        Self {
            left: center_x - half_w,
            top: center_y - half_h,
            right: center_x + half_w,
            bottom: center_y + half_h,
        }
    }

    /// Whether the two rectangles share any area. Shared edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right - OVERLAP_TOLERANCE
            && other.left < self.right - OVERLAP_TOLERANCE
            && self.top < other.bottom - OVERLAP_TOLERANCE
            && other.top < self.bottom - OVERLAP_TOLERANCE
    }
}

/// A catalog item placed on the canvas.
///
/// `left` and `top` are the item's *center* in canvas-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Unique instance identifier.
    pub id: ItemId,
    /// Copy of the catalog descriptor.
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Center X.
    pub left: f32,
    /// Center Y.
    pub top: f32,
}

impl PlacedItem {
    /// Create a placed instance of `item` centered at `(left, top)`.
    #[must_use]
    pub fn new(item: CatalogItem, left: f32, top: f32) -> Self {
        Self {
            id: ItemId::new(),
            item,
            left,
            top,
        }
    }

    /// The catalog key of this item.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.item.kind
    }

    /// Edges of this item under the given grid sizing.
    #[must_use]
    pub fn bounds(&self, config: &GridConfig) -> Bounds {
        Bounds::around(self.left, self.top, config)
    }

    /// Bottom edge of this item under the given grid sizing.
    #[must_use]
    pub fn bottom(&self, config: &GridConfig) -> f32 {
        self.top + config.half_height()
    }

    /// Whether this item is centered at `(left, top)`, within half a pixel.
    #[must_use]
    pub fn is_centered_at(&self, left: f32, top: f32) -> bool {
        (self.left - left).abs() < 0.5 && (self.top - top).abs() < 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alfa() -> CatalogItem {
        CatalogItem::new("A", "Alfa", "flags/a.svg", Category::Primary)
            .with_keywords(["diver", "alpha"])
    }

    #[test]
    fn test_item_id_parse_roundtrip() {
        let id = ItemId::new();
        let parsed = ItemId::parse(&id.to_string()).expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_item_id_parse_rejects_garbage() {
        let result = ItemId::parse("not-a-uuid");
        assert!(matches!(result, Err(BoardError::InvalidId(_))));
    }

    #[test]
    fn test_placed_item_serializes_flat() {
        let placed = PlacedItem::new(alfa(), 37.0, 37.0);
        let value = serde_json::to_value(&placed).expect("serialize");
        assert_eq!(value["type"], "A");
        assert_eq!(value["name"], "Alfa");
        assert_eq!(value["category"], "primary");
        assert_eq!(value["left"], 37.0);
        assert!(value.get("item").is_none());
    }

    #[test]
    fn test_catalog_item_keywords_optional() {
        let json = r#"{"type":"1","name":"One","image":"p1.svg","category":"secondary"}"#;
        let item: CatalogItem = serde_json::from_str(json).expect("parse");
        assert!(item.keywords.is_empty());
        let back = serde_json::to_string(&item).expect("serialize");
        assert!(!back.contains("keywords"));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let item = alfa();
        assert!(item.matches("alf"));
        assert!(item.matches("DIVER"));
        assert!(item.matches("a"));
        assert!(item.matches("  "));
        assert!(!item.matches("bravo"));
    }

    #[test]
    fn test_bounds_overlap() {
        let config = crate::GridConfig::compute(
            crate::Geometry::compact(320.0, 480.0),
            &crate::LayoutSettings::default(),
        );
        let placed = PlacedItem::new(alfa(), 86.0, 37.0);
        let bounds = placed.bounds(&config);
        assert!((bounds.left - 65.0).abs() < f32::EPSILON);
        assert!((bounds.bottom - 58.0).abs() < f32::EPSILON);

        assert!(bounds.overlaps(&Bounds::around(87.0, 37.0, &config)));
        assert!(bounds.overlaps(&Bounds::around(50.0, 60.0, &config)));
        // Sharing an edge is not an overlap
        assert!(!bounds.overlaps(&Bounds::around(128.0, 37.0, &config)));
        assert!(!bounds.overlaps(&Bounds::around(86.0, 79.0, &config)));
        assert!(!bounds.overlaps(&Bounds::around(200.0, 200.0, &config)));
    }

    #[test]
    fn test_is_centered_at_tolerance() {
        let placed = PlacedItem::new(alfa(), 100.0, 50.0);
        assert!(placed.is_centered_at(100.2, 49.8));
        assert!(!placed.is_centered_at(101.0, 50.0));
    }
}
