//! The catalog feed: an ordered, read-only set of placeable items.

use std::collections::HashMap;

use crate::{BoardResult, CatalogItem, Category};

/// Phonetic names for the alphabet flags, in order.
const ALPHABET: [(&str, &str, &str); 26] = [
    ("A", "Alfa", "diver down"),
    ("B", "Bravo", "dangerous cargo"),
    ("C", "Charlie", "affirmative"),
    ("D", "Delta", "keep clear"),
    ("E", "Echo", "altering course to starboard"),
    ("F", "Foxtrot", "disabled"),
    ("G", "Golf", "require a pilot"),
    ("H", "Hotel", "pilot on board"),
    ("I", "India", "altering course to port"),
    ("J", "Juliett", "on fire"),
    ("K", "Kilo", "wish to communicate"),
    ("L", "Lima", "stop instantly"),
    ("M", "Mike", "stopped"),
    ("N", "November", "negative"),
    ("O", "Oscar", "man overboard"),
    ("P", "Papa", "about to sail"),
    ("Q", "Quebec", "request pratique"),
    ("R", "Romeo", "no meaning"),
    ("S", "Sierra", "engines astern"),
    ("T", "Tango", "keep clear pair trawling"),
    ("U", "Uniform", "standing into danger"),
    ("V", "Victor", "require assistance"),
    ("W", "Whiskey", "medical assistance"),
    ("X", "X-ray", "stop your intention"),
    ("Y", "Yankee", "dragging anchor"),
    ("Z", "Zulu", "require a tug"),
];

/// Names for the numeral pennants, 0 through 9.
const NUMERALS: [&str; 10] = [
    "Nadazero", "Unaone", "Bissotwo", "Terrathree", "Kartefour", "Pantafive", "Soxisix",
    "Setteseven", "Oktoeight", "Novenine",
];

/// Ordered catalog indexed by item kind.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the first item of each kind.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut kept = Vec::with_capacity(items.len());
        let mut index = HashMap::with_capacity(items.len());
        for item in items {
            if index.contains_key(&item.kind) {
                tracing::warn!("Duplicate catalog kind {:?} ignored", item.kind);
                continue;
            }
            index.insert(item.kind.clone(), kept.len());
            kept.push(item);
        }
        Self { items: kept, index }
    }

    /// Parse a catalog from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoardError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    /// The built-in maritime signal set: alphabet flags and numeral pennants.
    #[must_use]
    pub fn signal_flags() -> Self {
        let flags = ALPHABET.iter().map(|(kind, name, meaning)| {
            CatalogItem::new(
                *kind,
                *name,
                format!("flags/{}.svg", kind.to_lowercase()),
                Category::Primary,
            )
            .with_keywords([*meaning, "flag"])
        });
        let pennants = NUMERALS.iter().enumerate().map(|(digit, name)| {
            CatalogItem::new(
                digit.to_string(),
                *name,
                format!("pennants/{digit}.svg"),
                Category::Secondary,
            )
            .with_keywords(["pennant", "numeral"])
        });
        Self::new(flags.chain(pennants).collect())
    }

    /// Look up an item by kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&CatalogItem> {
        self.index.get(kind).map(|&i| &self.items[i])
    }

    /// Whether the catalog has an item of this kind.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.index.contains_key(kind)
    }

    /// Items in feed order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Kinds in feed order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.kind.as_str())
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_flags_contents() {
        let catalog = Catalog::signal_flags();
        assert_eq!(catalog.len(), 36);
        let alfa = catalog.get("A").expect("A exists");
        assert_eq!(alfa.name, "Alfa");
        assert_eq!(alfa.category, Category::Primary);
        let five = catalog.get("5").expect("5 exists");
        assert_eq!(five.category, Category::Secondary);
        assert_eq!(five.image, "pennants/5.svg");
    }

    #[test]
    fn test_duplicate_kinds_keep_first() {
        let catalog = Catalog::new(vec![
            CatalogItem::new("A", "First", "a.svg", Category::Primary),
            CatalogItem::new("A", "Second", "a2.svg", Category::Primary),
            CatalogItem::new("B", "Bravo", "b.svg", Category::Primary),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("A").map(|i| i.name.as_str()), Some("First"));
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"type":"A","name":"Alfa","image":"a.svg","category":"primary","keywords":["diver"]},
            {"type":"1","name":"One","image":"1.svg","category":"secondary"}
        ]"#;
        let catalog = Catalog::from_json(json).expect("parse");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("1"));
        assert!(!catalog.contains("Z"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(Catalog::from_json("{ nope").is_err());
        assert!(Catalog::from_json(r#"[{"type":"A"}]"#).is_err());
    }
}
