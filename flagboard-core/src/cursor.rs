//! Auto-placement cursor and its reconciliation from placed items.
//!
//! The cursor is a cache: everything in it can be re-derived from the placed
//! item collection with [`reconcile`]. Auto placement updates it
//! incrementally; every manual edit replaces it wholesale.

use std::collections::BTreeMap;

use crate::{GridConfig, PlacedItem};

/// Rows are found by comparing edges; this absorbs float noise.
const ROW_TOLERANCE: f32 = 1e-3;

/// Next candidate slot plus per-column fill heights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementCursor {
    /// Candidate column.
    pub column: usize,
    /// Candidate row.
    pub row: usize,
    /// Lowest occupied edge (max bottom Y) per touched column.
    column_heights: BTreeMap<usize, f32>,
}

impl PlacementCursor {
    /// A cursor at `(0, 0)` with no column heights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to `(0, 0)` and forget all column heights.
    pub fn reset(&mut self) {
        self.column = 0;
        self.row = 0;
        self.column_heights.clear();
    }

    /// The candidate slot as `(column, row)`.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Per-column fill heights.
    #[must_use]
    pub fn column_heights(&self) -> &BTreeMap<usize, f32> {
        &self.column_heights
    }

    /// Fill height of one column, if any item is in it.
    #[must_use]
    pub fn column_height(&self, column: usize) -> Option<f32> {
        self.column_heights.get(&column).copied()
    }

    /// Whether the cursor is in its cleared state.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.position() == (0, 0) && self.column_heights.is_empty()
    }

    /// Note an item whose bottom edge is `bottom` in `column`.
    pub fn record(&mut self, column: usize, bottom: f32) {
        self.column_heights
            .entry(column)
            .and_modify(|height| *height = height.max(bottom))
            .or_insert(bottom);
    }

    /// Move to the slot after `(column, row)`: the next row, or the top of
    /// the next column once this one is full, wrapping to `(0, 0)`.
    pub fn advance_from(&mut self, column: usize, row: usize, config: &GridConfig) {
        let (column, row) = next_slot(column, row, config);
        self.column = column;
        self.row = row;
    }
}

/// The slot after `(column, row)` in column-major order, wrapping to `(0, 0)`.
#[must_use]
pub fn next_slot(column: usize, row: usize, config: &GridConfig) -> (usize, usize) {
    if row + 1 < config.max_items_per_column {
        return (column, row + 1);
    }
    if column + 1 < config.max_columns {
        (column + 1, 0)
    } else {
        (0, 0)
    }
}

/// Re-derive the cursor from the authoritative item collection.
///
/// Each item is assigned to a column by its center X. Among the columns that
/// hold items, the one with the smallest fill height wins (lowest index on
/// ties) and the cursor goes to its first row below that height. If that
/// column is full the cursor goes to the top of the lowest-index empty
/// column, or `(0, 0)` when no column is empty.
#[must_use]
pub fn reconcile(items: &[PlacedItem], config: &GridConfig) -> PlacementCursor {
    let mut cursor = PlacementCursor::new();
    for item in items {
        cursor.record(config.column_of(item.left), item.bottom(config));
    }

    let shortest = cursor
        .column_heights
        .iter()
        .fold(None::<(usize, f32)>, |best, (&column, &height)| match best {
            Some((_, best_height)) if best_height <= height => best,
            _ => Some((column, height)),
        });

    let Some((column, height)) = shortest else {
        return cursor;
    };

    let row = first_row_below(height, config);
    if row < config.max_items_per_column {
        cursor.column = column;
        cursor.row = row;
    } else if let Some(empty) =
        (0..config.max_columns).find(|c| !cursor.column_heights.contains_key(c))
    {
        cursor.column = empty;
        cursor.row = 0;
    }
    cursor
}

/// First row whose top edge is at or below `height`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn first_row_below(height: f32, config: &GridConfig) -> usize {
    let rows = ((height - config.start_y) / config.row_pitch() - ROW_TOLERANCE).ceil();
    if rows.is_finite() && rows > 0.0 {
        rows as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogItem, Category, Geometry, LayoutSettings};

    fn compact() -> GridConfig {
        GridConfig::compute(Geometry::compact(320.0, 480.0), &LayoutSettings::default())
    }

    fn item_at(left: f32, top: f32) -> PlacedItem {
        PlacedItem::new(
            CatalogItem::new("A", "Alfa", "a.svg", Category::Primary),
            left,
            top,
        )
    }

    fn slot_item(config: &GridConfig, column: usize, row: usize) -> PlacedItem {
        let (left, top) = config.slot_center(column, row);
        item_at(left, top)
    }

    #[test]
    fn test_empty_board_reconciles_to_origin() {
        let cursor = reconcile(&[], &compact());
        assert!(cursor.is_reset());
    }

    #[test]
    fn test_reconcile_continues_partial_column() {
        let config = compact();
        let items: Vec<_> = (0..3).map(|row| slot_item(&config, 0, row)).collect();
        let cursor = reconcile(&items, &config);
        assert_eq!(cursor.position(), (0, 3));
        // Bottom of row 2: 16 + 2*50 + 42
        let height = cursor.column_height(0).expect("column 0 touched");
        assert!((height - 158.0).abs() < 1e-4);
    }

    #[test]
    fn test_reconcile_picks_shortest_touched_column() {
        let config = compact();
        let mut items: Vec<_> = (0..4).map(|row| slot_item(&config, 0, row)).collect();
        items.push(slot_item(&config, 2, 0));
        let cursor = reconcile(&items, &config);
        assert_eq!(cursor.position(), (2, 1));
    }

    #[test]
    fn test_reconcile_ties_prefer_lowest_column() {
        let config = compact();
        let items = vec![slot_item(&config, 3, 1), slot_item(&config, 1, 1)];
        let cursor = reconcile(&items, &config);
        assert_eq!(cursor.position(), (1, 2));
    }

    #[test]
    fn test_reconcile_full_column_moves_to_empty_column() {
        let config = compact();
        let items: Vec<_> = (0..config.max_items_per_column)
            .map(|row| slot_item(&config, 0, row))
            .collect();
        let cursor = reconcile(&items, &config);
        assert_eq!(cursor.position(), (1, 0));
    }

    #[test]
    fn test_reconcile_full_grid_wraps() {
        let config = compact();
        let mut items = Vec::new();
        for column in 0..config.max_columns {
            for row in 0..config.max_items_per_column {
                items.push(slot_item(&config, column, row));
            }
        }
        let cursor = reconcile(&items, &config);
        assert_eq!(cursor.position(), (0, 0));
        assert_eq!(cursor.column_heights().len(), config.max_columns);
    }

    #[test]
    fn test_reconcile_off_grid_item_uses_next_row() {
        let config = compact();
        // Dropped between rows 1 and 2: bottom edge 151
        let cursor = reconcile(&[item_at(40.0, 130.0)], &config);
        assert_eq!(cursor.position(), (0, 3));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let config = compact();
        let items = vec![
            slot_item(&config, 0, 0),
            item_at(150.0, 300.0),
            slot_item(&config, 4, 7),
        ];
        let first = reconcile(&items, &config);
        let second = reconcile(&items, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_slot_order() {
        let config = compact();
        assert_eq!(next_slot(0, 0, &config), (0, 1));
        assert_eq!(next_slot(0, 7, &config), (1, 0));
        assert_eq!(next_slot(4, 7, &config), (0, 0));
    }

    #[test]
    fn test_record_keeps_max() {
        let mut cursor = PlacementCursor::new();
        cursor.record(1, 100.0);
        cursor.record(1, 80.0);
        cursor.record(1, 120.0);
        assert_eq!(cursor.column_height(1), Some(120.0));
        cursor.reset();
        assert!(cursor.is_reset());
    }
}
