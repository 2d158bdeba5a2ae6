//! The placement engine.
//!
//! Auto placement fills columns top-to-bottom, then moves right. It runs in
//! two phases: [`PlacementEngine::resolve_slot`] picks a slot without
//! touching any state, and the commit step records the item and advances the
//! cursor. Manual placement accepts the caller's point (clamped on compact
//! devices) and then re-derives the cursor from scratch.

use std::sync::Arc;

use crate::boundary;
use crate::cursor::{self, next_slot, PlacementCursor};
use crate::{
    Bounds, Catalog, CatalogItem, GeometryProvider, GridConfig, ItemId, LayoutSettings, PlacedItem,
};

/// A resolved grid slot and its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Column index.
    pub column: usize,
    /// Row index.
    pub row: usize,
    /// Center X.
    pub left: f32,
    /// Center Y.
    pub top: f32,
}

impl Slot {
    fn at(column: usize, row: usize, config: &GridConfig) -> Self {
        let (left, top) = config.slot_center(column, row);
        Self {
            column,
            row,
            left,
            top,
        }
    }
}

/// Outcome of resolving the next auto-placement slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotResolution {
    /// A free slot inside the margined canvas.
    Free(Slot),
    /// No free in-bounds slot was found; the first slot is used instead and
    /// the new item will overlap whatever is there.
    Exhausted(Slot),
}

impl SlotResolution {
    /// The slot to commit to.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        match self {
            Self::Free(slot) | Self::Exhausted(slot) => *slot,
        }
    }

    /// Whether this is the exhaustion fallback.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }
}

/// Decides where items land and keeps the placed collection.
#[derive(Debug)]
pub struct PlacementEngine {
    catalog: Catalog,
    settings: LayoutSettings,
    geometry: Box<dyn GeometryProvider>,
    items: Arc<Vec<PlacedItem>>,
    cursor: PlacementCursor,
}

impl PlacementEngine {
    /// Create an engine with an empty board.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        settings: LayoutSettings,
        geometry: impl GeometryProvider + 'static,
    ) -> Self {
        Self {
            catalog,
            settings,
            geometry: Box::new(geometry),
            items: Arc::new(Vec::new()),
            cursor: PlacementCursor::new(),
        }
    }

    /// Grid for the canvas as it is right now.
    #[must_use]
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::compute(self.geometry.geometry(), &self.settings)
    }

    /// The catalog feed.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The layout settings.
    #[must_use]
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Current auto-placement cursor.
    #[must_use]
    pub fn cursor(&self) -> &PlacementCursor {
        &self.cursor
    }

    /// Placed items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// An immutable snapshot of the placed items.
    ///
    /// Later mutations copy-on-write, so a snapshot never changes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<PlacedItem>> {
        Arc::clone(&self.items)
    }

    /// Look up a placed item.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of placed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick the next auto-placement slot without changing any state.
    ///
    /// Starting at the cursor, slots outside the margined canvas are skipped
    /// (a horizontal overflow restarts at column 0 on the next row, a
    /// vertical one moves to the top of the next column) and slots whose box
    /// overlaps a placed item are passed over in column order. Boundary
    /// skips are capped by the configured retry limit.
    #[must_use]
    pub fn resolve_slot(&self, config: &GridConfig) -> SlotResolution {
        let taken: Vec<Bounds> = self.items.iter().map(|item| item.bounds(config)).collect();
        let is_occupied = |slot: &Slot| {
            let candidate = Bounds::around(slot.left, slot.top, config);
            taken.iter().any(|bounds| bounds.overlaps(&candidate))
        };

        let (mut column, mut row) = self.cursor.position();
        if column >= config.max_columns {
            column = 0;
            row = 0;
        }

        let retry_limit = self.settings.retry_limit;
        let mut boundary_retries = 0;
        for _ in 0..retry_limit.saturating_add(config.slot_count()) {
            let slot = Slot::at(column, row, config);
            let overflow = boundary::overflow(slot.left, slot.top, config);
            let horizontal = overflow.horizontal || column >= config.max_columns;
            let vertical = overflow.vertical || row >= config.max_items_per_column;

            if !horizontal && !vertical {
                if !is_occupied(&slot) {
                    return SlotResolution::Free(slot);
                }
                (column, row) = next_slot(column, row, config);
                continue;
            }

            boundary_retries += 1;
            if boundary_retries > retry_limit {
                break;
            }
            if horizontal {
                column = 0;
                row += 1;
            } else {
                column += 1;
                row = 0;
                if column >= config.max_columns {
                    column = 0;
                }
            }
        }

        SlotResolution::Exhausted(Slot::at(0, 0, config))
    }

    fn commit_placement(
        &mut self,
        item: CatalogItem,
        slot: Slot,
        config: &GridConfig,
    ) -> PlacedItem {
        let placed = PlacedItem::new(item, slot.left, slot.top);
        self.cursor.record(slot.column, placed.bottom(config));
        self.cursor.advance_from(slot.column, slot.row, config);
        Arc::make_mut(&mut self.items).push(placed.clone());
        placed
    }

    /// Place one item of `kind` at the next free slot.
    ///
    /// Returns `None` if the kind is not in the catalog.
    pub fn auto_place(&mut self, kind: &str) -> Option<PlacedItem> {
        let Some(item) = self.catalog.get(kind).cloned() else {
            tracing::debug!("Auto place ignored, unknown kind {kind:?}");
            return None;
        };
        let config = self.grid_config();
        let resolution = self.resolve_slot(&config);
        if resolution.is_exhausted() {
            tracing::warn!(
                "No free slot for {kind:?} on {}x{} canvas, stacking at first slot",
                config.canvas_width,
                config.canvas_height
            );
        }
        let placed = self.commit_placement(item, resolution.slot(), &config);
        tracing::debug!(
            "Auto placed {kind:?} at ({}, {}), cursor now {:?}",
            placed.left,
            placed.top,
            self.cursor.position()
        );
        Some(placed)
    }

    /// Place one item of `kind` centered at an explicit point.
    ///
    /// On compact devices the point is clamped onto the canvas. Returns
    /// `None` if the kind is unknown or the point is not finite.
    pub fn place_at(&mut self, kind: &str, left: f32, top: f32) -> Option<PlacedItem> {
        if !left.is_finite() || !top.is_finite() {
            tracing::warn!("Place ignored, non-finite point ({left}, {top})");
            return None;
        }
        let Some(item) = self.catalog.get(kind).cloned() else {
            tracing::debug!("Place ignored, unknown kind {kind:?}");
            return None;
        };
        let config = self.grid_config();
        let (left, top) = constrain(left, top, &config);
        let placed = PlacedItem::new(item, left, top);
        Arc::make_mut(&mut self.items).push(placed.clone());
        self.reconcile_with(&config);
        tracing::debug!("Placed {kind:?} at ({left}, {top})");
        Some(placed)
    }

    /// Move a placed item so it is centered at `(left, top)`.
    ///
    /// Clamped on compact devices like [`PlacementEngine::place_at`].
    /// Returns `None` if the id is unknown or the point is not finite.
    pub fn move_item(&mut self, id: ItemId, left: f32, top: f32) -> Option<PlacedItem> {
        if !left.is_finite() || !top.is_finite() {
            tracing::warn!("Move ignored, non-finite point ({left}, {top})");
            return None;
        }
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            tracing::debug!("Move ignored, unknown item {id}");
            return None;
        };
        let config = self.grid_config();
        let (left, top) = constrain(left, top, &config);
        let moved = {
            let item = &mut Arc::make_mut(&mut self.items)[index];
            item.left = left;
            item.top = top;
            item.clone()
        };
        self.reconcile_with(&config);
        tracing::debug!("Moved {id} to ({left}, {top})");
        Some(moved)
    }

    /// Remove a placed item. Returns `None` if the id is unknown.
    pub fn remove(&mut self, id: ItemId) -> Option<PlacedItem> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            tracing::debug!("Remove ignored, unknown item {id}");
            return None;
        };
        let removed = Arc::make_mut(&mut self.items).remove(index);
        self.reconcile();
        tracing::debug!("Removed {id}");
        Some(removed)
    }

    /// Remove every item and reset the cursor. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.items.len();
        self.items = Arc::new(Vec::new());
        self.cursor.reset();
        tracing::debug!("Cleared {count} items");
        count
    }

    /// Replace the whole collection, e.g. with a reloaded layout.
    pub fn load(&mut self, items: Vec<PlacedItem>) {
        tracing::debug!("Loading {} items", items.len());
        self.items = Arc::new(items);
        self.reconcile();
    }

    /// Re-derive the cursor from the placed items.
    pub fn reconcile(&mut self) {
        let config = self.grid_config();
        self.reconcile_with(&config);
    }

    fn reconcile_with(&mut self, config: &GridConfig) {
        self.cursor = cursor::reconcile(&self.items, config);
    }
}

/// Keep compact-device drops on the canvas; regular canvases may scroll.
fn constrain(left: f32, top: f32, config: &GridConfig) -> (f32, f32) {
    if config.is_compact() {
        boundary::clamp(left, top, config)
    } else {
        (left, top)
    }
}
