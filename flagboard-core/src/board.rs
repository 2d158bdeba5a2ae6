//! The board: a placement engine wired to durable storage.
//!
//! The board is the engine's owner. It loads the persisted layout once when
//! opened and writes the full collection back after every mutation. Storage
//! failures are logged and never interrupt placement.

use std::sync::Arc;

use crate::schema::{decode_layout_lenient, encode_layout, LAYOUT_KEY};
use crate::store::KeyValueStore;
use crate::{ActionOutcome, BoardAction, GridConfig, ItemId, PlacedItem, PlacementEngine};

type ChangeCallback = Box<dyn Fn(&[PlacedItem])>;

/// A placement engine plus the store its layout lives in.
pub struct Board {
    engine: PlacementEngine,
    store: Box<dyn KeyValueStore>,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("engine", &self.engine)
            .field("store", &self.store)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Board {
    /// Open a board, restoring any layout persisted in `store`.
    ///
    /// Unreadable or corrupt stored data yields an empty board.
    #[must_use]
    pub fn open(mut engine: PlacementEngine, store: impl KeyValueStore + 'static) -> Self {
        let stored = match store.get(LAYOUT_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read stored layout, starting empty: {e}");
                None
            }
        };
        let items = decode_layout_lenient(stored.as_deref());
        tracing::info!("Opened board with {} stored items", items.len());
        engine.load(items);
        Self {
            engine,
            store: Box::new(store),
            on_change: None,
        }
    }

    /// Set a callback invoked with the new collection after each mutation.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(&[PlacedItem]) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    /// Placed items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[PlacedItem] {
        self.engine.items()
    }

    /// An immutable snapshot of the placed items.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<PlacedItem>> {
        self.engine.snapshot()
    }

    /// Grid for the canvas as it is right now.
    #[must_use]
    pub fn grid_config(&self) -> GridConfig {
        self.engine.grid_config()
    }

    /// Auto-place an item of `kind`.
    pub fn auto_place(&mut self, kind: &str) -> Option<PlacedItem> {
        let placed = self.engine.auto_place(kind)?;
        self.changed();
        Some(placed)
    }

    /// Place an item of `kind` at an explicit point.
    pub fn place_at(&mut self, kind: &str, left: f32, top: f32) -> Option<PlacedItem> {
        let placed = self.engine.place_at(kind, left, top)?;
        self.changed();
        Some(placed)
    }

    /// Move a placed item.
    pub fn move_item(&mut self, id: ItemId, left: f32, top: f32) -> Option<PlacedItem> {
        let moved = self.engine.move_item(id, left, top)?;
        self.changed();
        Some(moved)
    }

    /// Remove a placed item.
    pub fn remove(&mut self, id: ItemId) -> Option<PlacedItem> {
        let removed = self.engine.remove(id)?;
        self.changed();
        Some(removed)
    }

    /// Remove every item. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.engine.clear_all();
        self.changed();
        count
    }

    /// Apply one action.
    pub fn apply(&mut self, action: &BoardAction) -> ActionOutcome {
        let outcome = match action {
            BoardAction::AutoPlace { key } => self
                .auto_place(key)
                .map(|item| ActionOutcome::Placed { item }),
            BoardAction::PlaceAt { key, left, top } => self
                .place_at(key, *left, *top)
                .map(|item| ActionOutcome::Placed { item }),
            BoardAction::Move { id, left, top } => self
                .move_item(*id, *left, *top)
                .map(|item| ActionOutcome::Moved { item }),
            BoardAction::Remove { id } => {
                self.remove(*id).map(|item| ActionOutcome::Removed { item })
            }
            BoardAction::ClearAll => Some(ActionOutcome::Cleared {
                count: self.clear_all(),
            }),
        };
        outcome.unwrap_or(ActionOutcome::Ignored)
    }

    fn changed(&self) {
        self.persist();
        if let Some(ref callback) = self.on_change {
            callback(self.engine.items());
        }
    }

    /// Write the full layout to the store.
    fn persist(&self) {
        let json = match encode_layout(self.engine.items()) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize layout: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(LAYOUT_KEY, &json) {
            tracing::warn!("Failed to persist layout: {e}");
        }
    }
}
