//! Board actions and their outcomes, as exchanged with the UI layer.

use serde::{Deserialize, Serialize};

use crate::{ItemId, PlacedItem};

/// A single user-triggered board operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BoardAction {
    /// Place an item at the next free slot.
    AutoPlace {
        /// Catalog kind to place.
        key: String,
    },
    /// Place an item at an explicit point (a drop).
    PlaceAt {
        /// Catalog kind to place.
        key: String,
        /// Center X.
        left: f32,
        /// Center Y.
        top: f32,
    },
    /// Move a placed item.
    Move {
        /// Item to move.
        id: ItemId,
        /// New center X.
        left: f32,
        /// New center Y.
        top: f32,
    },
    /// Remove a placed item.
    Remove {
        /// Item to remove.
        id: ItemId,
    },
    /// Remove every item.
    ClearAll,
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A new item was placed.
    Placed {
        /// The new item.
        item: PlacedItem,
    },
    /// An item was moved.
    Moved {
        /// The item at its new position.
        item: PlacedItem,
    },
    /// An item was removed.
    Removed {
        /// The removed item.
        item: PlacedItem,
    },
    /// The board was cleared.
    Cleared {
        /// Number of items removed.
        count: usize,
    },
    /// The action referenced an unknown key or id and changed nothing.
    Ignored,
}

impl ActionOutcome {
    /// Whether the board changed.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
