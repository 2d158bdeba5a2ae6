//! # Flagboard Core
//!
//! Placement engine for a signal-flag canvas: a palette of flags and pennants
//! that users drop or auto-place onto a bounded board.
//! Compiles to WASM for use from the browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               flagboard-core                │
//! ├─────────────────────────────────────────────┤
//! │  Catalog         │  Geometry                │
//! │  - Flag kinds    │  - Canvas size           │
//! │  - Keywords      │  - Device class          │
//! ├─────────────────────────────────────────────┤
//! │  Placement Engine                           │
//! │  - Grid config   - Cursor + reconciliation  │
//! │  - Boundary checks and clamping             │
//! ├─────────────────────────────────────────────┤
//! │  Board           │  Store                   │
//! │  - Actions       │  - Memory / file         │
//! │  - Change hooks  │  - localStorage (wasm)   │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod board;
pub mod boundary;
pub mod catalog;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod item;
pub mod schema;
pub mod settings;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{ActionOutcome, BoardAction};
pub use board::Board;
pub use catalog::Catalog;
pub use cursor::PlacementCursor;
pub use engine::{PlacementEngine, Slot, SlotResolution};
pub use error::{BoardError, BoardResult};
pub use geometry::{DeviceClass, Geometry, GeometryProvider, SharedGeometry};
pub use grid::GridConfig;
pub use item::{Bounds, CatalogItem, Category, ItemId, PlacedItem};
pub use schema::LAYOUT_KEY;
pub use settings::{ItemMetrics, LayoutSettings};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Flagboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
