//! WebAssembly bindings for flagboard-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Layouts persist to `localStorage`; the page reports canvas resizes through
//! `setGeometry`.

use wasm_bindgen::prelude::*;

use crate::store::{KeyValueStore, MemoryStore, StoreError};
use crate::{
    ActionOutcome, Board, BoardAction, Catalog, DeviceClass, Geometry, ItemId, LayoutSettings,
    PlacementEngine, SharedGeometry,
};

/// Initialize the flagboard WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Browser `localStorage` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

/// Flag board instance for WASM.
#[wasm_bindgen]
pub struct WasmBoard {
    board: Board,
    geometry: SharedGeometry,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a board for a canvas of the given size, restoring the layout
    /// saved in `localStorage`. Uses the built-in signal flag catalog unless
    /// `catalog_json` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if `catalog_json` is not a valid catalog.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)] // wasm-bindgen passes owned strings
    pub fn new(
        width: f32,
        height: f32,
        compact: bool,
        catalog_json: Option<String>,
    ) -> Result<WasmBoard, JsValue> {
        let catalog = match catalog_json {
            Some(json) => Catalog::from_json(&json).map_err(js_error)?,
            None => Catalog::signal_flags(),
        };
        let store = if LocalStorageStore::storage().is_ok() {
            Box::new(LocalStorageStore) as Box<dyn KeyValueStore>
        } else {
            tracing::warn!("localStorage unavailable, layout will not persist");
            Box::new(MemoryStore::new())
        };
        Ok(Self::with_store(
            catalog,
            Geometry::new(width, height, device_class(compact)),
            store,
        ))
    }

    /// Report the canvas's current rendered size and device class.
    #[wasm_bindgen(js_name = setGeometry)]
    pub fn set_geometry(&self, width: f32, height: f32, compact: bool) {
        self.geometry
            .set(Geometry::new(width, height, device_class(compact)));
    }

    /// Auto-place an item. Returns the placed item as JSON, or `undefined`.
    #[wasm_bindgen(js_name = autoPlace)]
    pub fn auto_place(&mut self, key: &str) -> Option<String> {
        let placed = self.board.auto_place(key)?;
        serde_json::to_string(&placed).ok()
    }

    /// Place an item at a drop point. Returns the placed item as JSON.
    #[wasm_bindgen(js_name = placeAt)]
    pub fn place_at(&mut self, key: &str, left: f32, top: f32) -> Option<String> {
        let placed = self.board.place_at(key, left, top)?;
        serde_json::to_string(&placed).ok()
    }

    /// Move a placed item. Returns the moved item as JSON.
    #[wasm_bindgen(js_name = moveItem)]
    pub fn move_item(&mut self, id: &str, left: f32, top: f32) -> Option<String> {
        let id = ItemId::parse(id).ok()?;
        let moved = self.board.move_item(id, left, top)?;
        serde_json::to_string(&moved).ok()
    }

    /// Remove a placed item. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        ItemId::parse(id)
            .ok()
            .and_then(|id| self.board.remove(id))
            .is_some()
    }

    /// Remove every item. Returns how many were removed.
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) -> usize {
        self.board.clear_all()
    }

    /// Apply a JSON-encoded action and return the JSON-encoded outcome.
    ///
    /// # Errors
    ///
    /// Returns an error string if the action cannot be parsed.
    pub fn apply(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: BoardAction = serde_json::from_str(action_json).map_err(js_error)?;
        let outcome: ActionOutcome = self.board.apply(&action);
        serde_json::to_string(&outcome).map_err(js_error)
    }

    /// All placed items as a JSON array.
    #[wasm_bindgen(js_name = itemsJson)]
    #[must_use]
    pub fn items_json(&self) -> String {
        serde_json::to_string(self.board.items()).unwrap_or_else(|_| "[]".to_string())
    }

    /// The current grid geometry as JSON.
    #[wasm_bindgen(js_name = gridConfigJson)]
    #[must_use]
    pub fn grid_config_json(&self) -> String {
        serde_json::to_string(&self.board.grid_config()).unwrap_or_default()
    }
}

impl WasmBoard {
    fn with_store(catalog: Catalog, geometry: Geometry, store: Box<dyn KeyValueStore>) -> Self {
        let geometry = SharedGeometry::new(geometry);
        let engine = PlacementEngine::new(catalog, LayoutSettings::default(), geometry.clone());
        Self {
            board: Board::open(engine, store),
            geometry,
        }
    }
}

fn device_class(compact: bool) -> DeviceClass {
    if compact {
        DeviceClass::Compact
    } else {
        DeviceClass::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> WasmBoard {
        WasmBoard::with_store(
            Catalog::signal_flags(),
            Geometry::compact(320.0, 480.0),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn auto_place_returns_item_json() {
        let mut board = board();
        let json = board.auto_place("A").expect("placed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["type"], "A");
        assert!(board.auto_place("unknown").is_none());
    }

    #[test]
    fn move_item_rejects_bad_id() {
        let mut board = board();
        board.auto_place("A");
        assert!(board.move_item("not-a-uuid", 10.0, 10.0).is_none());
        assert!(!board.remove("not-a-uuid"));
    }

    #[test]
    fn set_geometry_changes_grid() {
        let board = board();
        board.set_geometry(1280.0, 720.0, false);
        let json = board.grid_config_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["deviceClass"], "regular");
        assert_eq!(value["canvasWidth"], 1280.0);
    }

    #[test]
    fn items_json_is_array() {
        let mut board = board();
        board.auto_place("A");
        board.auto_place("B");
        let value: serde_json::Value =
            serde_json::from_str(&board.items_json()).expect("valid json");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(board.clear_all(), 2);
    }
}
