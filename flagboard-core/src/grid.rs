//! Responsive grid geometry.
//!
//! ```text
//!   safety margin
//!   ┌──────────────────────────────────┐
//!   │  ┌──┐    ┌──┐    ┌──┐            │   columns fill top-to-bottom,
//!   │  │0 │    │8 │    │16│            │   then move right
//!   │  └──┘    └──┘    └──┘            │
//!   │  ┌──┐    ┌──┐                    │
//!   │  │1 │    │9 │       ...          │
//!   │  └──┘    └──┘                    │
//!   │   ↑ startX is the center of column 0, startY the top of row 0
//!   └──────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{DeviceClass, Geometry, LayoutSettings};

/// Layout parameters derived from the current canvas geometry.
///
/// Recomputed on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Center X of column 0.
    pub start_x: f32,
    /// Top edge of row 0.
    pub start_y: f32,
    /// Item width.
    pub item_width: f32,
    /// Item height.
    pub item_height: f32,
    /// Gap between columns.
    pub horizontal_spacing: f32,
    /// Gap between rows.
    pub vertical_spacing: f32,
    /// `item_width + horizontal_spacing`.
    pub column_width: f32,
    /// Row capacity of a column, at least 1.
    pub max_items_per_column: usize,
    /// Canvas width the grid was computed for.
    pub canvas_width: f32,
    /// Canvas height the grid was computed for.
    pub canvas_height: f32,
    /// Minimum distance between item edges and canvas edges.
    pub safety_margin: f32,
    /// Column capacity, at least 1.
    pub max_columns: usize,
    /// Device class the grid was computed for.
    pub device_class: DeviceClass,
}

impl GridConfig {
    /// Derive the grid for a geometry.
    ///
    /// Never fails: an unmeasurable canvas is treated as the fallback canvas
    /// size from `settings`, and capacities are clamped to at least one.
    #[must_use]
    pub fn compute(geometry: Geometry, settings: &LayoutSettings) -> Self {
        let geometry = if geometry.is_measurable() {
            geometry
        } else {
            tracing::debug!(
                "Canvas not measurable ({}x{}), using fallback {}x{}",
                geometry.width,
                geometry.height,
                settings.fallback_width,
                settings.fallback_height
            );
            Geometry::new(
                settings.fallback_width,
                settings.fallback_height,
                geometry.device_class,
            )
        };

        let metrics = settings.metrics(geometry.device_class);
        let item_width = metrics.item_width.max(1.0);
        let item_height = metrics.item_height.max(1.0);
        let horizontal_spacing = metrics.horizontal_spacing.max(0.0);
        let vertical_spacing = metrics.vertical_spacing.max(0.0);
        let safety_margin = metrics.safety_margin.max(0.0);
        let column_width = item_width + horizontal_spacing;
        let row_pitch = item_height + vertical_spacing;

        let vertical_budget = 2.0 * safety_margin;
        let max_items_per_column =
            floor_at_least_one((geometry.height - vertical_budget) / row_pitch);

        let usable_width = geometry.width - 2.0 * safety_margin;
        let max_columns = floor_at_least_one((usable_width - item_width) / column_width + 1.0);

        let (start_x, start_y) = match geometry.device_class {
            DeviceClass::Compact => (safety_margin + item_width / 2.0, safety_margin),
            DeviceClass::Regular => {
                let grid_width = span(max_columns, item_width, horizontal_spacing);
                let grid_height = span(max_items_per_column, item_height, vertical_spacing);
                let left = ((geometry.width - grid_width) / 2.0).max(safety_margin);
                let top = ((geometry.height - grid_height) / 2.0).max(safety_margin);
                (left + item_width / 2.0, top)
            }
        };

        Self {
            start_x,
            start_y,
            item_width,
            item_height,
            horizontal_spacing,
            vertical_spacing,
            column_width,
            max_items_per_column,
            canvas_width: geometry.width,
            canvas_height: geometry.height,
            safety_margin,
            max_columns,
            device_class: geometry.device_class,
        }
    }

    /// Distance between the tops of consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f32 {
        self.item_height + self.vertical_spacing
    }

    /// Half the item width.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.item_width / 2.0
    }

    /// Half the item height.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.item_height / 2.0
    }

    /// Total number of grid slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.max_columns.saturating_mul(self.max_items_per_column)
    }

    /// Center of the slot at `(column, row)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Slot indices are tiny
    pub fn slot_center(&self, column: usize, row: usize) -> (f32, f32) {
        let left = self.start_x + column as f32 * self.column_width;
        let top = self.start_y + row as f32 * self.row_pitch() + self.half_height();
        (left, top)
    }

    /// Column that an item centered at `left` belongs to, clamped into the grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn column_of(&self, left: f32) -> usize {
        let raw = ((left - self.start_x) / self.column_width).floor();
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        (raw as usize).min(self.max_columns.saturating_sub(1))
    }

    /// Whether the grid is for a compact device.
    #[must_use]
    pub const fn is_compact(&self) -> bool {
        self.device_class.is_compact()
    }
}

/// Extent of `count` items of `size` separated by `gap`.
#[allow(clippy::cast_precision_loss)]
fn span(count: usize, size: f32, gap: f32) -> f32 {
    let count = count as f32;
    count * size + (count - 1.0) * gap
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_at_least_one(value: f32) -> usize {
    let floored = value.floor();
    if floored.is_finite() && floored >= 1.0 {
        floored as usize
    } else {
        1
    }
}
