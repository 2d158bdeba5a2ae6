//! Layout settings: per-device item metrics and engine parameters.
//!
//! Every field has a default, so a settings file only needs to name what it
//! overrides:
//!
//! ```json
//! { "compact": { "item_width": 40.0, "item_height": 40.0 }, "retry_limit": 32 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BoardError, BoardResult, DeviceClass};

/// Item size, spacing and margin for one device class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetrics {
    /// Item width in pixels.
    pub item_width: f32,
    /// Item height in pixels.
    pub item_height: f32,
    /// Gap between columns.
    pub horizontal_spacing: f32,
    /// Gap between rows.
    pub vertical_spacing: f32,
    /// Minimum distance between any item edge and the canvas edge.
    pub safety_margin: f32,
}

impl ItemMetrics {
    /// Metrics for compact devices.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            item_width: 42.0,
            item_height: 42.0,
            horizontal_spacing: 8.0,
            vertical_spacing: 8.0,
            safety_margin: 16.0,
        }
    }

    /// Metrics for regular devices.
    #[must_use]
    pub const fn regular() -> Self {
        Self {
            item_width: 56.0,
            item_height: 56.0,
            horizontal_spacing: 16.0,
            vertical_spacing: 16.0,
            safety_margin: 24.0,
        }
    }

    fn validate(&self, label: &str) -> BoardResult<()> {
        let sizes = [("item_width", self.item_width), ("item_height", self.item_height)];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoardError::InvalidSettings(format!(
                    "{label}.{name} must be a positive number, got {value}"
                )));
            }
        }
        let gaps = [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("safety_margin", self.safety_margin),
        ];
        for (name, value) in gaps {
            if !value.is_finite() || value < 0.0 {
                return Err(BoardError::InvalidSettings(format!(
                    "{label}.{name} must be zero or positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ItemMetrics {
    fn default() -> Self {
        Self::regular()
    }
}

/// Engine-wide layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Metrics on compact devices.
    pub compact: ItemMetrics,
    /// Metrics on regular devices.
    pub regular: ItemMetrics,
    /// Canvas width assumed while the real canvas is unmeasurable.
    pub fallback_width: f32,
    /// Canvas height assumed while the real canvas is unmeasurable.
    pub fallback_height: f32,
    /// Viewport widths at or below this are compact.
    pub compact_breakpoint: f32,
    /// Boundary-avoidance attempts before auto placement gives up and
    /// stacks at the first slot.
    pub retry_limit: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            compact: ItemMetrics::compact(),
            regular: ItemMetrics::regular(),
            fallback_width: 800.0,
            fallback_height: 600.0,
            compact_breakpoint: 768.0,
            retry_limit: 20,
        }
    }
}

impl LayoutSettings {
    /// Metrics for a device class.
    #[must_use]
    pub const fn metrics(&self, device_class: DeviceClass) -> &ItemMetrics {
        match device_class {
            DeviceClass::Compact => &self.compact,
            DeviceClass::Regular => &self.regular,
        }
    }

    /// Parse and validate settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Serialization`] for malformed JSON and
    /// [`BoardError::InvalidSettings`] for out-of-range values.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Io`] if the file cannot be read, otherwise the
    /// errors of [`LayoutSettings::from_json`].
    pub fn load(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        tracing::debug!("Loaded layout settings from {}", path.display());
        Ok(settings)
    }

    /// Check that every value yields a usable grid.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSettings`] naming the first bad field.
    pub fn validate(&self) -> BoardResult<()> {
        self.compact.validate("compact")?;
        self.regular.validate("regular")?;
        let fallback = [
            ("fallback_width", self.fallback_width),
            ("fallback_height", self.fallback_height),
        ];
        for (name, value) in fallback {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoardError::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.compact_breakpoint.is_finite() {
            return Err(BoardError::InvalidSettings(
                "compact_breakpoint must be finite".to_string(),
            ));
        }
        if self.retry_limit == 0 {
            return Err(BoardError::InvalidSettings(
                "retry_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        LayoutSettings::default().validate().expect("defaults valid");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            LayoutSettings::from_json(r#"{"compact":{"item_width":40.0},"retry_limit":32}"#)
                .expect("parse");
        assert!((settings.compact.item_width - 40.0).abs() < f32::EPSILON);
        assert!((settings.compact.item_height - 42.0).abs() < f32::EPSILON);
        assert!((settings.compact.safety_margin - 16.0).abs() < f32::EPSILON);
        assert_eq!(settings.regular, ItemMetrics::regular());
        assert_eq!(settings.retry_limit, 32);
    }

    #[test]
    fn test_rejects_non_positive_item_size() {
        let result = LayoutSettings::from_json(r#"{"regular":{"item_height":0.0}}"#);
        assert!(matches!(result, Err(BoardError::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_negative_margin() {
        let result = LayoutSettings::from_json(r#"{"compact":{"safety_margin":-4.0}}"#);
        assert!(matches!(result, Err(BoardError::InvalidSettings(_))));
    }

    #[test]
    fn test_rejects_zero_retry_limit() {
        let result = LayoutSettings::from_json(r#"{"retry_limit":0}"#);
        assert!(matches!(result, Err(BoardError::InvalidSettings(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{"fallback_width":1024.0}"#).expect("write");
        let settings = LayoutSettings::load(&path).expect("load");
        assert!((settings.fallback_width - 1024.0).abs() < f32::EPSILON);

        let missing = LayoutSettings::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_metrics_by_device_class() {
        let settings = LayoutSettings::default();
        assert_eq!(*settings.metrics(DeviceClass::Compact), ItemMetrics::compact());
        assert_eq!(*settings.metrics(DeviceClass::Regular), ItemMetrics::regular());
    }
}
