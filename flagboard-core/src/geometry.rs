//! Canvas geometry as seen by the placement engine.
//!
//! The presentation layer owns the real canvas; the engine only ever reads
//! its current size and device class through a [`GeometryProvider`].

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Device class of the canvas host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Phones and narrow viewports: smaller cells, clamped drops.
    Compact,
    /// Desktop-class viewports.
    #[default]
    Regular,
}

impl DeviceClass {
    /// Classify a viewport by width.
    #[must_use]
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if width <= breakpoint {
            Self::Compact
        } else {
            Self::Regular
        }
    }

    /// Whether this is a compact device.
    #[must_use]
    pub const fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }
}

/// Rendered canvas size and device class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Rendered width in pixels.
    pub width: f32,
    /// Rendered height in pixels.
    pub height: f32,
    /// Device class of the host.
    pub device_class: DeviceClass,
}

impl Geometry {
    /// Create a geometry snapshot.
    #[must_use]
    pub const fn new(width: f32, height: f32, device_class: DeviceClass) -> Self {
        Self {
            width,
            height,
            device_class,
        }
    }

    /// A compact-device geometry.
    #[must_use]
    pub const fn compact(width: f32, height: f32) -> Self {
        Self::new(width, height, DeviceClass::Compact)
    }

    /// A regular-device geometry.
    #[must_use]
    pub const fn regular(width: f32, height: f32) -> Self {
        Self::new(width, height, DeviceClass::Regular)
    }

    /// Whether the canvas has been laid out with a usable size.
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Source of the canvas's current geometry.
pub trait GeometryProvider: std::fmt::Debug {
    /// Current canvas geometry.
    fn geometry(&self) -> Geometry;
}

impl GeometryProvider for Geometry {
    fn geometry(&self) -> Geometry {
        *self
    }
}

/// Shared, updatable geometry handle.
///
/// The presentation layer keeps one clone and calls [`SharedGeometry::set`]
/// on resize; the engine keeps another and reads it on every placement.
#[derive(Debug, Clone)]
pub struct SharedGeometry {
    inner: Arc<RwLock<Geometry>>,
}

impl SharedGeometry {
    /// Create a handle with an initial geometry.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(geometry)),
        }
    }

    /// Replace the current geometry.
    pub fn set(&self, geometry: Geometry) {
        let mut current = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = geometry;
    }

    /// Update only the rendered size.
    pub fn resize(&self, width: f32, height: f32) {
        let mut current = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        current.width = width;
        current.height = height;
    }
}

impl GeometryProvider for SharedGeometry {
    fn geometry(&self) -> Geometry {
        *self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class_for_width() {
        assert_eq!(DeviceClass::for_width(320.0, 768.0), DeviceClass::Compact);
        assert_eq!(DeviceClass::for_width(768.0, 768.0), DeviceClass::Compact);
        assert_eq!(DeviceClass::for_width(1024.0, 768.0), DeviceClass::Regular);
    }

    #[test]
    fn test_is_measurable() {
        assert!(Geometry::regular(800.0, 600.0).is_measurable());
        assert!(!Geometry::regular(0.0, 600.0).is_measurable());
        assert!(!Geometry::regular(800.0, -1.0).is_measurable());
        assert!(!Geometry::compact(f32::NAN, 600.0).is_measurable());
        assert!(!Geometry::compact(f32::INFINITY, 600.0).is_measurable());
    }

    #[test]
    fn test_shared_geometry_updates_are_visible_to_clones() {
        let shared = SharedGeometry::new(Geometry::regular(800.0, 600.0));
        let reader = shared.clone();
        shared.resize(320.0, 480.0);
        let geometry = reader.geometry();
        assert!((geometry.width - 320.0).abs() < f32::EPSILON);
        assert_eq!(geometry.device_class, DeviceClass::Regular);

        shared.set(Geometry::compact(320.0, 480.0));
        assert!(reader.geometry().device_class.is_compact());
    }
}
