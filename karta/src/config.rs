use std::time::Duration;

use crate::{
    input::DEFAULT_LONG_PRESS,
    mercator::TILE_SIZE,
    position::{Coordinates, lat_lon},
    zoom::{InvalidZoom, ZoomSpecs},
};

/// Construction parameters of the [`crate::Map`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapOptions {
    pub initial_coordinates: Coordinates,
    pub initial_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,

    /// Whether the map reacts to pointer gestures. Non-interactive maps still track the cursor.
    pub interactive: bool,

    /// Pressing for longer than that, without moving, is a long press.
    pub long_press_duration: Duration,

    /// Size of a single tile in pixels.
    pub tile_size: f64,

    /// Show overlays on every visible copy of the world.
    pub wrap_longitude: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            initial_coordinates: lat_lon(0.0, 0.0),
            initial_zoom: 14,
            min_zoom: 2,
            max_zoom: 19,
            interactive: true,
            long_press_duration: DEFAULT_LONG_PRESS,
            tile_size: TILE_SIZE,
            wrap_longitude: true,
        }
    }
}

impl MapOptions {
    pub fn with_initial_coordinates(self, initial_coordinates: Coordinates) -> Self {
        Self {
            initial_coordinates,
            ..self
        }
    }

    pub fn with_zoom(self, initial_zoom: u8, min_zoom: u8, max_zoom: u8) -> Self {
        Self {
            initial_zoom,
            min_zoom,
            max_zoom,
            ..self
        }
    }

    pub fn with_interactive(self, interactive: bool) -> Self {
        Self {
            interactive,
            ..self
        }
    }

    pub fn with_long_press_duration(self, long_press_duration: Duration) -> Self {
        Self {
            long_press_duration,
            ..self
        }
    }

    pub fn with_tile_size(self, tile_size: f64) -> Self {
        Self { tile_size, ..self }
    }

    pub fn with_wrap_longitude(self, wrap_longitude: bool) -> Self {
        Self {
            wrap_longitude,
            ..self
        }
    }

    /// # Errors
    ///
    /// When the zoom bounds are inconsistent.
    pub fn zoom_specs(&self) -> Result<ZoomSpecs, InvalidZoom> {
        ZoomSpecs::new(self.initial_zoom, self.min_zoom, self.max_zoom)
    }
}
