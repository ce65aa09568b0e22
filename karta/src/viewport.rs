use egui::{Pos2, Vec2};

use crate::{
    converter::Converter,
    input::PointerPosition,
    mercator::{FractionalTileOffset, to_coordinates, to_fractional_tile},
    position::{BoundingBox, Coordinates},
    tiles::TileEnumerator,
    units::PixelSize,
    zoom::{ZoomDirection, ZoomSpecs},
};

/// Programmatic change of the view, e.g. "show this place at that zoom". Zoom is applied first, so
/// the requested center is honored at the new zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct ViewCommand {
    pub center: Option<Coordinates>,
    pub zoom: Option<u8>,
}

impl ViewCommand {
    pub fn center_at(coordinates: Coordinates) -> Self {
        Self {
            center: Some(coordinates),
            zoom: None,
        }
    }

    pub fn with_zoom(self, zoom: u8) -> Self {
        Self {
            zoom: Some(zoom),
            ..self
        }
    }
}

/// State of the map's camera which must persist between frames.
///
/// Center is kept as a fractional tile offset of the current zoom, so panning does not lose
/// precision the way repeated conversion through latitude and longitude would.
#[derive(Debug, Clone)]
pub struct Viewport {
    center: FractionalTileOffset,
    zoom: ZoomSpecs,
    size: Option<PixelSize>,
    tile_size: f64,
    revision: u64,
}

impl Viewport {
    pub fn new(center: Coordinates, zoom: ZoomSpecs, tile_size: f64) -> Self {
        Self {
            center: zoom.curtail_offset(to_fractional_tile(zoom.value(), center)),
            zoom,
            size: None,
            tile_size,
            revision: 0,
        }
    }

    pub fn center(&self) -> FractionalTileOffset {
        self.center
    }

    /// Geographical position of the center, with the longitude wrapped into `[-180, 180)`.
    pub fn center_coordinates(&self) -> Coordinates {
        to_coordinates(self.zoom.value(), self.center).wrap_longitude()
    }

    pub fn zoom(&self) -> ZoomSpecs {
        self.zoom
    }

    /// `None` until a non-degenerate size gets committed with [`Viewport::resize`].
    pub fn size(&self) -> Option<PixelSize> {
        self.size
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Incremented on every change of the center, zoom or size. Anything derived from the viewport
    /// (converter, visible tiles, overlay positions) is stale when the revision it was computed
    /// at differs from this one.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Commit the size of the viewport. Degenerate sizes bring it back to the uninitialized state.
    /// Returns whether anything changed.
    pub fn resize(&mut self, size: PixelSize) -> bool {
        let size = (!size.is_degenerate()).then_some(size);
        if size == self.size {
            return false;
        }

        log::debug!("Viewport resized to {size:?}.");
        self.size = size;
        self.touch();
        true
    }

    /// Dragging to the right moves the center to the left and vice versa, so the center moves by
    /// the negated delta.
    pub fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }

        let delta = FractionalTileOffset::new(
            delta.x as f64 / self.tile_size,
            delta.y as f64 / self.tile_size,
        );

        self.center = self.zoom.curtail_offset(self.center - delta);
        self.touch();
    }

    /// Displacement of `pixel` from the middle of the viewport, in tiles.
    fn cursor_tiles(&self, pixel: Pos2) -> FractionalTileOffset {
        let Some(size) = self.size else {
            return FractionalTileOffset::default();
        };

        FractionalTileOffset::new(
            (pixel.x - size.half_width()) as f64 / self.tile_size,
            (pixel.y - size.half_height()) as f64 / self.tile_size,
        )
    }

    /// Zoom by one step keeping the place under `cursor` where it is on the screen. Returns
    /// whether the zoom changed, which does not happen at the bounds.
    pub fn zoom_at(&mut self, cursor: Pos2, direction: ZoomDirection) -> bool {
        let zoom = self.zoom.step(direction);
        if zoom == self.zoom {
            return false;
        }

        let cursor = self.cursor_tiles(cursor);
        let under_cursor = self.center + cursor;
        let scale = match direction {
            ZoomDirection::In => 2.0,
            ZoomDirection::Out => 0.5,
        };

        self.zoom = zoom;
        self.center = zoom.curtail_offset(under_cursor * scale - cursor);
        self.touch();

        log::debug!("Zoom changed to {}.", zoom.value());
        true
    }

    /// Zoom in by one step around the center of the viewport.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom.value().saturating_add(1))
    }

    /// Zoom out by one step around the center of the viewport.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.value().saturating_sub(1))
    }

    /// Set exact zoom level, clamped into the bounds. Center stays at the same place.
    pub fn set_zoom(&mut self, value: u8) -> bool {
        let zoom = self.zoom.with_value(value);
        if zoom == self.zoom {
            return false;
        }

        let scale = 2f64.powi(zoom.value() as i32 - self.zoom.value() as i32);
        self.center = zoom.curtail_offset(self.center * scale);
        self.zoom = zoom;
        self.touch();

        log::debug!("Zoom set to {}.", zoom.value());
        true
    }

    /// Center exactly at the given position.
    pub fn center_at(&mut self, coordinates: Coordinates) {
        self.center = self
            .zoom
            .curtail_offset(to_fractional_tile(self.zoom.value(), coordinates));
        self.touch();
    }

    pub fn apply(&mut self, command: ViewCommand) {
        log::debug!("Applying {command:?}.");

        if let Some(zoom) = command.zoom {
            self.set_zoom(zoom);
        }

        if let Some(center) = command.center {
            self.center_at(center);
        }
    }

    /// Geographical area currently visible, `None` before the size is known.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let size = self.size?;

        let half = FractionalTileOffset::new(
            size.half_width() as f64 / self.tile_size,
            size.half_height() as f64 / self.tile_size,
        );

        Some(BoundingBox {
            top_left: to_coordinates(self.zoom.value(), self.center - half),
            bottom_right: to_coordinates(self.zoom.value(), self.center + half),
        })
    }

    /// Converter for the current frame, `None` before the size is known.
    pub fn converter(&self) -> Option<Converter> {
        Some(Converter::new(
            self.bounding_box()?,
            self.size?,
            self.center,
            self.zoom.value(),
            self.tile_size,
        ))
    }

    /// Geographical interpretation of a pixel on the screen, `None` before the size is known.
    pub fn pointer_position(&self, pixel: Pos2) -> Option<PointerPosition> {
        self.size?;

        let coordinates =
            to_coordinates(self.zoom.value(), self.center + self.cursor_tiles(pixel))
                .wrap_longitude();

        Some(PointerPosition {
            coordinates,
            offset: pixel,
        })
    }

    /// Tiles needed to cover the viewport. Nothing before the size is known.
    pub fn visible_tiles(&self) -> TileEnumerator {
        match self.size {
            Some(size) => TileEnumerator::new(self.center, self.zoom.value(), size, self.tile_size),
            None => TileEnumerator::empty(),
        }
    }
}
