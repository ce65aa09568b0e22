use crate::{
    mercator::{self, FractionalTileOffset, to_coordinates, to_fractional_tile},
    position::{BoundingBox, Coordinates},
    units::{PixelOffset, PixelSize, TileRegion},
};

/// Converts geographical coordinates into pixels of a single frame of the viewport, and answers
/// whether something is visible in it. Built by [`crate::Viewport::converter`] whenever the
/// viewport changes, so it never goes stale within a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    bounding_box: BoundingBox,
    size: PixelSize,
    center: FractionalTileOffset,
    zoom: u8,
    tile_size: f64,
    tile_region: TileRegion,
}

impl Converter {
    pub fn new(
        bounding_box: BoundingBox,
        size: PixelSize,
        center: FractionalTileOffset,
        zoom: u8,
        tile_size: f64,
    ) -> Self {
        let mut converter = Self {
            bounding_box,
            size,
            center,
            zoom,
            tile_size,
            tile_region: TileRegion::new(PixelOffset::default(), PixelOffset::default()),
        };

        converter.tile_region = TileRegion::new(
            converter.convert_to_offset(bounding_box.top_left),
            converter.convert_to_offset(bounding_box.bottom_right),
        );

        converter
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Visible part of the screen, in pixels.
    pub fn tile_region(&self) -> TileRegion {
        self.tile_region
    }

    /// Pixels per degree of longitude.
    pub fn horizontal_pixel_density(&self) -> f64 {
        self.size.width as f64 / self.bounding_box.delta_longitude()
    }

    /// Pixels per degree of latitude, averaged over the whole viewport since Mercator stretches
    /// latitudes unevenly.
    pub fn vertical_pixel_density(&self) -> f64 {
        self.size.height as f64 / self.bounding_box.delta_latitude()
    }

    /// Project `coordinates` into pixels relative to the top left corner of the viewport.
    pub fn convert_to_offset(&self, coordinates: Coordinates) -> PixelOffset {
        let offset_from_center =
            (to_fractional_tile(self.zoom, coordinates) - self.center) * self.tile_size;

        PixelOffset::new(
            (offset_from_center.x + self.size.half_width() as f64).floor() as i32,
            (offset_from_center.y + self.size.half_height() as f64).floor() as i32,
        )
    }

    /// Geographical coordinates of a pixel of the viewport. Longitude is not wrapped.
    pub fn convert_to_coordinates(&self, pixel: egui::Pos2) -> Coordinates {
        to_coordinates(self.zoom, self.center + self.cursor_tiles(pixel))
    }

    /// Pixel displacement from the center of the viewport, expressed in tiles.
    pub(crate) fn cursor_tiles(&self, pixel: egui::Pos2) -> FractionalTileOffset {
        FractionalTileOffset::new(
            (pixel.x - self.size.half_width()) as f64 / self.tile_size,
            (pixel.y - self.size.half_height()) as f64 / self.tile_size,
        )
    }

    /// Whether the `coordinates` are visible. When `extension` is given, the coordinates are
    /// treated as the center of a footprint of that size, which is visible as soon as any part of
    /// it intersects the viewport.
    pub fn inside_view(&self, coordinates: Coordinates, extension: Option<PixelSize>) -> bool {
        match extension {
            Some(extension) => self.tile_region.intersects(&TileRegion::around(
                self.convert_to_offset(coordinates),
                extension,
            )),
            None => self.bounding_box.contains(coordinates),
        }
    }

    /// Distance on the ground expressed in pixels at the current zoom.
    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        mercator::meters_to_pixels(meters, self.horizontal_pixel_density())
    }
}
