use egui::{Rect, Vec2};

use crate::{
    mercator::{FractionalTileOffset, total_tiles},
    units::{PixelOffset, PixelSize},
};

/// Identifies the tile in the tile grid. This is what tile servers are asked for, so `x` is always
/// wrapped into the valid range.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TileId {
    /// X number of the tile.
    pub x: u32,

    /// Y number of the tile.
    pub y: u32,

    /// Zoom level, where 0 means no zoom.
    /// See: <https://wiki.openstreetmap.org/wiki/Zoom_levels>
    pub zoom: u8,
}

impl TileId {
    pub fn valid(&self) -> bool {
        self.x < total_tiles(self.zoom) && self.y < total_tiles(self.zoom)
    }
}

/// Tile which should be drawn in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    /// What to fetch.
    pub id: TileId,

    /// Unwrapped column. Tiles east of the antimeridian keep counting up (or down, to the west),
    /// so wrapped copies of the world are laid out next to each other.
    pub index_x: i64,

    pub index_y: i64,

    /// Screen position of the top left corner of the tile.
    pub offset: PixelOffset,

    pub size: f64,
}

impl VisibleTile {
    /// Where to draw the tile, suitable for [`egui::Painter`].
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.offset.to_pos2(), Vec2::splat(self.size as f32))
    }
}

/// Lazily enumerates tiles covering the viewport, with one tile of margin on each side.
///
/// Rows outside of the world are skipped, columns are wrapped around the antimeridian.
#[derive(Debug, Clone)]
pub struct TileEnumerator {
    zoom: u8,
    center: FractionalTileOffset,
    half_size: (f64, f64),
    tile_size: f64,
    x_range: (i64, i64),
    y_range: (i64, i64),
    next: Option<(i64, i64)>,
}

impl TileEnumerator {
    pub fn new(center: FractionalTileOffset, zoom: u8, size: PixelSize, tile_size: f64) -> Self {
        let horizontal_tiles = ((size.width as f64 / tile_size) / 2.).floor() as i64 + 1;
        let vertical_tiles = ((size.height as f64 / tile_size) / 2.).floor() as i64 + 1;

        let center_x = center.x.floor() as i64;
        let center_y = center.y.floor() as i64;

        let x_range = (center_x - horizontal_tiles, center_x + horizontal_tiles);
        let y_range = (
            (center_y - vertical_tiles).max(0),
            (center_y + vertical_tiles).min(total_tiles(zoom) as i64 - 1),
        );

        let next = (y_range.0 <= y_range.1).then_some((x_range.0, y_range.0));

        Self {
            zoom,
            center,
            half_size: (size.half_width() as f64, size.half_height() as f64),
            tile_size,
            x_range,
            y_range,
            next,
        }
    }

    pub fn empty() -> Self {
        Self {
            zoom: 0,
            center: FractionalTileOffset::default(),
            half_size: (0., 0.),
            tile_size: 0.,
            x_range: (0, 0),
            y_range: (0, 0),
            next: None,
        }
    }

    fn tile(&self, index_x: i64, index_y: i64) -> VisibleTile {
        let id = TileId {
            x: index_x.rem_euclid(total_tiles(self.zoom) as i64) as u32,
            y: index_y as u32,
            zoom: self.zoom,
        };

        let offset = PixelOffset::new(
            (self.half_size.0 + (index_x as f64 - self.center.x) * self.tile_size).floor() as i32,
            (self.half_size.1 + (index_y as f64 - self.center.y) * self.tile_size).floor() as i32,
        );

        VisibleTile {
            id,
            index_x,
            index_y,
            offset,
            size: self.tile_size,
        }
    }
}

impl Iterator for TileEnumerator {
    type Item = VisibleTile;

    fn next(&mut self) -> Option<Self::Item> {
        let (x, y) = self.next?;

        self.next = if x < self.x_range.1 {
            Some((x + 1, y))
        } else if y < self.y_range.1 {
            Some((self.x_range.0, y + 1))
        } else {
            None
        };

        Some(self.tile(x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some((x, y)) => {
                let columns = self.x_range.1 - self.x_range.0 + 1;
                let full_rows = self.y_range.1 - y;
                (full_rows * columns + self.x_range.1 - x + 1) as usize
            }
            None => 0,
        };

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileEnumerator {}
