use std::ops::{Add, Sub};

/// Dimensions in absolute pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.
    }

    /// Nothing can be laid out in a size like this, e.g. a window which was not measured yet.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0. && self.height > 0.)
            || !self.width.is_finite()
            || !self.height.is_finite()
    }

    /// Distance from the center to the edges, rounded up to whole pixels.
    pub fn apothems(&self) -> PixelOffset {
        PixelOffset::new(
            self.half_width().ceil() as i32,
            self.half_height().ceil() as i32,
        )
    }
}

impl From<egui::Vec2> for PixelSize {
    fn from(value: egui::Vec2) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Integer pixel position on the screen. Arithmetic saturates, as things far off the screen at
/// high zoom levels land near the bounds of `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

impl PixelOffset {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }
}

impl From<egui::Pos2> for PixelOffset {
    fn from(value: egui::Pos2) -> Self {
        Self::new(value.x.floor() as i32, value.y.floor() as i32)
    }
}

impl Add for PixelOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl Sub for PixelOffset {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

/// Rectangle on the screen, defined by its top left and bottom right corners, both inclusive.
/// Zero-area and inverted regions are legal, but they never intersect anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRegion {
    pub top_left: PixelOffset,
    pub bottom_right: PixelOffset,
}

impl TileRegion {
    pub const fn new(top_left: PixelOffset, bottom_right: PixelOffset) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Region starting at `base`, extending by `size` to the right and to the bottom.
    pub fn define(base: PixelOffset, size: PixelSize) -> Self {
        Self::new(
            base,
            base + PixelOffset::new(size.width as i32, size.height as i32),
        )
    }

    /// Region of the given `size` centered at `center`. Always at least one pixel away from the
    /// center in each direction, so even the tiniest footprint has an area.
    pub fn around(center: PixelOffset, size: PixelSize) -> Self {
        let apothems = size.apothems();
        let apothems = PixelOffset::new(apothems.x.max(1), apothems.y.max(1));
        Self::new(center - apothems, center + apothems)
    }

    /// Smallest region containing all the offsets, `None` for an empty input.
    pub fn bounding(offsets: impl IntoIterator<Item = PixelOffset>) -> Option<Self> {
        offsets.into_iter().fold(None, |region, offset| {
            Some(match region {
                None => Self::new(offset, offset),
                Some(Self {
                    top_left,
                    bottom_right,
                }) => Self::new(
                    PixelOffset::new(top_left.x.min(offset.x), top_left.y.min(offset.y)),
                    PixelOffset::new(
                        bottom_right.x.max(offset.x),
                        bottom_right.y.max(offset.y),
                    ),
                ),
            })
        })
    }

    /// Whether the two regions overlap or one inscribes the other. Touching edges count.
    pub fn intersects(&self, other: &TileRegion) -> bool {
        if !self.has_area() || !other.has_area() {
            return false;
        }

        let top_left = PixelOffset::new(
            self.top_left.x.max(other.top_left.x),
            self.top_left.y.max(other.top_left.y),
        );

        let bottom_right = PixelOffset::new(
            self.bottom_right.x.min(other.bottom_right.x),
            self.bottom_right.y.min(other.bottom_right.y),
        );

        bottom_right.x >= top_left.x && bottom_right.y >= top_left.y
    }

    pub fn contains(&self, offset: PixelOffset) -> bool {
        (self.top_left.x..=self.bottom_right.x).contains(&offset.x)
            && (self.top_left.y..=self.bottom_right.y).contains(&offset.y)
    }

    pub fn has_area(&self) -> bool {
        self.bottom_right.x > self.top_left.x && self.bottom_right.y > self.top_left.y
    }
}
