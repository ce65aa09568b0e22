//! Project the lat/lon coordinates into fractional tile coordinates using the Web Mercator.
//! <https://en.wikipedia.org/wiki/Web_Mercator_projection>
//! <https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames>

use std::f64::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

use crate::position::Coordinates;

// zoom level   tile coverage  number of tiles  tile size in degrees
// 0            1 tile         1 tile           360° x 170.1022°
// 1            2 × 2 tiles    4 tiles          180° x 85.0511°
// 2            4 × 4 tiles    16 tiles         90° x [variable]

/// Equatorial radius of the WGS84 ellipsoid.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Size of a single tile in pixels. Most of the tile sources use 256px tiles.
pub const TILE_SIZE: f64 = 256.0;

/// Number of tiles along one axis at the given zoom.
pub fn total_tiles(zoom: u8) -> u32 {
    2u32.pow(zoom as u32)
}

/// Position expressed in tiles of a particular zoom level. Integer part is the tile index,
/// fractional part is the position within that tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct FractionalTileOffset {
    pub x: f64,
    pub y: f64,
}

impl FractionalTileOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for FractionalTileOffset {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for FractionalTileOffset {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for FractionalTileOffset {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Neg for FractionalTileOffset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Forward projection of geographical coordinates into tiles of the given zoom.
pub fn to_fractional_tile(zoom: u8, coordinates: Coordinates) -> FractionalTileOffset {
    let latitude = coordinates.latitude.to_radians();
    let number_of_tiles = 2f64.powi(zoom as i32);

    let x = number_of_tiles * ((coordinates.longitude + 180.0) / 360.0);
    let y = number_of_tiles * (1.0 - (latitude.tan() + 1.0 / latitude.cos()).ln() / PI) / 2.0;

    FractionalTileOffset::new(x, y)
}

/// Inverse of [`to_fractional_tile`].
pub fn to_coordinates(zoom: u8, offset: FractionalTileOffset) -> Coordinates {
    let number_of_tiles = 2f64.powi(zoom as i32);

    let longitude = (offset.x / number_of_tiles) * 360.0 - 180.0;
    let latitude = (PI * (1.0 - 2.0 * offset.y / number_of_tiles))
        .sinh()
        .atan()
        .to_degrees();

    Coordinates::new(latitude, longitude)
}

/// Distance on the ground expressed in pixels on the screen, given how many pixels there are per
/// degree of longitude.
pub fn meters_to_pixels(meters: f64, horizontal_pixel_density: f64) -> f64 {
    let angle = meters / EARTH_RADIUS_METERS;
    (angle * horizontal_pixel_density).to_degrees().abs()
}
