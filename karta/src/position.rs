//! Types and functions for working with geographical positions.

use std::ops::{Add, Sub};

/// Geographical coordinates, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Same latitude, longitude shifted by `degrees`. Used to build the copies of a position
    /// that sit one world to the left or to the right.
    pub fn shifted_longitude(self, degrees: f64) -> Self {
        Self::new(self.latitude, self.longitude + degrees)
    }

    /// Bring the longitude back into the `[-180, 180)` range.
    pub fn wrap_longitude(self) -> Self {
        let mut longitude = (self.longitude + 180.0).rem_euclid(360.0) - 180.0;

        // `rem_euclid` may round up to the modulus for tiny negative inputs.
        if longitude >= 180.0 {
            longitude -= 360.0;
        }

        Self::new(self.latitude, longitude)
    }
}

/// Construct [`Coordinates`] from latitude and longitude.
pub const fn lat_lon(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates::new(latitude, longitude)
}

/// Component-wise difference, `self - other`.
impl Sub for Coordinates {
    type Output = Coordinates;

    fn sub(self, other: Self) -> Self::Output {
        Coordinates::new(
            self.latitude - other.latitude,
            self.longitude - other.longitude,
        )
    }
}

impl Add for Coordinates {
    type Output = Coordinates;

    fn add(self, other: Self) -> Self::Output {
        Coordinates::new(
            self.latitude + other.latitude,
            self.longitude + other.longitude,
        )
    }
}

impl From<geo_types::Point> for Coordinates {
    fn from(point: geo_types::Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinates> for geo_types::Point {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::Point::new(coordinates.longitude, coordinates.latitude)
    }
}

/// Rectangle in geographical coordinates, defined by its top left and bottom right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top_left: Coordinates,
    pub bottom_right: Coordinates,
}

impl BoundingBox {
    /// North-south span, positive for any box that is not upside down.
    pub fn delta_latitude(&self) -> f64 {
        self.top_left.latitude - self.bottom_right.latitude
    }

    /// West-east span. It is not wrapped, so it may exceed 360° when the viewport is wider than
    /// the world.
    pub fn delta_longitude(&self) -> f64 {
        self.bottom_right.longitude - self.top_left.longitude
    }

    pub fn contains(&self, coordinates: Coordinates) -> bool {
        (self.bottom_right.latitude..=self.top_left.latitude).contains(&coordinates.latitude)
            && (self.top_left.longitude..=self.bottom_right.longitude)
                .contains(&coordinates.longitude)
    }
}

/// Angle split into degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    pub fn from_degrees(value: f64) -> Self {
        let absolute = value.abs();
        let degrees = absolute.floor();
        let decimal_minutes = (absolute - degrees) * 60.0;
        let minutes = decimal_minutes.floor();

        Self {
            negative: value < 0.0,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: (decimal_minutes - minutes) * 60.0,
        }
    }
}

/// Format latitude as e.g. `20°17'45''S`.
pub fn latitude_dms(value: f64) -> String {
    let dms = Dms::from_degrees(value);
    let hemisphere = if value > 0.0 { 'N' } else { 'S' };
    format!(
        "{:02}°{:02}'{:02}''{hemisphere}",
        dms.degrees, dms.minutes, dms.seconds as u32
    )
}

/// Format longitude as e.g. `040°20'53''W`.
pub fn longitude_dms(value: f64) -> String {
    let dms = Dms::from_degrees(value);
    let hemisphere = if value > 0.0 { 'E' } else { 'W' };
    format!(
        "{:03}°{:02}'{:02}''{hemisphere}",
        dms.degrees, dms.minutes, dms.seconds as u32
    )
}
