use crate::mercator::FractionalTileOffset;

/// Highest zoom for which the number of tiles along an axis still fits the tile index types.
pub const MAX_ZOOM: u8 = 30;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid zoom level bounds: {min}..={max}")]
pub struct InvalidZoom {
    pub min: u8,
    pub max: u8,
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Integer zoom level together with its bounds. Increments and decrements saturate at the bounds
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct ZoomSpecs {
    value: u8,
    min: u8,
    max: u8,
}

impl ZoomSpecs {
    /// Initial `value` is clamped into `min..=max`.
    pub fn new(value: u8, min: u8, max: u8) -> Result<Self, InvalidZoom> {
        if min > max || max > MAX_ZOOM {
            return Err(InvalidZoom { min, max });
        }

        Ok(Self {
            value: value.clamp(min, max),
            min,
            max,
        })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn incrementable(&self) -> bool {
        self.value < self.max
    }

    pub fn decrementable(&self) -> bool {
        self.value > self.min
    }

    pub fn increment(self) -> Self {
        if self.incrementable() {
            Self {
                value: self.value + 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn decrement(self) -> Self {
        if self.decrementable() {
            Self {
                value: self.value - 1,
                ..self
            }
        } else {
            self
        }
    }

    pub fn step(self, direction: ZoomDirection) -> Self {
        match direction {
            ZoomDirection::In => self.increment(),
            ZoomDirection::Out => self.decrement(),
        }
    }

    /// Same bounds, different value. Out of range values are clamped.
    pub fn with_value(self, value: u8) -> Self {
        Self {
            value: value.clamp(self.min, self.max),
            ..self
        }
    }

    /// Number of tiles along each axis at the current zoom.
    pub fn size(&self) -> f64 {
        2f64.powi(self.value as i32)
    }

    /// Wrap the value into `[0, 2^zoom)`.
    pub fn curtail(&self, value: f64) -> f64 {
        let size = self.size();
        let wrapped = value.rem_euclid(size);

        // `rem_euclid` rounds tiny negative values up to the modulus itself.
        if wrapped >= size { 0.0 } else { wrapped }
    }

    /// Wrap the horizontal axis only. Latitude does not wrap, as Mercator is undefined at the
    /// poles.
    pub fn curtail_offset(&self, offset: FractionalTileOffset) -> FractionalTileOffset {
        FractionalTileOffset::new(self.curtail(offset.x), offset.y)
    }
}
