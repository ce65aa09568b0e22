use crate::{
    converter::Converter,
    position::Coordinates,
    units::{PixelOffset, PixelSize},
};

/// Something placed at geographical coordinates, like a pin or a circle, which needs to know
/// where it lands on the screen.
///
/// Near the antimeridian, the viewport can show the same place twice, once on each copy of the
/// world. With `wrap` enabled, every copy gets its own position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geolocated {
    pub coordinates: Coordinates,

    /// Added to every resulting position, e.g. to draw a label next to a point.
    pub offset: PixelOffset,

    /// Footprint centered at the coordinates. It is visible as soon as any part of it is, so
    /// things do not pop in and out at the edges of the viewport.
    pub extension: Option<PixelSize>,

    pub wrap: bool,
}

impl Geolocated {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            offset: PixelOffset::default(),
            extension: None,
            wrap: true,
        }
    }

    pub fn with_extension(self, extension: PixelSize) -> Self {
        Self {
            extension: Some(extension),
            ..self
        }
    }

    pub fn with_offset(self, offset: PixelOffset) -> Self {
        Self { offset, ..self }
    }

    pub fn with_wrap(self, wrap: bool) -> Self {
        Self { wrap, ..self }
    }

    /// Screen positions of all visible copies. Empty when nothing is visible.
    pub fn positions(&self, converter: &Converter) -> Vec<PixelOffset> {
        let copies: &[f64] = if self.wrap {
            &[0.0, -360.0, 360.0]
        } else {
            &[0.0]
        };

        copies
            .iter()
            .map(|shift| self.coordinates.shifted_longitude(*shift))
            .filter(|coordinates| converter.inside_view(*coordinates, self.extension))
            .map(|coordinates| converter.convert_to_offset(coordinates) + self.offset)
            .collect()
    }
}
