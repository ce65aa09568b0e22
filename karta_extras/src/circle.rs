use karta::{Coordinates, Geolocated, MapContext, PixelOffset, PixelSize};

/// How the radius of a [`Circle`] is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Distance on the ground, so the circle grows with zoom.
    Meters,

    /// Fixed size on the screen.
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub coordinates: Coordinates,
    pub radius: f64,
    pub unit: DistanceUnit,
}

/// Where to draw a circle on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePlacement {
    pub center: PixelOffset,
    pub radius: f32,
}

impl Circle {
    pub fn new(coordinates: Coordinates, radius: f64, unit: DistanceUnit) -> Self {
        Self {
            coordinates,
            radius,
            unit,
        }
    }

    /// Radius in pixels at the current zoom.
    pub fn radius_in_pixels(&self, context: &MapContext) -> f64 {
        match self.unit {
            DistanceUnit::Meters => context.converter.meters_to_pixels(self.radius),
            DistanceUnit::Pixels => self.radius,
        }
    }

    /// One placement per visible copy of the world.
    pub fn placements(&self, context: &MapContext) -> Vec<CirclePlacement> {
        let radius = self.radius_in_pixels(context) as f32;
        let diameter = 2. * radius;

        Geolocated::new(self.coordinates)
            .with_extension(PixelSize::new(diameter, diameter))
            .with_wrap(context.wrap_longitude)
            .positions(&context.converter)
            .into_iter()
            .map(|center| CirclePlacement { center, radius })
            .collect()
    }
}
