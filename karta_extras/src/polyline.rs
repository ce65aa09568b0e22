use karta::{Converter, Coordinates, MapContext, PixelOffset, PixelSize, TileRegion};

use crate::{
    pin::{MovablePin, Pin, PinEvent},
    selection::{ItemId, SelectionState},
};

/// Line through a series of geographical coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Coordinates>,

    /// Connect the last point back to the first one. Has no effect with two points or less.
    pub closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Coordinates>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    pub fn closed(self) -> Self {
        Self {
            closed: true,
            ..self
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed && self.points.len() > 2
    }

    /// Vertices on the screen, in drawing order. `None` when the line is nowhere near the
    /// viewport, or there is nothing to draw.
    pub fn offsets(&self, converter: &Converter) -> Option<Vec<PixelOffset>> {
        let mut offsets: Vec<_> = self
            .points
            .iter()
            .map(|point| converter.convert_to_offset(*point))
            .collect();

        let bounds = TileRegion::bounding(offsets.iter().copied())?;

        // Straight horizontal or vertical lines have no area, but are still visible.
        let bounds = TileRegion::new(
            bounds.top_left - PixelOffset::new(1, 1),
            bounds.bottom_right + PixelOffset::new(1, 1),
        );

        if !converter.tile_region().intersects(&bounds) {
            return None;
        }

        if self.is_closed() {
            offsets.push(offsets[0]);
        }

        Some(offsets)
    }
}

/// Polyline with a draggable pin at each vertex. Only one vertex can be grabbed at a time.
pub struct EditablePolyline {
    vertices: Vec<MovablePin>,
    selection: SelectionState,
    closed: bool,
}

impl EditablePolyline {
    pub fn new(polyline: Polyline, vertex_size: PixelSize) -> Self {
        Self {
            vertices: polyline
                .points
                .iter()
                .enumerate()
                .map(|(id, point)| MovablePin::new(Pin::new(id, *point, vertex_size)))
                .collect(),
            selection: SelectionState::new(),
            closed: polyline.closed,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn vertices(&self) -> &[MovablePin] {
        &self.vertices
    }

    /// Events of all vertices, tagged with their index.
    pub fn update(&mut self, context: &MapContext) -> Vec<(ItemId, PinEvent)> {
        let mut events = Vec::new();

        for vertex in &mut self.vertices {
            let id = vertex.pin().id();
            for event in vertex.update(context, &mut self.selection) {
                events.push((id, event));
            }
        }

        events
    }

    /// Current shape.
    pub fn polyline(&self) -> Polyline {
        Polyline {
            points: self.vertices.iter().map(MovablePin::coordinates).collect(),
            closed: self.closed,
        }
    }
}
