use egui::Vec2;
use karta::{
    Converter, Coordinates, Geolocated, MapContext, PixelOffset, PixelSize, TileRegion,
    input::{ButtonAction, ButtonEvent, DeltaPosition, PointerPosition, Subscription},
};

use crate::selection::{ItemId, SelectionState};

/// What happened to a pin since the last update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinEvent {
    Hovered,
    Unhovered,
    Click(ButtonEvent),
    Press(PointerPosition),
    LongPress(PointerPosition),
    Grabbed,
    Moved(Coordinates),
    Released,
}

/// Gesture streams a pin listens to while hovered. Holding them makes the map yield presses to
/// the pin.
struct HoverSubscriptions {
    clicks: Subscription<ButtonEvent>,
    short_presses: Subscription<PointerPosition>,
    long_presses: Subscription<PointerPosition>,
}

/// Marker of a fixed size, placed at geographical coordinates.
///
/// Call [`Pin::update`] after each [`karta::Map::handle`] to learn about hovers and presses.
pub struct Pin {
    id: ItemId,
    coordinates: Coordinates,
    size: PixelSize,

    /// Which point of the pin sits at the coordinates, as a fraction of its size. `(0.5, 1.0)`
    /// is the middle of the bottom edge, the usual for needle-like markers.
    anchoring: Vec2,

    moves: Option<Subscription<Option<PointerPosition>>>,
    hover: Option<HoverSubscriptions>,
}

impl Pin {
    pub fn new(id: ItemId, coordinates: Coordinates, size: PixelSize) -> Self {
        Self {
            id,
            coordinates,
            size,
            anchoring: Vec2::splat(0.5),
            moves: None,
            hover: None,
        }
    }

    pub fn with_anchoring(self, anchoring: Vec2) -> Self {
        Self { anchoring, ..self }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = coordinates;
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_some()
    }

    /// Screen rectangles to draw the pin at, one per visible copy of the world.
    pub fn placements(&self, converter: &Converter, wrap: bool) -> Vec<TileRegion> {
        let anchor = PixelOffset::new(
            (self.size.width * self.anchoring.x) as i32,
            (self.size.height * self.anchoring.y) as i32,
        );

        Geolocated::new(self.coordinates)
            .with_extension(self.size)
            .with_wrap(wrap)
            .positions(converter)
            .into_iter()
            .map(|position| TileRegion::define(position - anchor, self.size))
            .collect()
    }

    fn contains(&self, context: &MapContext, position: Option<PointerPosition>) -> bool {
        let Some(position) = position else {
            return false;
        };

        let pointer = PixelOffset::from(position.offset);
        self.placements(&context.converter, context.wrap_longitude)
            .iter()
            .any(|region| region.contains(pointer))
    }

    pub fn update(&mut self, context: &MapContext, selection: &mut SelectionState) -> Vec<PinEvent> {
        let mut events = Vec::new();

        // Whatever happened while hovered, before the hover could change.
        if let Some(hover) = &mut self.hover {
            events.extend(hover.clicks.drain().into_iter().map(PinEvent::Click));

            for position in hover.short_presses.drain() {
                selection.toggle_selection(self.id);
                events.push(PinEvent::Press(position));
            }

            events.extend(
                hover
                    .long_presses
                    .drain()
                    .into_iter()
                    .map(PinEvent::LongPress),
            );
        }

        let moves = match &mut self.moves {
            Some(moves) => moves.drain(),
            None => {
                // Moves published before subscribing are gone, the cursor tells where they ended.
                self.moves = Some(context.flows.moves.subscribe());
                vec![context.cursor]
            }
        };

        if let Some(last) = moves.last() {
            let hovered = self.contains(context, *last);

            if hovered && self.hover.is_none() {
                log::trace!("Pin {} hovered.", self.id);
                selection.hover(self.id);
                self.hover = Some(HoverSubscriptions {
                    clicks: context.flows.clicks.subscribe(),
                    short_presses: context.flows.short_presses.subscribe(),
                    long_presses: context.flows.long_presses.subscribe(),
                });
                events.push(PinEvent::Hovered);
            } else if !hovered && self.hover.is_some() {
                log::trace!("Pin {} unhovered.", self.id);
                selection.unhover(self.id);
                self.hover = None;
                events.push(PinEvent::Unhovered);
            }
        }

        events
    }
}

/// [`Pin`] which can be dragged around. It grabs on press while hovered, and follows the pointer
/// until released, keeping the distance to the pointer it had when grabbed.
pub struct MovablePin {
    pin: Pin,
    grab: Option<Grab>,
}

struct Grab {
    /// `pin - pointer` at the moment of grabbing.
    offset: Coordinates,
    drags: Subscription<DeltaPosition>,
    clicks: Subscription<ButtonEvent>,
}

impl MovablePin {
    pub fn new(pin: Pin) -> Self {
        Self { pin, grab: None }
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn coordinates(&self) -> Coordinates {
        self.pin.coordinates()
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_some()
    }

    pub fn update(&mut self, context: &MapContext, selection: &mut SelectionState) -> Vec<PinEvent> {
        let mut events = Vec::new();

        if let Some(grab) = &mut self.grab {
            for delta in grab.drags.drain() {
                let coordinates = delta.current.coordinates + grab.offset;
                self.pin.set_coordinates(coordinates);
                events.push(PinEvent::Moved(coordinates));
            }

            let released = grab
                .clicks
                .drain()
                .iter()
                .any(|click| click.action == ButtonAction::Release);

            if released {
                self.release(selection, &mut events);
            }
        }

        for event in self.pin.update(context, selection) {
            match event {
                PinEvent::Click(ButtonEvent {
                    action: ButtonAction::Press,
                    position: Some(position),
                    ..
                }) => self.grab(context, selection, position, &mut events),
                PinEvent::Click(ButtonEvent {
                    action: ButtonAction::Release,
                    ..
                }) => self.release(selection, &mut events),
                _ => (),
            }

            events.push(event);
        }

        events
    }

    fn grab(
        &mut self,
        context: &MapContext,
        selection: &mut SelectionState,
        pointer: PointerPosition,
        events: &mut Vec<PinEvent>,
    ) {
        if self.grab.is_some() || !selection.grab(self.pin.id()) {
            return;
        }

        log::debug!("Pin {} grabbed.", self.pin.id());
        self.grab = Some(Grab {
            offset: self.pin.coordinates() - pointer.coordinates,
            drags: context.flows.drags.subscribe(),
            clicks: context.flows.clicks.subscribe(),
        });
        events.push(PinEvent::Grabbed);
    }

    fn release(&mut self, selection: &mut SelectionState, events: &mut Vec<PinEvent>) {
        if self.grab.take().is_some() {
            log::debug!("Pin {} released.", self.pin.id());
            selection.release(self.pin.id());
            events.push(PinEvent::Released);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use karta::{MAX_ZOOM, Viewport, ZoomSpecs, lat_lon};

    fn converter(center: Coordinates, zoom: u8) -> Converter {
        let mut viewport = Viewport::new(center, ZoomSpecs::new(zoom, 0, MAX_ZOOM).unwrap(), 256.);
        viewport.resize(PixelSize::new(800., 600.));
        viewport.converter().unwrap()
    }

    #[test]
    fn placed_around_its_anchor() {
        let center = lat_lon(51.1, 17.0);
        let pin = Pin::new(0, center, PixelSize::new(20., 30.));

        assert_eq!(
            vec![TileRegion::new(
                PixelOffset::new(390, 285),
                PixelOffset::new(410, 315)
            )],
            pin.placements(&converter(center, 10), true)
        );

        let needle = pin.with_anchoring(Vec2::new(0.5, 1.0));
        assert_eq!(
            vec![TileRegion::new(
                PixelOffset::new(390, 270),
                PixelOffset::new(410, 300)
            )],
            needle.placements(&converter(center, 10), true)
        );
    }

    #[test]
    fn placed_once_at_deep_zoom() {
        let center = lat_lon(51.1, 17.0);
        let pin = Pin::new(0, center, PixelSize::new(32., 32.));

        for zoom in 23..=MAX_ZOOM {
            assert_eq!(
                1,
                pin.placements(&converter(center, zoom), true).len(),
                "zoom {zoom}"
            );
        }
    }
}
