use std::time::Duration;

use egui::{Pos2, Vec2};

use crate::{
    config::MapOptions,
    converter::Converter,
    input::{
        ButtonState, DeltaPosition, ExclusivityArbiter, PointerClassifier, PointerFlows,
        PointerPosition, PointerSample, Subscription,
    },
    position::{BoundingBox, Coordinates},
    tiles::TileEnumerator,
    units::PixelSize,
    viewport::{ViewCommand, Viewport},
    zoom::{InvalidZoom, ZoomDirection, ZoomSpecs},
};

/// Pointer input as the host sees it. Positions are in pixels, relative to the top left corner of
/// the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPointerEvent {
    Moved(Pos2),
    Buttons { pos: Pos2, state: ButtonState },

    /// Positive vertical delta zooms in.
    Scroll { pos: Pos2, delta: Vec2 },

    /// Pointer left the map.
    Left,
}

type Callback<T> = Box<dyn FnMut(T)>;

/// Gesture stream the map competes for with the overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Drag,
    Press,
    LongPress,
}

/// Everything needed to lay out things on top of the map in the current frame.
#[derive(Clone)]
pub struct MapContext {
    pub converter: Converter,
    pub zoom: ZoomSpecs,
    pub cursor: Option<PointerPosition>,
    pub bounding_box: BoundingBox,
    pub flows: PointerFlows,
    pub wrap_longitude: bool,

    /// See [`Viewport::revision`].
    pub revision: u64,
}

/// The map's own interest in the gesture streams. It holds onto these for its whole life, and
/// acts on the events only while nobody else listens to the same stream.
struct Subscriptions {
    drags: Subscription<DeltaPosition>,
    short_presses: Subscription<PointerPosition>,
    long_presses: Subscription<PointerPosition>,
}

#[derive(Default)]
struct Arbiters {
    drags: ExclusivityArbiter,
    short_presses: ExclusivityArbiter,
    long_presses: ExclusivityArbiter,
}

#[derive(Default)]
struct Callbacks {
    on_press: Option<Callback<PointerPosition>>,
    on_long_press: Option<Callback<PointerPosition>>,
    on_map_dragged: Option<Callback<Coordinates>>,
    on_zoom_change: Option<Callback<u8>>,
    on_cursor_move: Option<Callback<Option<PointerPosition>>>,
    on_exclusivity_change: Option<Box<dyn FnMut(Gesture, bool)>>,
}

/// Interactive map controller. Feed it with [`RawPointerEvent`]s and the time, and it pans, zooms
/// and reports gestures.
///
/// ```
/// use std::time::Duration;
/// use karta::{Map, MapOptions, PixelSize, RawPointerEvent, lat_lon};
///
/// let mut map = Map::new(
///     MapOptions::default().with_initial_coordinates(lat_lon(51.09916, 17.03664)),
/// )
/// .unwrap()
/// .with_on_zoom_change(|zoom| println!("zoom: {zoom}"));
///
/// map.resize(PixelSize::new(800., 600.));
/// map.handle(
///     RawPointerEvent::Scroll {
///         pos: egui::pos2(400., 300.),
///         delta: egui::vec2(0., 1.),
///     },
///     Duration::ZERO,
/// );
///
/// assert_eq!(15, map.zoom().value());
/// ```
pub struct Map {
    viewport: Viewport,
    options: MapOptions,
    flows: PointerFlows,
    classifier: PointerClassifier,
    cursor: Option<PointerPosition>,
    subscriptions: Option<Subscriptions>,
    arbiters: Arbiters,
    callbacks: Callbacks,
}

impl Map {
    /// # Errors
    ///
    /// When the zoom bounds in `options` are inconsistent.
    pub fn new(options: MapOptions) -> Result<Self, InvalidZoom> {
        let viewport = Viewport::new(
            options.initial_coordinates,
            options.zoom_specs()?,
            options.tile_size,
        );

        let flows = PointerFlows::new();
        let subscriptions = options.interactive.then(|| Subscriptions {
            drags: flows.drags.subscribe(),
            short_presses: flows.short_presses.subscribe(),
            long_presses: flows.long_presses.subscribe(),
        });

        Ok(Self {
            viewport,
            classifier: PointerClassifier::new(flows.clone(), options.long_press_duration),
            flows,
            options,
            cursor: None,
            subscriptions,
            arbiters: Arbiters::default(),
            callbacks: Callbacks::default(),
        })
    }

    /// Called with the position of a short press on the map itself.
    pub fn with_on_press(mut self, callback: impl FnMut(PointerPosition) + 'static) -> Self {
        self.callbacks.on_press = Some(Box::new(callback));
        self
    }

    /// Called with the position of a long press on the map itself.
    pub fn with_on_long_press(mut self, callback: impl FnMut(PointerPosition) + 'static) -> Self {
        self.callbacks.on_long_press = Some(Box::new(callback));
        self
    }

    /// Called with the new center after each drag step.
    pub fn with_on_map_dragged(mut self, callback: impl FnMut(Coordinates) + 'static) -> Self {
        self.callbacks.on_map_dragged = Some(Box::new(callback));
        self
    }

    pub fn with_on_zoom_change(mut self, callback: impl FnMut(u8) + 'static) -> Self {
        self.callbacks.on_zoom_change = Some(Box::new(callback));
        self
    }

    /// Called whenever the cursor moves, with `None` when it leaves the map.
    pub fn with_on_cursor_move(
        mut self,
        callback: impl FnMut(Option<PointerPosition>) + 'static,
    ) -> Self {
        self.callbacks.on_cursor_move = Some(Box::new(callback));
        self
    }

    /// Called when the map starts or stops acting on a [`Gesture`], because an overlay started or
    /// stopped listening to it. Fires for each gesture on the first event, as the map takes them.
    pub fn with_on_exclusivity_change(
        mut self,
        callback: impl FnMut(Gesture, bool) + 'static,
    ) -> Self {
        self.callbacks.on_exclusivity_change = Some(Box::new(callback));
        self
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> Option<PointerPosition> {
        self.cursor
    }

    pub fn zoom(&self) -> ZoomSpecs {
        self.viewport.zoom()
    }

    pub fn center(&self) -> Coordinates {
        self.viewport.center_coordinates()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.viewport.bounding_box()
    }

    pub fn converter(&self) -> Option<Converter> {
        self.viewport.converter()
    }

    pub fn visible_tiles(&self) -> TileEnumerator {
        self.viewport.visible_tiles()
    }

    /// Streams of classified gestures, for overlays to subscribe to.
    pub fn pointer_flows(&self) -> &PointerFlows {
        &self.flows
    }

    /// When [`Self::tick`] should be called next to fire a pending long press.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.classifier.next_deadline()
    }

    /// `None` until the map knows its size.
    pub fn context(&self) -> Option<MapContext> {
        Some(MapContext {
            converter: self.viewport.converter()?,
            zoom: self.viewport.zoom(),
            cursor: self.cursor,
            bounding_box: self.viewport.bounding_box()?,
            flows: self.flows.clone(),
            wrap_longitude: self.options.wrap_longitude,
            revision: self.viewport.revision(),
        })
    }

    pub fn resize(&mut self, size: PixelSize) -> bool {
        self.viewport.resize(size)
    }

    pub fn apply(&mut self, command: ViewCommand) {
        let zoom = self.viewport.zoom();
        self.viewport.apply(command);
        self.zoom_changed(zoom);
    }

    pub fn zoom_in(&mut self) {
        let zoom = self.viewport.zoom();
        self.viewport.zoom_in();
        self.zoom_changed(zoom);
    }

    pub fn zoom_out(&mut self) {
        let zoom = self.viewport.zoom();
        self.viewport.zoom_out();
        self.zoom_changed(zoom);
    }

    /// Process a single pointer event which happened at `now`. Samples arriving before the map
    /// knows its size are dropped.
    pub fn handle(&mut self, event: RawPointerEvent, now: Duration) {
        if self.viewport.size().is_none() {
            log::trace!("Viewport has no size yet, dropping {event:?}.");
            self.tick(now);
            return;
        }

        match event {
            RawPointerEvent::Moved(pos) => {
                let position = self.viewport.pointer_position(pos);
                self.move_cursor(position);
                self.classify(PointerSample::Moved(position), now);
            }
            RawPointerEvent::Buttons { pos, state } => {
                let position = self.viewport.pointer_position(pos);
                self.move_cursor(position);
                self.classify(PointerSample::Buttons { state, position }, now);
            }
            RawPointerEvent::Scroll { pos, delta } => self.scroll(pos, delta, now),
            RawPointerEvent::Left => {
                self.move_cursor(None);
                self.classify(PointerSample::Moved(None), now);
            }
        }

        self.consume();
    }

    /// Let the time pass without any input, so pending long presses can fire.
    pub fn tick(&mut self, now: Duration) {
        if self.options.interactive {
            self.classifier.tick(now);
        }

        self.consume();
    }

    fn classify(&mut self, sample: PointerSample, now: Duration) {
        if self.options.interactive {
            self.classifier.handle(sample, now);
        }
    }

    fn scroll(&mut self, pos: Pos2, delta: Vec2, now: Duration) {
        // Time passes for the classifier regardless.
        self.tick(now);

        if !self.options.interactive || delta.y == 0. {
            return;
        }

        let direction = if delta.y > 0. {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        };

        let zoom = self.viewport.zoom();
        self.viewport.zoom_at(pos, direction);
        self.zoom_changed(zoom);

        let position = self.viewport.pointer_position(pos);
        self.move_cursor(position);
    }

    fn move_cursor(&mut self, position: Option<PointerPosition>) {
        if position == self.cursor {
            return;
        }

        self.cursor = position;
        if let Some(callback) = &mut self.callbacks.on_cursor_move {
            callback(position);
        }
    }

    fn zoom_changed(&mut self, before: ZoomSpecs) {
        let zoom = self.viewport.zoom();
        if zoom == before {
            return;
        }

        if let Some(callback) = &mut self.callbacks.on_zoom_change {
            callback(zoom.value());
        }
    }

    /// Act on own subscriptions, as far as the arbitration allows.
    fn consume(&mut self) {
        let Some(subscriptions) = &mut self.subscriptions else {
            return;
        };

        let drags = subscriptions.drags.drain();
        let short_presses = subscriptions.short_presses.drain();
        let long_presses = subscriptions.long_presses.drain();

        let changes = [
            (
                Gesture::Drag,
                self.arbiters
                    .drags
                    .observe(self.flows.drags.subscriber_count()),
            ),
            (
                Gesture::Press,
                self.arbiters
                    .short_presses
                    .observe(self.flows.short_presses.subscriber_count()),
            ),
            (
                Gesture::LongPress,
                self.arbiters
                    .long_presses
                    .observe(self.flows.long_presses.subscriber_count()),
            ),
        ];

        for (gesture, change) in changes {
            let Some(exclusive) = change else {
                continue;
            };

            log::debug!(
                "Map {} {gesture:?}.",
                if exclusive { "takes" } else { "yields" }
            );
            if let Some(callback) = &mut self.callbacks.on_exclusivity_change {
                callback(gesture, exclusive);
            }
        }

        if self.arbiters.drags.exclusive() {
            for delta in drags {
                self.viewport.pan(delta.diff);

                let center = self.viewport.center_coordinates();
                if let Some(callback) = &mut self.callbacks.on_map_dragged {
                    callback(center);
                }
            }
        } else if !drags.is_empty() {
            log::trace!("Someone else handles drags, ignoring {}.", drags.len());
        }

        if self.arbiters.short_presses.exclusive()
            && let Some(callback) = &mut self.callbacks.on_press
        {
            for position in short_presses {
                callback(position);
            }
        }

        if self.arbiters.long_presses.exclusive()
            && let Some(callback) = &mut self.callbacks.on_long_press
        {
            for position in long_presses {
                callback(position);
            }
        }
    }
}
