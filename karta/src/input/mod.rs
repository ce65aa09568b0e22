//! Pointer input: raw samples, the gestures they get classified into and the streams the gestures
//! are published on.

mod arbiter;
mod broadcast;
mod classifier;
mod egui;

pub use arbiter::ExclusivityArbiter;
pub use broadcast::{Broadcast, Subscription};
pub use classifier::{DEFAULT_LONG_PRESS, PointerClassifier, PointerSample};
pub use self::egui::EguiInput;

use ::egui::{PointerButton, Pos2, Vec2};

use crate::position::Coordinates;

/// Where the pointer is, both on the screen and on the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub coordinates: Coordinates,

    /// Pixels, relative to the top left corner of the viewport.
    pub offset: Pos2,
}

/// Which buttons are held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl ButtonState {
    pub const RELEASED: Self = Self {
        primary: false,
        secondary: false,
        middle: false,
    };

    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
        middle: false,
    };

    /// Same state, with `button` set as `pressed`. Extra buttons are ignored.
    pub fn with(self, button: PointerButton, pressed: bool) -> Self {
        match button {
            PointerButton::Primary => Self {
                primary: pressed,
                ..self
            },
            PointerButton::Secondary => Self {
                secondary: pressed,
                ..self
            },
            PointerButton::Middle => Self {
                middle: pressed,
                ..self
            },
            PointerButton::Extra1 | PointerButton::Extra2 => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub button: PointerButton,
    pub action: ButtonAction,

    /// Last known position, if any. Buttons can be released after the pointer left.
    pub position: Option<PointerPosition>,
}

/// Single step of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaPosition {
    pub previous: PointerPosition,
    pub current: PointerPosition,

    /// `current - previous`, in pixels.
    pub diff: Vec2,
}

impl DeltaPosition {
    pub fn new(previous: PointerPosition, current: PointerPosition) -> Self {
        Self {
            previous,
            current,
            diff: current.offset - previous.offset,
        }
    }
}

/// Classified pointer gestures, one stream per kind. Cloning gives another handle to the same
/// streams.
#[derive(Clone)]
pub struct PointerFlows {
    /// Hovering, with `None` when the pointer leaves.
    pub moves: Broadcast<Option<PointerPosition>>,
    pub clicks: Broadcast<ButtonEvent>,
    pub short_presses: Broadcast<PointerPosition>,
    pub long_presses: Broadcast<PointerPosition>,
    pub drags: Broadcast<DeltaPosition>,
}

impl PointerFlows {
    pub fn new() -> Self {
        Self {
            moves: Broadcast::new("move"),
            clicks: Broadcast::new("click"),
            short_presses: Broadcast::new("short press"),
            long_presses: Broadcast::new("long press"),
            drags: Broadcast::new("drag"),
        }
    }
}

impl Default for PointerFlows {
    fn default() -> Self {
        Self::new()
    }
}
