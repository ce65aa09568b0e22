//! Things to put on top of the [`karta::Map`]: pins, circles and polylines. They only compute
//! where to draw and react to the pointer, drawing is up to the host.
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod circle;
mod pin;
mod polyline;
mod selection;

pub use circle::{Circle, CirclePlacement, DistanceUnit};
pub use pin::{MovablePin, Pin, PinEvent};
pub use polyline::{EditablePolyline, Polyline};
pub use selection::{ItemId, SelectionState};
