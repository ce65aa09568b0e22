#![doc = include_str!("../README.md")]
#![deny(clippy::unwrap_used, rustdoc::broken_intra_doc_links)]

mod config;
mod converter;
mod geolocated;
pub mod input;
mod map;
pub mod mercator;
mod position;
pub mod sources;
mod tiles;
mod units;
mod viewport;
mod zoom;

pub use config::MapOptions;
pub use converter::Converter;
pub use geolocated::Geolocated;
pub use map::{Gesture, Map, MapContext, RawPointerEvent};
pub use position::{BoundingBox, Coordinates, Dms, lat_lon, latitude_dms, longitude_dms};
pub use tiles::{TileEnumerator, TileId, VisibleTile};
pub use units::{PixelOffset, PixelSize, TileRegion};
pub use viewport::{ViewCommand, Viewport};
pub use zoom::{InvalidZoom, MAX_ZOOM, ZoomDirection, ZoomSpecs};
