//! Where the tiles come from. Fetching itself is up to the host, this only tells what to ask for.
//! Make sure you follow terms of usage of the particular source.

mod openstreetmap;

pub use openstreetmap::OpenStreetMap;

use crate::tiles::TileId;

const PLACEHOLDERS: [&str; 3] = ["{zoom}", "{x}", "{y}"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub text: &'static str,
    pub url: &'static str,
}

/// HTTP header to be sent with each tile request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Remote tile server definition.
pub trait TileSource {
    fn tile_url(&self, tile_id: TileId) -> String;

    /// Headers to send along, in order.
    fn headers(&self) -> Vec<Header> {
        Vec::new()
    }

    fn attribution(&self) -> Option<Attribution> {
        None
    }

    /// Size of each tile, should be a multiple of 256.
    fn tile_size(&self) -> u32 {
        256
    }

    fn max_zoom(&self) -> u8 {
        19
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("tile url template '{template}' lacks the {placeholder} placeholder")]
pub struct InvalidTemplate {
    pub template: String,
    pub placeholder: &'static str,
}

/// Tile server described by a URL template, such as
/// `https://tile.openstreetmap.org/{zoom}/{x}/{y}.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TileServer {
    template: String,
    headers: Vec<Header>,
}

impl TileServer {
    /// # Errors
    ///
    /// When any of the `{zoom}`, `{x}` or `{y}` placeholders is missing.
    pub fn new(template: impl Into<String>) -> Result<Self, InvalidTemplate> {
        let template = template.into();

        if let Some(placeholder) = PLACEHOLDERS
            .into_iter()
            .find(|placeholder| !template.contains(placeholder))
        {
            return Err(InvalidTemplate {
                template,
                placeholder,
            });
        }

        Ok(Self {
            template,
            headers: Vec::new(),
        })
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl TileSource for TileServer {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.template
            .replace("{zoom}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn headers(&self) -> Vec<Header> {
        self.headers.clone()
    }
}
