use super::{Attribution, Header, TileSource};
use crate::tiles::TileId;

/// <https://www.openstreetmap.org/about>
///
/// The tile servers refuse requests which do not look like they come from a browser, hence the
/// headers.
pub struct OpenStreetMap;

impl TileSource for OpenStreetMap {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tile.openstreetmap.org/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn headers(&self) -> Vec<Header> {
        vec![
            Header::new(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
            Header::new(
                "User-Agent",
                "Mozilla/5.0 (X11; Linux x86_64; rv:136.0) Gecko/20100101 Firefox/136.0",
            ),
            Header::new("Host", "tile.openstreetmap.org"),
        ]
    }

    fn attribution(&self) -> Option<Attribution> {
        Some(Attribution {
            text: "OpenStreetMap contributors",
            url: "https://www.openstreetmap.org/copyright",
        })
    }
}
