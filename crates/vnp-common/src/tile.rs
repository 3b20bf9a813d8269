//! VNP46 tile grid addressing.
//!
//! VNP46 products are distributed on a fixed global grid of 10°×10° cells
//! in geographic coordinates: 36 columns (h0 starts at 180°W) by 18 rows
//! (v0 starts at 90°N). Tile addresses appear in granule filenames as
//! `hHHvVV` (e.g. `h10v04`) and in granule metadata as the
//! `HorizontalTileNumber`/`VerticalTileNumber` attributes.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height of one tile in degrees.
pub const TILE_SPAN_DEG: f64 = 10.0;

/// Number of tile columns in the global grid (h in 0..=35).
pub const GRID_COLUMNS: u32 = 36;

/// Number of tile rows in the global grid (v in 0..=17).
pub const GRID_ROWS: u32 = 18;

/// A tile address (h/v) in the VNP46 global grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Horizontal tile index, counted eastward from 180°W
    pub h: u32,
    /// Vertical tile index, counted southward from 90°N
    pub v: u32,
}

impl TileCoord {
    pub fn new(h: u32, v: u32) -> Self {
        Self { h, v }
    }

    /// Geographic extent of this tile in WGS84 degrees.
    ///
    /// The grid is linear in latitude/longitude: the west edge advances
    /// 10° per h step from -180 and the north edge recedes 10° per v step
    /// from +90, so `east = west + 10` and `south = north - 10` always
    /// hold. Indices outside the grid still produce arithmetically
    /// consistent (out-of-range) coordinates; use [`TileCoord::in_grid`]
    /// to check the address first.
    pub fn bounding_box(&self) -> BoundingBox {
        let west = TILE_SPAN_DEG * self.h as f64 - 180.0;
        let north = 90.0 - TILE_SPAN_DEG * self.v as f64;
        BoundingBox::new(west, north - TILE_SPAN_DEG, west + TILE_SPAN_DEG, north)
    }

    /// Whether this address lies inside the 36×18 global grid.
    pub fn in_grid(&self) -> bool {
        self.h < GRID_COLUMNS && self.v < GRID_ROWS
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{:02}v{:02}", self.h, self.v)
    }
}

impl FromStr for TileCoord {
    type Err = TileIdParseError;

    /// Parse a tile id of the form `h10v04`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('h')
            .ok_or_else(|| TileIdParseError::InvalidFormat(s.to_string()))?;
        let (h, v) = rest
            .split_once('v')
            .ok_or_else(|| TileIdParseError::InvalidFormat(s.to_string()))?;

        Ok(Self {
            h: h.parse()
                .map_err(|_| TileIdParseError::InvalidIndex(s.to_string()))?,
            v: v.parse()
                .map_err(|_| TileIdParseError::InvalidIndex(s.to_string()))?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TileIdParseError {
    #[error("Invalid tile id: {0}. Expected 'hHHvVV', e.g. 'h10v04'")]
    InvalidFormat(String),

    #[error("Invalid tile index in tile id: {0}")]
    InvalidIndex(String),
}
