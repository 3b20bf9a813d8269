//! Common types shared across the VNP46 conversion workspace.

pub mod bbox;
pub mod tile;

pub use bbox::BoundingBox;
pub use tile::{TileCoord, TileIdParseError, GRID_COLUMNS, GRID_ROWS, TILE_SPAN_DEG};
