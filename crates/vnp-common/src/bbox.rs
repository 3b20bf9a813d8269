//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 degrees.
///
/// `min_x`/`max_x` are the west/east edges (longitude), `min_y`/`max_y`
/// the south/north edges (latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether a point lies inside the box (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// North-up GDAL affine transform for a raster covering this box:
    /// `[min_x, x_res, 0, max_y, 0, -y_res]`.
    ///
    /// Equivalent to georeferencing with upper-left/lower-right corners
    /// (`-a_ullr west north east south`).
    pub fn geo_transform(&self, raster_width: usize, raster_height: usize) -> [f64; 6] {
        let x_res = self.width() / raster_width as f64;
        let y_res = self.height() / raster_height as f64;
        [self.min_x, x_res, 0.0, self.max_y, 0.0, -y_res]
    }
}
