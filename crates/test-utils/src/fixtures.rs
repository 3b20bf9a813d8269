//! Common test fixtures for vnp46-tools tests.
//!
//! This module provides pre-defined values that represent common
//! scenarios in VNP46 granule processing.

/// Known granule filenames.
pub mod granules {
    /// VNP46A3 (monthly composite) reference granule over the US east coast
    pub const VNP46A3_H10V04: &str = "VNP46A3.A2012001.h10v04.001.2021124111521.h5";

    /// VNP46A4 (yearly composite) granule
    pub const VNP46A4_H09V05: &str = "VNP46A4.A2019001.h09v05.001.2021125083015.h5";

    /// A name that does not follow the granule convention
    pub const NOT_A_GRANULE: &str = "random_download.h5";
}

/// Known tile addresses with their WGS84 bounds.
///
/// Bounds are (west, south, east, north) in degrees.
pub mod tiles {
    /// Tile h10v04 (US east coast)
    pub const H10V04: TileFixture = TileFixture {
        h: 10,
        v: 4,
        bounds: (-80.0, 40.0, -70.0, 50.0),
    };

    /// Tile h00v00 (north-west corner of the grid)
    pub const ORIGIN: TileFixture = TileFixture {
        h: 0,
        v: 0,
        bounds: (-180.0, 80.0, -170.0, 90.0),
    };

    /// Tile h35v17 (south-east corner of the grid)
    pub const LAST: TileFixture = TileFixture {
        h: 35,
        v: 17,
        bounds: (170.0, -90.0, 180.0, -80.0),
    };

    /// A tile address with known bounds for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct TileFixture {
        pub h: u32,
        pub v: u32,
        pub bounds: (f64, f64, f64, f64),
    }

    impl TileFixture {
        /// Tile id in `hHHvVV` form.
        pub fn id(&self) -> String {
            format!("h{:02}v{:02}", self.h, self.v)
        }
    }
}

/// VNP46 raster geometry.
pub mod raster {
    /// Width and height of a VNP46 grid tile in pixels
    pub const TILE_PIXELS: usize = 2400;

    /// Pixel size in degrees (a 10 degree tile spans 2400 pixels)
    pub const PIXEL_DEG: f64 = 10.0 / 2400.0;
}
