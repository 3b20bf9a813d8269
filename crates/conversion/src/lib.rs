//! Core conversion logic for VNP46 night-lights granules.
//!
//! Converts NASA VNP46 (Black Marble) HDF5 granules into GeoTIFFs
//! georeferenced in EPSG:4326. GDAL owns all raster decoding and writing;
//! this crate derives the tile bounding box from the address embedded in
//! the granule metadata and stamps it onto the output.
//!
//! # Modules
//!
//! - `metadata` - granule filename conventions (output naming, granule ids)
//! - `hdf5` - GDAL-backed reads of containers and their subdatasets
//! - `geotiff` - GDAL-backed GeoTIFF output with assigned georeferencing
//! - `converter` - the per-granule pipeline and the sequential batch runner

mod converter;
pub mod error;
mod geotiff;
mod hdf5;
pub mod metadata;

// Re-export the public API at the crate root
pub use converter::{BatchSummary, ConvertOptions, Converter, FileFailure, FileReport};
pub use error::{ConversionError, Result};
pub use geotiff::OUTPUT_EPSG;
pub use hdf5::{Subdataset, HORIZONTAL_TILE_KEY, VERTICAL_TILE_KEY};
pub use metadata::{
    detect_file_type, output_name, parse_granule_filename, FileType, GranuleId, OUTPUT_SUFFIX,
};
