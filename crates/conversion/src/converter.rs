//! Granule conversion pipeline.
//!
//! Single-granule conversion opens the container, selects a subdataset,
//! reads the tile address, derives the WGS84 bounding box, and writes the
//! georeferenced GeoTIFF. Batch conversion runs the same pipeline over
//! every granule found directly inside a directory, in filename order.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use vnp_common::{BoundingBox, TileCoord};
use walkdir::WalkDir;

use crate::error::{ConversionError, Result};
use crate::geotiff;
use crate::hdf5::{self, Subdataset};
use crate::metadata::{detect_file_type, output_name, parse_granule_filename, FileType};

/// Options for conversion operations.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Zero-based index of the subdataset to convert
    pub subdataset: usize,
    /// Abort a batch on the first failing granule
    pub fail_fast: bool,
}

/// Result of converting one granule.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Input granule path
    pub input: PathBuf,
    /// Written GeoTIFF path
    pub output: PathBuf,
    /// Tile address read from the granule metadata
    pub tile: TileCoord,
    /// Bounding box assigned to the output
    pub bbox: BoundingBox,
    /// Raster size (width, height) in pixels
    pub raster_size: (usize, usize),
    /// Number of bands copied
    pub bands: usize,
}

/// A granule that failed to convert.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Input granule path
    pub input: PathBuf,
    /// Rendered error
    pub error: String,
}

/// Result of a batch conversion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Granules converted successfully
    pub converted: Vec<FileReport>,
    /// Granules that failed to convert
    pub failed: Vec<FileFailure>,
    /// Directory entries skipped because they are not HDF5 granules
    pub skipped: usize,
}

impl BatchSummary {
    /// Whether every discovered granule converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converter for VNP46 granules.
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert a single granule, writing the GeoTIFF into `output_dir`.
    pub fn convert_file(&self, input: &Path, output_dir: &Path) -> Result<FileReport> {
        if detect_file_type(input) != FileType::Hdf5 {
            return Err(ConversionError::NotAGranule(input.to_path_buf()));
        }

        let out_name = output_name(input)
            .ok_or_else(|| ConversionError::InvalidOutputName(input.to_path_buf()))?;
        let output = output_dir.join(out_name);

        let container = hdf5::open_granule(input)?;
        let layer = hdf5::open_subdataset(&container, self.options.subdataset)?;
        let tile = hdf5::tile_coord(&layer)?;

        if !tile.in_grid() {
            warn!(tile = %tile, "Tile address outside the 36x18 grid; bounds will fall outside WGS84");
        }
        check_filename_tile(input, tile);

        let bbox = tile.bounding_box();
        let (width, height) = layer.raster_size();
        let bands = layer.raster_count();

        info!(
            input = %input.display(),
            tile = %tile,
            west = bbox.min_x,
            south = bbox.min_y,
            east = bbox.max_x,
            north = bbox.max_y,
            "Converting granule"
        );

        geotiff::write_geotiff(&layer, &output, &bbox)?;
        info!(output = %output.display(), "Wrote GeoTIFF");

        Ok(FileReport {
            input: input.to_path_buf(),
            output,
            tile,
            bbox,
            raster_size: (width, height),
            bands,
        })
    }

    /// Convert every granule directly inside `input_dir` into `output_dir`.
    ///
    /// Failures are logged and collected in the summary so one bad granule
    /// does not stop the rest; with `fail_fast` the first failure aborts
    /// the batch instead.
    pub fn convert_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        let granules = discover_granules(input_dir, &mut summary.skipped)?;

        info!(
            input_dir = %input_dir.display(),
            count = granules.len(),
            skipped = summary.skipped,
            "Starting batch conversion"
        );

        for input in granules {
            match self.convert_file(&input, output_dir) {
                Ok(report) => summary.converted.push(report),
                Err(e) if self.options.fail_fast => return Err(e),
                Err(e) => {
                    error!(input = %input.display(), error = %e, "Granule conversion failed");
                    summary.failed.push(FileFailure {
                        input,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            converted = summary.converted.len(),
            failed = summary.failed.len(),
            skipped = summary.skipped,
            "Batch conversion finished"
        );

        Ok(summary)
    }

    /// List the subdatasets of a granule without converting it.
    pub fn list_subdatasets(&self, input: &Path) -> Result<Vec<Subdataset>> {
        let container = hdf5::open_granule(input)?;
        let subs = hdf5::subdatasets(&container);
        if subs.is_empty() {
            return Err(ConversionError::NoSubdatasets(input.to_path_buf()));
        }
        Ok(subs)
    }
}

/// Warn when the filename's tile id disagrees with the embedded metadata.
///
/// The embedded metadata wins either way; names that do not follow the
/// granule convention are simply not cross-checked.
fn check_filename_tile(input: &Path, tile: TileCoord) {
    let parsed = input
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(parse_granule_filename);

    if let Some(id) = parsed {
        if id.tile != tile {
            warn!(
                filename_tile = %id.tile,
                metadata_tile = %tile,
                "Tile id in filename disagrees with granule metadata"
            );
        }
    }
}

/// List HDF5 granules directly inside `dir`, sorted by path.
fn discover_granules(dir: &Path, skipped: &mut usize) -> Result<Vec<PathBuf>> {
    let mut granules = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| ConversionError::DirectoryScan(e.to_string()))?;

        if entry.file_type().is_file() && detect_file_type(entry.path()) == FileType::Hdf5 {
            granules.push(entry.into_path());
        } else {
            *skipped += 1;
        }
    }

    granules.sort();
    Ok(granules)
}
