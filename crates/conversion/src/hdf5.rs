//! GDAL-backed reading of VNP46 HDF5 granules.
//!
//! All HDF5 decoding is GDAL's. This module only walks the metadata
//! surfaces GDAL exposes: the `SUBDATASETS` domain of a container and the
//! default-domain attributes of an opened raster subdataset.

use gdal::{Dataset, Metadata};
use std::path::{Path, PathBuf};
use tracing::debug;
use vnp_common::TileCoord;

use crate::error::{ConversionError, Result};

/// Metadata key for the horizontal tile number.
pub const HORIZONTAL_TILE_KEY: &str = "HorizontalTileNumber";

/// Metadata key for the vertical tile number.
pub const VERTICAL_TILE_KEY: &str = "VerticalTileNumber";

/// One entry of a container's `SUBDATASETS` metadata domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdataset {
    /// Zero-based index, as accepted by subdataset selection
    pub index: usize,
    /// GDAL dataset name (an `HDF5:"file"://path` connection string)
    pub name: String,
    /// Human-readable description (dimensions, path, pixel type)
    pub description: String,
}

/// Open an HDF5 granule container read-only.
pub fn open_granule(path: &Path) -> Result<Dataset> {
    Ok(Dataset::open(path)?)
}

/// List the raster subdatasets of an opened container, in GDAL order.
pub fn subdatasets(container: &Dataset) -> Vec<Subdataset> {
    let entries = container.metadata_domain("SUBDATASETS").unwrap_or_default();
    parse_subdataset_domain(&entries)
}

/// Open the zero-based `index`-th raster subdataset of a container.
pub fn open_subdataset(container: &Dataset, index: usize) -> Result<Dataset> {
    let subs = subdatasets(container);
    if subs.is_empty() {
        return Err(ConversionError::NoSubdatasets(container_path(container)));
    }

    let sub = subs.get(index).ok_or(ConversionError::SubdatasetIndex {
        requested: index,
        available: subs.len(),
    })?;

    debug!(index = index, name = %sub.name, "Opening subdataset");
    Ok(Dataset::open(&sub.name)?)
}

/// Read the tile address embedded in a subdataset's metadata.
pub fn tile_coord(dataset: &Dataset) -> Result<TileCoord> {
    let h = tile_number(dataset, HORIZONTAL_TILE_KEY)?;
    let v = tile_number(dataset, VERTICAL_TILE_KEY)?;
    Ok(TileCoord::new(h, v))
}

fn tile_number(dataset: &Dataset, key: &str) -> Result<u32> {
    let value = metadata_lookup(dataset, key)
        .ok_or_else(|| ConversionError::MissingMetadata(key.to_string()))?;

    value
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidMetadata {
            key: key.to_string(),
            value,
        })
}

/// Exact-key lookup in the default domain, with a suffix-match fallback.
///
/// The HDF5 driver usually exposes file attributes under their plain
/// names, but some GDAL builds prefix them with the attribute's group
/// path (e.g. `HDFEOS_GRIDS_..._HorizontalTileNumber`).
fn metadata_lookup(dataset: &Dataset, key: &str) -> Option<String> {
    if let Some(value) = dataset.metadata_item(key, "") {
        return Some(value);
    }

    for entry in dataset.metadata_domain("").unwrap_or_default() {
        let (entry_key, value) = match entry.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        if entry_key.ends_with(key) {
            return Some(value.to_string());
        }
    }

    None
}

/// Parse `SUBDATASET_<n>_NAME` / `SUBDATASET_<n>_DESC` entry pairs.
///
/// GDAL reports the domain as a flat list of `KEY=VALUE` strings with
/// `<n>` counting from 1. Unrecognized entries are ignored.
fn parse_subdataset_domain(entries: &[String]) -> Vec<Subdataset> {
    let mut names: Vec<(usize, String)> = Vec::new();
    let mut descriptions: Vec<(usize, String)> = Vec::new();

    for entry in entries {
        let (key, value) = match entry.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };
        let rest = match key.strip_prefix("SUBDATASET_") {
            Some(rest) => rest,
            None => continue,
        };

        if let Some(n) = rest.strip_suffix("_NAME") {
            if let Ok(n) = n.parse::<usize>() {
                names.push((n, value.to_string()));
            }
        } else if let Some(n) = rest.strip_suffix("_DESC") {
            if let Ok(n) = n.parse::<usize>() {
                descriptions.push((n, value.to_string()));
            }
        }
    }

    names.sort_by_key(|(n, _)| *n);
    names
        .into_iter()
        .enumerate()
        .map(|(index, (n, name))| Subdataset {
            index,
            name,
            description: descriptions
                .iter()
                .find(|(dn, _)| *dn == n)
                .map(|(_, d)| d.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn container_path(container: &Dataset) -> PathBuf {
    PathBuf::from(container.description().unwrap_or_default())
}
