//! GeoTIFF output via GDAL.
//!
//! VNP46 subdatasets carry no spatial reference of their own, so the
//! output is written with an assigned CRS and affine transform instead of
//! anything read from the source. Pixel data passes through unchanged.

use gdal::raster::{Buffer, GdalDataType, GdalType};
use gdal::spatial_ref::{AxisMappingStrategy, SpatialRef};
use gdal::{Dataset, DriverManager};
use std::path::Path;
use tracing::debug;
use vnp_common::BoundingBox;

use crate::error::Result;

/// EPSG code assigned to every output raster.
pub const OUTPUT_EPSG: u32 = 4326;

/// Write `source` as a GeoTIFF georeferenced to `bbox` in EPSG:4326.
///
/// Band pixel types, no-data values, and scale/offset are carried over
/// from the source. The affine transform maps the full raster onto the
/// bounding box, north up.
pub fn write_geotiff(source: &Dataset, output: &Path, bbox: &BoundingBox) -> Result<()> {
    let band_type = source.rasterband(1)?.band_type();

    debug!(
        output = %output.display(),
        band_type = ?band_type,
        "Creating GeoTIFF"
    );

    match band_type {
        GdalDataType::UInt8 => copy_raster::<u8>(source, output, bbox),
        GdalDataType::UInt16 => copy_raster::<u16>(source, output, bbox),
        GdalDataType::Int16 => copy_raster::<i16>(source, output, bbox),
        GdalDataType::UInt32 => copy_raster::<u32>(source, output, bbox),
        GdalDataType::Int32 => copy_raster::<i32>(source, output, bbox),
        GdalDataType::Float32 => copy_raster::<f32>(source, output, bbox),
        _ => copy_raster::<f64>(source, output, bbox),
    }
}

/// Copy every band of `source` into a new GTiff dataset with pixel type
/// `T`, then stamp the assigned georeferencing.
///
/// VNP46 grid rasters are 2400x2400, so whole-band reads stay modest.
fn copy_raster<T: GdalType + Copy>(
    source: &Dataset,
    output: &Path,
    bbox: &BoundingBox,
) -> Result<()> {
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let (width, height) = source.raster_size();
    let bands = source.raster_count();

    let mut out = driver.create_with_band_type::<T, _>(output, width, height, bands)?;

    for band_index in 1..=bands {
        let src_band = source.rasterband(band_index)?;
        let mut dst_band = out.rasterband(band_index)?;

        let mut buffer: Buffer<T> =
            src_band.read_as((0, 0), (width, height), (width, height), None)?;
        dst_band.write((0, 0), (width, height), &mut buffer)?;

        if let Some(no_data) = src_band.no_data_value() {
            dst_band.set_no_data_value(Some(no_data))?;
        }
        if let Some(scale) = src_band.scale() {
            dst_band.set_scale(scale)?;
        }
        if let Some(offset) = src_band.offset() {
            dst_band.set_offset(offset)?;
        }
    }

    let mut srs = SpatialRef::from_epsg(OUTPUT_EPSG)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    out.set_spatial_ref(&srs)?;
    out.set_geo_transform(&bbox.geo_transform(width, height))?;

    Ok(())
}
