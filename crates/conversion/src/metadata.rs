//! Granule filename conventions.
//!
//! VNP46 granules follow the NASA Earthdata naming scheme:
//! `<product>.A<yyyyddd>.<tile>.<collection>.<yyyydddHHMMSS>.h5`,
//! e.g. `VNP46A3.A2012001.h10v04.001.2021124111521.h5`. Conversion does
//! not depend on the filename (the tile address used for georeferencing
//! comes from the embedded metadata); parsed ids are only used for
//! cross-checking and reporting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::path::Path;
use vnp_common::TileCoord;

/// Suffix appended to the granule basename to form the output filename.
pub const OUTPUT_SUFFIX: &str = "_BBOX.tif";

/// Detected file type based on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// HDF5 container (`.h5`, `.he5`, `.hdf5`)
    Hdf5,
    /// Unknown format
    Unknown,
}

/// Detect the file type from a path's extension.
pub fn detect_file_type(path: &Path) -> FileType {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("h5") | Some("he5") | Some("hdf5") => FileType::Hdf5,
        _ => FileType::Unknown,
    }
}

/// Derive the output GeoTIFF name from a granule path.
///
/// Strips the extension from the basename and appends `_BBOX.tif`, so
/// `VNP46A3.A2012001.h10v04.001.2021124111521.h5` becomes
/// `VNP46A3.A2012001.h10v04.001.2021124111521_BBOX.tif`.
pub fn output_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Identity fields parsed from a VNP46 granule filename.
#[derive(Debug, Clone, PartialEq)]
pub struct GranuleId {
    /// Product short name (e.g. "VNP46A3")
    pub product: String,
    /// First day of the composite period
    pub acquired: NaiveDate,
    /// Tile address as printed in the filename
    pub tile: TileCoord,
    /// Collection number as printed (zero-padded, e.g. "001")
    pub collection: String,
    /// Production timestamp
    pub produced: DateTime<Utc>,
}

/// Parse a VNP46 granule filename into its identity fields.
///
/// Returns `None` for names that do not follow the convention.
pub fn parse_granule_filename(filename: &str) -> Option<GranuleId> {
    let stem = filename.strip_suffix(".h5").unwrap_or(filename);
    let mut parts = stem.split('.');

    let product = parts.next()?;
    let acquired = parts.next()?;
    let tile = parts.next()?;
    let collection = parts.next()?;
    let produced = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    Some(GranuleId {
        product: product.to_string(),
        acquired: parse_acquisition_date(acquired)?,
        tile: tile.parse().ok()?,
        collection: collection.to_string(),
        produced: parse_production_stamp(produced)?,
    })
}

/// Parse the `A<yyyyddd>` acquisition field (year plus day-of-year).
fn parse_acquisition_date(field: &str) -> Option<NaiveDate> {
    let digits = field.strip_prefix('A')?;
    if digits.len() != 7 {
        return None;
    }

    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let day_of_year: u32 = digits.get(4..7)?.parse().ok()?;

    NaiveDate::from_yo_opt(year, day_of_year)
}

/// Parse the `<yyyydddHHMMSS>` production stamp (day-of-year format).
fn parse_production_stamp(field: &str) -> Option<DateTime<Utc>> {
    if field.len() != 13 {
        return None;
    }

    let year: i32 = field.get(0..4)?.parse().ok()?;
    let day_of_year: u32 = field.get(4..7)?.parse().ok()?;
    let hour: u32 = field.get(7..9)?.parse().ok()?;
    let minute: u32 = field.get(9..11)?.parse().ok()?;
    let second: u32 = field.get(11..13)?.parse().ok()?;

    let date = NaiveDate::from_yo_opt(year, day_of_year)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_file_type() {
        assert_eq!(
            detect_file_type(Path::new("VNP46A3.A2012001.h10v04.001.2021124111521.h5")),
            FileType::Hdf5
        );
        assert_eq!(detect_file_type(Path::new("granule.HE5")), FileType::Hdf5);
        assert_eq!(detect_file_type(Path::new("granule.hdf5")), FileType::Hdf5);
        assert_eq!(detect_file_type(Path::new("image.tif")), FileType::Unknown);
        assert_eq!(detect_file_type(Path::new("no_extension")), FileType::Unknown);
    }

    #[test]
    fn test_output_name() {
        let path = PathBuf::from("/data/granules/VNP46A3.A2012001.h10v04.001.2021124111521.h5");
        assert_eq!(
            output_name(&path).unwrap(),
            "VNP46A3.A2012001.h10v04.001.2021124111521_BBOX.tif"
        );
    }

    #[test]
    fn test_output_name_relative_path() {
        let path = PathBuf::from("VNP46A4.A2019001.h09v05.001.2021125123456.h5");
        assert_eq!(
            output_name(&path).unwrap(),
            "VNP46A4.A2019001.h09v05.001.2021125123456_BBOX.tif"
        );
    }

    #[test]
    fn test_parse_granule_filename() {
        let id = parse_granule_filename("VNP46A3.A2012001.h10v04.001.2021124111521.h5").unwrap();

        assert_eq!(id.product, "VNP46A3");
        assert_eq!(id.acquired, NaiveDate::from_ymd_opt(2012, 1, 1).unwrap());
        assert_eq!(id.tile, TileCoord::new(10, 4));
        assert_eq!(id.collection, "001");
        assert_eq!(
            id.produced,
            Utc.with_ymd_and_hms(2021, 5, 4, 11, 15, 21).unwrap()
        );
    }

    #[test]
    fn test_parse_granule_filename_mid_year_day() {
        // Day 182 of 2019 is July 1st
        let id = parse_granule_filename("VNP46A1.A2019182.h25v06.002.2021001000000.h5").unwrap();

        assert_eq!(id.acquired, NaiveDate::from_ymd_opt(2019, 7, 1).unwrap());
        assert_eq!(id.tile, TileCoord::new(25, 6));
        assert_eq!(id.collection, "002");
    }

    #[test]
    fn test_parse_granule_filename_rejects_malformed() {
        // Too few fields
        assert!(parse_granule_filename("VNP46A3.A2012001.h10v04.h5").is_none());
        // Too many fields
        assert!(
            parse_granule_filename("VNP46A3.A2012001.h10v04.001.2021124111521.extra.h5").is_none()
        );
        // Day-of-year out of range
        assert!(parse_granule_filename("VNP46A3.A2012400.h10v04.001.2021124111521.h5").is_none());
        // Bad tile field
        assert!(parse_granule_filename("VNP46A3.A2012001.x10y04.001.2021124111521.h5").is_none());
        // Non-numeric production stamp
        assert!(parse_granule_filename("VNP46A3.A2012001.h10v04.001.2021124xxxx21.h5").is_none());
        assert!(parse_granule_filename("").is_none());
    }

    #[test]
    fn test_parse_acquisition_date() {
        assert_eq!(
            parse_acquisition_date("A2012001"),
            NaiveDate::from_ymd_opt(2012, 1, 1)
        );
        // 2020 is a leap year, so day 366 exists
        assert_eq!(
            parse_acquisition_date("A2020366"),
            NaiveDate::from_ymd_opt(2020, 12, 31)
        );
        assert!(parse_acquisition_date("A2019366").is_none());
        assert!(parse_acquisition_date("2012001").is_none());
        assert!(parse_acquisition_date("A12001").is_none());
    }

    #[test]
    fn test_parse_production_stamp() {
        assert_eq!(
            parse_production_stamp("2021124111521"),
            Some(Utc.with_ymd_and_hms(2021, 5, 4, 11, 15, 21).unwrap())
        );
        assert!(parse_production_stamp("2021124").is_none());
        assert!(parse_production_stamp("2021124251521").is_none());
    }
}
