//! Comprehensive tests for the VNP46 tile grid math.

use vnp_common::tile::TileIdParseError;
use vnp_common::{BoundingBox, TileCoord, GRID_COLUMNS, GRID_ROWS, TILE_SPAN_DEG};

// ============================================================================
// Bounding box formula tests
// ============================================================================

#[test]
fn test_bbox_reference_tile() {
    // h10v04 is the Boston tile from the VNP46 documentation
    let bbox = TileCoord::new(10, 4).bounding_box();
    assert_eq!(bbox.min_x, -80.0);
    assert_eq!(bbox.max_y, 50.0);
    assert_eq!(bbox.max_x, -70.0);
    assert_eq!(bbox.min_y, 40.0);
}

#[test]
fn test_bbox_origin_tile() {
    // h00v00 is the northwest corner of the grid
    let bbox = TileCoord::new(0, 0).bounding_box();
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.max_y, 90.0);
    assert_eq!(bbox.max_x, -170.0);
    assert_eq!(bbox.min_y, 80.0);
}

#[test]
fn test_bbox_last_tile() {
    // h35v17 is the southeast corner of the grid
    let bbox = TileCoord::new(GRID_COLUMNS - 1, GRID_ROWS - 1).bounding_box();
    assert_eq!(bbox.min_x, 170.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, -80.0);
    assert_eq!(bbox.min_y, -90.0);
}

#[test]
fn test_bbox_formula_over_grid() {
    for h in 0..GRID_COLUMNS {
        for v in 0..GRID_ROWS {
            let bbox = TileCoord::new(h, v).bounding_box();
            assert_eq!(bbox.min_x, 10.0 * h as f64 - 180.0);
            assert_eq!(bbox.max_y, 90.0 - 10.0 * v as f64);
        }
    }
}

#[test]
fn test_bbox_invariants_over_grid() {
    // east = west + 10 and south = north - 10 for every tile
    for h in 0..GRID_COLUMNS {
        for v in 0..GRID_ROWS {
            let bbox = TileCoord::new(h, v).bounding_box();
            assert_eq!(bbox.max_x, bbox.min_x + TILE_SPAN_DEG);
            assert_eq!(bbox.min_y, bbox.max_y - TILE_SPAN_DEG);
            assert_eq!(bbox.width(), TILE_SPAN_DEG);
            assert_eq!(bbox.height(), TILE_SPAN_DEG);
        }
    }
}

#[test]
fn test_bbox_out_of_grid_is_consistent() {
    // Out-of-range indices are not rejected; the arithmetic still holds
    let tile = TileCoord::new(40, 20);
    assert!(!tile.in_grid());

    let bbox = tile.bounding_box();
    assert_eq!(bbox.min_x, 220.0);
    assert_eq!(bbox.max_y, -110.0);
    assert_eq!(bbox.max_x, bbox.min_x + TILE_SPAN_DEG);
    assert_eq!(bbox.min_y, bbox.max_y - TILE_SPAN_DEG);
}

#[test]
fn test_bbox_idempotent() {
    let tile = TileCoord::new(21, 9);
    assert_eq!(tile.bounding_box(), tile.bounding_box());
}

// ============================================================================
// Grid membership tests
// ============================================================================

#[test]
fn test_in_grid_corners() {
    assert!(TileCoord::new(0, 0).in_grid());
    assert!(TileCoord::new(35, 17).in_grid());
    assert!(!TileCoord::new(36, 0).in_grid());
    assert!(!TileCoord::new(0, 18).in_grid());
}

// ============================================================================
// Tile id parsing tests
// ============================================================================

#[test]
fn test_parse_tile_id_round_trip() {
    let tile: TileCoord = "h10v04".parse().unwrap();
    assert_eq!(tile, TileCoord::new(10, 4));
    assert_eq!(tile.to_string(), "h10v04");
}

#[test]
fn test_parse_tile_id_high_indices() {
    let tile: TileCoord = "h35v17".parse().unwrap();
    assert_eq!(tile, TileCoord::new(35, 17));
}

#[test]
fn test_parse_tile_id_missing_prefix() {
    let result = "10v04".parse::<TileCoord>();
    assert!(matches!(result, Err(TileIdParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_tile_id_missing_separator() {
    let result = "h1004".parse::<TileCoord>();
    assert!(matches!(result, Err(TileIdParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_tile_id_non_numeric() {
    let result = "h1xv04".parse::<TileCoord>();
    assert!(matches!(result, Err(TileIdParseError::InvalidIndex(_))));
}

#[test]
fn test_parse_tile_id_empty() {
    assert!("".parse::<TileCoord>().is_err());
}

// ============================================================================
// Geo-transform tests
// ============================================================================

#[test]
fn test_geo_transform_from_tile_bbox() {
    // A 2400x2400 raster over one 10° tile has 1/240° pixels
    let gt = TileCoord::new(10, 4).bounding_box().geo_transform(2400, 2400);

    assert_eq!(gt[0], -80.0);
    assert_eq!(gt[3], 50.0);
    assert_eq!(gt[2], 0.0);
    assert_eq!(gt[4], 0.0);
    assert!((gt[1] - (1.0 / 240.0)).abs() < 1e-12);
    assert!((gt[5] + (1.0 / 240.0)).abs() < 1e-12);
}

#[test]
fn test_geo_transform_non_square_raster() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let gt = bbox.geo_transform(1000, 500);
    assert!((gt[1] - 0.01).abs() < 1e-12);
    assert!((gt[5] + 0.02).abs() < 1e-12);
}

#[test]
fn test_geo_transform_covers_full_extent() {
    // Walking the transform across all pixels must land on the far corners
    let bbox = TileCoord::new(3, 11).bounding_box();
    let (cols, rows) = (2400usize, 2400usize);
    let gt = bbox.geo_transform(cols, rows);

    let east = gt[0] + cols as f64 * gt[1];
    let south = gt[3] + rows as f64 * gt[5];
    assert!((east - bbox.max_x).abs() < 1e-9);
    assert!((south - bbox.min_y).abs() < 1e-9);
}
