//! Tests for colormaps and color ramps.

use cell_common::CellError;
use renderer::colormap::{Colormap, ColormapConfig, BUILTIN_COLORMAPS};
use renderer::gradient::{build_ramp, build_ramp_with, interpolate, Color, DEFAULT_RAMP_STEPS};
use test_utils::{colormaps, temp_test_dir, write_test_file, HEAT_COLORMAP_JSON};

// ============================================================================
// Ramp endpoints
// ============================================================================

#[test]
fn test_ramp_endpoints_match_interpolation() {
    for name in BUILTIN_COLORMAPS {
        let ramp = build_ramp(name, DEFAULT_RAMP_STEPS).unwrap();
        assert_eq!(ramp.len(), DEFAULT_RAMP_STEPS);
        assert_eq!(interpolate(&ramp, 0.0).unwrap(), ramp.colors()[0], "{name}");
        assert_eq!(
            interpolate(&ramp, 1.0).unwrap(),
            ramp.colors()[DEFAULT_RAMP_STEPS - 1],
            "{name}"
        );
    }
}

#[test]
fn test_blues_endpoints() {
    let ramp = build_ramp(colormaps::DEFAULT, 50).unwrap();
    assert_eq!(ramp.colors()[0], Color::new(0xf7, 0xfb, 0xff));
    assert_eq!(ramp.colors()[49], Color::new(0x08, 0x30, 0x6b));
}

#[test]
fn test_midpoint_uses_floor_index() {
    let ramp = build_ramp(colormaps::DEFAULT, 50).unwrap();
    assert_eq!(interpolate(&ramp, 0.5).unwrap(), ramp.colors()[24]);
}

// ============================================================================
// Monotonic luminance
// ============================================================================

fn luminances(name: &str) -> Vec<f64> {
    let ramp = build_ramp(name, DEFAULT_RAMP_STEPS).unwrap();
    (0..=100)
        .map(|i| interpolate(&ramp, i as f64 / 100.0).unwrap().luminance())
        .collect()
}

#[test]
fn test_sequential_maps_darken() {
    for name in ["Blues", "Greens", "Greys", "Oranges", "Purples", "Reds"] {
        let lum = luminances(name);
        assert!(lum.windows(2).all(|w| w[1] <= w[0]), "{name} is not monotonic");
    }
}

#[test]
fn test_reversed_and_viridis_brighten() {
    for name in [colormaps::REVERSED, colormaps::VIRIDIS] {
        let lum = luminances(name);
        assert!(lum.windows(2).all(|w| w[1] >= w[0]), "{name} is not monotonic");
    }
}

// ============================================================================
// Error cases
// ============================================================================

#[test]
fn test_values_outside_unit_interval_are_rejected() {
    let ramp = build_ramp(colormaps::DEFAULT, 50).unwrap();
    match interpolate(&ramp, 1.5) {
        Err(CellError::Range { value }) => assert_eq!(value, 1.5),
        other => panic!("expected range error, got {other:?}"),
    }
    assert!(interpolate(&ramp, -0.0001).is_err());
}

#[test]
fn test_unknown_colormap() {
    let err = build_ramp(colormaps::UNKNOWN, 50).unwrap_err();
    assert!(matches!(err, CellError::Resource(_)));
}

// ============================================================================
// Custom colormaps
// ============================================================================

#[test]
fn test_custom_colormap_from_file() {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "colormaps.json", HEAT_COLORMAP_JSON);
    let config = ColormapConfig::from_file(&path).unwrap();

    let ramp = build_ramp_with("heat", 3, Some(&config)).unwrap();
    assert_eq!(
        ramp.colors(),
        &[Color::new(0, 0, 0), Color::new(128, 0, 0), Color::new(255, 0, 0)]
    );

    let reversed = build_ramp_with("heat_r", 3, Some(&config)).unwrap();
    assert_eq!(reversed.colors()[0], Color::new(255, 0, 0));

    // Built-ins stay reachable alongside custom maps.
    assert!(build_ramp_with("Reds", 3, Some(&config)).is_ok());
}

#[test]
fn test_missing_colormap_file_is_resource_error() {
    let err = ColormapConfig::from_file("/nonexistent/colormaps.json").unwrap_err();
    assert_eq!(err.kind(), "ResourceError");
}

#[test]
fn test_malformed_colormap_json() {
    let err = ColormapConfig::from_json("{ not json").unwrap_err();
    assert_eq!(err.kind(), "ConfigError");
}

#[test]
fn test_builtin_lookup_is_case_sensitive() {
    assert!(Colormap::builtin("blues").is_none());
    assert!(Colormap::builtin("Blues").is_some());
}
