//! Tests for count normalization, level bucketing and level colors.

use graph_common::Rgb;
use renderer::quantize::{intensity, level, MAX_LEVELS, MIN_LEVELS};
use renderer::{ColorScheme, ColorSpectrum, Levels, Quantizer};
use test_utils::{dates, ramp_calendar};

fn primary() -> Rgb {
    Rgb::from_hex("#216e39").unwrap()
}

fn quantizer(levels: u32) -> Quantizer {
    Quantizer::new(Levels::new(levels).unwrap(), ColorScheme::from_primary(primary()))
}

// ============================================================================
// Intensity tests
// ============================================================================

#[test]
fn test_intensity_is_monotonic_and_bounded() {
    let max = 37;
    let mut previous = 0;
    for count in 0..=max {
        let value = intensity(count, max);
        assert!(value >= previous);
        previous = value;
    }
    assert_eq!(intensity(0, max), 0);
    assert_eq!(intensity(max, max), 255);
}

#[test]
fn test_intensity_of_empty_calendar() {
    assert_eq!(intensity(0, 0), 0);
}

// ============================================================================
// Level tests
// ============================================================================

#[test]
fn test_level_within_bounds_for_all_configurations() {
    for n in MIN_LEVELS..=MAX_LEVELS {
        let levels = Levels::new(n).unwrap();
        assert_eq!(level(0, levels), 0);
        assert_eq!(level(255, levels), levels.top());

        let mut previous = 0;
        for i in 0..=255u8 {
            let l = level(i, levels);
            assert!(l <= levels.top(), "levels={n} intensity={i} level={l}");
            assert!(l >= previous);
            previous = l;
        }
    }
}

#[test]
fn test_only_zero_intensity_maps_to_level_zero() {
    for n in [5, 7, 100, 255] {
        let levels = Levels::new(n).unwrap();
        assert!((1..=255u8).all(|i| level(i, levels) > 0));
    }
}

#[test]
fn test_level_uses_256_divisor() {
    let levels = Levels::new(5).unwrap();
    // 51 / 256 * 5 = 0.996 rounds up to 1; 52 / 256 * 5 = 1.016 up to 2.
    assert_eq!(level(51, levels), 1);
    assert_eq!(level(52, levels), 2);
    assert_eq!(level(153, levels), 3);
    assert_eq!(level(205, levels), 4);
}

#[test]
fn test_levels_reject_out_of_range() {
    for bad in [0, 1, 4, 256, 1000] {
        let err = Levels::new(bad).unwrap_err();
        assert!(err.is_configuration());
    }
}

#[test]
fn test_levels_deserialize_validates() {
    let levels: Levels = serde_json::from_str("9").unwrap();
    assert_eq!(levels.get(), 9);
    assert!(serde_json::from_str::<Levels>("3").is_err());
}

#[test]
fn test_ramp_calendar_levels() {
    let calendar = ramp_calendar(dates::saturday());
    let q = quantizer(5);
    let max = calendar.max_count();

    let levels: Vec<u8> = calendar
        .iter()
        .map(|r| q.level_for_count(r.count, max))
        .collect();
    assert_eq!(levels[0], 0);
    assert_eq!(levels[363], 4);
    assert!(levels.windows(2).all(|w| w[0] <= w[1]));
}

// ============================================================================
// Color tests
// ============================================================================

#[test]
fn test_spectrum_starts_at_min() {
    let spectrum = ColorSpectrum::new(Rgb::LIGHT_BACKGROUND, primary());
    assert_eq!(spectrum.at_intensity(0), Rgb::LIGHT_BACKGROUND);
}

#[test]
fn test_spectrum_interpolates_per_channel() {
    let spectrum = ColorSpectrum::new(Rgb::new(0, 100, 200), Rgb::new(255, 100, 0));
    // 255 / 256 * 128 = 127.5, rounded away from zero.
    assert_eq!(spectrum.at_intensity(128), Rgb::new(128, 100, 100));
}

#[test]
fn test_level_colors_move_toward_primary() {
    let q = quantizer(5);
    let distance = |c: Rgb| {
        let p = primary();
        (i32::from(c.r) - i32::from(p.r)).abs()
            + (i32::from(c.g) - i32::from(p.g)).abs()
            + (i32::from(c.b) - i32::from(p.b)).abs()
    };
    for dark in [false, true] {
        let colors: Vec<Rgb> = (0..5).map(|l| q.color_for_level(l, dark)).collect();
        assert!(colors.windows(2).all(|w| distance(w[1]) < distance(w[0])));
    }
}

#[test]
fn test_modes_use_their_own_background() {
    let q = quantizer(5);
    assert_eq!(q.color_for_level(0, false), Rgb::LIGHT_BACKGROUND);
    assert_eq!(q.color_for_level(0, true), Rgb::DARK_BACKGROUND);
}

#[test]
fn test_legend_levels_span_range() {
    for n in MIN_LEVELS..=MAX_LEVELS {
        let q = quantizer(n);
        let legend = q.legend_levels();
        assert_eq!(legend[0], 0);
        assert_eq!(legend[4], q.levels().top());
        assert!(legend.windows(2).all(|w| w[0] <= w[1]));
    }
}
