//! Color quantization: counts to intensities to discrete levels to colors.
//!
//! A count is first normalized against the busiest day into an intensity in
//! `0..=255`. The intensity is then bucketed into one of `levels` discrete
//! levels, and each level maps to a color on a two-color spectrum. Light and
//! dark mode use separate spectra; the quantizer picks one per call.

use graph_common::{GraphError, GraphResult, Rgb};
use serde::{Deserialize, Serialize};

/// Smallest supported number of color levels.
pub const MIN_LEVELS: u32 = 5;

/// Largest supported number of color levels.
pub const MAX_LEVELS: u32 = 255;

/// Number of swatches in the legend.
pub const LEGEND_SWATCHES: usize = 5;

/// Normalize `count` against `max_count` into `0..=255`.
///
/// Returns 0 when the calendar has no activity at all.
pub fn intensity(count: u64, max_count: u64) -> u8 {
    if max_count == 0 {
        return 0;
    }
    let scaled = (255.0 * count as f64 / max_count as f64).round();
    scaled.clamp(0.0, 255.0) as u8
}

/// Bucket an intensity into `0..levels`.
///
/// Uses `ceil(intensity / 256 * levels)` capped at `levels - 1`, so only a
/// zero intensity maps to level 0 and the top of the range lands exactly on
/// the last level.
pub fn level(intensity: u8, levels: Levels) -> u8 {
    let n = levels.get() as f64;
    let bucket = (f64::from(intensity) / 256.0 * n).ceil() as u32;
    bucket.min(levels.top() as u32) as u8
}

/// Validated number of color levels (`5..=255`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Levels(u8);

impl Levels {
    pub fn new(value: u32) -> GraphResult<Self> {
        if !(MIN_LEVELS..=MAX_LEVELS).contains(&value) {
            return Err(GraphError::InvalidLevels {
                value,
                min: MIN_LEVELS,
                max: MAX_LEVELS,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Highest level index.
    pub fn top(self) -> u8 {
        self.0 - 1
    }

    /// Iterate all level indices, lowest first.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        0..self.0
    }
}

impl Default for Levels {
    fn default() -> Self {
        Self(MIN_LEVELS as u8)
    }
}

impl TryFrom<u32> for Levels {
    type Error = GraphError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Levels::new(value)
    }
}

impl From<Levels> for u32 {
    fn from(levels: Levels) -> Self {
        u32::from(levels.0)
    }
}

/// Two endpoint colors for linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpectrum {
    pub min: Rgb,
    pub max: Rgb,
}

impl ColorSpectrum {
    pub fn new(min: Rgb, max: Rgb) -> Self {
        Self { min, max }
    }

    /// Color at `intensity`, interpolating each channel as
    /// `min + round((max - min) / 256 * intensity)`.
    pub fn at_intensity(&self, intensity: u8) -> Rgb {
        Rgb::new(
            interpolate_channel(self.min.r, self.max.r, intensity),
            interpolate_channel(self.min.g, self.max.g, intensity),
            interpolate_channel(self.min.b, self.max.b, intensity),
        )
    }
}

fn interpolate_channel(min: u8, max: u8, intensity: u8) -> u8 {
    let delta = f64::from(max) - f64::from(min);
    let value = f64::from(min) + (delta / 256.0 * f64::from(intensity)).round();
    value.clamp(0.0, 255.0) as u8
}

/// Light and dark mode spectra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub light: ColorSpectrum,
    pub dark: ColorSpectrum,
}

impl ColorScheme {
    /// Spectra running from the neutral light/dark backgrounds to `primary`.
    pub fn from_primary(primary: Rgb) -> Self {
        Self {
            light: ColorSpectrum::new(Rgb::LIGHT_BACKGROUND, primary),
            dark: ColorSpectrum::new(Rgb::DARK_BACKGROUND, primary),
        }
    }

    pub fn spectrum(&self, dark: bool) -> &ColorSpectrum {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Maps counts to levels and levels to colors for a fixed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    levels: Levels,
    scheme: ColorScheme,
}

impl Quantizer {
    pub fn new(levels: Levels, scheme: ColorScheme) -> Self {
        Self { levels, scheme }
    }

    pub fn levels(&self) -> Levels {
        self.levels
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Level of a day with `count` contributions when the busiest day has
    /// `max_count`.
    pub fn level_for_count(&self, count: u64, max_count: u64) -> u8 {
        level(intensity(count, max_count), self.levels)
    }

    /// Representative intensity of a level: `level * 255 / (levels - 1)`.
    pub fn level_intensity(&self, level: u8) -> u8 {
        let level = u32::from(level.min(self.levels.top()));
        (level * 255 / u32::from(self.levels.top())) as u8
    }

    /// Discretized color of a level.
    pub fn color_for_level(&self, level: u8, dark: bool) -> Rgb {
        self.color_for_intensity(self.level_intensity(level), dark)
    }

    /// Continuous color of an intensity.
    pub fn color_for_intensity(&self, intensity: u8, dark: bool) -> Rgb {
        self.scheme.spectrum(dark).at_intensity(intensity)
    }

    /// Levels shown in the legend: `round((levels - 1) / 4 * i)`.
    pub fn legend_levels(&self) -> [u8; LEGEND_SWATCHES] {
        let step = f64::from(self.levels.top()) / (LEGEND_SWATCHES - 1) as f64;
        std::array::from_fn(|i| (step * i as f64).round() as u8)
    }

    /// Intensities sampled for legend swatches: `round(255 / 4 * i)`.
    pub fn legend_intensities() -> [u8; LEGEND_SWATCHES] {
        let step = 255.0 / (LEGEND_SWATCHES - 1) as f64;
        std::array::from_fn(|i| (step * i as f64).round() as u8)
    }
}
