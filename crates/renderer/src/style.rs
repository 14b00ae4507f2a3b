//! Inline stylesheet for the heatmap.
//!
//! Colors are published as CSS custom properties on the root element, once
//! for light mode and once inside a `prefers-color-scheme: dark` media query,
//! so the same document follows the viewer's preference.

use std::fmt;

use graph_common::Rgb;

use crate::quantize::Quantizer;

/// CSS class names used in the generated markup.
pub mod classes {
    pub const ROOT: &str = "contribution-graph";
    pub const VARIABLES: &str = "contribution-graph-var";
    pub const FOREGROUND: &str = "contribution-graph-fg";
    pub const CELL: &str = "contribution-graph-cell";
    pub const OVERLAY: &str = "contribution-graph-cell-overlay";
    pub const TOOLTIP: &str = "contribution-graph-cell-tooltip";

    /// Background class of a color level.
    pub fn level_background(level: u8) -> String {
        format!("contribution-graph-cell-L{level}-bg")
    }
}

/// Text and tooltip colors of one color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePalette {
    pub foreground: Rgb,
    pub tooltip_background: Rgb,
    pub tooltip_foreground: Rgb,
}

impl ModePalette {
    pub const LIGHT: ModePalette = ModePalette {
        foreground: Rgb::new(0x24, 0x29, 0x2f),
        tooltip_background: Rgb::new(0x24, 0x29, 0x2f),
        tooltip_foreground: Rgb::new(0xff, 0xff, 0xff),
    };

    pub const DARK: ModePalette = ModePalette {
        foreground: Rgb::new(0xad, 0xba, 0xc7),
        tooltip_background: Rgb::new(0x63, 0x6e, 0x7b),
        tooltip_foreground: Rgb::new(0xcd, 0xd9, 0xe5),
    };
}

/// Stylesheet for a fixed quantizer configuration.
///
/// Level `n` is colored with the spectrum sampled at `n * 255 / (levels - 1)`
/// in both modes.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    light: Vec<Rgb>,
    dark: Vec<Rgb>,
}

impl Stylesheet {
    pub fn new(quantizer: &Quantizer) -> Self {
        let levels = quantizer.levels();
        Self {
            light: levels
                .iter()
                .map(|l| quantizer.color_for_level(l, false))
                .collect(),
            dark: levels
                .iter()
                .map(|l| quantizer.color_for_level(l, true))
                .collect(),
        }
    }

    pub fn light_colors(&self) -> &[Rgb] {
        &self.light
    }

    pub fn dark_colors(&self) -> &[Rgb] {
        &self.dark
    }

    fn write_variables(
        f: &mut fmt::Formatter<'_>,
        indent: &str,
        palette: &ModePalette,
        colors: &[Rgb],
    ) -> fmt::Result {
        writeln!(f, "{indent}.{} {{", classes::VARIABLES)?;
        writeln!(f, "{indent}  --{}: {};", classes::FOREGROUND, palette.foreground)?;
        writeln!(
            f,
            "{indent}  --{}-bg: {};",
            classes::TOOLTIP,
            palette.tooltip_background
        )?;
        writeln!(
            f,
            "{indent}  --{}-fg: {};",
            classes::TOOLTIP,
            palette.tooltip_foreground
        )?;
        for (level, color) in colors.iter().enumerate() {
            writeln!(f, "{indent}  --{}: {};", classes::level_background(level as u8), color)?;
        }
        writeln!(f, "{indent}}}")
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_variables(f, "", &ModePalette::LIGHT, &self.light)?;
        writeln!(f, "@media (prefers-color-scheme: dark) {{")?;
        Self::write_variables(f, "  ", &ModePalette::DARK, &self.dark)?;
        writeln!(f, "}}")?;

        writeln!(
            f,
            ".{} {{ font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Helvetica, Arial, sans-serif; }}",
            classes::ROOT
        )?;
        writeln!(
            f,
            ".{0} {{ fill: var(--{0}); }}",
            classes::FOREGROUND
        )?;
        writeln!(
            f,
            ".{} {{ shape-rendering: geometricPrecision; outline: 1px solid rgba(27, 31, 35, 0.06); outline-offset: -1px; }}",
            classes::CELL
        )?;
        for level in 0..self.light.len() {
            let class = classes::level_background(level as u8);
            writeln!(f, ".{0} {{ fill: var(--{0}); }}", class)?;
        }
        writeln!(
            f,
            ".{} {{ visibility: hidden; pointer-events: none; }}",
            classes::TOOLTIP
        )?;
        writeln!(
            f,
            ".{0} rect, .{0} polygon {{ fill: var(--{0}-bg); }}",
            classes::TOOLTIP
        )?;
        writeln!(f, ".{0} text {{ fill: var(--{0}-fg); }}", classes::TOOLTIP)?;
        write!(
            f,
            ".{}:hover + .{} {{ visibility: visible; }}",
            classes::OVERLAY,
            classes::TOOLTIP
        )
    }
}
