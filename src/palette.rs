//! Qualitative color palettes for hue grouping

use plotters::style::RGBColor;
use std::collections::HashMap;

/// Marker color used when no hue grouping is active (steel blue)
pub const DEFAULT_POINT_COLOR: RGBColor = RGBColor(76, 114, 176);

/// A fixed, ordered set of categorical colors. Indexing wraps around, so any
/// number of groups gets a color; distinct colors are bounded by palette size.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<RGBColor>,
}

impl ColorPalette {
    /// The ColorBrewer Set2 palette (8 colors), the fixed palette used for
    /// hue grouping
    pub fn set2() -> Self {
        ColorPalette {
            colors: vec![
                RGBColor(102, 194, 165),
                RGBColor(252, 141, 98),
                RGBColor(141, 160, 203),
                RGBColor(231, 138, 195),
                RGBColor(166, 216, 84),
                RGBColor(255, 217, 47),
                RGBColor(229, 196, 148),
                RGBColor(179, 179, 179),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the n-th group, cycling past the end of the palette
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    /// Assign a color to each key, in the order the keys are given
    pub fn assign_colors(&self, keys: &[String]) -> HashMap<String, RGBColor> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), self.color(i)))
            .collect()
    }
}
