// Library exports for scattergram

pub mod csv_reader;
pub mod data;
pub mod display;
pub mod figure;
pub mod palette;
pub mod parser;
pub mod render;

pub use data::Dataset;
pub use figure::{Axes, Figure, Legend, Series};
pub use render::{render, render_with};

use serde::Deserialize;

/// Behavior of the display step that runs at the end of every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum DisplayMode {
    /// Open the platform viewer when a graphical session is available,
    /// otherwise skip silently.
    #[serde(rename = "auto")]
    #[default]
    Auto,
    #[serde(rename = "viewer")]
    Viewer,
    /// Never display. The non-interactive backend for tests and pipelines.
    #[serde(rename = "headless")]
    Headless,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    /// Pixels per logical unit. The figure itself is always 10x6 units.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub display: DisplayMode,
}

fn default_dpi() -> u32 { 100 }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: 100,
            display: DisplayMode::Auto,
        }
    }
}

impl RenderOptions {
    /// Default geometry with the display step disabled.
    pub fn headless() -> Self {
        Self {
            display: DisplayMode::Headless,
            ..Self::default()
        }
    }
}
