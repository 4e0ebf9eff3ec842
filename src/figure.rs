// Figure and Axes handles returned by a render call

use anyhow::{bail, Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::ops::Range;
use std::path::Path;

/// Fixed logical size of the drawing surface, in units
pub const FIGURE_WIDTH_UNITS: f64 = 10.0;
pub const FIGURE_HEIGHT_UNITS: f64 = 6.0;

/// Largest accepted pixels-per-unit value
pub const MAX_DPI: u32 = 1000;

const POINT_RADIUS: i32 = 3;

/// One plotted group: all points sharing a key and a color
#[derive(Debug, Clone)]
pub struct Series {
    pub key: Option<String>,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Legend box attached to the axes when hue grouping is active
#[derive(Debug, Clone)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<(String, RGBColor)>,
}

/// The drawing surface: an RGB pixel buffer owned by the caller once a
/// render call returns
pub struct Figure {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl Figure {
    /// Create a blank surface of the fixed logical size at the given dpi.
    /// Fails when dpi exceeds `MAX_DPI`.
    pub(crate) fn new(dpi: u32) -> Result<Self> {
        if dpi > MAX_DPI {
            bail!("dpi must be at most {}, got {}", MAX_DPI, dpi);
        }
        let width = (FIGURE_WIDTH_UNITS * dpi as f64) as u32;
        let height = (FIGURE_HEIGHT_UNITS * dpi as f64) as u32;
        Ok(Figure {
            buffer: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encode the current pixels as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png_bytes = Vec::new();
        {
            let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
            encoder
                .write_image(
                    &self.buffer,
                    self.width,
                    self.height,
                    image::ColorType::Rgb8,
                )
                .context("Failed to encode PNG")?;
        }
        Ok(png_bytes)
    }

    /// Write the current pixels to a PNG file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let png_bytes = self.to_png()?;
        std::fs::write(path.as_ref(), png_bytes)
            .with_context(|| format!("Failed to write '{}'", path.as_ref().display()))?;
        Ok(())
    }
}

// Debug elides the pixel buffer
impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// The plot-area handle: title, axis labels, legend and the plotted series.
/// Everything is inspectable, the labels are caller-mutable, and the whole
/// state can be drawn onto a figure again after modification.
#[derive(Debug)]
pub struct Axes {
    title: String,
    x_label: String,
    y_label: String,
    x_range: Range<f64>,
    y_range: Range<f64>,
    legend: Option<Legend>,
    series: Vec<Series>,
}

impl Axes {
    pub(crate) fn new(
        title: String,
        x_label: String,
        y_label: String,
        x_range: Range<f64>,
        y_range: Range<f64>,
        legend: Option<Legend>,
        series: Vec<Series>,
    ) -> Self {
        Axes {
            title,
            x_label,
            y_label,
            x_range,
            y_range,
            legend,
            series,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn x_range(&self) -> Range<f64> {
        self.x_range.clone()
    }

    pub fn y_range(&self) -> Range<f64> {
        self.y_range.clone()
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Total number of plotted points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    /// Draw these axes onto a figure, replacing its contents
    pub fn draw_onto(&self, figure: &mut Figure) -> Result<()> {
        let (width, height) = (figure.width, figure.height);
        let root = BitMapBackend::with_buffer(&mut figure.buffer, (width, height))
            .into_drawing_area();

        root.fill(&WHITE).context("Failed to fill background")?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(&self.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone())
            .context("Failed to build chart")?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .context("Failed to draw mesh")?;

        for series in &self.series {
            chart
                .draw_series(series.points.iter().map(|&(x, y)| {
                    Circle::new((x, y), POINT_RADIUS, series.color.filled())
                }))
                .context("Failed to draw point series")?;
        }

        if let Some(legend) = &self.legend {
            draw_legend(&root, legend).context("Failed to draw legend")?;
        }

        root.present().context("Failed to present drawing")?;

        Ok(())
    }
}

/// Draw the legend box in the upper-right corner: title line first, then one
/// swatch-and-key line per entry
fn draw_legend(root: &DrawingArea<BitMapBackend<'_>, Shift>, legend: &Legend) -> Result<()> {
    const LINE_HEIGHT: i32 = 18;
    const CHAR_WIDTH: i32 = 7;
    const PADDING: i32 = 8;
    const SWATCH_WIDTH: i32 = 16;

    let (width, _) = root.dim_in_pixel();

    let longest = legend
        .entries
        .iter()
        .map(|(key, _)| key.chars().count())
        .chain(std::iter::once(legend.title.chars().count()))
        .max()
        .unwrap_or(0) as i32;

    let box_width = longest * CHAR_WIDTH + SWATCH_WIDTH + PADDING * 3;
    let box_height = (legend.entries.len() as i32 + 1) * LINE_HEIGHT + PADDING * 2;

    let x1 = width as i32 - 20;
    let x0 = x1 - box_width;
    let y0 = 45;
    let y1 = y0 + box_height;

    root.draw(&Rectangle::new(
        [(x0, y0), (x1, y1)],
        WHITE.mix(0.85).filled(),
    ))?;
    root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))?;

    root.draw(&Text::new(
        legend.title.clone(),
        (x0 + PADDING, y0 + PADDING),
        ("sans-serif", 15),
    ))?;

    for (i, (key, color)) in legend.entries.iter().enumerate() {
        let row_top = y0 + PADDING + (i as i32 + 1) * LINE_HEIGHT;
        root.draw(&Circle::new(
            (x0 + PADDING + SWATCH_WIDTH / 2, row_top + LINE_HEIGHT / 2),
            4,
            color.filled(),
        ))?;
        root.draw(&Text::new(
            key.clone(),
            (x0 + PADDING + SWATCH_WIDTH + PADDING / 2, row_top + 3),
            ("sans-serif", 14),
        ))?;
    }

    Ok(())
}
