//! The render operation: dataset and column names in, drawn scatter plot out.
//!
//! `render` resolves the requested columns, groups points by the optional hue
//! column, fits padded axis ranges around the data, draws everything onto a
//! fresh figure and runs the display step. The returned `Figure` and `Axes`
//! stay usable after the call for saving or relabeling.

use crate::data::Dataset;
use crate::display;
use crate::figure::{Axes, Figure, Legend, Series};
use crate::palette::{ColorPalette, DEFAULT_POINT_COLOR};
use crate::RenderOptions;
use anyhow::Result;
use std::collections::HashMap;
use std::ops::Range;

/// Fraction of the data span added on each side of an axis
const RANGE_PAD: f64 = 0.05;

/// Render a scatter plot of `y_col` against `x_col` with default options.
///
/// With `hue_col` set, rows are grouped by that column's value and each group
/// gets its own color and legend entry. Fails if any named column is absent.
///
/// Each call draws into its own private buffer, so concurrent calls need no
/// synchronization.
pub fn render(
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    hue_col: Option<&str>,
) -> Result<(Figure, Axes)> {
    render_with(data, x_col, y_col, hue_col, &RenderOptions::default())
}

/// Render with explicit options (dpi, display behavior)
pub fn render_with(
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    hue_col: Option<&str>,
    options: &RenderOptions,
) -> Result<(Figure, Axes)> {
    let xs = data.numeric_column(x_col)?;
    let ys = data.numeric_column(y_col)?;

    let series = match hue_col {
        Some(name) => grouped_series(&xs, &ys, &data.column(name)?),
        None => vec![single_series(&xs, &ys)],
    };

    let plotted: usize = series.iter().map(|s| s.points.len()).sum();
    if plotted < data.len() {
        log::debug!(
            "omitted {} of {} rows with missing values",
            data.len() - plotted,
            data.len()
        );
    }

    let x_range = axis_range(extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0))));
    let y_range = axis_range(extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.1))));

    let legend = hue_col.map(|name| Legend {
        title: name.to_string(),
        entries: series
            .iter()
            .filter_map(|s| s.key.clone().map(|key| (key, s.color)))
            .collect(),
    });

    let axes = Axes::new(
        format!("Scatter Plot: {} vs {}", x_col, y_col),
        x_col.to_string(),
        y_col.to_string(),
        x_range,
        y_range,
        legend,
        series,
    );

    let mut figure = Figure::new(options.dpi)?;
    axes.draw_onto(&mut figure)?;
    display::show(&figure, options.display)?;

    Ok((figure, axes))
}

/// All rows as one unkeyed series in the default color. Rows missing either
/// coordinate are dropped.
fn single_series(xs: &[Option<f64>], ys: &[Option<f64>]) -> Series {
    let points = xs
        .iter()
        .zip(ys)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((*x, *y)),
            _ => None,
        })
        .collect();
    Series {
        key: None,
        color: DEFAULT_POINT_COLOR,
        points,
    }
}

/// One series per distinct hue value, ordered by first appearance in the
/// data. Rows missing a coordinate or with an empty hue cell are dropped.
fn grouped_series(xs: &[Option<f64>], ys: &[Option<f64>], hues: &[&str]) -> Vec<Series> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<(f64, f64)>> = HashMap::new();

    for ((x, y), hue) in xs.iter().zip(ys).zip(hues) {
        let (x, y) = match (x, y) {
            (Some(x), Some(y)) => (*x, *y),
            _ => continue,
        };
        if hue.is_empty() {
            continue;
        }
        if !grouped.contains_key(*hue) {
            order.push((*hue).to_string());
        }
        grouped.entry((*hue).to_string()).or_default().push((x, y));
    }

    let colors = ColorPalette::set2().assign_colors(&order);
    order
        .into_iter()
        .map(|key| {
            let points = grouped.remove(&key).unwrap_or_default();
            let color = colors[&key];
            Series {
                key: Some(key),
                color,
                points,
            }
        })
        .collect()
}

/// Smallest range covering the extent, padded on both sides. A single value
/// widens by one unit each way; no values at all fall back to the unit range.
fn axis_range(extent: Option<(f64, f64)>) -> Range<f64> {
    match extent {
        None => 0.0..1.0,
        Some((min, max)) if min == max => (min - 1.0)..(max + 1.0),
        Some((min, max)) => {
            let pad = (max - min) * RANGE_PAD;
            (min - pad)..(max + pad)
        }
    }
}

fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn render_headless(
        data: &Dataset,
        x_col: &str,
        y_col: &str,
        hue_col: Option<&str>,
    ) -> Result<(Figure, Axes)> {
        render_with(data, x_col, y_col, hue_col, &RenderOptions::headless())
    }

    #[test]
    fn test_basic_scatter() {
        let data = make_dataset(&["x", "y"], &[&["1", "4"], &["2", "5"], &["3", "6"]]);
        let (figure, axes) = render_headless(&data, "x", "y", None).unwrap();

        assert_eq!(axes.title(), "Scatter Plot: x vs y");
        assert_eq!(axes.x_label(), "x");
        assert_eq!(axes.y_label(), "y");
        assert_eq!(axes.point_count(), 3);
        assert!(axes.legend().is_none());
        assert_eq!(figure.width(), 1000);
        assert_eq!(figure.height(), 600);
    }

    #[test]
    fn test_title_uses_column_names_verbatim() {
        let data = make_dataset(&["Sepal Length", "Sepal Width"], &[&["5.1", "3.5"]]);
        let (_, axes) = render_headless(&data, "Sepal Length", "Sepal Width", None).unwrap();

        assert_eq!(axes.title(), "Scatter Plot: Sepal Length vs Sepal Width");
        assert_eq!(axes.x_label(), "Sepal Length");
        assert_eq!(axes.y_label(), "Sepal Width");
    }

    #[test]
    fn test_unkeyed_series_uses_default_color() {
        let data = make_dataset(&["x", "y"], &[&["1", "1"]]);
        let (_, axes) = render_headless(&data, "x", "y", None).unwrap();

        assert_eq!(axes.series().len(), 1);
        assert_eq!(axes.series()[0].key, None);
        assert_eq!(axes.series()[0].color, DEFAULT_POINT_COLOR);
    }

    #[test]
    fn test_hue_grouping() {
        let data = make_dataset(
            &["x", "y", "g"],
            &[
                &["1", "4", "a"],
                &["2", "5", "b"],
                &["3", "6", "a"],
                &["4", "7", "b"],
            ],
        );
        let (_, axes) = render_headless(&data, "x", "y", Some("g")).unwrap();

        assert_eq!(axes.series().len(), 2);
        assert_eq!(axes.point_count(), 4);

        let keys: Vec<_> = axes.series().iter().map(|s| s.key.clone().unwrap()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let legend = axes.legend().unwrap();
        assert_eq!(legend.title, "g");
        assert_eq!(legend.entries.len(), 2);
        assert_eq!(legend.entries[0].0, "a");
        assert_eq!(legend.entries[1].0, "b");
    }

    #[test]
    fn test_hue_groups_get_distinct_colors() {
        let data = make_dataset(
            &["x", "y", "g"],
            &[&["1", "1", "a"], &["2", "2", "b"], &["3", "3", "c"]],
        );
        let (_, axes) = render_headless(&data, "x", "y", Some("g")).unwrap();

        let colors: std::collections::HashSet<_> = axes
            .series()
            .iter()
            .map(|s| (s.color.0, s.color.1, s.color.2))
            .collect();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_hue_order_follows_first_appearance() {
        let data = make_dataset(
            &["x", "y", "g"],
            &[&["1", "1", "zebra"], &["2", "2", "apple"], &["3", "3", "zebra"]],
        );
        let (_, axes) = render_headless(&data, "x", "y", Some("g")).unwrap();

        let keys: Vec<_> = axes.series().iter().map(|s| s.key.clone().unwrap()).collect();
        assert_eq!(keys, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_hue_colors_cycle_past_palette_size() {
        let rows: Vec<Vec<String>> = (0..9)
            .map(|i| vec![i.to_string(), i.to_string(), format!("g{}", i)])
            .collect();
        let data = Dataset::new(
            vec!["x".to_string(), "y".to_string(), "g".to_string()],
            rows,
        );
        let (_, axes) = render_headless(&data, "x", "y", Some("g")).unwrap();

        assert_eq!(axes.series().len(), 9);
        assert_eq!(axes.series()[8].color, axes.series()[0].color);
    }

    #[test]
    fn test_missing_x_column_fails() {
        let data = make_dataset(&["x", "y"], &[&["1", "2"]]);
        let err = render_headless(&data, "nope", "y", None).unwrap_err();
        assert!(err.to_string().contains("Column 'nope' not found"));
    }

    #[test]
    fn test_missing_y_column_fails() {
        let data = make_dataset(&["x", "y"], &[&["1", "2"]]);
        let err = render_headless(&data, "x", "nope", None).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_missing_hue_column_fails() {
        let data = make_dataset(&["x", "y"], &[&["1", "2"]]);
        let err = render_headless(&data, "x", "y", Some("nope")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_rows_with_missing_values_are_omitted() {
        let data = make_dataset(
            &["x", "y"],
            &[&["1", "4"], &["", "5"], &["3", "abc"], &["4", "7"]],
        );
        let (_, axes) = render_headless(&data, "x", "y", None).unwrap();
        assert_eq!(axes.point_count(), 2);
    }

    #[test]
    fn test_rows_with_empty_hue_are_omitted() {
        let data = make_dataset(
            &["x", "y", "g"],
            &[&["1", "4", "a"], &["2", "5", ""], &["3", "6", "a"]],
        );
        let (_, axes) = render_headless(&data, "x", "y", Some("g")).unwrap();

        assert_eq!(axes.series().len(), 1);
        assert_eq!(axes.point_count(), 2);
    }

    #[test]
    fn test_empty_dataset_renders_with_unit_ranges() {
        let data = make_dataset(&["x", "y"], &[]);
        let (figure, axes) = render_headless(&data, "x", "y", None).unwrap();

        assert_eq!(axes.point_count(), 0);
        assert_eq!(axes.x_range(), 0.0..1.0);
        assert_eq!(axes.y_range(), 0.0..1.0);
        assert_eq!(figure.width(), 1000);
    }

    #[test]
    fn test_ranges_are_padded_around_the_data() {
        let data = make_dataset(&["x", "y"], &[&["0", "0"], &["10", "20"]]);
        let (_, axes) = render_headless(&data, "x", "y", None).unwrap();

        assert_eq!(axes.x_range(), -0.5..10.5);
        assert_eq!(axes.y_range(), -1.0..21.0);
    }

    #[test]
    fn test_single_value_column_widens_by_one() {
        let data = make_dataset(&["x", "y"], &[&["5", "2"], &["5", "3"]]);
        let (_, axes) = render_headless(&data, "x", "y", None).unwrap();
        assert_eq!(axes.x_range(), 4.0..6.0);
    }

    #[test]
    fn test_dpi_scales_the_figure() {
        let data = make_dataset(&["x", "y"], &[&["1", "2"]]);
        let options = RenderOptions {
            dpi: 50,
            ..RenderOptions::headless()
        };
        let (figure, _) = render_with(&data, "x", "y", None, &options).unwrap();

        assert_eq!(figure.width(), 500);
        assert_eq!(figure.height(), 300);
    }

    #[test]
    fn test_oversized_dpi_is_rejected() {
        let data = make_dataset(&["x", "y"], &[&["1", "2"]]);
        let options = RenderOptions {
            dpi: 5000,
            ..RenderOptions::headless()
        };
        let err = render_with(&data, "x", "y", None, &options).unwrap_err();
        assert!(err.to_string().contains("dpi"));
    }

    #[test]
    fn test_axis_range_helper() {
        assert_eq!(axis_range(None), 0.0..1.0);
        assert_eq!(axis_range(Some((2.0, 2.0))), 1.0..3.0);
        assert_eq!(axis_range(Some((0.0, 100.0))), -5.0..105.0);
    }

    #[test]
    fn test_extent_helper() {
        assert_eq!(extent(vec![3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(extent(vec![]), None);
        assert_eq!(extent(vec![-4.0]), Some((-4.0, -4.0)));
    }
}
