//! Range and radial velocity plots of a radar object.
//!
//! The figure has two stacked panels sharing the time step axis: range on
//! top, radial velocity below. Each panel overlays the radar object series
//! and, when present in the log, the matching reference series.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::config::{FieldSchema, PlotConfig};
use crate::core::objects::ObjectId;
use crate::core::table::{ColumnTable, TableError};

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Plotting error: {0}")]
    PlottingError(String),

    #[error("Empty table: no time steps to plot")]
    EmptyTable,
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Zero line, drawn when a panel crosses zero.
const ZERO_LINE_COLOR: RGBColor = RGBColor(160, 160, 160);

/// One panel: the object series and an optional reference series.
struct Panel<'a> {
    object: &'a [f64],
    reference: Option<&'a [f64]>,
}

/// Default image path for an object, e.g. `object_3.png`.
pub fn default_output_name(object: ObjectId) -> String {
    format!("object_{}.png", object.index())
}

/// Plot an object's derived range and radial velocity against the reference.
///
/// The object's derived columns must already be in the table. Missing
/// reference columns are logged and skipped.
///
/// # Arguments
///
/// * `output_path` - Path to save the PNG image
/// * `table` - Radar log with derived columns
/// * `object` - Object to plot
/// * `schema` - Column naming
/// * `config` - Image size and colors
pub fn plot_object(
    output_path: &Path,
    table: &ColumnTable,
    object: ObjectId,
    schema: &FieldSchema,
    config: &PlotConfig,
) -> Result<()> {
    if table.num_rows() == 0 {
        return Err(VisualizationError::EmptyTable);
    }

    let columns = schema.object_columns(object);
    let panels = [
        Panel {
            object: table.column(&columns.range)?,
            reference: reference_column(table, &schema.reference_range),
        },
        Panel {
            object: table.column(&columns.radial_velocity)?,
            reference: reference_column(table, &schema.reference_velocity),
        },
    ];

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    let areas = root.split_evenly((2, 1));
    for (area, panel) in areas.iter().zip(panels.iter()) {
        draw_panel(area, panel, config)?;
    }

    root.present()
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    debug!(
        "Plotted {} over {} time steps to {}",
        columns.name,
        table.num_rows(),
        output_path.display()
    );
    Ok(())
}

fn reference_column<'a>(table: &'a ColumnTable, header: &str) -> Option<&'a [f64]> {
    let column = table.get(header);
    if column.is_none() {
        warn!("Reference column '{}' not found, plotting object only", header);
    }
    column
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    panel: &Panel<'_>,
    config: &PlotConfig,
) -> Result<()> {
    let steps = panel.object.len();
    let series = std::iter::once(panel.object).chain(panel.reference);
    let (y_min, y_max) = compute_bounds(series);
    let y_padding = (y_max - y_min) * 0.05;
    let x_max = steps.saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .build_cartesian_2d(0.0..x_max, (y_min - y_padding)..(y_max + y_padding))
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    if y_min < 0.0 && y_max > 0.0 {
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, 0.0), (x_max, 0.0)],
                ZERO_LINE_COLOR.stroke_width(1),
            ))
            .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;
    }

    let [r, g, b] = config.reference_color;
    if let Some(reference) = panel.reference {
        chart
            .draw_series(LineSeries::new(
                finite_points(reference),
                RGBColor(r, g, b).stroke_width(config.stroke_width),
            ))
            .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;
    }

    let [r, g, b] = config.object_color;
    chart
        .draw_series(LineSeries::new(
            finite_points(panel.object),
            RGBColor(r, g, b).stroke_width(config.stroke_width),
        ))
        .map_err(|e| VisualizationError::PlottingError(e.to_string()))?;

    Ok(())
}

/// `(time step, value)` pairs, skipping non-finite values.
fn finite_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(t, &v)| (t as f64, v))
        .collect()
}

/// Compute the (min, max) over all finite values of the given series.
fn compute_bounds<'a>(series: impl Iterator<Item = &'a [f64]>) -> (f64, f64) {
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;

    for v in series.flatten().copied().filter(|v| v.is_finite()) {
        if v < y_min { y_min = v; }
        if v > y_max { y_max = v; }
    }

    if y_min > y_max {
        return (-1.0, 1.0);
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    (y_min, y_max)
}
