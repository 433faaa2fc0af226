//! Plotting infrastructure for timing histograms and configuration bar charts
//!
//! This module renders charts using the [`plotters`] crate. Charts are saved as PNG
//! files with a fixed 1000x600 resolution.
//!
//! Each chart owns its drawing area for the duration of a single call. The bitmap
//! buffer is released when the function returns.

use super::buckets::Histogram;
use super::data_structures::{FrequencyTable, SummaryStatistics};
use crate::analysis::constants::CHART_SIZE;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Fill colour of configuration bars
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Space around every chart, in pixels
const CHART_MARGIN: u32 = 20;

/// Gap between the x axis and the first character of a rotated label
const CATEGORY_LABEL_GAP: i32 = 8;

/// Creates a histogram of elapsed times with median and mean markers and saves it as PNG
///
/// # Arguments
/// * `histogram` - Pre-computed bins of the elapsed time column
/// * `stats` - Statistics of the same column; median and mean are drawn as dashed lines
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If an error occurred during chart generation
///
/// # Chart Properties
/// * Title: "Histogram of Elapsed Times"
/// * Bars: one per bin, semi-transparent blue with black edges
/// * Y axis: whole counts only
/// * Median: red dashed line, labelled with 2 decimals
/// * Mean: green dashed line, labelled with 2 decimals
pub fn create_timing_histogram(
    histogram: &Histogram,
    stats: &SummaryStatistics,
    output_path: &Path,
) -> Result<()> {
    if histogram.counts.is_empty() {
        return Err(PlotError::InvalidData(
            "Histogram has no bins".to_string(),
        ));
    }

    let drawing_area = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    draw_timing_histogram(&drawing_area, histogram, stats)?;

    // Ensure everything is properly rendered and saved
    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn draw_timing_histogram<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    histogram: &Histogram,
    stats: &SummaryStatistics,
) -> Result<()> {
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    // Leave headroom above the tallest bar for the legend
    let counts = count_range(histogram.max_count(), 1.05);
    let y_max = counts.end;

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption("Histogram of Elapsed Times", ("sans-serif", 30))
        .margin(CHART_MARGIN)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(histogram.lower..histogram.upper, counts)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart_context
        .configure_mesh()
        .x_desc("Elapsed Time (ms)")
        .y_desc("Frequency")
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let bar_fill = BLUE.mix(0.7).filled();
    chart_context
        .draw_series(
            histogram
                .bins()
                .map(|(left, right, count)| Rectangle::new([(left, 0), (right, count)], bar_fill)),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart_context
        .draw_series(
            histogram
                .bins()
                .filter(|(_, _, count)| *count > 0)
                .map(|(left, right, count)| {
                    Rectangle::new([(left, 0), (right, count)], BLACK.stroke_width(1))
                }),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let markers = [
        (stats.median, RED, format!("Median: {:.2} ms", stats.median)),
        (stats.mean, GREEN, format!("Mean: {:.2} ms", stats.mean)),
    ];
    for (x, color, label) in markers {
        chart_context
            .draw_series(DashedLineSeries::new(
                [(x, 0), (x, y_max)],
                10,
                6,
                color.stroke_width(2),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(label)
            .legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 20, ly)], color.stroke_width(2))
            });
    }

    chart_context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Creates a bar chart with one bar per configuration label and saves it as PNG
///
/// Bars appear in the order of the frequency table (descending count).
/// Each label is rotated and hangs below the centre of its bar, so that long
/// configuration names stay readable.
///
/// # Arguments
/// * `frequencies` - Occurrence counts per configuration label
/// * `title` - Chart title displayed at the top of the plot
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If an error occurred during chart generation
pub fn create_frequency_bar_chart(
    frequencies: &FrequencyTable,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    if frequencies.is_empty() {
        return Err(PlotError::InvalidData(
            "Frequency table cannot be empty".to_string(),
        ));
    }

    let drawing_area = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    draw_frequency_bar_chart(&drawing_area, frequencies, title)?;

    // Ensure everything is properly rendered and saved
    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

fn draw_frequency_bar_chart<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    frequencies: &FrequencyTable,
    title: &str,
) -> Result<()> {
    let labels: Vec<&str> = frequencies
        .entries()
        .iter()
        .map(|(label, _)| label.as_str())
        .collect();
    let max_count = frequencies
        .entries()
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1);

    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(title, ("sans-serif", 26))
        .margin(CHART_MARGIN)
        .x_label_area_size(category_label_area(&labels))
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(labels.len()), count_range(max_count, 1.1))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Category labels are drawn below, so the mesh only labels the count axis
    chart_context
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .x_labels(0)
        .x_desc("Configuration")
        .y_desc("Frequency")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let bar_fill = SKY_BLUE.mix(0.7).filled();
    let bars = |style: ShapeStyle| {
        frequencies
            .entries()
            .iter()
            .enumerate()
            .map(move |(index, (_, count))| {
                let (left, right) = category_slot(index);
                let mut bar = Rectangle::new([(left, 0), (right, *count)], style);
                bar.set_margin(0, 0, 6, 6);
                bar
            })
    };

    chart_context
        .draw_series(bars(bar_fill))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart_context
        .draw_series(bars(BLACK.stroke_width(1)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let label_style = category_label_style();
    for (index, label) in labels.iter().enumerate() {
        let (x, y) = chart_context.backend_coord(&(index as f64, 0));
        drawing_area
            .draw(&Text::new(
                *label,
                (x, y + CATEGORY_LABEL_GAP),
                label_style.clone(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// Y range of a count axis with some headroom above `max_count`.
///
/// The axis is integral, so every tick is a whole count.
fn count_range(max_count: usize, headroom: f64) -> Range<usize> {
    0..((max_count as f64 * headroom).ceil() as usize).max(1)
}

/// X range of a category chart: one unit-wide slot per label, centred on its index
fn category_range(count: usize) -> Range<f64> {
    -0.5..count as f64 - 0.5
}

/// Horizontal extent of the slot holding category `index`
fn category_slot(index: usize) -> (f64, f64) {
    let centre = index as f64;
    (centre - 0.5, centre + 0.5)
}

/// Style of category labels: rotated a quarter turn clockwise, reading downwards
/// from the anchor and centred on it horizontally.
fn category_label_style() -> TextStyle<'static> {
    ("sans-serif", 16)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center))
}

/// Height of the area below the x axis, sized to the longest rotated label
fn category_label_area(labels: &[&str]) -> u32 {
    let longest_label = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);
    (longest_label as u32 * 9 + 40).clamp(60, 300)
}
