use std::ops::Range;
use std::path::{Path, PathBuf};
use chrono::{Duration, NaiveDate, Utc};
use plotters::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::models::{ChartState, PricePoint};

const LINE_COLOR: RGBColor = RGBColor(75, 192, 192);
const POINT_COLOR: RGBColor = RGBColor(255, 215, 0);

/// Chart construction errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Drawing primitive the controller builds charts with
///
/// `destroy` takes the chart by value, so a chart can never be destroyed twice.
pub trait ChartSurface {
    type Chart;

    fn construct(&mut self, series: &[PricePoint]) -> Result<Self::Chart, ChartError>;

    fn destroy(&mut self, chart: Self::Chart);
}

enum Slot<C> {
    Empty,
    Bound(C),
}

/// Owns the single live chart
///
/// Replacing the series always destroys the live chart before the next one is
/// constructed. Dropping the controller shuts it down.
pub struct SeriesChartController<S: ChartSurface> {
    surface: S,
    slot: Slot<S::Chart>,
}

impl<S: ChartSurface> SeriesChartController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            slot: Slot::Empty,
        }
    }

    pub fn state(&self) -> ChartState {
        match self.slot {
            Slot::Empty => ChartState::Empty,
            Slot::Bound(_) => ChartState::Bound,
        }
    }

    /// Destroy the live chart (if any), then build one for `series`
    ///
    /// An empty series still gets an (empty) chart. If construction fails the
    /// controller is left `Empty`.
    pub fn replace_series(&mut self, series: &[PricePoint]) -> Result<(), ChartError> {
        if let Slot::Bound(chart) = std::mem::replace(&mut self.slot, Slot::Empty) {
            debug!("Destroying previous chart before replacement");
            self.surface.destroy(chart);
        }

        let chart = self.surface.construct(series)?;
        debug!("Chart bound to {} price points", series.len());
        self.slot = Slot::Bound(chart);

        Ok(())
    }

    /// Destroy the live chart, if any. Safe to call any number of times.
    pub fn shutdown(&mut self) {
        if let Slot::Bound(chart) = std::mem::replace(&mut self.slot, Slot::Empty) {
            debug!("Shutting down live chart");
            self.surface.destroy(chart);
        }
    }
}

impl<S: ChartSurface> Drop for SeriesChartController<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Handle to a chart rendered on disk
#[derive(Debug)]
pub struct ChartResource {
    id: Uuid,
    points: usize,
    path: PathBuf,
}

/// Renders price series as PNG line charts into one output file
pub struct PngChartSurface {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngChartSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSurface for PngChartSurface {
    type Chart = ChartResource;

    fn construct(&mut self, series: &[PricePoint]) -> Result<ChartResource, ChartError> {
        render_series(&self.path, series, self.width, self.height)?;

        let chart = ChartResource {
            id: Uuid::new_v4(),
            points: series.len(),
            path: self.path.clone(),
        };
        info!("🎨 Chart {} rendered to {} ({} points)", chart.id, chart.path.display(), chart.points);
        Ok(chart)
    }

    fn destroy(&mut self, chart: ChartResource) {
        match std::fs::remove_file(&chart.path) {
            Ok(_) => debug!("Chart {} removed from {}", chart.id, chart.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Chart {} already gone from {}", chart.id, chart.path.display())
            }
            Err(e) => warn!("Failed to remove chart file {}: {}", chart.path.display(), e),
        }
    }
}

/// Date and price ranges for the chart axes
///
/// Prices get 10% padding; degenerate ranges are widened so the axes stay drawable.
fn axis_bounds(series: &[PricePoint]) -> (Range<NaiveDate>, Range<f64>) {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        let today = Utc::now().date_naive();
        return (today - Duration::days(1)..today, 0.0..1.0);
    };

    let x_min = first.date;
    let x_max = if last.date > first.date {
        last.date
    } else {
        first.date + Duration::days(1)
    };

    let min_price = series.iter()
        .map(|p| p.price)
        .fold(f64::INFINITY, f64::min);
    let max_price = series.iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);

    let padding = ((max_price - min_price) * 0.1).max(0.5);
    let y_min = (min_price - padding).max(0.0);
    let y_max = max_price + padding;

    (x_min..x_max, y_min..y_max)
}

/// Draw `series` as a line chart into a PNG at `path`
fn render_series(
    path: &Path,
    series: &[PricePoint],
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let (x_range, y_range) = axis_bounds(series);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Gold Prices", ("sans-serif", 40.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price (PLN per 1g)")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

    if !series.is_empty() {
        chart
            .draw_series(LineSeries::new(
                series.iter().map(|p| (p.date, p.price)),
                LINE_COLOR.stroke_width(3),
            ))
            .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?;

        chart
            .draw_series(
                series
                    .iter()
                    .map(|p| Circle::new((p.date, p.price), 4, POINT_COLOR.filled())),
            )
            .map_err(|e| ChartError::Render(format!("Failed to draw points: {}", e)))?;
    }

    root.present()
        .map_err(|e| ChartError::Render(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(())
}
