//! Route rendering
//!
//! The renderer is a thin pass-through: routes become [`Trace`]s and are handed
//! to a [`PlotSurface`] in one call. [`PlotterSurface`] is the production
//! surface, drawing an overlaid line-and-marker chart with `plotters`.

use log::{debug, info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::core::model::{Bounds, RouteSet};
use crate::core::options::{OutputFormat, OverwriteBehavior, PlotOptions};

/// Outer chart margin in pixels
const CHART_MARGIN: u32 = 20;
/// Height reserved for x-axis labels
const X_LABEL_AREA: u32 = 40;
/// Width reserved for y-axis labels
const Y_LABEL_AREA: u32 = 60;
/// Fraction of the data span added around the routes
const PADDING: f64 = 0.05;

/// One route as a sequence of `(x, y)` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub points: Vec<(f64, f64)>,
}

/// A plotting surface that presents overlaid traces under a title
///
/// `plot` is synchronous: it returns once the plot has been fully presented.
pub trait PlotSurface {
    fn plot(&mut self, traces: &[Trace], title: &str) -> Result<()>;
}

/// Render every route of `routes` on `surface`
///
/// Fails with [`Error::EmptyRoute`] before touching the surface if any route has
/// no points.
pub fn render_routes<S: PlotSurface + ?Sized>(
    routes: &RouteSet,
    title: &str,
    surface: &mut S,
) -> Result<()> {
    let traces = routes
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| {
            if route.is_empty() {
                return Err(Error::EmptyRoute { index: i + 1 });
            }
            Ok(Trace {
                points: route.points().iter().map(|p| (p.x(), p.y())).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Rendering {} traces titled '{title}'", traces.len());
    surface.plot(&traces, title)
}

/// Axis ranges giving one data unit the same pixel length on both axes
///
/// The ranges are centred on `bounds` and padded slightly. Degenerate bounds
/// (a single point, or no points at all) get a unit span. Fails with
/// [`Error::Render`] when the ranges cannot be represented, e.g. coordinates
/// near `f64::MAX` whose span overflows.
pub fn equal_aspect_ranges(
    bounds: Option<Bounds>,
    plot_width_px: u32,
    plot_height_px: u32,
) -> Result<(Range<f64>, Range<f64>)> {
    let bounds = bounds.unwrap_or(Bounds {
        min_x: 0.0,
        max_x: 0.0,
        min_y: 0.0,
        max_y: 0.0,
    });

    let (mut span_x, mut span_y) = (bounds.width(), bounds.height());
    if span_x <= 0.0 && span_y <= 0.0 {
        span_x = 1.0;
        span_y = 1.0;
    }
    span_x *= 1.0 + 2.0 * PADDING;
    span_y *= 1.0 + 2.0 * PADDING;

    let width_px = plot_width_px.max(1) as f64;
    let height_px = plot_height_px.max(1) as f64;
    let units_per_px = (span_x / width_px).max(span_y / height_px);

    let half_x = units_per_px * width_px / 2.0;
    let half_y = units_per_px * height_px / 2.0;
    let (cx, cy) = bounds.center();

    let x_range = (cx - half_x)..(cx + half_x);
    let y_range = (cy - half_y)..(cy + half_y);

    let bounds_ok = [x_range.start, x_range.end, y_range.start, y_range.end]
        .iter()
        .all(|v| v.is_finite());
    if !bounds_ok {
        return Err(Error::Render(
            "coordinate span too large to plot".to_string(),
        ));
    }
    // Huge magnitudes can swallow the padding entirely
    if x_range.end <= x_range.start || y_range.end <= y_range.start {
        return Err(Error::Render(
            "coordinate span too small to plot at this magnitude".to_string(),
        ));
    }

    Ok((x_range, y_range))
}

/// Axis ranges for `traces`, rejecting coordinates the backend cannot draw
fn plot_ranges(
    traces: &[Trace],
    plot_width_px: u32,
    plot_height_px: u32,
) -> Result<(Range<f64>, Range<f64>)> {
    let non_finite = traces
        .iter()
        .position(|t| t.points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()));
    if let Some(i) = non_finite {
        return Err(Error::Render(format!(
            "route {} has a non-finite coordinate",
            i + 1
        )));
    }

    equal_aspect_ranges(trace_bounds(traces), plot_width_px, plot_height_px)
}

fn trace_bounds(traces: &[Trace]) -> Option<Bounds> {
    let mut points = traces.iter().flat_map(|t| t.points.iter());
    let &(x, y) = points.next()?;
    let init = Bounds {
        min_x: x,
        max_x: x,
        min_y: y,
        max_y: y,
    };
    Some(points.fold(init, |b, &(x, y)| Bounds {
        min_x: b.min_x.min(x),
        max_x: b.max_x.max(x),
        min_y: b.min_y.min(y),
        max_y: b.max_y.max(y),
    }))
}

fn render_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}

/// Check if the destination exists and apply the overwrite behavior
pub fn check_overwrite_permission(path: &Path, behavior: &OverwriteBehavior) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    match behavior {
        OverwriteBehavior::Force => {
            warn!("⚠️  Overwriting existing file: {}", path.display());
            Ok(())
        }
        OverwriteBehavior::NeverOverwrite => Err(Error::OutputExists(path.to_path_buf())),
    }
}

/// Plotting surface writing a PNG or SVG image with `plotters`
pub struct PlotterSurface {
    output: PathBuf,
    options: PlotOptions,
}

impl PlotterSurface {
    pub fn new(output: impl Into<PathBuf>, options: PlotOptions) -> Self {
        Self {
            output: output.into(),
            options,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl PlotSurface for PlotterSurface {
    fn plot(&mut self, traces: &[Trace], title: &str) -> Result<()> {
        // Fail before the backend creates the output file
        plot_ranges(traces, self.options.width, self.options.height)?;
        check_overwrite_permission(&self.output, &self.options.overwrite)?;

        let size = (self.options.width, self.options.height);
        match self.options.format {
            OutputFormat::Png => {
                let root = BitMapBackend::new(&self.output, size).into_drawing_area();
                draw_traces(root, traces, title, &self.options)?;
            }
            OutputFormat::Svg => {
                let root = SVGBackend::new(&self.output, size).into_drawing_area();
                draw_traces(root, traces, title, &self.options)?;
            }
        }

        info!(
            "Rendered {} routes to {} ({})",
            traces.len(),
            self.output.display(),
            self.options.format
        );
        Ok(())
    }
}

fn draw_traces<DB>(
    root: DrawingArea<DB, Shift>,
    traces: &[Trace],
    title: &str,
    options: &PlotOptions,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(render_error)?;
    let area = root
        .titled(title, ("sans-serif", 24))
        .map_err(render_error)?;

    let (area_w, area_h) = area.dim_in_pixel();
    let plot_w = area_w.saturating_sub(2 * CHART_MARGIN + Y_LABEL_AREA);
    let plot_h = area_h.saturating_sub(2 * CHART_MARGIN + X_LABEL_AREA);
    let (x_range, y_range) = plot_ranges(traces, plot_w, plot_h)?;

    let mut chart = ChartBuilder::on(&area)
        .margin(CHART_MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    chart.configure_mesh().draw().map_err(render_error)?;

    for (i, trace) in traces.iter().enumerate() {
        let color = Palette99::pick(i).mix(options.opacity);

        chart
            .draw_series(LineSeries::new(
                trace.points.iter().copied(),
                color.stroke_width(options.line_width),
            ))
            .map_err(render_error)?;

        chart
            .draw_series(
                trace
                    .points
                    .iter()
                    .map(|&p| Circle::new(p, options.marker_size, color.filled())),
            )
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
