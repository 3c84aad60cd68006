//! # Butterfly-view Library
//!
//! Loads route trace files (as written by VRP solvers, one `Ruta` block per
//! route) and renders them as overlaid line plots for visual inspection.
//!
//! ## Features
//!
//! - **Strict parser**: empty route blocks are skipped, malformed coordinates abort
//! - **Pluggable surface**: render to PNG/SVG with `plotters`, or implement [`PlotSurface`]
//! - **Explicit selection**: candidates and the choice are passed in, nothing is read
//!   from the console or the working directory
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = butterfly_view::load_routes("rutas_grasp.txt")?;
//!     println!("{} routes", routes.len());
//!
//!     let mut surface = butterfly_view::PlotterSurface::new(
//!         "rutas_grasp.png",
//!         butterfly_view::PlotOptions::default(),
//!     );
//!     butterfly_view::render_routes(&routes, "GRASP routes", &mut surface)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Selecting a File
//!
//! ```rust,no_run
//! use butterfly_view::{discover_candidates, PlotOptions, PlotterSurface, Selection, SourceConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let candidates = discover_candidates(Path::new("."), &SourceConfig::default())?;
//!     let mut surface = PlotterSurface::new("routes.png", PlotOptions::default());
//!
//!     let report = butterfly_view::view(&candidates, &Selection::Index(1), None, &mut surface)?;
//!     println!("{}: {} routes", report.title, report.summary.route_count);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

pub use crate::core::error::{Error, Result};
pub use crate::core::model::{Bounds, Point, Route, RouteSet, RouteStats, RouteSummary};
pub use crate::core::options::{OutputFormat, OverwriteBehavior, PlotOptions};
pub use crate::core::parser::{load_routes, parse_reader, parse_str, ROUTE_MARKER};
pub use crate::core::render::{
    equal_aspect_ranges, render_routes, PlotSurface, PlotterSurface, Trace,
};
pub use crate::core::source::{
    default_title, discover_candidates, select_candidate, Selection, SourceConfig,
};

// Internal modules
mod core;

/// Outcome of a [`view`] call
#[derive(Debug, Clone)]
pub struct ViewReport {
    /// The route file that was rendered
    pub source: PathBuf,

    /// Title shown on the plot
    pub title: String,

    pub summary: RouteSummary,
}

/// Select a route file, parse it and render it
///
/// # Arguments
/// * `candidates` - Route files to choose from
/// * `selection` - 1-based index or file name of the file to show
/// * `title` - Plot title; defaults to "Visualization of <file name>"
/// * `surface` - Where the plot is presented
pub fn view<S: PlotSurface + ?Sized>(
    candidates: &[PathBuf],
    selection: &Selection,
    title: Option<&str>,
    surface: &mut S,
) -> Result<ViewReport> {
    let source = select_candidate(candidates, selection)?;
    inspect(source, title, surface)
}

/// Parse and render one route file
pub fn inspect<S: PlotSurface + ?Sized>(
    source: &Path,
    title: Option<&str>,
    surface: &mut S,
) -> Result<ViewReport> {
    let routes = load_routes(source)?;
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| default_title(source));

    render_routes(&routes, &title, surface)?;

    Ok(ViewReport {
        source: source.to_path_buf(),
        title,
        summary: routes.summary(),
    })
}
