//! Plot configuration for butterfly-view

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::Error;

/// Image format produced by the plotting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raster image
    #[default]
    Png,
    /// Vector image
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Infer the format from a file extension, if it is one we can write
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(Error::InvalidInput(format!(
                "Unsupported output format: {other}"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Overwrite behavior for existing output images
///
/// Interactive confirmation is the caller's business: the CLI asks the user
/// and resolves the answer to one of these before rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverwriteBehavior {
    /// Overwrite without asking
    Force,
    /// Never overwrite, fail if file exists (default)
    #[default]
    NeverOverwrite,
}

/// Options for the plotting surface
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Per-trace opacity in `0.0..=1.0`
    pub opacity: f64,

    /// Marker radius in pixels
    pub marker_size: u32,

    /// Line stroke width in pixels
    pub line_width: u32,

    pub format: OutputFormat,

    /// Behavior when destination file already exists
    pub overwrite: OverwriteBehavior,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            opacity: 0.6,
            marker_size: 4,
            line_width: 2,
            format: OutputFormat::default(),
            overwrite: OverwriteBehavior::default(),
        }
    }
}
