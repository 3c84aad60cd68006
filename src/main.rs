//! # Butterfly-view CLI
//!
//! Command-line interface for the butterfly-view library.
//! Lists route files, lets the user pick one and renders it as an image.

use anyhow::{bail, Context, Result};
use butterfly_view::{
    discover_candidates, inspect, select_candidate, Error, OutputFormat, OverwriteBehavior,
    PlotOptions, PlotSurface, PlotterSurface, Selection, SourceConfig, Trace,
};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};

mod cli;

/// Command-line interface for butterfly-view
#[derive(Parser)]
#[command(name = "butterfly-view")]
#[command(about = "Overlaid plot viewer for route trace files")]
#[command(long_about = "Renders the routes of a route file as overlaid line plots:
  butterfly-view                         # Pick a rutas_*.txt file from a menu
  butterfly-view --choice 2              # Pick the second file without prompting
  butterfly-view rutas_grasp.txt         # Render a specific file
  butterfly-view rutas_grasp.txt -o grasp.svg

File Overwrite Behavior:
  By default, you'll be prompted if the output image exists
  --force                          # Overwrite without asking
  --no-clobber                     # Never overwrite, fail if file exists")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Route file to render; when omitted, rutas_*.txt files in --dir are offered
    file: Option<PathBuf>,

    /// Directory searched for route files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Menu choice (1-based number or file name) instead of prompting
    #[arg(short, long)]
    choice: Option<String>,

    /// Output image path (defaults to <file stem>.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format: png or svg (defaults to the output extension, then png)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Plot title (defaults to "Visualization of <file name>")
    #[arg(long)]
    title: Option<String>,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Per-route opacity between 0 and 1
    #[arg(long, default_value_t = 0.6)]
    opacity: f64,

    /// Parse and summarize the routes without rendering
    #[arg(long)]
    dry_run: bool,

    /// Print the route summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Force overwrite existing files without prompting
    #[arg(short, long)]
    force: bool,

    /// Never overwrite existing files (fail if destination exists)
    #[arg(long)]
    no_clobber: bool,
}

/// Surface used by --dry-run: reports what would be plotted
struct DryRunSurface {
    output: PathBuf,
}

impl PlotSurface for DryRunSurface {
    fn plot(&mut self, traces: &[Trace], title: &str) -> butterfly_view::Result<()> {
        eprintln!(
            "🔍 [DRY RUN] Would plot {} routes titled '{title}' to {}",
            traces.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Resolve the image format from CLI arguments
fn resolve_format(format: Option<OutputFormat>, output: Option<&Path>) -> OutputFormat {
    format
        .or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or_default()
}

/// Resolve the output image path from CLI arguments
fn resolve_output(source: &Path, output: Option<&Path>, format: OutputFormat) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            // Auto-generate filename in the current directory
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "routes".to_string());
            PathBuf::from(format!("{stem}.{}", format.extension()))
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🦋 Butterfly-view v{} starting...", env!("BUTTERFLY_VERSION"));
    }

    // Validate conflicting flags
    if cli.force && cli.no_clobber {
        bail!("--force and --no-clobber cannot be used together");
    }
    if !(0.0..=1.0).contains(&cli.opacity) {
        bail!("--opacity must be between 0 and 1, got {}", cli.opacity);
    }

    let (candidates, selection) = match &cli.file {
        Some(file) => (vec![file.clone()], Selection::Index(1)),
        None => {
            let candidates = discover_candidates(&cli.dir, &SourceConfig::default())
                .with_context(|| format!("Failed to list route files in {}", cli.dir.display()))?;
            if candidates.is_empty() {
                return Err(Error::NoCandidates {
                    dir: cli.dir.clone(),
                }
                .into());
            }

            let selection = match &cli.choice {
                Some(choice) => choice.parse()?,
                None => {
                    let stdin = std::io::stdin();
                    cli::prompt_selection(&candidates, &mut stdin.lock(), &mut std::io::stderr())?
                }
            };
            (candidates, selection)
        }
    };

    let source = select_candidate(&candidates, &selection)?.to_path_buf();
    let format = resolve_format(cli.format, cli.output.as_deref());
    let output = resolve_output(&source, cli.output.as_deref(), format);

    eprintln!("📄 Route file: {}", source.display());

    let report = if cli.dry_run {
        let mut surface = DryRunSurface {
            output: output.clone(),
        };
        inspect(&source, cli.title.as_deref(), &mut surface)?
    } else {
        let overwrite = if cli.force {
            OverwriteBehavior::Force
        } else if cli.no_clobber {
            OverwriteBehavior::NeverOverwrite
        } else {
            let stdin = std::io::stdin();
            cli::confirm_overwrite(&output, &mut stdin.lock(), &mut std::io::stderr())?
        };
        let options = PlotOptions {
            width: cli.width,
            height: cli.height,
            opacity: cli.opacity,
            format,
            overwrite,
            ..Default::default()
        };

        eprintln!("📁 Saving to: {}", output.display());
        let mut surface = PlotterSurface::new(&output, options);
        let report = inspect(&source, cli.title.as_deref(), &mut surface)
            .with_context(|| format!("Failed to render {}", source.display()))?;
        eprintln!("✅ Plot written to {}", output.display());
        report
    };

    let summary = &report.summary;
    info!(
        "📊 {} routes, {} points, total length {:.2}",
        summary.route_count, summary.point_count, summary.total_length
    );

    if cli.json {
        let value = serde_json::json!({
            "source": report.source,
            "title": report.title,
            "output": if cli.dry_run { None } else { Some(&output) },
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    Ok(())
}
