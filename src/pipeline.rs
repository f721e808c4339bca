//! Plot generation pipeline
//!
//! The pipeline:
//! 1. Reads and parses the grid file
//! 2. Builds the figure from the configuration
//! 3. Renders the figure (in memory or to a file)
//! 4. Shows it in the viewer, blocking until closed

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PlotConfig;
use crate::error::Result;
use crate::grid::{load_grid, GridField};
use crate::profile::PhaseTimer;
use crate::render::{figure, viewer, Figure};

/// Where the rendered figure goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotTarget {
    /// Interactive window, blocks until closed
    Window,
    /// PNG or SVG file (by extension)
    File(PathBuf),
}

/// Load a grid file and build the figure that draws it, without rendering
pub fn prepare_plot(path: &Path, config: &PlotConfig) -> Result<(GridField, Figure)> {
    println!("[1/3] Loading grid from {}", path.display());
    let field = load_grid(path)?;
    let (rows, cols) = field.shape();
    info!("  Grid: {} x {} ({} values)", rows, cols, rows * cols);

    let figure = config.to_figure(&field);
    info!(
        "  Figure: {}x{} px, colormap {}, {:?} shading",
        figure.width, figure.height, config.colormap, figure.axes.shading
    );
    Ok((field, figure))
}

/// Read, parse, reshape and plot a grid file
pub fn load_and_plot(path: &Path, config: &PlotConfig, target: &PlotTarget) -> Result<()> {
    let mut timer = PhaseTimer::start("load_and_plot");

    let (field, figure) = prepare_plot(path, config)?;
    timer.checkpoint("grid loaded");

    match target {
        PlotTarget::File(out) => {
            println!("[2/3] Rendering to {}", out.display());
            figure::save_figure(&field, &figure, out)?;
            timer.checkpoint("figure saved");
            println!(
                "✓ Saved {} ({}×{})",
                out.display(),
                figure.width,
                figure.height
            );
        }
        PlotTarget::Window => {
            println!("[2/3] Rendering figure");
            let plot = figure::render_rgb(&field, &figure)?;
            timer.checkpoint("figure rendered");

            println!("[3/3] Opening viewer");
            let title = window_title(path, &figure);
            // The grid is no longer needed while the window is open
            drop(field);
            viewer::show(plot, &title)?;
            timer.checkpoint("viewer closed");
        }
    }

    Ok(())
}

fn window_title(path: &Path, figure: &Figure) -> String {
    match &figure.title {
        Some(title) => title.clone(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "gridplot".to_string()),
    }
}
