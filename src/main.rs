//! gridplot - pseudocolor plot of a gridded scalar field
//!
//! Usage: `gridplot [PATH] [--config FILE] [--colormap NAME] [--output FILE]`
//!
//! PATH defaults to `plotpy.dat`: x samples, a blank line, y samples, a blank
//! line, then the (ny+1) x (nx+1) field values in row-major order.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use gridplot::config::PlotConfig;
use gridplot::grid::DEFAULT_GRID_FILE;
use gridplot::pipeline::{self, PlotTarget};
use gridplot::properties::{registry, PropertyReader};
use gridplot::render::palettes::palette_registry;

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Config file picked up from the working directory when --config is not given
const DEFAULT_CONFIG_FILE: &str = "gridplot.json";

#[derive(Parser, Debug)]
#[command(name = "gridplot", version)]
#[command(about = "Plot a gridded scalar field as a pseudocolor mesh with a color bar")]
struct Args {
    /// Grid data file
    #[arg(default_value = DEFAULT_GRID_FILE)]
    path: PathBuf,

    /// JSON object of plot properties (default: ./gridplot.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color map name (overrides `colormap`)
    #[arg(long)]
    colormap: Option<String>,

    /// Cell shading: nearest or flat (overrides `shading`)
    #[arg(long)]
    shading: Option<String>,

    /// Plot title (overrides `plot.title`)
    #[arg(long)]
    title: Option<String>,

    /// Figure width in pixels (overrides `plot.width`)
    #[arg(long)]
    width: Option<u32>,

    /// Figure height in pixels (overrides `plot.height`)
    #[arg(long)]
    height: Option<u32>,

    /// Write the figure to a PNG/SVG file instead of opening a window
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// List plot properties with their defaults and exit
    #[arg(long)]
    list_properties: bool,
}

fn main() {
    gridplot::init_logging();

    let args = Args::parse();

    if args.list_properties {
        print_properties();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let props = load_properties(args)?;
    let config = PlotConfig::from_properties(&props);
    debug!("Plot configuration: {:?}", config);

    let target = match &args.output {
        Some(out) => PlotTarget::File(out.clone()),
        None => PlotTarget::Window,
    };

    pipeline::load_and_plot(&args.path, &config, &target)
        .with_context(|| format!("failed to plot '{}'", args.path.display()))?;

    info!("Done");
    Ok(())
}

/// Merge the config file and command line overrides
fn load_properties(args: &Args) -> anyhow::Result<PropertyReader> {
    let mut props = match &args.config {
        Some(path) => PropertyReader::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            info!("Using properties from {}", DEFAULT_CONFIG_FILE);
            PropertyReader::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => PropertyReader::default(),
    };

    if let Some(colormap) = &args.colormap {
        props.set("colormap", colormap.as_str());
    }
    if let Some(shading) = &args.shading {
        props.set("shading", shading.as_str());
    }
    if let Some(title) = &args.title {
        props.set("plot.title", title.as_str());
    }
    if let Some(width) = args.width {
        props.set("plot.width", width.to_string());
    }
    if let Some(height) = args.height {
        props.set("plot.height", height.to_string());
    }

    Ok(props)
}

fn print_properties() {
    println!("Plot properties (set in {} or via --config):", DEFAULT_CONFIG_FILE);
    for def in registry().definitions() {
        let default = if def.default_value.is_empty() {
            "<empty>"
        } else {
            def.default_value.as_str()
        };
        println!("  {:<16} default: {:<10} {}", def.name, default, def.description);
        if let Some(values) = &def.valid_values {
            println!("  {:<16} values: {}", "", values.join(", "));
        }
    }

    let palettes = palette_registry();
    println!();
    println!("Color maps:");
    println!("  sequential: {}", palettes.sequential_palettes().join(", "));
    println!("  diverging:  {}", palettes.diverging_palettes().join(", "));
}
