//! Writes a synthetic grid file for trying out `gridplot`
//!
//! The field is a damped radial wave centered on the unit square.
//!
//! Usage:
//! ```bash
//! cargo run --bin sample_grid -- --nx 128 --ny 96
//! cargo run --bin gridplot
//! ```

use std::f64::consts::PI;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use gridplot::grid::{GridField, DEFAULT_GRID_FILE};

#[derive(Parser, Debug)]
#[command(name = "sample_grid")]
#[command(about = "Write a damped radial wave on the unit square as a grid file")]
struct Args {
    /// Output file
    #[arg(long, short, default_value = DEFAULT_GRID_FILE)]
    output: PathBuf,

    /// Number of cells along x (nx + 1 samples are written)
    #[arg(long, default_value = "64")]
    nx: usize,

    /// Number of cells along y (ny + 1 samples are written)
    #[arg(long, default_value = "64")]
    ny: usize,

    /// Wave number of the radial oscillation
    #[arg(long, default_value = "4.0")]
    waves: f64,
}

fn main() {
    gridplot::init_logging();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("✗ {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let field = damped_wave(args.nx, args.ny, args.waves)?;
    field
        .save(&args.output)
        .with_context(|| format!("cannot write '{}'", args.output.display()))?;

    let (rows, cols) = field.shape();
    info!("Wrote {} x {} grid", rows, cols);
    println!("✓ Saved {}", args.output.display());
    Ok(())
}

/// Sample `cos(2π k r) exp(-3 r)` with r the distance to (0.5, 0.5)
fn damped_wave(nx: usize, ny: usize, waves: f64) -> anyhow::Result<GridField> {
    let axis = |n: usize| -> Vec<f64> {
        if n == 0 {
            vec![0.5]
        } else {
            (0..=n).map(|i| i as f64 / n as f64).collect()
        }
    };
    let x = axis(nx);
    let y = axis(ny);

    let mut values = Vec::with_capacity(x.len() * y.len());
    for &yi in &y {
        for &xj in &x {
            let r = ((xj - 0.5).powi(2) + (yi - 0.5).powi(2)).sqrt();
            values.push((2.0 * PI * waves * r).cos() * (-3.0 * r).exp());
        }
    }

    Ok(GridField::new(x, y, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damped_wave_shape_and_peak() {
        let field = damped_wave(4, 2, 4.0).unwrap();
        assert_eq!(field.shape(), (3, 5));
        // Center sample (0.5, 0.5) has r = 0 -> value 1
        assert!((field.values[[1, 2]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_damped_wave_single_sample() {
        let field = damped_wave(0, 0, 1.0).unwrap();
        assert_eq!(field.shape(), (1, 1));
    }
}
