//! gridplot library
//!
//! Reads gridded scalar fields from plain-text files and draws them as
//! pseudocolor meshes with a color bar.
//!
//! Module organization:
//! - `grid`: file parsing, mesh expansion, reshaping, writing
//! - `render`: palettes, cell geometry, drawing and the viewer window
//! - `properties` / `config`: property defaults and plot configuration
//! - `pipeline`: read → parse → reshape → render → display

pub mod config;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod profile;
pub mod properties;
pub mod render;

pub use error::{GridError, PlotError, Result};

/// Default `RUST_LOG` filter for the binaries
pub const DEFAULT_LOG_FILTER: &str = "warn,gridplot=info,sample_grid=info";

/// Install the tracing subscriber (stderr, `RUST_LOG` or the default filter)
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
