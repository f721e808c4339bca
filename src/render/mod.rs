//! Pseudocolor rendering
//!
//! - `palettes`: named color maps embedded from palettes.json
//! - `colors`: value → RGB interpolation
//! - `cells`: mesh cell geometry per shading mode
//! - `figure`: explicit figure description and plotters drawing
//! - `viewer`: blocking window

pub mod cells;
pub mod colors;
pub mod figure;
pub mod palettes;
pub mod viewer;

pub use cells::Shading;
pub use figure::{Axes, Colorbar, Figure, RenderedPlot};
