//! Plot configuration from properties
//!
//! All default values come from plot_properties.json via `PropertyReader`;
//! this module only interprets them and turns them into an explicit `Figure`.

use tracing::warn;

use crate::grid::GridField;
use crate::properties::{PlotDimension, PropertyReader};
use crate::render::cells::Shading;
use crate::render::colors::ColorPalette;
use crate::render::figure::{Axes, Colorbar, Figure};
use crate::render::palettes::palette_registry;

/// Width used when `plot.width` is "auto"
const AUTO_WIDTH: u32 = 800;
/// Bounds for the height derived from the data aspect ratio
const AUTO_HEIGHT_MIN: u32 = 400;
const AUTO_HEIGHT_MAX: u32 = 1600;
/// Horizontal pixels taken by the color bar and label areas
const DECORATION_WIDTH: u32 = 200;
/// Vertical pixels taken by margins, tick labels and title
const DECORATION_HEIGHT: u32 = 100;

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Color map name, looked up case-insensitively in the palette registry
    pub colormap: String,

    /// Cell layout relative to the samples
    pub shading: Shading,

    /// Plot title (optional)
    pub title: Option<String>,

    /// Figure width (pixels or Auto)
    pub width: PlotDimension,

    /// Figure height (pixels or Auto, derived from the data aspect ratio)
    pub height: PlotDimension,

    /// X-axis label (optional)
    pub x_axis_label: Option<String>,

    /// Y-axis label (optional)
    pub y_axis_label: Option<String>,

    /// Scale both axes equally
    pub equal_axes: bool,

    /// Color bar label (optional)
    pub colorbar_label: Option<String>,

    /// Approximate number of color bar ticks
    pub colorbar_ticks: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from_properties(&PropertyReader::default())
    }
}

impl PlotConfig {
    /// Create config from plot properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        Self {
            colormap: props.get_enum("colormap"),
            shading: Shading::parse(&props.get_enum("shading")),
            title: props.get_optional_string("plot.title"),
            width: props.get_dimension("plot.width"),
            height: props.get_dimension("plot.height"),
            x_axis_label: props.get_optional_string("axis.x.label"),
            y_axis_label: props.get_optional_string("axis.y.label"),
            equal_axes: props.get_bool("axis.equal"),
            colorbar_label: props.get_optional_string("colorbar.label"),
            colorbar_ticks: props.get_i32_in_range("colorbar.ticks", 2, 20) as usize,
        }
    }

    /// Resolve figure dimensions to pixels
    ///
    /// Auto width is 800 px. Auto height follows the data aspect ratio
    /// (y extent / x extent) of the plotting region, clamped to [400, 1600].
    pub fn resolve_dimensions(&self, data_aspect: f64) -> (u32, u32) {
        let width = match self.width {
            PlotDimension::Pixels(px) => px,
            PlotDimension::Auto => AUTO_WIDTH,
        };

        let height = match self.height {
            PlotDimension::Pixels(px) => px,
            PlotDimension::Auto => {
                let aspect = if data_aspect.is_finite() && data_aspect > 0.0 {
                    data_aspect
                } else {
                    1.0
                };
                let plot_width = width.saturating_sub(DECORATION_WIDTH) as f64;
                let plot_height = (plot_width * aspect).round() as u32 + DECORATION_HEIGHT;
                plot_height.clamp(AUTO_HEIGHT_MIN, AUTO_HEIGHT_MAX)
            }
        };

        (width, height)
    }

    /// Build the color scale for a value range
    ///
    /// Falls back to the default sequential palette if the name is unknown.
    pub fn to_palette(&self, value_range: (f64, f64)) -> ColorPalette {
        let registry = palette_registry();
        let definition = registry.get(&self.colormap).or_else(|| {
            warn!(
                "Unknown colormap '{}', using the default sequential palette",
                self.colormap
            );
            registry.default_sequential()
        });

        match definition {
            Some(def) => ColorPalette::from_definition(def, value_range.0, value_range.1),
            None => ColorPalette::new(),
        }
    }

    /// Build the figure that draws this field
    pub fn to_figure(&self, field: &GridField) -> Figure {
        let value_range = field.value_range();

        let aspect = {
            let dx = span(field.x.iter().copied());
            let dy = span(field.y.iter().copied());
            if dx > 0.0 && dy > 0.0 {
                dy / dx
            } else {
                1.0
            }
        };
        let (width, height) = self.resolve_dimensions(aspect);

        Figure {
            width,
            height,
            title: self.title.clone(),
            axes: Axes {
                x_label: self.x_axis_label.clone(),
                y_label: self.y_axis_label.clone(),
                equal: self.equal_axes,
                shading: self.shading,
                palette: self.to_palette(value_range),
                value_range,
            },
            colorbar: Colorbar {
                label: self.colorbar_label.clone(),
                ticks: self.colorbar_ticks,
            },
        }
    }
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if hi >= lo {
        hi - lo
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors::interpolate_color;

    fn field() -> GridField {
        GridField::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = PlotConfig::default();
        assert_eq!(config.colormap, "Viridis");
        assert_eq!(config.shading, Shading::Nearest);
        assert_eq!(config.title, None);
        assert_eq!(config.x_axis_label.as_deref(), Some("x"));
        assert_eq!(config.y_axis_label.as_deref(), Some("y"));
        assert!(config.equal_axes);
        assert_eq!(config.colorbar_ticks, 6);
    }

    #[test]
    fn test_config_from_overrides() {
        let mut props = PropertyReader::default();
        props.set("colormap", "jet");
        props.set("shading", "flat");
        props.set("plot.title", "Wave");
        props.set("plot.width", "1000");
        props.set("plot.height", "700");

        let config = PlotConfig::from_properties(&props);
        assert_eq!(config.colormap, "jet");
        assert_eq!(config.shading, Shading::Flat);
        assert_eq!(config.title.as_deref(), Some("Wave"));
        assert_eq!(config.resolve_dimensions(1.0), (1000, 700));
    }

    #[test]
    fn test_auto_dimensions_follow_aspect() {
        let config = PlotConfig::default();
        // Square data: 600 px plot + 100 px decorations
        assert_eq!(config.resolve_dimensions(1.0), (800, 700));
        // Very flat data clamps to the minimum height
        assert_eq!(config.resolve_dimensions(0.01), (800, 400));
        // Very tall data clamps to the maximum height
        assert_eq!(config.resolve_dimensions(10.0), (800, 1600));
        // Degenerate aspect treated as square
        assert_eq!(config.resolve_dimensions(f64::NAN), (800, 700));
    }

    #[test]
    fn test_every_colormap_value_has_a_palette() {
        let def = crate::properties::registry()
            .get_property("colormap")
            .unwrap();
        for name in def.valid_values.as_ref().unwrap() {
            assert!(
                palette_registry().get(name).is_some(),
                "colormap '{}' missing from palettes.json",
                name
            );
        }
    }

    #[test]
    fn test_to_figure() {
        let figure = PlotConfig::default().to_figure(&field());
        assert_eq!(figure.axes.value_range, (1.0, 6.0));
        let stops = &figure.axes.palette.stops;
        assert_eq!(stops.first().map(|s| s.value), Some(1.0));
        assert_eq!(stops.last().map(|s| s.value), Some(6.0));
        assert_eq!(figure.width, 800);
        // aspect 1/2 -> 300 px + 100 px decorations
        assert_eq!(figure.height, 400);
        assert!(figure.axes.equal);
    }

    #[test]
    fn test_unknown_colormap_falls_back() {
        let config = PlotConfig {
            colormap: "nope".to_string(),
            ..PlotConfig::default()
        };
        let palette = config.to_palette((0.0, 1.0));
        let viridis = palette_registry().get("Viridis").unwrap();
        assert_eq!(
            interpolate_color(0.0, &palette),
            viridis.get_colors_rgb()[0]
        );
    }
}
