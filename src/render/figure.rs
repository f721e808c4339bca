//! Explicit figure description and the plotters drawing code
//!
//! A `Figure` carries everything the renderer needs (size, title, axes,
//! color bar). Nothing is taken from global plotting state: the same figure can
//! be drawn into an in-memory RGB buffer for the viewer or into a PNG/SVG file.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::cells::{CellLayout, Shading};
use super::colors::{interpolate_color, lerp, ColorPalette};
use crate::error::{PlotError, Result};
use crate::grid::GridField;

const MARGIN: u32 = 15;
const X_LABEL_AREA: u32 = 45;
const Y_LABEL_AREA: u32 = 65;
const COLORBAR_WIDTH: u32 = 120;
const COLORBAR_LABEL_AREA: u32 = 70;
const COLORBAR_STEPS: usize = 256;
const TITLE_FONT_SIZE: u32 = 24;

/// A figure holding one pseudocolor axes and its color bar
#[derive(Debug, Clone)]
pub struct Figure {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Optional caption above the plot
    pub title: Option<String>,
    pub axes: Axes,
    pub colorbar: Colorbar,
}

/// Axes of the pseudocolor plot
#[derive(Debug, Clone)]
pub struct Axes {
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// One data unit spans the same number of pixels on both axes
    pub equal: bool,
    pub shading: Shading,
    /// Color scale in data units
    pub palette: ColorPalette,
    /// Normalization range shown by the color bar
    pub value_range: (f64, f64),
}

/// Color bar attached to the right of the axes
#[derive(Debug, Clone)]
pub struct Colorbar {
    pub label: Option<String>,
    /// Approximate number of tick labels
    pub ticks: usize,
}

/// Pixels of a figure rendered in memory, RGB8 row-major
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Expand data ranges so one data unit covers the same pixel length on both axes
///
/// Ranges only grow, symmetrically around their centers.
pub fn equal_aspect_ranges(
    x: (f64, f64),
    y: (f64, f64),
    pixels: (u32, u32),
) -> ((f64, f64), (f64, f64)) {
    let (pw, ph) = (pixels.0 as f64, pixels.1 as f64);
    let (dx, dy) = (x.1 - x.0, y.1 - y.0);
    if pw <= 0.0 || ph <= 0.0 || dx <= 0.0 || dy <= 0.0 {
        return (x, y);
    }

    let units_per_pixel = (dx / pw).max(dy / ph);
    let expand = |r: (f64, f64), span: f64| {
        let center = (r.0 + r.1) / 2.0;
        (center - span / 2.0, center + span / 2.0)
    };

    (
        expand(x, units_per_pixel * pw),
        expand(y, units_per_pixel * ph),
    )
}

/// Draw the figure onto any plotters drawing area
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &CellLayout,
    figure: &Figure,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let area = match &figure.title {
        Some(title) => root.titled(title, ("sans-serif", TITLE_FONT_SIZE))?,
        None => root.clone(),
    };

    let (area_width, _) = area.dim_in_pixel();
    let split_at = area_width.saturating_sub(COLORBAR_WIDTH) as i32;
    let (plot_area, bar_area) = area.split_horizontally(split_at);

    // Plotting region left after margins and label areas
    let (pw, ph) = plot_area.dim_in_pixel();
    let inner = (
        pw.saturating_sub(2 * MARGIN + Y_LABEL_AREA),
        ph.saturating_sub(2 * MARGIN + X_LABEL_AREA),
    );

    let (x_range, y_range) = layout.extent();
    let (x_range, y_range) = if figure.axes.equal {
        equal_aspect_ranges(x_range, y_range, inner)
    } else {
        (x_range, y_range)
    };

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh();
        if let Some(label) = &figure.axes.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &figure.axes.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }

    let palette = &figure.axes.palette;
    chart.draw_series(layout.cells.iter().map(|cell| {
        let [r, g, b] = interpolate_color(cell.value, palette);
        Rectangle::new(
            [(cell.x0, cell.y0), (cell.x1, cell.y1)],
            RGBColor(r, g, b).filled(),
        )
    }))?;

    draw_colorbar(&bar_area, figure)?;

    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (vmin, vmax) = figure.axes.value_range;

    // Same vertical margins as the plot so the bar lines up with the axes
    let mut bar = ChartBuilder::on(area)
        .margin_top(MARGIN)
        .margin_bottom(MARGIN + X_LABEL_AREA)
        .margin_left(10)
        .margin_right(5)
        .right_y_label_area_size(COLORBAR_LABEL_AREA)
        .build_cartesian_2d(0.0..1.0, vmin..vmax)?;

    {
        let mut mesh = bar.configure_mesh();
        mesh.disable_mesh()
            .disable_x_axis()
            .y_labels(figure.colorbar.ticks);
        if let Some(label) = &figure.colorbar.label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }

    let palette = &figure.axes.palette;
    bar.draw_series(colorbar_bands(vmin, vmax, COLORBAR_STEPS).map(|(v0, v1)| {
        let [r, g, b] = interpolate_color(lerp(v0, v1, 0.5), palette);
        Rectangle::new([(0.0, v0), (1.0, v1)], RGBColor(r, g, b).filled())
    }))?;

    bar.draw_series(std::iter::once(Rectangle::new(
        [(0.0, vmin), (1.0, vmax)],
        BLACK.stroke_width(1),
    )))?;

    Ok(())
}

/// `steps` consecutive bands `(v0, v1)` covering `[vmin, vmax]`
fn colorbar_bands(vmin: f64, vmax: f64, steps: usize) -> impl Iterator<Item = (f64, f64)> {
    let at = move |k: usize| lerp(vmin, vmax, k as f64 / steps as f64);
    (0..steps).map(move |k| (at(k), at(k + 1)))
}

/// Draw the figure into an in-memory RGB buffer
pub fn render_rgb(field: &GridField, figure: &Figure) -> Result<RenderedPlot> {
    let layout = CellLayout::new(field, figure.axes.shading)?;
    debug!(
        "Rendering {} cells into {}x{} buffer",
        layout.cells.len(),
        figure.width,
        figure.height
    );

    let mut pixels = vec![0u8; figure.width as usize * figure.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (figure.width, figure.height))
            .into_drawing_area();
        draw_figure(&root, &layout, figure).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }

    Ok(RenderedPlot {
        width: figure.width,
        height: figure.height,
        pixels,
    })
}

/// Draw the figure into a file: SVG for `.svg`, otherwise a bitmap format chosen by extension
pub fn save_figure(field: &GridField, figure: &Figure, path: &Path) -> Result<()> {
    let layout = CellLayout::new(field, figure.axes.shading)?;
    let size = (figure.width, figure.height);

    let is_svg = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_figure(&root, &layout, figure).map_err(render_err)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_figure(&root, &layout, figure).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }

    debug!("Saved figure to {}", path.display());
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palettes::palette_registry;

    fn test_figure(field: &GridField) -> Figure {
        let (lo, hi) = field.value_range();
        let viridis = palette_registry().get("Viridis").unwrap();
        Figure {
            width: 400,
            height: 300,
            title: None,
            axes: Axes {
                x_label: None,
                y_label: None,
                equal: true,
                shading: Shading::Nearest,
                palette: ColorPalette::from_definition(viridis, lo, hi),
                value_range: (lo, hi),
            },
            colorbar: Colorbar {
                label: None,
                ticks: 5,
            },
        }
    }

    #[test]
    fn test_equal_aspect_expands_short_axis() {
        let (x, y) = equal_aspect_ranges((0.0, 2.0), (0.0, 1.0), (100, 100));
        assert_eq!(x, (0.0, 2.0));
        assert_eq!(y, (-0.5, 1.5));
    }

    #[test]
    fn test_equal_aspect_wide_canvas() {
        // 2:1 canvas with square data: x grows
        let (x, y) = equal_aspect_ranges((0.0, 1.0), (0.0, 1.0), (200, 100));
        assert_eq!(x, (-0.5, 1.5));
        assert_eq!(y, (0.0, 1.0));
    }

    #[test]
    fn test_equal_aspect_degenerate_inputs_unchanged() {
        assert_eq!(
            equal_aspect_ranges((0.0, 1.0), (0.0, 1.0), (0, 100)),
            ((0.0, 1.0), (0.0, 1.0))
        );
        assert_eq!(
            equal_aspect_ranges((1.0, 1.0), (0.0, 1.0), (100, 100)),
            ((1.0, 1.0), (0.0, 1.0))
        );
    }

    #[test]
    fn test_colorbar_bands_cover_range() {
        let bands: Vec<_> = colorbar_bands(-1.0, 3.0, 4).collect();
        assert_eq!(
            bands,
            vec![(-1.0, 0.0), (0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]
        );
    }

    #[test]
    fn test_colorbar_bands_extreme_range() {
        // Width overflows f64 but every band edge stays finite
        let bands: Vec<_> = colorbar_bands(-1e308, 1e308, COLORBAR_STEPS).collect();
        assert_eq!(bands.len(), COLORBAR_STEPS);
        assert_eq!(bands[0].0, -1e308);
        assert_eq!(bands[COLORBAR_STEPS - 1].1, 1e308);
        assert!(bands
            .iter()
            .all(|(v0, v1)| v0.is_finite() && v1.is_finite() && v0 <= v1));
    }

    #[test]
    #[ignore = "needs system fonts for axis labels"]
    fn test_render_rgb_extreme_values() {
        let field = GridField::parse("0 1\n\n0\n\n-1e308 1e308\n").unwrap();
        let figure = crate::config::PlotConfig::default().to_figure(&field);
        assert!(render_rgb(&field, &figure).is_ok());
    }

    #[test]
    fn test_render_rgb_rejects_bad_flat_grid() {
        let field = GridField::new(vec![0.0], vec![0.0], vec![1.0]).unwrap();
        let mut figure = test_figure(&field);
        figure.axes.shading = Shading::Flat;
        assert!(matches!(
            render_rgb(&field, &figure),
            Err(PlotError::Render(_))
        ));
    }

    #[test]
    #[ignore = "needs system fonts for axis labels"]
    fn test_render_rgb_buffer_size() {
        let field = GridField::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        let figure = test_figure(&field);
        let plot = render_rgb(&field, &figure).unwrap();

        assert_eq!(plot.pixels.len(), 400 * 300 * 3);
        // Background is white, some cell pixels are not
        assert!(plot.pixels.chunks(3).any(|p| p == [255, 255, 255]));
        assert!(plot.pixels.chunks(3).any(|p| p != [255, 255, 255]));
    }
}
