//! Cell geometry for pseudocolor meshes

use crate::error::{PlotError, Result};
use crate::grid::GridField;

/// How mesh cells are laid out relative to the samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// One cell per sample, centered on it; edges at midpoints between samples
    #[default]
    Nearest,
    /// Cells span consecutive samples; last row and column of values unused
    Flat,
}

impl Shading {
    /// Parse from string value
    ///
    /// Validation against allowed values happens in the property reader.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "flat" => Self::Flat,
            _ => Self::Nearest, // "nearest" or any other value
        }
    }
}

/// One colored quadrilateral of the mesh, in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub value: f64,
}

/// Cell edges along one axis
///
/// `Nearest` returns `n + 1` edges, `Flat` returns the samples themselves.
pub fn cell_edges(coords: &[f64], shading: Shading) -> Vec<f64> {
    match shading {
        Shading::Flat => coords.to_vec(),
        Shading::Nearest => match coords {
            [] => Vec::new(),
            [c] => vec![c - 0.5, c + 0.5],
            _ => {
                let n = coords.len();
                let mut edges = Vec::with_capacity(n + 1);
                edges.push(coords[0] - (coords[1] - coords[0]) / 2.0);
                edges.extend(coords.windows(2).map(|w| (w[0] + w[1]) / 2.0));
                edges.push(coords[n - 1] + (coords[n - 1] - coords[n - 2]) / 2.0);
                edges
            }
        },
    }
}

/// Cell layout of a field: edges on both axes plus the colored cells
#[derive(Debug, Clone)]
pub struct CellLayout {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// Cells with finite values only; non-finite values are left unpainted
    pub cells: Vec<Cell>,
}

impl CellLayout {
    /// Compute the cells of a field for the given shading
    pub fn new(field: &GridField, shading: Shading) -> Result<Self> {
        let (rows, cols) = field.shape();
        if shading == Shading::Flat && (rows < 2 || cols < 2) {
            return Err(PlotError::Render(format!(
                "flat shading needs at least 2 samples per axis, got {}x{}",
                rows, cols
            )));
        }

        let x_edges = cell_edges(&field.mesh.column_coords(), shading);
        let y_edges = cell_edges(&field.mesh.row_coords(), shading);

        let (n_rows, n_cols) = match shading {
            Shading::Nearest => (rows, cols),
            Shading::Flat => (rows - 1, cols - 1),
        };

        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            for j in 0..n_cols {
                let value = field.values[[i, j]];
                if !value.is_finite() {
                    continue;
                }
                cells.push(Cell {
                    x0: x_edges[j],
                    x1: x_edges[j + 1],
                    y0: y_edges[i],
                    y1: y_edges[i + 1],
                    value,
                });
            }
        }

        Ok(CellLayout {
            x_edges,
            y_edges,
            cells,
        })
    }

    /// Data extent `((x_min, x_max), (y_min, y_max))` covered by the cell edges
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        (span(&self.x_edges), span(&self.y_edges))
    }
}

fn span(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Mesh;
    use ndarray::array;

    fn small_field() -> GridField {
        GridField::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap()
    }

    #[test]
    fn test_shading_parse() {
        assert_eq!(Shading::parse("flat"), Shading::Flat);
        assert_eq!(Shading::parse("FLAT"), Shading::Flat);
        assert_eq!(Shading::parse("nearest"), Shading::Nearest);
        assert_eq!(Shading::parse("gouraud"), Shading::Nearest);
    }

    #[test]
    fn test_nearest_edges() {
        assert_eq!(
            cell_edges(&[0.0, 1.0, 3.0], Shading::Nearest),
            vec![-0.5, 0.5, 2.0, 4.0]
        );
        assert_eq!(cell_edges(&[2.0], Shading::Nearest), vec![1.5, 2.5]);
        assert!(cell_edges(&[], Shading::Nearest).is_empty());
    }

    #[test]
    fn test_flat_edges_are_samples() {
        assert_eq!(
            cell_edges(&[0.0, 1.0, 3.0], Shading::Flat),
            vec![0.0, 1.0, 3.0]
        );
    }

    #[test]
    fn test_nearest_layout() {
        let layout = CellLayout::new(&small_field(), Shading::Nearest).unwrap();
        assert_eq!(layout.cells.len(), 6);
        assert_eq!(
            layout.cells[5],
            Cell {
                x0: 1.5,
                x1: 2.5,
                y0: 0.5,
                y1: 1.5,
                value: 6.0
            }
        );
        assert_eq!(layout.extent(), ((-0.5, 2.5), (-0.5, 1.5)));
    }

    #[test]
    fn test_layout_follows_mesh_coordinates() {
        let mut field = small_field();
        field.mesh = Mesh::from_axes(&array![10.0, 20.0, 30.0], &array![-1.0, 1.0]);

        let layout = CellLayout::new(&field, Shading::Flat).unwrap();
        assert_eq!(layout.x_edges, vec![10.0, 20.0, 30.0]);
        assert_eq!(layout.y_edges, vec![-1.0, 1.0]);
        assert_eq!(layout.extent(), ((10.0, 30.0), (-1.0, 1.0)));
    }

    #[test]
    fn test_flat_layout_drops_last_row_and_column() {
        let layout = CellLayout::new(&small_field(), Shading::Flat).unwrap();
        let values: Vec<f64> = layout.cells.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(layout.extent(), ((0.0, 2.0), (0.0, 1.0)));
    }

    #[test]
    fn test_flat_needs_two_samples() {
        let field = GridField::new(vec![0.0, 1.0], vec![0.0], vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            CellLayout::new(&field, Shading::Flat),
            Err(PlotError::Render(_))
        ));
    }

    #[test]
    fn test_non_finite_cells_skipped() {
        let field = GridField::new(vec![0.0, 1.0], vec![0.0], vec![f64::NAN, 2.0]).unwrap();
        let layout = CellLayout::new(&field, Shading::Nearest).unwrap();
        assert_eq!(layout.cells.len(), 1);
        assert_eq!(layout.cells[0].value, 2.0);
    }
}
