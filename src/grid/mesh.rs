use ndarray::{Array1, Array2};

use crate::error::GridError;

/// Rectangular coordinate mesh, both arrays shaped (len(y), len(x))
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl Mesh {
    /// Expand two coordinate vectors into a mesh (`X[i][j] = x[j]`, `Y[i][j] = y[i]`)
    pub fn from_axes(x: &Array1<f64>, y: &Array1<f64>) -> Self {
        let shape = (y.len(), x.len());
        Mesh {
            x: Array2::from_shape_fn(shape, |(_, j)| x[j]),
            y: Array2::from_shape_fn(shape, |(i, _)| y[i]),
        }
    }

    /// (rows, cols) of the mesh
    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// x coordinate of each column, read from the first row of `X`
    pub fn column_coords(&self) -> Vec<f64> {
        if self.x.nrows() == 0 {
            return Vec::new();
        }
        self.x.row(0).to_vec()
    }

    /// y coordinate of each row, read from the first column of `Y`
    pub fn row_coords(&self) -> Vec<f64> {
        if self.y.ncols() == 0 {
            return Vec::new();
        }
        self.y.column(0).to_vec()
    }
}

/// Reshape a flat row-major sequence into `rows x cols`
pub fn reshape(values: Vec<f64>, rows: usize, cols: usize) -> Result<Array2<f64>, GridError> {
    let expected = rows * cols;
    if values.len() != expected {
        return Err(GridError::ShapeMismatch {
            rows,
            cols,
            expected,
            found: values.len(),
        });
    }

    // Length checked above, so the only remaining failure is overflow of the shape
    Array2::from_shape_vec((rows, cols), values).map_err(|_| GridError::ShapeMismatch {
        rows,
        cols,
        expected,
        found: expected,
    })
}
