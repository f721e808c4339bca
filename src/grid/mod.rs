//! Grid data files: loading, reshaping and writing
//!
//! File layout (blank-line separated):
//! ```text
//! x_0 x_1 ... x_nx
//!
//! y_0 y_1 ... y_ny
//!
//! z_00 z_01 ... z_0nx z_10 ... z_ny,nx   (row-major, (ny+1) x (nx+1))
//! ```
//! Line breaks inside a block are not significant.

pub mod mesh;
pub mod parse;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::error::{Block, GridError};
pub use mesh::Mesh;
use parse::{parse_numbers, split_blocks};

/// Default data file name written by the simulation codes
pub const DEFAULT_GRID_FILE: &str = "plotpy.dat";

/// A scalar field sampled on a rectangular mesh
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    /// x samples (columns)
    pub x: Array1<f64>,
    /// y samples (rows)
    pub y: Array1<f64>,
    /// Coordinate mesh, shape (len(y), len(x))
    pub mesh: Mesh,
    /// Field values, shape (len(y), len(x))
    pub values: Array2<f64>,
}

impl GridField {
    /// Build a field from coordinate vectors and flat row-major values
    pub fn new(x: Vec<f64>, y: Vec<f64>, values: Vec<f64>) -> Result<Self, GridError> {
        let values = mesh::reshape(values, y.len(), x.len())?;
        let x = Array1::from(x);
        let y = Array1::from(y);
        Ok(GridField {
            mesh: Mesh::from_axes(&x, &y),
            x,
            y,
            values,
        })
    }

    /// Parse grid file content
    pub fn parse(content: &str) -> Result<Self, GridError> {
        let blocks = split_blocks(content);
        if blocks.len() < 3 {
            return Err(GridError::Format {
                found: blocks.len(),
            });
        }
        if blocks.len() > 3 {
            warn!(
                "Ignoring {} extra block(s) starting at line {}",
                blocks.len() - 3,
                blocks[3].first_line()
            );
        }

        let x = parse_numbers(&blocks[0], Block::X)?;
        let y = parse_numbers(&blocks[1], Block::Y)?;
        let z = parse_numbers(&blocks[2], Block::Values)?;
        debug!(
            "Parsed blocks: {} x samples, {} y samples, {} values",
            x.len(),
            y.len(),
            z.len()
        );

        Self::new(x, y, z)
    }

    /// (rows, cols) = (len(y), len(x))
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Min and max of the finite values, or None if there are none
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Color normalization range: finite min/max, widened when degenerate
    ///
    /// A constant field is padded by 0.5 or a relative 1e-6, whichever is
    /// larger, so the range has nonzero width at any magnitude.
    pub fn value_range(&self) -> (f64, f64) {
        match self.finite_range() {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((v, _)) => {
                let pad = 0.5f64.max(v.abs() * 1e-6);
                let (lo, hi) = (v - pad, v + pad);
                if lo.is_finite() && hi.is_finite() {
                    (lo, hi)
                } else if v > 0.0 {
                    (v - 2.0 * pad, v)
                } else {
                    (v, v + 2.0 * pad)
                }
            }
            None => (0.0, 1.0),
        }
    }

    /// Write the field in grid file format, one number per line
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for x in &self.x {
            writeln!(out, "{}", x)?;
        }
        writeln!(out)?;
        for y in &self.y {
            writeln!(out, "{}", y)?;
        }
        writeln!(out)?;
        for z in &self.values {
            writeln!(out, "{}", z)?;
        }
        Ok(())
    }

    /// Write the field to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let file = fs::File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()
    }
}

/// Read and parse a grid file
pub fn load_grid(path: &Path) -> Result<GridField, GridError> {
    let content = fs::read_to_string(path).map_err(|source| GridError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    GridField::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_small_grid() {
        let file = write_temp("0\n1\n2\n\n0\n1\n\n1\n2\n3\n4\n5\n6\n");
        let grid = load_grid(file.path()).unwrap();

        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.mesh.dim(), (2, 3));
        assert_eq!(grid.mesh.x, array![[0.0, 1.0, 2.0], [0.0, 1.0, 2.0]]);
        assert_eq!(grid.mesh.y, array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        assert_eq!(grid.values, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_load_general_shape() {
        // nx = 3, ny = 2 -> field of shape (3, 4)
        let z: Vec<String> = (0..12).map(|i| format!("{}.5", i)).collect();
        let content = format!("0 0.25 0.5 0.75\n\n-1 0 1\n\n{}\n", z.join(" "));
        let grid = GridField::parse(&content).unwrap();

        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.values[[2, 3]], 11.5);
        assert_eq!(grid.values[[1, 0]], 4.5);
    }

    #[test]
    fn test_short_values_block_is_shape_mismatch() {
        let file = write_temp("0 1 2\n\n0 1\n\n1 2 3 4 5\n");
        let err = load_grid(file.path()).unwrap_err();
        assert!(matches!(
            err,
            GridError::ShapeMismatch {
                expected: 6,
                found: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_x_is_parse_error() {
        let file = write_temp("0 abc 2\n\n0 1\n\n1 2 3 4 5 6\n");
        let err = load_grid(file.path()).unwrap_err();
        assert!(matches!(
            err,
            GridError::Parse {
                block: Block::X,
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_two_sections_is_format_error() {
        let file = write_temp("0 1 2\n\n0 1\n");
        let err = load_grid(file.path()).unwrap_err();
        assert!(matches!(err, GridError::Format { found: 2 }));
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.dat");
        let err = load_grid(&path).unwrap_err();
        match err {
            GridError::FileAccess { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_blocks_are_ignored() {
        let grid = GridField::parse("0 1\n\n0\n\n5 6\n\nnot numbers here\n").unwrap();
        assert_eq!(grid.values, array![[5.0, 6.0]]);
    }

    #[test]
    fn test_save_then_load() {
        let grid = GridField::new(
            vec![0.0, 0.5, 1.0],
            vec![-2.0, 2.0],
            vec![1e-3, -4.25, 7.0, 0.0, 12.5, -1e6],
        )
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        grid.save(file.path()).unwrap();
        let loaded = load_grid(file.path()).unwrap();

        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_value_range() {
        let grid = GridField::new(vec![0.0, 1.0], vec![0.0], vec![f64::NAN, 3.0]).unwrap();
        assert_eq!(grid.finite_range(), Some((3.0, 3.0)));
        assert_eq!(grid.value_range(), (2.5, 3.5));

        let grid = GridField::new(vec![0.0, 1.0], vec![0.0], vec![-1.0, 4.0]).unwrap();
        assert_eq!(grid.value_range(), (-1.0, 4.0));

        let grid = GridField::new(vec![0.0], vec![0.0], vec![f64::INFINITY]).unwrap();
        assert_eq!(grid.finite_range(), None);
        assert_eq!(grid.value_range(), (0.0, 1.0));
    }

    #[test]
    fn test_value_range_large_constant_field() {
        for v in [1e20, -1e20, f64::MAX, f64::MIN] {
            let grid = GridField::new(vec![0.0, 1.0], vec![0.0], vec![v, v]).unwrap();
            let (lo, hi) = grid.value_range();
            assert!(lo.is_finite() && hi.is_finite(), "{v}: ({lo}, {hi})");
            assert!(hi > lo, "{v}: ({lo}, {hi})");
            assert!(lo <= v && v <= hi, "{v}: ({lo}, {hi})");
        }
    }
}
