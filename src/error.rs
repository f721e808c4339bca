use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a grid data file
#[derive(Debug, Error)]
pub enum GridError {
    /// File missing or unreadable
    #[error("cannot read grid file '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer than three blank-line-separated blocks
    #[error("expected 3 blank-line-separated blocks (x, y, values), found {found}")]
    Format { found: usize },

    /// A token that is not a floating-point literal
    #[error("invalid number '{token}' on line {line} ({block} block)")]
    Parse {
        block: Block,
        line: usize,
        token: String,
    },

    /// Field length differs from len(x) * len(y)
    #[error(
        "cannot reshape {found} values into a {rows}x{cols} grid (expected {expected} values)"
    )]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
}

/// The three sections of a grid file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    X,
    Y,
    Values,
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Block::X => "x",
            Block::Y => "y",
            Block::Values => "values",
        };
        f.write_str(name)
    }
}

/// Errors that can occur anywhere in the plot pipeline
#[derive(Debug, Error)]
pub enum PlotError {
    /// Loading or reshaping the grid failed
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Configuration error (unreadable config file, bad JSON, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drawing the figure failed
    #[error("Render error: {0}")]
    Render(String),

    /// The interactive viewer could not be started
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// I/O error outside of grid loading (writing outputs)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
