use std::fmt;

/// Errors reported by the fixed-size containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// A sequence index was outside `[0, len)`.
    OutOfRange { index: usize, len: usize },
    /// A matrix coordinate was outside the matrix.
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Every slot of a sequence is already occupied.
    Full { capacity: usize },
    /// A diagonal was requested from a non-square matrix.
    NotSquare { rows: usize, cols: usize },
    /// A `rows × cols` matrix cannot be allocated.
    TooLarge { rows: usize, cols: usize },
    /// Stored cells do not match the declared shape.
    ShapeMismatch {
        rows: usize,
        cols: usize,
        cells: usize,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "cell ({row}, {col}) out of bounds for {rows}x{cols} matrix"
            ),
            Self::Full { capacity } => write!(f, "sequence is full (capacity {capacity})"),
            Self::NotSquare { rows, cols } => {
                write!(f, "diagonal of non-square {rows}x{cols} matrix")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "cannot allocate a {rows}x{cols} matrix")
            }
            Self::ShapeMismatch { rows, cols, cells } => {
                write!(f, "{cells} cells do not fill a {rows}x{cols} matrix")
            }
        }
    }
}

impl std::error::Error for ContainerError {}
