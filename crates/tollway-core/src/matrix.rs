//! The [`Matrix`] type: a fixed-size 2D grid of optional cells.
//!
//! Cells are addressed by `(row, column)`. Whole rows, columns and the two
//! main diagonals can be extracted as a [`FixedVec`] of borrowed cells with
//! [`axis`](Matrix::axis).

use std::fmt;

use crate::error::ContainerError;
use crate::vector::FixedVec;

/// Which line of a [`Matrix`] to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Column,
    /// `n == 0` selects top-left→bottom-right, anything else
    /// bottom-left→top-right. Square matrices only.
    Diagonal,
}

/// A `rows × cols` grid of optional cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MatrixParts<T>")
)]
pub struct Matrix<T> {
    cells: Vec<Option<T>>,
    rows: usize,
    cols: usize,
}

/// Unchecked field values of a deserialized [`Matrix`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MatrixParts<T> {
    cells: Vec<Option<T>>,
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<MatrixParts<T>> for Matrix<T> {
    type Error = ContainerError;

    fn try_from(parts: MatrixParts<T>) -> Result<Self, ContainerError> {
        let MatrixParts { cells, rows, cols } = parts;
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(ContainerError::ShapeMismatch {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, rows, cols })
    }
}

impl<T> Matrix<T> {
    /// Create a matrix with every cell empty.
    ///
    /// Fails with [`TooLarge`](ContainerError::TooLarge) when the cell count
    /// overflows or the cells cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ContainerError> {
        let too_large = ContainerError::TooLarge { rows, cols };
        let len = rows.checked_mul(cols).ok_or(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize_with(len, || None);
        Ok(Self { cells, rows, cols })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, ContainerError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> ContainerError {
        ContainerError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Read cell `(row, col)`. `Ok(None)` means the cell is empty.
    pub fn get(&self, row: usize, col: usize) -> Result<Option<&T>, ContainerError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].as_ref())
    }

    /// Store `value` at `(row, col)`, returning the previous occupant.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<Option<T>, ContainerError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].replace(value))
    }

    /// Empty cell `(row, col)`, returning its previous occupant.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<T>, ContainerError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].take())
    }

    /// Whether cell `(row, col)` holds a value.
    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, ContainerError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].is_some())
    }

    /// Empty every cell.
    pub fn fill_none(&mut self) {
        for c in self.cells.iter_mut() {
            *c = None;
        }
    }

    /// The first occupied cell of `row` at column `start` or later, with its
    /// column index.
    ///
    /// `start == cols` is accepted and yields `None`, so a cursor can step
    /// past the last column without an error.
    pub fn row_from(
        &self,
        row: usize,
        start: usize,
    ) -> Result<Option<(usize, &T)>, ContainerError> {
        if row >= self.rows || start > self.cols {
            return Err(self.out_of_bounds(row, start));
        }
        let base = row * self.cols;
        Ok(self.cells[base + start..base + self.cols]
            .iter()
            .enumerate()
            .find_map(|(j, c)| c.as_ref().map(|v| (start + j, v))))
    }

    /// Extract the `n`-th row or column, or one of the main diagonals.
    ///
    /// The returned sequence borrows the cells and keeps empty cells as
    /// empty slots, so its capacity is the line length.
    pub fn axis(&self, axis: Axis, n: usize) -> Result<FixedVec<&T>, ContainerError> {
        let slots: Vec<Option<&T>> = match axis {
            Axis::Row => {
                if n >= self.rows {
                    return Err(self.out_of_bounds(n, 0));
                }
                let base = n * self.cols;
                self.cells[base..base + self.cols]
                    .iter()
                    .map(Option::as_ref)
                    .collect()
            }
            Axis::Column => {
                if n >= self.cols {
                    return Err(self.out_of_bounds(0, n));
                }
                (0..self.rows)
                    .map(|i| self.cells[i * self.cols + n].as_ref())
                    .collect()
            }
            Axis::Diagonal => {
                if !self.is_square() {
                    return Err(ContainerError::NotSquare {
                        rows: self.rows,
                        cols: self.cols,
                    });
                }
                let size = self.rows;
                if n == 0 {
                    (0..size).map(|k| self.cells[k * size + k].as_ref()).collect()
                } else {
                    (0..size)
                        .map(|k| self.cells[(size - 1 - k) * size + k].as_ref())
                        .collect()
                }
            }
        };
        Ok(FixedVec::from_slots(slots))
    }
}

impl<T: PartialEq> Matrix<T> {
    /// Whether the matrix is square and `m[i][j] == m[j][i]` for every cell.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in 0..i {
                if self.cells[i * self.cols + j] != self.cells[j * self.cols + i] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// One `|a  b  c|` line per row, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "|")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, "  ")?;
                }
                match &self.cells[i * self.cols + j] {
                    Some(v) => write!(f, "{v}")?,
                    None => write!(f, ".")?,
                }
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize, cols: usize) -> Matrix<usize> {
        let mut m = Matrix::new(rows, cols).unwrap();
        for i in 0..rows {
            for j in 0..cols {
                m.set(i, j, i * 10 + j).unwrap();
            }
        }
        m
    }

    fn line(v: FixedVec<&usize>) -> Vec<usize> {
        v.into_iter().copied().collect()
    }

    #[test]
    fn get_set_and_bounds() {
        let mut m: Matrix<char> = Matrix::new(2, 3).unwrap();
        assert_eq!(m.is_occupied(1, 2), Ok(false));
        m.set(1, 2, 'x').unwrap();
        assert_eq!(m.get(1, 2), Ok(Some(&'x')));
        assert_eq!(m.is_occupied(1, 2), Ok(true));
        assert_eq!(
            m.get(2, 0),
            Err(ContainerError::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(m.set(0, 3, 'y').is_err());
        assert_eq!(m.take(1, 2), Ok(Some('x')));
        assert_eq!(m.is_occupied(1, 2), Ok(false));
    }

    #[test]
    fn rows_and_columns() {
        let m = numbered(3, 4);
        assert_eq!(line(m.axis(Axis::Row, 1).unwrap()), vec![10, 11, 12, 13]);
        assert_eq!(line(m.axis(Axis::Column, 3).unwrap()), vec![3, 13, 23]);
        assert!(m.axis(Axis::Row, 3).is_err());
        assert!(m.axis(Axis::Column, 4).is_err());
    }

    #[test]
    fn diagonals_of_square_matrix() {
        let m = numbered(3, 3);
        assert_eq!(line(m.axis(Axis::Diagonal, 0).unwrap()), vec![0, 11, 22]);
        assert_eq!(line(m.axis(Axis::Diagonal, 1).unwrap()), vec![20, 11, 2]);
    }

    #[test]
    fn diagonal_requires_square() {
        let m = numbered(2, 3);
        assert_eq!(
            m.axis(Axis::Diagonal, 0).unwrap_err(),
            ContainerError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn axis_keeps_empty_slots() {
        let mut m: Matrix<u8> = Matrix::new(2, 4).unwrap();
        m.set(0, 2, 9).unwrap();
        let row = m.axis(Axis::Row, 0).unwrap();
        assert_eq!(row.capacity(), 4);
        assert_eq!(row.occupied(), 1);
        assert_eq!(row.get(2), Ok(Some(&&9)));
    }

    #[test]
    fn row_cursor() {
        let mut m: Matrix<char> = Matrix::new(1, 5).unwrap();
        m.set(0, 1, 'a').unwrap();
        m.set(0, 3, 'b').unwrap();
        assert_eq!(m.row_from(0, 0), Ok(Some((1, &'a'))));
        assert_eq!(m.row_from(0, 2), Ok(Some((3, &'b'))));
        assert_eq!(m.row_from(0, 4), Ok(None));
        assert_eq!(m.row_from(0, 5), Ok(None));
        assert!(m.row_from(0, 6).is_err());
        assert!(m.row_from(1, 0).is_err());
    }

    #[test]
    fn symmetry() {
        let mut m: Matrix<i32> = Matrix::new(3, 3).unwrap();
        assert!(m.is_symmetric());
        m.set(0, 2, 5).unwrap();
        assert!(!m.is_symmetric());
        m.set(2, 0, 5).unwrap();
        assert!(m.is_symmetric());
        assert!(!Matrix::<i32>::new(2, 3).unwrap().is_symmetric());
        m.fill_none();
        assert_eq!(m.is_occupied(0, 2), Ok(false));
    }

    #[test]
    fn oversized_matrices_are_refused() {
        assert_eq!(
            Matrix::<u8>::new(usize::MAX, 2),
            Err(ContainerError::TooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
        let side = 1 << (usize::BITS / 2 - 1);
        assert!(Matrix::<u64>::new(side, side).is_err());
        assert_eq!(Matrix::<u8>::new(0, 7).unwrap().rows(), 0);
    }

    #[test]
    fn display_marks_empty_cells() {
        let mut m: Matrix<u8> = Matrix::new(2, 2).unwrap();
        m.set(0, 0, 1).unwrap();
        m.set(1, 1, 2).unwrap();
        assert_eq!(m.to_string(), "|1  .|\n|.  2|");
    }
}
