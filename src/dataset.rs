//! Validated, row-major storage for the vectors being clustered.

use crate::error::{Error, Result};

/// An immutable set of `n` vectors that all share dimension `d`.
///
/// Rows are stored contiguously; construction rejects empty input, zero-width
/// rows, ragged rows and non-finite coordinates, so every consumer can index
/// rows without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    n: usize,
    dim: usize,
    data: Box<[f64]>,
}

impl Dataset {
    /// Build a dataset from owned or borrowed rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(Error::InvalidArgument {
                name: "data",
                message: "vectors must have at least one dimension",
            });
        }

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(Error::InconsistentData {
                    row,
                    expected: dim,
                    found: values.len(),
                });
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(Error::NonFinite { row, col });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            n: rows.len(),
            dim,
            data: data.into_boxed_slice(),
        })
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Dimension shared by every vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Borrow row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Copy the rows at `indices` (in that order) into owned vectors.
    pub fn gather(&self, indices: &[usize]) -> Vec<Vec<f64>> {
        indices.iter().map(|&i| self.row(i).to_vec()).collect()
    }
}
