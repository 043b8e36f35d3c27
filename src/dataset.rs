use std::num::NonZeroUsize;

use ndarray::{s, Array2, ArrayView2};

use crate::{RegressionErr, Result};

/// A feature matrix paired with its single-column label matrix.
///
/// Both matrices are validated on construction: they are non-empty, the labels have exactly one
/// column and both have the same amount of rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array2<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one row per observation.
    /// * `y` - The label matrix, one single-valued row per observation.
    ///
    /// # Returns
    /// A new `Dataset` or a shape error.
    pub fn new(x: Array2<f32>, y: Array2<f32>) -> Result<Self> {
        check_not_empty(x.view(), "feature")?;
        check_labels(y.view(), x.nrows())?;
        Ok(Self { x, y })
    }

    /// Returns the amount of observations.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// Always `false`, empty datasets are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView2<'_, f32> {
        self.y.view()
    }

    /// Splits the dataset into contiguous, non-overlapping batches of exactly `batch_size` rows,
    /// in row order. Trailing rows that do not fill a whole batch are left out.
    ///
    /// # Arguments
    /// * `batch_size` - The amount of rows per batch.
    ///
    /// # Returns
    /// An iterator over `(x, y)` batch views, or `RegressionErr::EmptyBatch` if not even one
    /// full batch fits in the dataset.
    pub fn batches(&self, batch_size: NonZeroUsize) -> Result<Batches<'_>> {
        let size = batch_size.get();
        let count = self.len() / size;

        if count == 0 {
            return Err(RegressionErr::EmptyBatch {
                rows: self.len(),
                batch_size: size,
            });
        }

        Ok(Batches {
            x: self.x.view(),
            y: self.y.view(),
            size,
            current: 0,
            count,
        })
    }
}

/// Iterator over the full batches of a `Dataset`.
pub struct Batches<'a> {
    x: ArrayView2<'a, f32>,
    y: ArrayView2<'a, f32>,
    size: usize,
    current: usize,
    count: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.count {
            return None;
        }

        let start = self.current * self.size;
        let end = start + self.size;
        self.current += 1;

        let x = self.x.slice_move(s![start..end, ..]);
        let y = self.y.slice_move(s![start..end, ..]);
        Some((x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.current;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Batches<'_> {}

/// Builds a matrix out of row-major data.
///
/// # Arguments
/// * `rows` - The rows of the matrix, all of them must have the same length.
///
/// # Returns
/// The matrix, or an error if `rows` is empty or ragged.
pub fn matrix_from_rows<R>(rows: &[R]) -> Result<Array2<f32>>
where
    R: AsRef<[f32]>,
{
    let ncols = rows
        .first()
        .map(|row| row.as_ref().len())
        .ok_or(RegressionErr::Empty { what: "row" })?;

    let ragged = rows
        .iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|&(_, len)| len != ncols);

    if let Some((row, got)) = ragged {
        return Err(RegressionErr::Ragged {
            row,
            got,
            expected: ncols,
        });
    }

    Ok(Array2::from_shape_fn((rows.len(), ncols), |(i, j)| {
        rows[i].as_ref()[j]
    }))
}

pub(crate) fn check_not_empty(x: ArrayView2<f32>, what: &'static str) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(RegressionErr::Empty { what });
    }

    Ok(())
}

pub(crate) fn check_labels(y: ArrayView2<f32>, rows: usize) -> Result<()> {
    check_not_empty(y, "label")?;

    if y.ncols() != 1 {
        return Err(RegressionErr::Shape {
            what: "label columns",
            got: y.ncols(),
            expected: 1,
        });
    }

    if y.nrows() != rows {
        return Err(RegressionErr::Shape {
            what: "label rows",
            got: y.nrows(),
            expected: rows,
        });
    }

    Ok(())
}
