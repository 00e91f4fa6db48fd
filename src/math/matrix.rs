use rand::Rng;
use std::f64::consts::PI;
use std::ops::{Index, IndexMut};

use crate::error::ShapeError;

/// Dense `ROWS x COLS` buffer stored as one contiguous row-major block.
///
/// Element `(x, y)` lives at flat offset `x * COLS + y`, so the second index
/// varies fastest. Weight matrices use `x` for the producing layer and `y`
/// for the consuming layer; batch buffers use `x` for the example index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const ROWS: usize, const COLS: usize> {
    data: [[f64; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Matrix<ROWS, COLS> {
    pub fn zeros() -> Self {
        Matrix { data: [[0.0; COLS]; ROWS] }
    }

    pub fn from_array(data: [[f64; COLS]; ROWS]) -> Self {
        Matrix { data }
    }

    /// Builds a matrix from row vectors, rejecting any ragged or mis-sized input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let mismatch = |actual_cols| ShapeError {
            expected_rows: ROWS,
            expected_cols: COLS,
            actual_rows: rows.len(),
            actual_cols,
        };
        if rows.len() != ROWS {
            return Err(mismatch(rows.first().map_or(0, Vec::len)));
        }

        let mut res = Matrix::zeros();
        for (dst, src) in res.data.iter_mut().zip(rows) {
            if src.len() != COLS {
                return Err(mismatch(src.len()));
            }
            dst.copy_from_slice(src);
        }
        Ok(res)
    }

    /// Builds a matrix from a flat row-major slice of exactly `ROWS * COLS` values.
    pub fn from_flat(values: &[f64]) -> Result<Self, ShapeError> {
        if values.len() != ROWS * COLS {
            return Err(ShapeError {
                expected_rows: ROWS,
                expected_cols: COLS,
                actual_rows: 1,
                actual_cols: values.len(),
            });
        }

        let mut res = Matrix::zeros();
        res.fill_with(values.iter().copied());
        Ok(res)
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    pub const fn cols(&self) -> usize {
        COLS
    }

    /// Number of addressable slots.
    pub const fn len(&self) -> usize {
        ROWS * COLS
    }

    pub const fn is_empty(&self) -> bool {
        ROWS * COLS == 0
    }

    pub const fn flat_index(x: usize, y: usize) -> usize {
        x * COLS + y
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&f64> {
        self.data.get(x).and_then(|row| row.get(y))
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut f64> {
        self.data.get_mut(x).and_then(|row| row.get_mut(y))
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the matrix.
    pub fn at(&self, x: usize, y: usize) -> &f64 {
        match self.get(x, y) {
            Some(v) => v,
            None => out_of_bounds(x, y, ROWS, COLS),
        }
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the matrix.
    pub fn at_mut(&mut self, x: usize, y: usize) -> &mut f64 {
        match self.get_mut(x, y) {
            Some(v) => v,
            None => out_of_bounds(x, y, ROWS, COLS),
        }
    }

    /// Borrowed view of the `COLS` contiguous values in row `x`.
    pub fn row(&self, x: usize) -> &[f64; COLS] {
        match self.data.get(x) {
            Some(row) => row,
            None => out_of_bounds(x, 0, ROWS, COLS),
        }
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64; COLS]> + '_ {
        self.data.iter()
    }

    pub fn as_flat(&self) -> &[f64] {
        self.data.as_flattened()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.as_flat().iter()
    }

    /// Overwrites slots in row-major order. Stops early if `values` runs out.
    pub fn fill_with<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for (slot, v) in self.data.as_flattened_mut().iter_mut().zip(values) {
            *slot = v;
        }
    }

    /// Overwrites every slot with a draw from N(mean, std_dev).
    pub fn fill_normal<R: Rng + ?Sized>(&mut self, rng: &mut R, mean: f64, std_dev: f64) {
        for slot in self.data.as_flattened_mut() {
            *slot = mean + sample_standard_normal(rng) * std_dev;
        }
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Matrix<ROWS, COLS> {
    fn default() -> Self {
        Matrix::zeros()
    }
}

impl<const ROWS: usize, const COLS: usize> Index<(usize, usize)> for Matrix<ROWS, COLS> {
    type Output = f64;

    fn index(&self, (x, y): (usize, usize)) -> &f64 {
        self.at(x, y)
    }
}

impl<const ROWS: usize, const COLS: usize> IndexMut<(usize, usize)> for Matrix<ROWS, COLS> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut f64 {
        self.at_mut(x, y)
    }
}

#[cold]
#[track_caller]
fn out_of_bounds(x: usize, y: usize, rows: usize, cols: usize) -> ! {
    panic!("index ({x}, {y}) out of bounds for {rows}x{cols} matrix")
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // (0, 1] keeps ln() finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
