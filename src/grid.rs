//! Column-major grid type for kymograph data.
//!
//! [`Grid`] provides safe, dimension-tracked access to the flat column-major
//! layout used throughout this crate. Row `t` is one time point scanned along
//! space; column `x` is the intensity time series of one spatial position.
//! Columns are contiguous, which is the access pattern of the wavelet
//! transform.

/// Samples below this value mark the end of valid data in a column.
///
/// Kymographs carry background (near-zero) intensity past the imaged
/// organism; rather than a separate length array, the first sample below
/// `SENTINEL` truncates the column's time series.
pub const SENTINEL: f64 = 2.0;

/// Column-major kymograph grid.
///
/// Stores data in a flat `Vec<f64>`: element `(row, col)` is at index
/// `row + col * nrows`. The same type holds input intensities and output
/// phase values.
///
/// # Examples
///
/// ```
/// use kymo_core::grid::Grid;
///
/// // 3 time points, 2 spatial positions
/// let grid = Grid::from_column_major(vec![10.0, 11.0, 12.0, 20.0, 21.0, 0.0], 3, 2).unwrap();
/// assert_eq!(grid[(1, 0)], 11.0);
/// assert_eq!(grid.column(1), &[20.0, 21.0, 0.0]);
/// assert_eq!(grid.data_size(1), 2); // trailing background sample
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    nrows: usize,
    ncols: usize,
}

impl Grid {
    /// Create from flat column-major data with dimension validation.
    ///
    /// Returns `None` if `data.len() != nrows * ncols`.
    pub fn from_column_major(data: Vec<f64>, nrows: usize, ncols: usize) -> Option<Self> {
        if data.len() != nrows * ncols {
            return None;
        }
        Some(Self { data, nrows, ncols })
    }

    /// Create from per-time-point rows.
    ///
    /// Rows of unequal length are padded with `0.0`, which lies below
    /// [`SENTINEL`] and therefore truncates the affected columns instead of
    /// raising an error.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let nrows = rows.len();
        let ncols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::zeros(nrows, ncols);
        for (t, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                grid[(t, x)] = value;
            }
        }
        grid
    }

    /// Create a zero-filled grid.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Number of rows (time points).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (spatial positions).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Dimensions as `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a contiguous column slice (zero-copy).
    ///
    /// # Panics
    /// Panics if `col >= ncols`.
    #[inline]
    pub fn column(&self, col: usize) -> &[f64] {
        let start = col * self.nrows;
        &self.data[start..start + self.nrows]
    }

    /// Get a mutable contiguous column slice (zero-copy).
    ///
    /// # Panics
    /// Panics if `col >= ncols`.
    #[inline]
    pub fn column_mut(&mut self, col: usize) -> &mut [f64] {
        let start = col * self.nrows;
        &mut self.data[start..start + self.nrows]
    }

    /// Extract a single row as a new `Vec<f64>`.
    ///
    /// O(ncols) because rows are not contiguous in column-major layout.
    pub fn row(&self, row: usize) -> Vec<f64> {
        (0..self.ncols)
            .map(|j| self.data[row + j * self.nrows])
            .collect()
    }

    /// Overwrite a row from a slice.
    ///
    /// # Panics
    /// Panics if `row >= nrows` or `values.len() != ncols`.
    pub fn set_row(&mut self, row: usize, values: &[f64]) {
        assert_eq!(values.len(), self.ncols);
        for (j, &value) in values.iter().enumerate() {
            self.data[row + j * self.nrows] = value;
        }
    }

    /// Number of valid samples in a column: the index of the first sample
    /// below [`SENTINEL`], or `nrows` if every sample is valid.
    ///
    /// # Panics
    /// Panics if `col >= ncols`.
    pub fn data_size(&self, col: usize) -> usize {
        self.column(col)
            .iter()
            .position(|&v| v < SENTINEL)
            .unwrap_or(self.nrows)
    }

    /// Flat slice of the underlying column-major data (zero-copy).
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume and return the underlying `Vec<f64>`.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Get element at (row, col) with bounds checking.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.nrows && col < self.ncols {
            Some(self.data[row + col * self.nrows])
        } else {
            None
        }
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        debug_assert!(
            row < self.nrows && col < self.ncols,
            "Grid index ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.nrows,
            self.ncols
        );
        &self.data[row + col * self.nrows]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Grid {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        debug_assert!(
            row < self.nrows && col < self.ncols,
            "Grid index ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.nrows,
            self.ncols
        );
        &mut self.data[row + col * self.nrows]
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid({}x{})", self.nrows, self.ncols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_3x4() -> Grid {
        // 3 rows, 4 columns, column-major
        let data = vec![
            10.0, 11.0, 12.0, // col 0
            20.0, 21.0, 22.0, // col 1
            30.0, 31.0, 32.0, // col 2
            40.0, 41.0, 42.0, // col 3
        ];
        Grid::from_column_major(data, 3, 4).unwrap()
    }

    #[test]
    fn test_from_column_major_valid() {
        let grid = sample_3x4();
        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.len(), 12);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_from_column_major_invalid() {
        assert!(Grid::from_column_major(vec![1.0, 2.0], 3, 4).is_none());
    }

    #[test]
    fn test_index_and_column() {
        let grid = sample_3x4();
        assert_eq!(grid[(0, 0)], 10.0);
        assert_eq!(grid[(2, 1)], 22.0);
        assert_eq!(grid.column(2), &[30.0, 31.0, 32.0]);
    }

    #[test]
    fn test_row_roundtrip() {
        let mut grid = sample_3x4();
        assert_eq!(grid.row(1), vec![11.0, 21.0, 31.0, 41.0]);
        grid.set_row(1, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid.row(1), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(grid[(1, 2)], 3.0);
    }

    #[test]
    fn test_data_size_sentinel() {
        let grid = Grid::from_column_major(vec![10.0, 1.5, 12.0, 20.0, 21.0, 22.0], 3, 2).unwrap();
        assert_eq!(grid.data_size(0), 1); // 1.5 < SENTINEL truncates
        assert_eq!(grid.data_size(1), 3); // fully valid
    }

    #[test]
    fn test_data_size_empty_column() {
        let grid = Grid::from_column_major(vec![0.0, 0.0, 10.0, 11.0], 2, 2).unwrap();
        assert_eq!(grid.data_size(0), 0);
        assert_eq!(grid.data_size(1), 2);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let grid = Grid::from_rows(&[vec![10.0, 20.0, 30.0], vec![11.0, 21.0]]);
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid[(0, 2)], 30.0);
        assert_eq!(grid[(1, 2)], 0.0); // padded
        assert_eq!(grid.data_size(2), 1); // padding truncates the column
    }

    #[test]
    fn test_get_bounds_check() {
        let grid = sample_3x4();
        assert_eq!(grid.get(2, 3), Some(42.0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 4), None);
    }

    #[test]
    fn test_index_mut() {
        let mut grid = sample_3x4();
        grid[(1, 2)] = 99.0;
        assert_eq!(grid[(1, 2)], 99.0);
    }

    #[test]
    fn test_empty() {
        let grid = Grid::zeros(0, 0);
        assert!(grid.is_empty());
        assert_eq!(Grid::from_rows(&[]).shape(), (0, 0));
    }

    #[test]
    fn test_column_major_layout_matches_manual() {
        let n = 5;
        let m = 7;
        let data: Vec<f64> = (0..n * m).map(|x| x as f64).collect();
        let grid = Grid::from_column_major(data.clone(), n, m).unwrap();
        for j in 0..m {
            for i in 0..n {
                assert_eq!(grid[(i, j)], data[i + j * n]);
            }
        }
    }

    #[test]
    fn test_display_and_into_vec() {
        let grid = sample_3x4();
        assert_eq!(format!("{}", grid), "Grid(3x4)");
        assert_eq!(grid.clone().into_vec().len(), 12);
        assert_eq!(grid.as_slice()[4], 21.0);
    }
}
