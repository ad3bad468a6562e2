//! Growable square matrix backing store.
//!
//! Shared by the adjacency (`bool`) and weight (`f64`) matrices of the
//! network. Cells live in a flat buffer addressed `row * capacity + col`;
//! capacity grows by doubling, and removing an index shifts every row and
//! column above it down by one so indices stay dense.

/// A square matrix over `Copy` cells with a designated fill value.
///
/// Only the top-left `len x len` window is meaningful to callers; cells
/// outside it hold the fill value or stale data and are reset on reuse.
#[derive(Debug, Clone)]
pub(crate) struct SquareMatrix<T> {
    cells: Vec<T>,
    capacity: usize,
    fill: T,
}

impl<T: Copy> SquareMatrix<T> {
    /// Creates a matrix with the given initial capacity, every cell set to
    /// `fill`.
    pub(crate) fn new(capacity: usize, fill: T) -> Self {
        Self {
            cells: vec![fill; capacity * capacity],
            capacity,
            fill,
        }
    }

    /// Current capacity (side length of the allocated square).
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> T {
        self.cells[row * self.capacity + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.capacity + col] = value;
    }

    /// Doubles the capacity, preserving all existing cells.
    pub(crate) fn grow(&mut self) {
        let old = self.capacity;
        let new = old * 2;
        let mut cells = vec![self.fill; new * new];
        for row in 0..old {
            let src = row * old;
            let dst = row * new;
            cells[dst..dst + old].copy_from_slice(&self.cells[src..src + old]);
        }
        self.cells = cells;
        self.capacity = new;
    }

    /// Resets row `index` and column `index` to the fill value across the
    /// first `len` positions. Used when a slot is (re)assigned to a fresh
    /// vertex.
    pub(crate) fn clear_line(&mut self, index: usize, len: usize) {
        for i in 0..len {
            self.set(index, i, self.fill);
            self.set(i, index, self.fill);
        }
    }

    /// Removes row and column `index` from the live `len x len` window by
    /// shifting the rows below up and the columns to the right left.
    ///
    /// After the call the surviving cells occupy the top-left
    /// `(len - 1) x (len - 1)` window with their pairwise relations intact;
    /// the vacated last row and column are reset to the fill value.
    pub(crate) fn remove(&mut self, index: usize, len: usize) {
        debug_assert!(index < len && len <= self.capacity);
        for row in index..len - 1 {
            for col in 0..len {
                let v = self.get(row + 1, col);
                self.set(row, col, v);
            }
        }
        for col in index..len - 1 {
            for row in 0..len {
                let v = self.get(row, col + 1);
                self.set(row, col, v);
            }
        }
        self.clear_line(len - 1, len);
    }
}
