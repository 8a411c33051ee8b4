//! Square spin lattice with periodic boundary conditions.
//!
//! The grid is an N x N torus: row/column index -1 maps to N-1 and
//! index N maps to 0. Every site holds either `SPIN_UP` or `SPIN_DOWN`.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::{IsingError, Result};

pub const SPIN_UP: i8 = 1;
pub const SPIN_DOWN: i8 = -1;

/// N x N Ising lattice on a torus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: DMatrix<i8>,
}

impl Lattice {
    /// Build a lattice by evaluating `f(row, col)` at every site.
    ///
    /// `f` must return `SPIN_UP` or `SPIN_DOWN`; the initializers are the only callers.
    pub(crate) fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> i8) -> Self {
        let spins = DMatrix::from_fn(size, size, |row, col| f(row, col));
        debug_assert!(spins.iter().all(|&s| s == SPIN_UP || s == SPIN_DOWN));
        Self { size, spins }
    }

    /// Build a lattice from a row-major list of spins.
    pub fn from_spins(size: usize, spins: &[i8]) -> Result<Self> {
        if size == 0 {
            return Err(IsingError::invalid("lattice dimension must be positive"));
        }
        if spins.len() != size * size {
            return Err(IsingError::invalid(format!(
                "expected {} spins for a {size}x{size} lattice, got {}",
                size * size,
                spins.len()
            )));
        }
        if let Some(bad) = spins.iter().find(|&&s| s != SPIN_UP && s != SPIN_DOWN) {
            return Err(IsingError::invalid(format!("spin value {bad} is not +1 or -1")));
        }
        Ok(Self {
            size,
            spins: DMatrix::from_row_slice(size, size, spins),
        })
    }

    /// Lattice dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, N².
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Spin at `(row, col)`. Panics if the site is outside the lattice.
    #[inline]
    pub fn spin(&self, row: usize, col: usize) -> i8 {
        self.check_site(row, col);
        self.spins[(row, col)]
    }

    /// The four nearest-neighbor spins `[up, down, left, right]` of `(row, col)`.
    #[inline]
    pub fn neighbors(&self, row: usize, col: usize) -> [i8; 4] {
        self.check_site(row, col);
        let (up, down) = (self.backward(row), self.forward(row));
        let (left, right) = (self.backward(col), self.forward(col));
        [
            self.spins[(up, col)],
            self.spins[(down, col)],
            self.spins[(row, left)],
            self.spins[(row, right)],
        ]
    }

    /// Sum of the four periodic neighbor spins of `(row, col)`.
    #[inline]
    pub fn neighbor_sum(&self, row: usize, col: usize) -> i32 {
        self.neighbors(row, col).iter().map(|&s| s as i32).sum()
    }

    /// Toggle the spin at `(row, col)` and return its new value.
    ///
    /// Panics if the site is outside the lattice.
    pub fn flip(&mut self, row: usize, col: usize) -> i8 {
        self.check_site(row, col);
        let cell = &mut self.spins[(row, col)];
        *cell = -*cell;
        *cell
    }

    /// Read-only view of the spin grid.
    pub fn spins(&self) -> &DMatrix<i8> {
        &self.spins
    }

    /// Iterate over every spin value.
    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.spins.iter().copied()
    }

    /// Sum of all spins.
    pub fn total_spin(&self) -> i64 {
        self.iter().map(|s| s as i64).sum()
    }

    #[inline]
    fn forward(&self, index: usize) -> usize {
        if index + 1 == self.size {
            0
        } else {
            index + 1
        }
    }

    #[inline]
    fn backward(&self, index: usize) -> usize {
        if index == 0 {
            self.size - 1
        } else {
            index - 1
        }
    }

    #[inline]
    fn check_site(&self, row: usize, col: usize) {
        assert!(
            row < self.size && col < self.size,
            "site ({row}, {col}) is outside the {n}x{n} lattice",
            n = self.size
        );
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let arrow = if self.spins[(row, col)] == SPIN_UP { "↑" } else { "↓" };
                write!(f, "{:2}", arrow)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All spins up except one marker site
    fn lattice_with_down(size: usize, row: usize, col: usize) -> Lattice {
        Lattice::from_fn(size, |r, c| if (r, c) == (row, col) { SPIN_DOWN } else { SPIN_UP })
    }

    #[test]
    fn test_neighbors_wrap_rows() {
        // (2, 0) is the "up" neighbor of (0, 0) on a 3x3 torus
        let lat = lattice_with_down(3, 2, 0);
        assert_eq!(lat.neighbors(0, 0), [SPIN_DOWN, SPIN_UP, SPIN_UP, SPIN_UP]);

        // (0, 0) is the "down" neighbor of (2, 0)
        let lat = lattice_with_down(3, 0, 0);
        assert_eq!(lat.neighbors(2, 0), [SPIN_UP, SPIN_DOWN, SPIN_UP, SPIN_UP]);
    }

    #[test]
    fn test_neighbors_wrap_cols() {
        // (0, 2) is the "left" neighbor of (0, 0)
        let lat = lattice_with_down(3, 0, 2);
        assert_eq!(lat.neighbors(0, 0), [SPIN_UP, SPIN_UP, SPIN_DOWN, SPIN_UP]);

        // (1, 0) is the "right" neighbor of (1, 2)
        let lat = lattice_with_down(3, 1, 0);
        assert_eq!(lat.neighbors(1, 2), [SPIN_UP, SPIN_UP, SPIN_UP, SPIN_DOWN]);
    }

    #[test]
    fn test_neighbors_interior() {
        let lat = lattice_with_down(4, 1, 2);
        assert_eq!(lat.neighbors(2, 2), [SPIN_DOWN, SPIN_UP, SPIN_UP, SPIN_UP]);
        assert_eq!(lat.neighbors(1, 3), [SPIN_UP, SPIN_UP, SPIN_DOWN, SPIN_UP]);
        assert_eq!(lat.neighbor_sum(1, 1), 2);
    }

    #[test]
    fn test_two_by_two_counts_each_neighbor_twice() {
        // On a 2x2 torus up == down and left == right
        let lat = lattice_with_down(2, 1, 0);
        assert_eq!(lat.neighbors(0, 0), [SPIN_DOWN, SPIN_DOWN, SPIN_UP, SPIN_UP]);
        assert_eq!(lat.neighbor_sum(0, 0), 0);
    }

    #[test]
    fn test_flip_toggles_only_target() {
        let mut lat = Lattice::from_fn(3, |_, _| SPIN_UP);
        assert_eq!(lat.flip(1, 2), SPIN_DOWN);
        assert_eq!(lat.spin(1, 2), SPIN_DOWN);
        assert_eq!(lat.total_spin(), 7);

        assert_eq!(lat.flip(1, 2), SPIN_UP);
        assert_eq!(lat.total_spin(), 9);
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 lattice")]
    fn test_flip_out_of_range_panics() {
        let mut lat = Lattice::from_fn(3, |_, _| SPIN_UP);
        lat.flip(3, 0);
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 lattice")]
    fn test_neighbors_out_of_range_panics() {
        let lat = Lattice::from_fn(3, |_, _| SPIN_UP);
        lat.neighbors(0, 5);
    }

    #[test]
    fn test_from_spins_row_major() {
        let lat = Lattice::from_spins(2, &[1, -1, -1, 1]).unwrap();
        assert_eq!(lat.spin(0, 1), SPIN_DOWN);
        assert_eq!(lat.spin(1, 0), SPIN_DOWN);
        assert_eq!(lat.spin(1, 1), SPIN_UP);
    }

    #[test]
    fn test_from_spins_rejects_bad_input() {
        assert!(Lattice::from_spins(0, &[]).is_err());
        assert!(Lattice::from_spins(2, &[1, 1, 1]).is_err());
        assert!(Lattice::from_spins(2, &[1, 0, 1, 1]).is_err());
    }

    #[test]
    fn test_display() {
        let lat = Lattice::from_spins(2, &[1, -1, -1, 1]).unwrap();
        assert_eq!(lat.to_string(), "↑ ↓ \n↓ ↑ \n");
    }
}
