//! Square boolean grid used to load, inspect and compare mesh contents.

use std::fmt;

use rand::Rng;

use crate::error::{MeshError, Result};

/// An `n`-by-`n` grid of cells, row-major, 0-based `(row, col)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    n: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// All-dead pattern.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(MeshError::InvalidSize { size: 0 });
        }
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(MeshError::StreamLength {
                    expected: n,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { n, cells })
    }

    /// `cells.len()` must be `n * n`.
    pub(crate) fn from_cells(n: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        Self { n, cells }
    }

    pub fn from_row_major(n: usize, bits: Vec<bool>) -> Result<Self> {
        if bits.len() != n * n {
            return Err(MeshError::StreamLength {
                expected: n * n,
                actual: bits.len(),
            });
        }
        Ok(Self { n, cells: bits })
    }

    /// Pattern with exactly `live` alive. Out-of-range cells are rejected.
    pub fn with_cells(n: usize, live: &[(usize, usize)]) -> Result<Self> {
        let mut pattern = Self::new(n);
        for &(row, col) in live {
            pattern.set(row, col, true)?;
        }
        Ok(pattern)
    }

    /// Every cell alive independently with probability `density`, which
    /// must lie in `0..=1`.
    pub fn random<R: Rng>(n: usize, density: f64, rng: &mut R) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(MeshError::InvalidDensity { density });
        }
        let cells = (0..n * n).map(|_| rng.random_bool(density)).collect();
        Ok(Self { n, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    fn check(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.n || col >= self.n {
            return Err(MeshError::CellOutOfRange {
                row,
                col,
                size: self.n,
            });
        }
        Ok(row * self.n + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        Ok(self.cells[self.check(row, col)?])
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let idx = self.check(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    pub fn population(&self) -> u64 {
        self.cells.iter().filter(|&&alive| alive).count() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.n, i % self.n))
    }

    pub fn row_major(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.n.max(1))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern {}x{}", self.n, self.n)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::Pattern;
    use crate::error::MeshError;

    #[test]
    fn set_and_get_round_trip() {
        let mut pattern = Pattern::new(4);
        pattern.set(1, 2, true).unwrap();
        assert!(pattern.get(1, 2).unwrap());
        assert!(!pattern.get(2, 1).unwrap());
        assert_eq!(pattern.population(), 1);
        assert_eq!(pattern.live_cells().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let pattern = Pattern::new(3);
        assert!(matches!(
            pattern.get(3, 0),
            Err(MeshError::CellOutOfRange { row: 3, col: 0, size: 3 })
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(matches!(
            Pattern::from_rows(rows),
            Err(MeshError::StreamLength { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Pattern::from_rows(Vec::new()),
            Err(MeshError::InvalidSize { size: 0 })
        ));
    }

    #[test]
    fn random_is_deterministic_per_seed() {
        let mut a = rand::rngs::StdRng::seed_from_u64(7);
        let mut b = rand::rngs::StdRng::seed_from_u64(7);
        assert_eq!(
            Pattern::random(10, 0.2, &mut a).unwrap(),
            Pattern::random(10, 0.2, &mut b).unwrap()
        );
        let full = Pattern::random(5, 1.0, &mut a).unwrap();
        assert_eq!(full.population(), 25);
        assert!(Pattern::random(5, 0.0, &mut a).unwrap().is_empty());
    }

    #[test]
    fn random_rejects_bad_density() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        for density in [f64::NAN, f64::INFINITY, -0.1, 1.5] {
            assert!(matches!(
                Pattern::random(3, density, &mut rng),
                Err(MeshError::InvalidDensity { .. })
            ));
        }
    }

    #[test]
    fn display_uses_hash_and_dot() {
        let pattern = Pattern::with_cells(2, &[(0, 1)]).unwrap();
        assert_eq!(pattern.to_string(), ".#\n..\n");
    }
}
