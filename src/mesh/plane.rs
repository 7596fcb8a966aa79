//! Double-buffered cell plane with a dead border ring.
//!
//! Each buffer stores `(n + 2) * (n + 2)` cells row-major. Row 0, row
//! `n + 1`, column 0 and column `n + 1` form the border: they are zero in
//! both buffers and nothing ever writes them, so neighbor reads at the
//! grid edge need no bounds checks. Interior cell `(r, c)` (1-based) lives
//! at `r * stride + c`.

#[derive(Clone, Debug)]
pub struct Plane {
    cells: [Vec<bool>; 2],
    phase: usize,
    n: usize,
    stride: usize,
}

impl Plane {
    pub fn new(n: usize) -> Self {
        let stride = n + 2;
        Self {
            cells: [vec![false; stride * stride], vec![false; stride * stride]],
            phase: 0,
            n,
            stride,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Buffer index of 1-based interior cell `(r, c)`.
    #[inline(always)]
    pub fn index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r <= self.n + 1 && c <= self.n + 1);
        r * self.stride + c
    }

    /// Buffer index of the `i`-th interior cell in row-major order.
    #[inline(always)]
    pub fn interior_index(&self, i: usize) -> usize {
        self.index(i / self.n + 1, i % self.n + 1)
    }

    #[inline]
    pub fn current(&self) -> &[bool] {
        &self.cells[self.phase]
    }

    #[inline]
    pub fn current_and_next_mut(&mut self) -> (&[bool], &mut [bool]) {
        let (a, b) = self.cells.split_at_mut(1);
        if self.phase == 0 {
            (a[0].as_slice(), b[0].as_mut_slice())
        } else {
            (b[0].as_slice(), a[0].as_mut_slice())
        }
    }

    /// Commit: the next buffer becomes current for every cell at once.
    #[inline]
    pub fn swap(&mut self) {
        self.phase ^= 1;
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.current()[self.index(r, c)]
    }

    pub fn population(&self) -> u64 {
        let current = self.current();
        (1..=self.n)
            .map(|r| {
                let row = &current[r * self.stride + 1..r * self.stride + 1 + self.n];
                row.iter().filter(|&&alive| alive).count() as u64
            })
            .sum()
    }

    /// True when every border slot of both buffers is dead.
    pub fn border_is_dead(&self) -> bool {
        let last = self.n + 1;
        self.cells.iter().all(|buf| {
            (0..self.stride).all(|k| {
                !buf[k]
                    && !buf[last * self.stride + k]
                    && !buf[k * self.stride]
                    && !buf[k * self.stride + last]
            })
        })
    }
}
