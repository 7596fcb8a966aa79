//! Mesh wiring: Moore-neighborhood inputs and the serial shift chain.
//!
//! Neighbor reads go straight into the plane; out-of-grid neighbors land on
//! the dead border ring. The shift chain runs row-major: `(1, 1)` takes
//! `data_in`, `(r, c)` takes `(r, c - 1)`, and the first cell of each later
//! row takes the last cell of the row above through an AND with
//! `shift_enable`. `data_out` is `(n, n)`.

use super::cell::{CellInputs, Signals};
use super::plane::Plane;

/// The 8 cardinal and intercardinal directions, row growing southward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North = 0, // (r-1, c)
    South = 1, // (r+1, c)
    West  = 2, // (r, c-1)
    East  = 3, // (r, c+1)
    NW    = 4, // (r-1, c-1)
    NE    = 5, // (r-1, c+1)
    SW    = 6, // (r+1, c-1)
    SE    = 7, // (r+1, c+1)
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North, Direction::South,
        Direction::West,  Direction::East,
        Direction::NW,    Direction::NE,
        Direction::SW,    Direction::SE,
    ];

    /// `(dr, dc)` offset for this direction.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West  => (0, -1),
            Direction::East  => (0, 1),
            Direction::NW    => (-1, -1),
            Direction::NE    => (-1, 1),
            Direction::SW    => (1, -1),
            Direction::SE    => (1, 1),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset as a signed delta into a plane buffer of `stride`.
    #[inline]
    pub const fn delta(self, stride: usize) -> isize {
        let (dr, dc) = self.offset();
        dr * stride as isize + dc
    }
}

/// Precomputed buffer deltas for the eight neighbors, indexed by `Direction`.
#[derive(Clone, Copy, Debug)]
pub struct NeighborDeltas([isize; 8]);

impl NeighborDeltas {
    pub fn new(stride: usize) -> Self {
        Self(Direction::ALL.map(|d| d.delta(stride)))
    }

    /// Gather the eight neighbor values of the cell at buffer index `idx`.
    ///
    /// `idx` must be an interior index, so every neighbor is in bounds.
    #[inline(always)]
    pub fn gather(&self, current: &[bool], idx: usize) -> [bool; 8] {
        self.0.map(|d| current[idx.wrapping_add_signed(d)])
    }
}

/// The value cell `(r, c)` latches in shift mode.
#[inline(always)]
pub fn shift_predecessor(
    current: &[bool],
    stride: usize,
    n: usize,
    r: usize,
    c: usize,
    data_in: bool,
    shift_enable: bool,
) -> bool {
    if c > 1 {
        current[r * stride + c - 1]
    } else if r > 1 {
        current[(r - 1) * stride + n] & shift_enable
    } else {
        data_in
    }
}

/// Fixed wiring of an `n`-by-`n` mesh over its plane layout.
#[derive(Clone, Copy, Debug)]
pub struct Wiring {
    deltas: NeighborDeltas,
    stride: usize,
    n: usize,
}

impl Wiring {
    pub fn new(plane: &Plane) -> Self {
        Self {
            deltas: NeighborDeltas::new(plane.stride()),
            stride: plane.stride(),
            n: plane.size(),
        }
    }

    /// Everything interior cell `(r, c)` samples this tick.
    #[inline(always)]
    pub fn inputs(
        &self,
        current: &[bool],
        r: usize,
        c: usize,
        signals: &Signals,
    ) -> CellInputs {
        let idx = r * self.stride + c;
        CellInputs {
            alive: current[idx],
            neighbors: self.deltas.gather(current, idx),
            shift_in: shift_predecessor(
                current,
                self.stride,
                self.n,
                r,
                c,
                signals.data_in,
                signals.shift_enable,
            ),
        }
    }
}

/// The serial output: current state of the last cell in shift order.
#[inline]
pub fn data_out(plane: &Plane) -> bool {
    let n = plane.size();
    plane.get(n, n)
}
