//! Serial protocol driver: load a grid, evolve it, read it back.
//!
//! The shift chain is a FIFO of `N*N` stages: the first bit shifted in is
//! the first bit to reach `data_out`. Loading therefore feeds a pattern in
//! reverse row-major order, so that the bit destined for the last cell
//! enters first.

use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Signals};
use crate::pattern::Pattern;

pub struct Driver {
    mesh: Mesh,
    /// Shift ticks since the last evolve tick.
    shifted: usize,
}

impl Driver {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh, shifted: 0 }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    #[inline]
    fn cells(&self) -> usize {
        self.mesh.size() * self.mesh.size()
    }

    /// Shift ticks since the last evolve.
    pub fn shifted(&self) -> usize {
        self.shifted
    }

    /// True when the shift ticks since the last evolve do not cover a
    /// whole number of grids.
    pub fn partially_loaded(&self) -> bool {
        self.shifted % self.cells() != 0
    }

    fn shift(&mut self, data_in: bool) -> Result<bool> {
        let out = self.mesh.tick(Signals::shift(data_in))?;
        self.shifted += 1;
        Ok(out)
    }

    /// One shift tick per bit.
    pub fn shift_in<I>(&mut self, bits: I) -> Result<()>
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.shift(bit)?;
        }
        Ok(())
    }

    /// Shift `count` bits out, feeding dead cells in behind them.
    pub fn shift_out(&mut self, count: usize) -> Result<Vec<bool>> {
        (0..count).map(|_| self.shift(false)).collect()
    }

    /// Load `pattern` so that cell `(r, c)` holds `pattern(r, c)`.
    pub fn load(&mut self, pattern: &Pattern) -> Result<()> {
        if pattern.size() != self.mesh.size() {
            return Err(MeshError::StreamLength {
                expected: self.cells(),
                actual: pattern.size() * pattern.size(),
            });
        }
        let bits: Vec<bool> = pattern.row_major().iter().rev().copied().collect();
        self.shift_in(bits)?;
        log::debug!("loaded {} live cells", pattern.population());
        Ok(())
    }

    /// Shift the whole grid out. The mesh is left dead.
    pub fn unload(&mut self) -> Result<Pattern> {
        let cells = self.cells();
        let mut bits = self.shift_out(cells)?;
        bits.reverse();
        Pattern::from_row_major(self.mesh.size(), bits)
    }

    /// Shift the whole grid out and back in, leaving it unchanged.
    pub fn peek(&mut self) -> Result<Pattern> {
        let cells = self.cells();
        let mut bits = Vec::with_capacity(cells);
        for _ in 0..cells {
            let out = self.mesh.data_out();
            bits.push(self.shift(out)?);
        }
        bits.reverse();
        Pattern::from_row_major(self.mesh.size(), bits)
    }

    /// One evolve tick per generation.
    pub fn evolve(&mut self, generations: u64) -> Result<()> {
        if generations > 0 && self.partially_loaded() {
            log::warn!(
                "evolving after {} shift ticks, not a multiple of {}; grid is partially loaded",
                self.shifted,
                self.cells()
            );
        }
        for _ in 0..generations {
            self.mesh.tick(Signals::EVOLVE)?;
        }
        if generations > 0 {
            self.shifted = 0;
        }
        Ok(())
    }

    pub fn idle(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.mesh.tick(Signals::IDLE)?;
        }
        Ok(())
    }

    /// Load, evolve and unload in one go.
    pub fn run(&mut self, pattern: &Pattern, generations: u64) -> Result<Pattern> {
        self.load(pattern)?;
        self.evolve(generations)?;
        self.unload()
    }
}
