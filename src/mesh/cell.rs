//! Per-cell processing element: control signals and the transition rule.

use super::counter::{KernelBackend, NeighborCount, count_neighbors};
use crate::error::{MeshError, Result};

/// Signals broadcast to every cell for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub shift_enable: bool,
    pub evolve_enable: bool,
    /// Serial input, consumed by the head of the shift chain.
    pub data_in: bool,
}

impl Signals {
    pub const IDLE: Signals = Signals {
        shift_enable: false,
        evolve_enable: false,
        data_in: false,
    };
    pub const EVOLVE: Signals = Signals {
        shift_enable: false,
        evolve_enable: true,
        data_in: false,
    };

    #[inline]
    pub const fn shift(data_in: bool) -> Self {
        Self {
            shift_enable: true,
            evolve_enable: false,
            data_in,
        }
    }

    /// Decode the enable pair. Both enables at once is rejected.
    pub fn mode(&self) -> Result<Mode> {
        match (self.shift_enable, self.evolve_enable) {
            (false, false) => Ok(Mode::Idle),
            (true, false) => Ok(Mode::Shift),
            (false, true) => Ok(Mode::Evolve),
            (true, true) => Err(MeshError::DualEnable),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    Shift,
    Evolve,
}

/// B3/S23 over a saturating count.
#[inline(always)]
pub fn life_rule(alive: bool, count: NeighborCount) -> bool {
    let k = count.sum.value();
    !count.overflow && ((alive && (k == 2 || k == 3)) || (!alive && k == 3))
}

/// Inputs one cell samples at a tick edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct CellInputs {
    pub alive: bool,
    pub neighbors: [bool; 8],
    pub shift_in: bool,
}

/// Next state of one cell.
#[inline(always)]
pub fn transition(inputs: &CellInputs, mode: Mode, backend: KernelBackend) -> bool {
    match mode {
        Mode::Evolve => life_rule(inputs.alive, count_neighbors(&inputs.neighbors, backend)),
        Mode::Shift => inputs.shift_in,
        Mode::Idle => inputs.alive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::adder::Sum2;

    fn count(k: u8) -> NeighborCount {
        NeighborCount {
            sum: Sum2::from_value(k),
            overflow: k >= 4,
        }
    }

    fn neighbors_with(k: usize) -> [bool; 8] {
        std::array::from_fn(|i| i < k)
    }

    #[test]
    fn life_rule_for_every_count() {
        for k in 0u8..=8 {
            for alive in [false, true] {
                let expected = (alive && (k == 2 || k == 3)) || (!alive && k == 3);
                assert_eq!(life_rule(alive, count(k)), expected, "alive={alive} k={k}");
            }
        }
    }

    #[test]
    fn named_rule_cases() {
        assert!(!life_rule(true, count(1)), "underpopulation");
        assert!(!life_rule(true, count(4)), "overpopulation");
        assert!(life_rule(false, count(3)), "birth");
        assert!(!life_rule(false, count(2)), "no birth");
    }

    #[test]
    fn overflow_hides_wrapped_sum() {
        // Seven neighbors wrap to 3 in two bits.
        let wrapped = NeighborCount {
            sum: Sum2::from_value(3),
            overflow: true,
        };
        assert!(!life_rule(false, wrapped));
        assert!(!life_rule(true, wrapped));
    }

    #[test]
    fn transition_per_mode() {
        let inputs = CellInputs {
            alive: true,
            neighbors: neighbors_with(5),
            shift_in: false,
        };
        for backend in [KernelBackend::AdderTree, KernelBackend::Popcount] {
            assert!(transition(&inputs, Mode::Idle, backend));
            assert!(!transition(&inputs, Mode::Shift, backend));
            assert!(!transition(&inputs, Mode::Evolve, backend));
        }

        let birth = CellInputs {
            alive: false,
            neighbors: neighbors_with(3),
            shift_in: true,
        };
        assert!(transition(&birth, Mode::Evolve, KernelBackend::AdderTree));
        assert!(transition(&birth, Mode::Shift, KernelBackend::AdderTree));
        assert!(!transition(&birth, Mode::Idle, KernelBackend::AdderTree));
    }

    #[test]
    fn dual_enable_is_rejected() {
        let both = Signals {
            shift_enable: true,
            evolve_enable: true,
            data_in: true,
        };
        assert!(matches!(both.mode(), Err(MeshError::DualEnable)));
        assert_eq!(Signals::IDLE.mode().ok(), Some(Mode::Idle));
        assert_eq!(Signals::EVOLVE.mode().ok(), Some(Mode::Evolve));
        assert_eq!(Signals::shift(true).mode().ok(), Some(Mode::Shift));
    }
}
