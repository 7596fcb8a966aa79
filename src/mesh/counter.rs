//! Saturating eight-input neighbor counter.
//!
//! The adder tree pairs the inputs (level 1, four `bit_add`s), folds the
//! partial sums pairwise (level 2, two `pair_add`s) and once more (level 3).
//! Any level-2 or level-3 overflow means the true count is at least four;
//! below that the final 2-bit sum is exact.

use std::str::FromStr;

use super::adder::{Sum2, bit_add, pair_add};

/// Neighbor-count evaluation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelBackend {
    /// Three-level adder tree, bit-exact with the circuit.
    AdderTree,
    /// Population count saturated at four.
    Popcount,
}

impl FromStr for KernelBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" | "adder-tree" | "addertree" => Ok(KernelBackend::AdderTree),
            "popcount" | "popcnt" => Ok(KernelBackend::Popcount),
            other => Err(format!(
                "unknown kernel backend: {other} (expected tree or popcount)"
            )),
        }
    }
}

/// Count of live neighbors, exact for 0..=3.
///
/// When `overflow` is set the count is four or more and `sum` carries no
/// meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCount {
    pub sum: Sum2,
    pub overflow: bool,
}

impl NeighborCount {
    /// `Some(k)` for an exact count, `None` once saturated.
    #[inline]
    pub fn exact(self) -> Option<u8> {
        (!self.overflow).then(|| self.sum.value())
    }
}

/// Every intermediate value produced by the adder tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdderTrace {
    pub partials: [Sum2; 4],
    pub level2: [(Sum2, bool); 2],
    pub level3: (Sum2, bool),
}

impl AdderTrace {
    #[inline]
    pub fn count(&self) -> NeighborCount {
        NeighborCount {
            sum: self.level3.0,
            overflow: self.level2[0].1 | self.level2[1].1 | self.level3.1,
        }
    }
}

/// Run the adder tree and keep every intermediate flag.
#[inline(always)]
pub fn trace_tree(n: &[bool; 8]) -> AdderTrace {
    let partials = [
        bit_add(n[0], n[1]),
        bit_add(n[2], n[3]),
        bit_add(n[4], n[5]),
        bit_add(n[6], n[7]),
    ];
    let level2 = [
        pair_add(partials[0], partials[1]),
        pair_add(partials[2], partials[3]),
    ];
    let level3 = pair_add(level2[0].0, level2[1].0);
    AdderTrace {
        partials,
        level2,
        level3,
    }
}

#[inline(always)]
pub fn count_tree(n: &[bool; 8]) -> NeighborCount {
    trace_tree(n).count()
}

#[inline(always)]
pub fn count_popcount(n: &[bool; 8]) -> NeighborCount {
    let k = n.iter().filter(|&&b| b).count() as u8;
    NeighborCount {
        sum: Sum2::from_value(k),
        overflow: k >= 4,
    }
}

#[inline(always)]
pub fn count_neighbors(n: &[bool; 8], backend: KernelBackend) -> NeighborCount {
    match backend {
        KernelBackend::AdderTree => count_tree(n),
        KernelBackend::Popcount => count_popcount(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack(mask: u8) -> [bool; 8] {
        std::array::from_fn(|i| (mask >> i) & 1 == 1)
    }

    #[test]
    fn tree_saturates_at_four_for_every_subset() {
        for mask in 0u8..=u8::MAX {
            let k = mask.count_ones() as u8;
            let count = count_tree(&unpack(mask));
            if k <= 3 {
                assert!(!count.overflow, "mask {mask:08b} should not overflow");
                assert_eq!(count.sum.value(), k, "mask {mask:08b}");
                assert_eq!(count.exact(), Some(k));
            } else {
                assert!(count.overflow, "mask {mask:08b} (k={k}) should overflow");
                assert_eq!(count.exact(), None);
            }
        }
    }

    #[test]
    fn popcount_agrees_with_tree() {
        for mask in 0u8..=u8::MAX {
            let n = unpack(mask);
            let tree = count_tree(&n);
            let pop = count_popcount(&n);
            assert_eq!(tree.overflow, pop.overflow, "mask {mask:08b}");
            assert_eq!(tree.exact(), pop.exact(), "mask {mask:08b}");
        }
    }

    #[test]
    fn level_one_never_exceeds_two() {
        for mask in 0u8..=u8::MAX {
            let trace = trace_tree(&unpack(mask));
            for partial in trace.partials {
                assert!(partial.value() <= 2);
            }
        }
    }

    #[test]
    fn four_in_one_half_overflows_at_level_two() {
        // All four live neighbors land in the first level-2 adder.
        let trace = trace_tree(&unpack(0b0000_1111));
        assert!(trace.level2[0].1);
        assert!(!trace.level2[1].1);
        assert!(!trace.level3.1);
        assert!(trace.count().overflow);
    }

    #[test]
    fn split_four_overflows_at_level_three() {
        let trace = trace_tree(&unpack(0b0011_0011));
        assert!(!trace.level2[0].1);
        assert!(!trace.level2[1].1);
        assert!(trace.level3.1);
        assert!(trace.count().overflow);
    }

    #[test]
    fn backend_parses_from_str() {
        assert_eq!("tree".parse::<KernelBackend>(), Ok(KernelBackend::AdderTree));
        assert_eq!(" Popcount ".parse::<KernelBackend>(), Ok(KernelBackend::Popcount));
        assert!("avx2".parse::<KernelBackend>().is_err());
    }
}
