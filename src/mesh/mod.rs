//! Processing-element mesh internals and public API.

mod adder;
mod cell;
mod counter;
mod engine;
mod plane;
mod wiring;

pub use adder::{Sum2, bit_add, pair_add};
pub use cell::{CellInputs, Mode, Signals, life_rule, transition};
pub use counter::{
    AdderTrace, KernelBackend, NeighborCount, count_neighbors, count_popcount, count_tree,
    trace_tree,
};
pub use engine::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE, Mesh, MeshConfig};
pub use wiring::Direction;
