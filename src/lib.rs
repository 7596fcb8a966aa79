//! Conway's Game of Life (B3/S23) on a synchronous mesh of one-cell
//! processing elements, loaded and read back through a serial shift chain.

pub mod driver;
pub mod error;
pub mod mesh;
pub mod pattern;
pub mod reference;
pub mod vectors;

pub use driver::Driver;
pub use error::{MeshError, Result};
pub use mesh::{DEFAULT_GRID_SIZE, KernelBackend, MAX_GRID_SIZE, Mesh, MeshConfig, Signals};
pub use pattern::Pattern;
pub use vectors::TestVectors;
