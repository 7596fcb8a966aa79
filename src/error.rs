use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("shift and evolve enabled in the same tick")]
    DualEnable,
    #[error("grid size {size} is out of range (1..={max})", max = crate::MAX_GRID_SIZE)]
    InvalidSize { size: usize },
    #[error("expected {expected} bits, got {actual}")]
    StreamLength { expected: usize, actual: usize },
    #[error("density {density} is outside 0..=1")]
    InvalidDensity { density: f64 },
    #[error("evaluation order is not a permutation of the grid cells")]
    InvalidOrder,
    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    CellOutOfRange { row: usize, col: usize, size: usize },
    #[error("failed to build mesh thread pool: {0}")]
    ThreadPool(String),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, MeshError>;
