use rayon::prelude::*;

use super::cell::{Mode, Signals, transition};
use super::counter::KernelBackend;
use super::plane::Plane;
use super::wiring::{self, Wiring};
use crate::error::{MeshError, Result};
use crate::pattern::Pattern;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const MAX_GRID_SIZE: usize = 4096;
const PARALLEL_MIN_CELLS: usize = 4096;
const KERNEL_ENV: &str = "MESH_LIFE_KERNEL";

/// Configuration for a mesh instance.
///
/// `MeshConfig::default()` builds the reference 10x10 mesh with auto-sized
/// scheduling; the builder methods override individual knobs.
#[derive(Clone, Debug)]
pub struct MeshConfig {
    /// Grid dimension `N`, fixed for the lifetime of the mesh.
    pub size: usize,
    /// Number of threads for the evaluation pool.
    /// `None` means rayon's default parallelism.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    pub max_threads: Option<usize>,
    /// Neighbor-count backend. `None` reads `MESH_LIFE_KERNEL`, falling
    /// back to the adder tree.
    pub kernel: Option<KernelBackend>,
    /// Grids with fewer cells than this are evaluated on the calling thread.
    pub parallel_min_cells: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            thread_count: None,
            max_threads: None,
            kernel: None,
            parallel_min_cells: PARALLEL_MIN_CELLS,
        }
    }
}

impl MeshConfig {
    pub fn size(mut self, n: usize) -> Self {
        self.size = n;
        self
    }

    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    pub fn kernel(mut self, backend: KernelBackend) -> Self {
        self.kernel = Some(backend);
        self
    }

    pub fn parallel_min_cells(mut self, cells: usize) -> Self {
        self.parallel_min_cells = cells;
        self
    }
}

fn resolve_thread_count(config: &MeshConfig) -> usize {
    let mut threads = config
        .thread_count
        .unwrap_or_else(rayon::current_num_threads);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.max(1)
}

fn resolve_kernel_backend(config: &MeshConfig) -> KernelBackend {
    if let Some(backend) = config.kernel {
        return backend;
    }
    kernel_from_env(std::env::var(KERNEL_ENV).ok().as_deref())
}

/// Backend named by the `MESH_LIFE_KERNEL` value, adder tree when unset or
/// unrecognized.
fn kernel_from_env(value: Option<&str>) -> KernelBackend {
    match value {
        Some(value) if !value.trim().is_empty() => match value.parse() {
            Ok(backend) => backend,
            Err(err) => {
                log::warn!("{KERNEL_ENV}: {err}; using adder tree");
                KernelBackend::AdderTree
            }
        },
        _ => KernelBackend::AdderTree,
    }
}

/// Evaluate interior row `r` of the next buffer from the current snapshot.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn evaluate_row(
    current: &[bool],
    row: &mut [bool],
    r: usize,
    n: usize,
    wiring: &Wiring,
    signals: &Signals,
    mode: Mode,
    backend: KernelBackend,
) {
    for c in 1..=n {
        row[c] = transition(&wiring.inputs(current, r, c, signals), mode, backend);
    }
}

/// An `N`-by-`N` mesh of Life cells driven one synchronous tick at a time.
pub struct Mesh {
    plane: Plane,
    wiring: Wiring,
    backend: KernelBackend,
    pool: rayon::ThreadPool,
    threads: usize,
    parallel_min_cells: usize,
    ticks: u64,
    generation: u64,
}

impl Mesh {
    /// Mesh of dimension `n` with default scheduling.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_config(MeshConfig::default().size(n))
    }

    pub fn with_config(config: MeshConfig) -> Result<Self> {
        if config.size == 0 || config.size > MAX_GRID_SIZE {
            return Err(MeshError::InvalidSize { size: config.size });
        }
        let threads = resolve_thread_count(&config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| MeshError::ThreadPool(err.to_string()))?;
        let backend = resolve_kernel_backend(&config);
        let plane = Plane::new(config.size);
        let wiring = Wiring::new(&plane);

        log::debug!(
            "mesh {n}x{n}: {threads} threads, {backend:?} kernel, parallel from {min} cells",
            n = config.size,
            min = config.parallel_min_cells,
        );

        Ok(Self {
            plane,
            wiring,
            backend,
            pool,
            threads,
            parallel_min_cells: config.parallel_min_cells,
            ticks: 0,
            generation: 0,
        })
    }

    /// Advance one tick.
    ///
    /// Returns the serial output valid during this tick, i.e. the state of
    /// the last cell before the commit. A tick with both enables set is
    /// rejected and leaves the mesh untouched.
    pub fn tick(&mut self, signals: Signals) -> Result<bool> {
        let mode = signals.mode()?;
        let out = self.data_out();
        if mode != Mode::Idle {
            self.evaluate(mode, &signals);
            self.plane.swap();
        }
        self.finish_tick(mode);
        Ok(out)
    }

    /// Advance one tick evaluating cells serially in `order`.
    ///
    /// `order` must be a permutation of the row-major interior indices
    /// `0..N*N`. The result never depends on it: every cell reads the same
    /// committed snapshot.
    pub fn tick_ordered(&mut self, signals: Signals, order: &[usize]) -> Result<bool> {
        let mode = signals.mode()?;
        let cells = self.plane.size() * self.plane.size();
        if order.len() != cells {
            return Err(MeshError::InvalidOrder);
        }
        let mut seen = vec![false; cells];
        for &i in order {
            if i >= cells || std::mem::replace(&mut seen[i], true) {
                return Err(MeshError::InvalidOrder);
            }
        }

        let out = self.data_out();
        if mode != Mode::Idle {
            let n = self.plane.size();
            let stride = self.plane.stride();
            let wiring = self.wiring;
            let backend = self.backend;
            let (current, next) = self.plane.current_and_next_mut();
            for &i in order {
                let (r, c) = (i / n + 1, i % n + 1);
                next[r * stride + c] =
                    transition(&wiring.inputs(current, r, c, &signals), mode, backend);
            }
            self.plane.swap();
        }
        self.finish_tick(mode);
        Ok(out)
    }

    fn evaluate(&mut self, mode: Mode, signals: &Signals) {
        let n = self.plane.size();
        let stride = self.plane.stride();
        let wiring = self.wiring;
        let backend = self.backend;
        let parallel = self.threads > 1 && n * n >= self.parallel_min_cells;
        let (current, next) = self.plane.current_and_next_mut();

        if parallel {
            self.pool.install(|| {
                next.par_chunks_mut(stride)
                    .enumerate()
                    .skip(1)
                    .take(n)
                    .for_each(|(r, row)| {
                        evaluate_row(current, row, r, n, &wiring, signals, mode, backend);
                    });
            });
        } else {
            for (r, row) in next.chunks_mut(stride).enumerate().skip(1).take(n) {
                evaluate_row(current, row, r, n, &wiring, signals, mode, backend);
            }
        }
    }

    #[inline]
    fn finish_tick(&mut self, mode: Mode) {
        // Idle holds: the current buffer already is the committed state.
        if mode == Mode::Evolve {
            self.generation += 1;
        }
        self.ticks += 1;
        log::trace!("tick {} {:?} gen {}", self.ticks, mode, self.generation);
    }

    /// Current state of the last cell in shift order.
    #[inline]
    pub fn data_out(&self) -> bool {
        wiring::data_out(&self.plane)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.plane.size()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of committed evolve ticks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn backend(&self) -> KernelBackend {
        self.backend
    }

    pub fn thread_count(&self) -> usize {
        self.threads
    }

    pub fn population(&self) -> u64 {
        self.plane.population()
    }

    /// Read-only probe of cell `(row, col)`, 0-based.
    pub fn cell(&self, row: usize, col: usize) -> Result<bool> {
        let n = self.plane.size();
        if row >= n || col >= n {
            return Err(MeshError::CellOutOfRange { row, col, size: n });
        }
        Ok(self.plane.get(row + 1, col + 1))
    }

    /// Copy of the committed grid.
    pub fn snapshot(&self) -> Pattern {
        let n = self.plane.size();
        let current = self.plane.current();
        let cells = (0..n * n)
            .map(|i| current[self.plane.interior_index(i)])
            .collect();
        Pattern::from_cells(n, cells)
    }

    #[cfg(test)]
    fn border_is_dead(&self) -> bool {
        self.plane.border_is_dead()
    }
}
