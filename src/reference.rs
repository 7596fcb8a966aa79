//! Naive bounded Life step, used as the oracle for the mesh.
//!
//! Cells outside the grid count as dead; nothing wraps.

use crate::pattern::Pattern;

fn live_neighbors(grid: &Pattern, row: usize, col: usize) -> u8 {
    let n = grid.size() as isize;
    let cells = grid.row_major();
    let mut total = 0u8;
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = row as isize + dr;
            let c = col as isize + dc;
            if r < 0 || c < 0 || r >= n || c >= n {
                continue;
            }
            total += cells[(r * n + c) as usize] as u8;
        }
    }
    total
}

/// One generation.
pub fn step(grid: &Pattern) -> Pattern {
    let n = grid.size();
    let cells = grid.row_major();
    let next = (0..n * n)
        .map(|i| {
            let total = live_neighbors(grid, i / n, i % n);
            if cells[i] {
                total == 2 || total == 3
            } else {
                total == 3
            }
        })
        .collect();
    Pattern::from_cells(n, next)
}

pub fn run(grid: &Pattern, generations: u64) -> Pattern {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = step(&current);
    }
    current
}
