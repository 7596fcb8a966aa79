//! Testbench vectors: a random initial grid and its state after a fixed
//! number of generations.
//!
//! Text layout, one grid row per line with every cell written as `'0', ` or
//! `'1', `:
//!
//! ```text
//! '0', '1', '0',
//! ...
//!
//!
//! '0', '0', '0',
//! ...
//! ```
//!
//! The initial grid comes first, then two blank lines, then the expected
//! grid.

use std::fmt;
use std::io::Write;

use rand::Rng;

use crate::driver::Driver;
use crate::error::{MeshError, Result};
use crate::pattern::Pattern;
use crate::reference;

pub const DEFAULT_DENSITY: f64 = 0.2;
pub const DEFAULT_GENERATIONS: u64 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVectors {
    pub initial: Pattern,
    pub expected: Pattern,
    pub generations: u64,
}

impl TestVectors {
    pub fn from_initial(initial: Pattern, generations: u64) -> Self {
        let expected = reference::run(&initial, generations);
        Self {
            initial,
            expected,
            generations,
        }
    }

    pub fn generate<R: Rng>(n: usize, density: f64, generations: u64, rng: &mut R) -> Result<Self> {
        Ok(Self::from_initial(Pattern::random(n, density, rng)?, generations))
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        write!(out, "{self}")?;
        out.flush()?;
        Ok(())
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parse vector text. The generation count is not part of the format.
    pub fn parse(text: &str, generations: u64) -> Result<Self> {
        let mut blocks: Vec<Vec<(usize, Vec<bool>)>> = Vec::new();
        let mut in_block = false;
        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                in_block = false;
                continue;
            }
            let row = parse_row(line, line_no)?;
            if !in_block {
                blocks.push(Vec::new());
                in_block = true;
            }
            if let Some(block) = blocks.last_mut() {
                block.push((line_no, row));
            }
        }

        let total_lines = text.lines().count();
        let [initial, expected]: [_; 2] =
            blocks.try_into().map_err(|blocks: Vec<_>| MeshError::Parse {
                line: total_lines,
                message: format!("expected 2 grids, found {}", blocks.len()),
            })?;
        let expected_line = block_line(&expected);
        let initial = block_to_pattern(initial)?;
        let expected = block_to_pattern(expected)?;
        if initial.size() != expected.size() {
            return Err(MeshError::Parse {
                line: expected_line,
                message: format!(
                    "grid sizes differ: {} vs {}",
                    initial.size(),
                    expected.size()
                ),
            });
        }
        Ok(Self {
            initial,
            expected,
            generations,
        })
    }

    /// Run the vectors through the mesh; true when the unloaded grid matches.
    pub fn check(&self, driver: &mut Driver) -> Result<bool> {
        let actual = driver.run(&self.initial, self.generations)?;
        if actual != self.expected {
            log::info!(
                "mismatch after {} generations: expected {} live, got {}",
                self.generations,
                self.expected.population(),
                actual.population()
            );
        }
        Ok(actual == self.expected)
    }
}

impl fmt::Display for TestVectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.initial)?;
        f.write_str("\n\n")?;
        write_grid(f, &self.expected)
    }
}

fn write_grid(f: &mut fmt::Formatter<'_>, grid: &Pattern) -> fmt::Result {
    for row in grid.rows() {
        for &alive in row {
            write!(f, "'{}', ", alive as u8)?;
        }
        f.write_str("\n")?;
    }
    Ok(())
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<bool>> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token {
            "'0'" | "0" => Ok(false),
            "'1'" | "1" => Ok(true),
            other => Err(MeshError::Parse {
                line: line_no,
                message: format!("unexpected cell value {other:?}"),
            }),
        })
        .collect()
}

fn block_line(block: &[(usize, Vec<bool>)]) -> usize {
    block.first().map_or(0, |(line, _)| *line)
}

fn block_to_pattern(block: Vec<(usize, Vec<bool>)>) -> Result<Pattern> {
    let first_line = block_line(&block);
    let n = block.len();
    if let Some((line, row)) = block.iter().find(|(_, row)| row.len() != n) {
        return Err(MeshError::Parse {
            line: *line,
            message: format!("row has {} cells, grid has {} rows", row.len(), n),
        });
    }
    Pattern::from_rows(block.into_iter().map(|(_, row)| row).collect()).map_err(|err| {
        MeshError::Parse {
            line: first_line,
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::{DEFAULT_DENSITY, DEFAULT_GENERATIONS, TestVectors};
    use crate::error::MeshError;
    use crate::pattern::Pattern;

    #[test]
    fn text_layout_matches_testbench_format() {
        let initial = Pattern::with_cells(2, &[(0, 1)]).unwrap();
        let vectors = TestVectors::from_initial(initial, 1);
        assert_eq!(vectors.to_text(), "'0', '1', \n'0', '0', \n\n\n'0', '0', \n'0', '0', \n");
    }

    #[test]
    fn parse_reads_back_generated_vectors() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x7E57);
        let vectors =
            TestVectors::generate(10, DEFAULT_DENSITY, DEFAULT_GENERATIONS, &mut rng).unwrap();
        let parsed = TestVectors::parse(&vectors.to_text(), DEFAULT_GENERATIONS).unwrap();
        assert_eq!(parsed, vectors);
    }

    #[test]
    fn parse_rejects_bad_cells_with_line_number() {
        let text = "'0', '1', \n'0', 'x', \n\n\n'0', '0', \n'0', '0', \n";
        match TestVectors::parse(text, 1) {
            Err(MeshError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_reports_expected_block_line_on_size_mismatch() {
        let text = "'0', \n\n\n'0', '0', \n'0', '0', \n";
        assert!(matches!(
            TestVectors::parse(text, 1),
            Err(MeshError::Parse { line: 4, .. })
        ));
    }

    #[test]
    fn generate_rejects_nan_density() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(matches!(
            TestVectors::generate(10, f64::NAN, DEFAULT_GENERATIONS, &mut rng),
            Err(MeshError::InvalidDensity { .. })
        ));
    }

    #[test]
    fn parse_rejects_missing_grid() {
        assert!(TestVectors::parse("'0', \n", 1).is_err());
    }

    #[test]
    fn parse_rejects_non_square_grid() {
        let text = "'0', '1', '0', \n'0', '0', '0', \n\n\n'0', '0', \n'0', '0', \n";
        assert!(matches!(
            TestVectors::parse(text, 1),
            Err(MeshError::Parse { line: 1, .. })
        ));
    }
}
