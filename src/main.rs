#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use mesh_life::vectors::{DEFAULT_DENSITY, DEFAULT_GENERATIONS};
use mesh_life::{DEFAULT_GRID_SIZE, Driver, KernelBackend, Mesh, MeshConfig, Pattern, TestVectors};
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "mesh-life", version, about = "Game of Life on a shift-loaded cell mesh")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a random initial grid and its expected evolution.
    Vectors {
        #[command(flatten)]
        grid: GridArgs,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Shift a grid into the mesh, evolve it and shift it back out.
    Run {
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Vector file to check instead of a random grid.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Shift a random stream in and out again without evolving.
    ShiftCheck {
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    #[arg(short = 'n', long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,
    #[arg(short, long, default_value_t = DEFAULT_DENSITY)]
    density: f64,
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    generations: u64,
    /// RNG seed; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
}

impl GridArgs {
    fn rng(&self) -> rand::rngs::StdRng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!("seed {seed:#x}");
        rand::rngs::StdRng::seed_from_u64(seed)
    }
}

#[derive(Args)]
struct EngineArgs {
    #[arg(long)]
    threads: Option<usize>,
    /// Neighbor-count kernel: tree or popcount.
    #[arg(long)]
    kernel: Option<KernelBackend>,
}

impl EngineArgs {
    fn config(&self, size: usize) -> MeshConfig {
        let mut config = MeshConfig::default().size(size);
        if let Some(threads) = self.threads {
            config = config.thread_count(threads);
        }
        if let Some(kernel) = self.kernel {
            config = config.kernel(kernel);
        }
        config
    }
}

fn write_vectors(grid: &GridArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let vectors =
        TestVectors::generate(grid.size, grid.density, grid.generations, &mut grid.rng())?;
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            vectors.write_to(BufWriter::new(file))?;
            info!("wrote {}x{} vectors to {}", grid.size, grid.size, path.display());
        }
        None => vectors.write_to(std::io::stdout().lock())?,
    }
    Ok(())
}

fn run(grid: &GridArgs, engine: &EngineArgs, input: Option<PathBuf>) -> anyhow::Result<bool> {
    let vectors = match input {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            TestVectors::parse(&text, grid.generations)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            TestVectors::generate(grid.size, grid.density, grid.generations, &mut grid.rng())?
        }
    };

    let size = vectors.initial.size();
    let mesh = Mesh::with_config(engine.config(size))?;
    info!(
        "{size}x{size} mesh, {:?} kernel, {} threads",
        mesh.backend(),
        mesh.thread_count()
    );
    let mut driver = Driver::new(mesh);
    driver.load(&vectors.initial)?;
    driver.evolve(vectors.generations)?;
    let result = driver.unload()?;

    println!("initial:\n{}", vectors.initial);
    println!("after {} generations:\n{}", vectors.generations, result);
    info!("{} ticks", driver.mesh().ticks());

    if result != vectors.expected {
        warn!("mesh disagrees with reference model");
        println!("expected:\n{}", vectors.expected);
        return Ok(false);
    }
    info!("mesh matches reference model");
    Ok(true)
}

fn shift_check(grid: &GridArgs, engine: &EngineArgs) -> anyhow::Result<bool> {
    let mut rng = grid.rng();
    let pattern = Pattern::random(grid.size, grid.density, &mut rng)?;
    let mut driver = Driver::new(Mesh::with_config(engine.config(grid.size))?);
    let bits = pattern.row_major().to_vec();
    driver.shift_in(bits.iter().copied())?;
    let out = driver.shift_out(bits.len())?;
    if out != bits {
        let first = out.iter().zip(&bits).position(|(a, b)| a != b);
        bail!("stream mismatch at bit {first:?}");
    }
    info!("{} bits round-tripped", bits.len());
    Ok(true)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Vectors { grid, output } => {
            write_vectors(&grid, output)?;
            true
        }
        Command::Run {
            grid,
            engine,
            input,
        } => run(&grid, &engine, input)?,
        Command::ShiftCheck { grid, engine } => shift_check(&grid, &engine)?,
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
