//! # Infinite City Generator
//!
//! Headless city generation. Loads a TOML config (or the defaults), builds
//! the whole world and prints a summary.
//!
//! ```bash
//! # Defaults: 5x5x1 chunks of 16x16x16
//! ./infinitecity
//!
//! # Custom config, seed override, 8 worker threads
//! ./infinitecity --config config/city.toml --seed 42 --workers 8
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use infinitecity_procedural::{
    CityConfig, CityWorld, GenerationResult, LotType, Tile, VoxelStore, WorldStats,
};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "infinitecity", version, about = "Generates a procedural voxel city")]
struct Args {
    /// TOML config file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured world seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Overrides the configured worker thread count
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                   INFINITE CITY GENERATOR v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════════");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> GenerationResult<()> {
    let mut config = match &args.config {
        Some(path) => {
            println!("[CONFIG] Loading {}", path.display());
            CityConfig::from_file(path)?
        }
        None => {
            println!("[CONFIG] No config file given, using defaults");
            CityConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let world = CityWorld::new(config)?;
    let config = world.config();
    let [wx, wy, wz] = world.world_size();
    println!("[CONFIG] Seed:         {}", config.seed);
    println!(
        "[CONFIG] Chunk size:   {}x{}x{}",
        config.chunk_size[0], config.chunk_size[1], config.chunk_size[2]
    );
    println!(
        "[CONFIG] World chunks: {}x{}x{} ({} total)",
        config.world_chunks[0],
        config.world_chunks[1],
        config.world_chunks[2],
        world.chunk_count()
    );
    println!("[CONFIG] World size:   {wx}x{wy}x{wz} voxels");

    let start = Instant::now();
    let (store, stats) = generate(&world)?;
    let elapsed = start.elapsed();

    report(&store, &stats);
    println!("[DONE] Generated in {elapsed:?}");
    Ok(())
}

fn generate(world: &CityWorld) -> GenerationResult<(VoxelStore, WorldStats)> {
    match world.config().workers {
        0 | 1 => {
            println!("[GEN] Generating on the main thread");
            world.generate()
        }
        workers => {
            println!("[GEN] Generating with {workers} workers");
            world.generate_parallel(workers)
        }
    }
}

fn report(store: &VoxelStore, stats: &WorldStats) {
    println!("───────────────────────────────────────────────────────────────────");
    for lot_type in LotType::ALL {
        println!("[STATS] {:<12} {} chunks", format!("{lot_type:?}"), stats.chunks(lot_type));
    }
    println!("[STATS] Buildings    {}", stats.buildings);
    println!("[STATS] Floors       {}", stats.floors);
    for tile in [Tile::Solid, Tile::Window] {
        println!("[STATS] {:<12} {} voxels", format!("{tile:?}"), store.count(tile));
    }
    println!("───────────────────────────────────────────────────────────────────");
}
