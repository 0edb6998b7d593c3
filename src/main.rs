//! UNIVERSE GAME - CLI Entry Point
//!
//! Serves the life universe over stdin/stdout, or runs it headless.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use universe_game::protocol::run_server;
use universe_game::{benchmark, Config, GameSession};

#[derive(Parser)]
#[command(name = "universe-game")]
#[command(version)]
#[command(about = "Conway's Game of Life with pattern detection, served as JSON-RPC tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tool requests on stdin/stdout (default)
    Serve {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "universe.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a session to its turn limit and print every turn
    Simulate {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "universe.yaml")]
        config: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Start from a named pattern instead of a random board
        #[arg(short, long)]
        pattern: Option<String>,

        /// Pattern origin row
        #[arg(short, long, default_value = "10")]
        x: i64,

        /// Pattern origin column
        #[arg(short, long, default_value = "10")]
        y: i64,

        /// Quiet mode (final summary only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of turns
        #[arg(short, long, default_value = "1000")]
        turns: u64,

        /// Initial density
        #[arg(short, long, default_value = "0.5")]
        density: f64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "universe.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve {
        config: PathBuf::from("universe.yaml"),
        seed: None,
    }) {
        Commands::Serve { config, seed } => serve(config, seed),

        Commands::Simulate {
            config,
            seed,
            pattern,
            x,
            y,
            quiet,
        } => simulate(config, seed, pattern, x, y, quiet),

        Commands::Benchmark {
            turns,
            density,
            seed,
        } => run_benchmark(turns, density, seed),

        Commands::Init { output } => generate_config(output),
    }
}

/// Load the config and start logging at its level; `RUST_LOG` still wins
fn load_config(path: &Path, seed: Option<u64>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if path.exists() {
        Config::from_file(path)?
    } else {
        Config::default()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    if path.exists() {
        log::info!("Loaded config from: {}", path.display());
    } else {
        log::info!("Using default configuration");
    }

    if seed.is_some() {
        config.simulation.seed = seed;
    }
    Ok(config)
}

fn serve(config_path: PathBuf, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path, seed)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(config))
}

fn simulate(
    config_path: PathBuf,
    seed: Option<u64>,
    pattern: Option<String>,
    x: i64,
    y: i64,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path, seed)?;
    let mut session = GameSession::new(config);

    if let Some(name) = pattern {
        let placement = session.add_pattern(&name, x, y)?;
        println!("{}", placement);
    }

    println!("Starting simulation");
    println!("  Session: {}", session.id);
    println!("  Seed: {}", session.seed());
    println!("  Initial population: {}", session.population());
    println!("  Turns: {}", session.max_turns());
    println!();

    if !quiet {
        println!("{}", session.renderer().plain(&session.grid));
    }

    let start = Instant::now();
    while let Some(summary) = session.step().summary().cloned() {
        if quiet {
            continue;
        }
        println!("{}", session.visual_display());
        for record in summary.recent_patterns.iter().filter(|r| r.turn == summary.turn) {
            let kinds: Vec<&str> = record.patterns.iter().map(|p| p.kind()).collect();
            println!("  Patterns: {}", kinds.join(", "));
        }
        println!();
    }
    let elapsed = start.elapsed();

    let stats = session.statistics();
    println!("=== Simulation Complete ===");
    println!("Time: {:.3}s", elapsed.as_secs_f64());
    println!("{}", stats.summary(session.turn, session.population()));
    println!("Net change: {:+}", stats.net_change());
    println!("Turns with patterns: {}", session.pattern_log.len());
    for event in session.interesting_events() {
        println!("  * {}", event);
    }

    Ok(())
}

fn run_benchmark(turns: u64, density: f64, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if !(0.0..=1.0).contains(&density) {
        return Err("density must be between 0.0 and 1.0".into());
    }

    println!("=== UNIVERSE Benchmark ===");
    println!("Turns: {}", turns);
    println!("Density: {}", density);
    println!();

    let result = benchmark(turns, density, seed);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
