use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vista_input::Action;
use vista_landscape::{Landscape, LandscapeConfig};
use vista_placement::{AttemptLimit, Region, place_trees};
use vista_render::{DebugTextRenderer, Renderer};

#[derive(Parser)]
#[command(name = "vista-cli", about = "Headless tool for the landscape scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; overrides the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Build the scene once and print it
    Build {
        /// List every entity, grass included
        #[arg(long)]
        all: bool,
    },
    /// Build the scene and run the animation loop headlessly
    Simulate {
        /// Number of ticks to run
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Toggle the camera mode before these ticks (repeatable)
        #[arg(long)]
        toggle_at: Vec<u64>,
        /// Normalized pointer x in [-1, 1]
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        pointer_x: f32,
        /// Normalized pointer y in [-1, 1]
        #[arg(long, allow_negative_numbers = true, default_value = "0")]
        pointer_y: f32,
        /// Print a frame every N ticks (0 prints only the last)
        #[arg(long, default_value = "0")]
        every: u64,
    },
    /// Run tree placement alone and print the positions
    Place {
        /// Number of trees
        #[arg(short, long, default_value = "20")]
        trees: usize,
        /// Minimum distance between trees
        #[arg(long, default_value = "5")]
        spacing: f32,
        /// Minimum distance between a tree and a mountain
        #[arg(long, default_value = "20")]
        mountain_distance: f32,
        /// Side length of the square sampling area centered on the origin
        #[arg(long, default_value = "75")]
        spread: f32,
        /// Rejected draws allowed per tree
        #[arg(long, default_value = "10000", conflicts_with = "unbounded")]
        max_attempts: u32,
        /// Retry forever; blocks when the constraints cannot be met
        #[arg(long)]
        unbounded: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<LandscapeConfig> {
    let mut config = match &cli.config {
        Some(path) => LandscapeConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => LandscapeConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("vista-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "seed: {}",
                config
                    .seed
                    .map_or_else(|| "entropy".to_string(), |s| s.to_string())
            );
            println!(
                "grass: {}  mountains: {}  trees: {} (spacing {}, mountain distance {}, attempts {:?})",
                config.grass.count,
                config.mountains.len(),
                config.trees.count,
                config.trees.min_tree_distance,
                config.trees.min_mountain_distance,
                config.trees.attempts
            );
            println!(
                "birds: {} at speed {}  camera: {:?} at {}",
                config.flock.count,
                config.flock.speed,
                config.camera.initial_mode,
                config.camera.initial_position
            );
            println!("media: {}", config.textures.media_dir.display());
        }
        Commands::Build { all } => {
            let landscape = Landscape::new(&config).context("building scene")?;
            let renderer = if all {
                DebugTextRenderer::verbose()
            } else {
                DebugTextRenderer::new()
            };
            print!("{}", renderer.render(landscape.scene(), &landscape.view()));
        }
        Commands::Simulate {
            ticks,
            toggle_at,
            pointer_x,
            pointer_y,
            every,
        } => {
            let mut landscape = Landscape::new(&config).context("building scene")?;
            landscape.handle(Action::PointerMoved(Vec2::new(pointer_x, pointer_y)));
            let renderer = DebugTextRenderer::summary_only();

            let mut respawns_before: u32 = 0;
            for tick in 0..ticks {
                if toggle_at.contains(&tick) {
                    landscape.handle(Action::ToggleCameraMode);
                }
                let frame = landscape.frame(&renderer);
                if (every > 0 && (tick + 1) % every == 0) || tick + 1 == ticks {
                    print!("{frame}");
                    println!("Mode: {:?}", landscape.mode());
                }
                let respawns: u32 = landscape.flock().birds().iter().map(|b| b.respawns).sum();
                if respawns != respawns_before {
                    tracing::debug!(tick = tick + 1, respawns, "birds wrapped");
                    respawns_before = respawns;
                }
            }
            println!("Bird respawns: {respawns_before}");
        }
        Commands::Place {
            trees,
            spacing,
            mountain_distance,
            spread,
            max_attempts,
            unbounded,
        } => {
            let mut params = config.trees.clone();
            params.count = trees;
            params.min_tree_distance = spacing;
            params.min_mountain_distance = mountain_distance;
            params.region = Region::centered(spread, spread);
            params.attempts = if unbounded {
                AttemptLimit::Unbounded
            } else {
                AttemptLimit::PerPlacement(max_attempts)
            };

            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mountains: Vec<Vec3> = config.mountains.iter().map(|m| m.position).collect();
            let positions = place_trees(&mut rng, &params, &mountains)?;
            for (i, p) in positions.iter().enumerate() {
                println!("tree {i:>3}: ({:>7.2}, {:>7.2})", p.x, p.z);
            }
            println!("Placed {} trees", positions.len());
        }
    }

    Ok(())
}
