//! Alien Radar - Entry Point
//!
//! Builds a zone from the default aliens (plus any extra sprites from a
//! file), runs a number of ticks and prints the resulting frame. With
//! `--sync-every`, the extra sprites go through an expiring body cache and
//! join or leave the zone as the cache is reconciled.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use alien_radar::body::{BodyCache, BodyLibrary, BodyShape};
use alien_radar::core::error::Result;
use alien_radar::core::SimulationConfig;
use alien_radar::zone::{ObjectRequest, Zone, ZoneBuilder, ZoneProfile};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Alien Radar - wandering ASCII aliens on a noisy radar screen
#[derive(Parser, Debug)]
#[command(name = "alien-radar")]
#[command(about = "Simulate sprite-shaped objects wandering a bounded zone")]
struct Args {
    /// Zone size preset: small, medium or large
    #[arg(long, default_value = "large")]
    profile: ZoneProfile,

    /// Custom zone width (overrides the profile)
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Custom zone height (overrides the profile)
    #[arg(long, requires = "width")]
    height: Option<usize>,

    /// Simulation ticks to run before printing
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long, default_value = "data/radar.toml")]
    config: PathBuf,

    /// Percentage of each row overwritten with matter
    #[arg(long)]
    positive_noise: Option<u32>,

    /// Percentage of each row overwritten with void
    #[arg(long)]
    negative_noise: Option<u32>,

    /// Print the occupancy grid instead of the sprites
    #[arg(long)]
    occupancy: bool,

    /// Print a JSON snapshot after the run
    #[arg(long)]
    json: bool,

    /// File with extra sprites separated by blank lines
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Objects created for each extra sprite
    #[arg(long, default_value_t = 1)]
    extra_count: usize,

    /// Feed the extra sprites through the body cache and sync every N ticks
    #[arg(long, requires = "bodies", value_parser = clap::value_parser!(u64).range(1..))]
    sync_every: Option<u64>,

    /// Redraw the zone in place after every tick
    #[arg(long)]
    animate: bool,

    /// Delay between animated frames in milliseconds
    #[arg(long, default_value_t = 200)]
    frame_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("alien_radar=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        SimulationConfig::load(&args.config)?
    } else {
        tracing::warn!("Config {:?} not found, using defaults", args.config);
        SimulationConfig::default()
    };
    if let Some(noise) = args.positive_noise {
        config.render.positive_noise = noise;
    }
    if let Some(noise) = args.negative_noise {
        config.render.negative_noise = noise;
    }

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    tracing::info!("Using seed {}", seed);
    let rng = ChaCha8Rng::seed_from_u64(seed);

    let library = BodyLibrary::with_defaults()?;
    let builder = ZoneBuilder::new(&library, config.clone());
    let mut requests = builder.default_requests();
    let mut cache = BodyCache::new(config.bodies.clone());
    if let Some(path) = &args.bodies {
        for shape in load_extra_bodies(path, &config)? {
            if args.sync_every.is_some() {
                for _ in 0..args.extra_count {
                    cache.add_body(&shape.to_string())?;
                }
            } else {
                requests.push(ObjectRequest::new(Arc::new(shape), args.extra_count));
            }
        }
    }

    let mut zone = match (args.width, args.height) {
        (Some(width), Some(height)) => builder.build_custom(width, height, &requests, rng)?,
        _ => builder.build(args.profile, &requests, rng)?,
    };

    if args.sync_every.is_some() {
        sync_with_cache(&mut zone, &mut cache)?;
    }

    let mut stdout = io::stdout();
    for _ in 0..args.ticks {
        let report = zone.move_objects();
        if let Some(every) = args.sync_every {
            cache.advance(1);
            if report.tick % every == 0 {
                cache.purge_expired();
                sync_with_cache(&mut zone, &mut cache)?;
            }
        }
        if args.animate {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
            writeln!(stdout, "{}", frame(&mut zone, args.occupancy))?;
            writeln!(stdout, "tick {}: {} moved, {} stalled", report.tick, report.moved, report.stalled)?;
            stdout.flush()?;
            thread::sleep(Duration::from_millis(args.frame_ms));
        }
    }

    if args.json {
        writeln!(stdout, "{}", zone.snapshot().to_json()?)?;
    } else if !args.animate {
        writeln!(stdout, "{}", frame(&mut zone, args.occupancy))?;
    }
    Ok(())
}

fn sync_with_cache(zone: &mut Zone, cache: &mut BodyCache) -> Result<()> {
    let report = zone.sync(cache)?;
    tracing::info!(
        "Synced with body cache at tick {}: {} added, {} removed, {} rejected, {} unplaced",
        zone.tick(),
        report.added.len(),
        report.removed.len(),
        report.rejected.len(),
        report.unplaced.len()
    );
    Ok(())
}

fn frame(zone: &mut Zone, occupancy: bool) -> String {
    if occupancy {
        zone.draw_occupancy_grid()
    } else {
        zone.render_frame()
    }
}

/// Parse a sprite file: sprites are separated by blank lines and each one
/// must pass the size rule
fn load_extra_bodies(path: &Path, config: &SimulationConfig) -> Result<Vec<BodyShape>> {
    let contents = std::fs::read_to_string(path)?;
    let shapes = BodyShape::parse_many(&contents, &config.bodies)?;
    tracing::info!("Loaded {} extra bodies from {:?}", shapes.len(), path);
    Ok(shapes)
}
