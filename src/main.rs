//! Headless dungeon simulator.
//!
//! Drives the engine with a scripted hero: walk the shortest floor path to
//! the exit, with occasional random detours. Prints the score record (or the
//! full snapshot) as JSON when the run ends or the tick budget is spent.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use dungeon_core::difficulty::Preset;
use dungeon_core::engine::{Engine, EngineConfig, Intent, ProfileSelection};
use dungeon_core::generation::{Dungeon, Point, Step};
use dungeon_core::logging::{init_tracing, LogLevel, TimingSpan};
use dungeon_core::player::HeroClass;

/// The hero acts once every this many ticks
const HERO_MOVE_EVERY_TICKS: u64 = 4;

/// Chance that the hero takes a random step instead of following its path
const DETOUR_CHANCE: f64 = 0.15;

/// Headless dungeon simulator
#[derive(Parser, Debug)]
#[command(name = "dungeon-sim")]
#[command(version, about = "Run a seeded dungeon with a scripted hero", long_about = None)]
struct Args {
    /// Config file (.json or .ron)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the starting seed
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Override the difficulty preset (normal/hard)
    #[arg(short = 'p', long = "preset")]
    preset: Option<String>,

    /// Hero class (warrior/rogue/mage)
    #[arg(long = "class")]
    class: Option<String>,

    /// Number of ticks to simulate
    #[arg(short = 't', long = "ticks", default_value_t = 2000)]
    ticks: u64,

    /// Seed for the scripted hero's detours
    #[arg(long = "driver-seed", default_value_t = 0)]
    driver_seed: u64,

    /// Default log level (trace/debug/info/warn/error)
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the full final snapshot instead of the score record
    #[arg(long = "snapshot")]
    snapshot: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    let mut logging = config.logging.clone();
    if let Some(name) = &args.log_level {
        let level = LogLevel::parse(name).with_context(|| format!("unknown log level: {name}"))?;
        logging = logging.with_default_level(level);
    }
    init_tracing(&logging);

    let mut engine = Engine::new(&config, 0).context("failed to start engine")?;
    let mut driver = StdRng::seed_from_u64(args.driver_seed);
    let interval = config.tick_interval_ms();

    {
        let _span = TimingSpan::new("simulation");
        for tick in 1..=args.ticks {
            let now = tick * interval;
            if tick % HERO_MOVE_EVERY_TICKS == 0 {
                let step = choose_step(engine.dungeon(), engine.hero().position, &mut driver);
                engine.apply(Intent::Move {
                    dx: step.dx,
                    dy: step.dy,
                });
            }
            engine.tick(now);
            if !engine.is_running() {
                break;
            }
        }
    }

    let record = engine.score_record();
    info!(
        level = record.dungeon_level,
        score = record.score,
        health = engine.hero().health,
        running = engine.is_running(),
        "Simulation finished"
    );

    let output = if args.snapshot {
        serde_json::to_string_pretty(&engine.snapshot())
    } else {
        serde_json::to_string_pretty(&record)
    }
    .context("failed to serialize result")?;
    println!("{output}");
    Ok(())
}

fn build_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(name) = &args.preset {
        let preset: Preset = name.parse()?;
        config.profile = ProfileSelection::Preset(preset);
    }
    if let Some(name) = &args.class {
        config.hero_class = parse_class(name)?;
    }
    config.validate()?;
    Ok(config)
}

fn parse_class(name: &str) -> Result<HeroClass> {
    match name.trim().to_ascii_lowercase().as_str() {
        "warrior" => Ok(HeroClass::Warrior),
        "rogue" => Ok(HeroClass::Rogue),
        "mage" => Ok(HeroClass::Mage),
        other => anyhow::bail!("unknown hero class: {other}"),
    }
}

fn choose_step(dungeon: &Dungeon, from: Point, driver: &mut StdRng) -> Step {
    if driver.gen_bool(DETOUR_CHANCE) {
        return Step::CARDINALS[driver.gen_range(0..Step::CARDINALS.len())];
    }
    match first_step_toward(dungeon, from, dungeon.exit) {
        Some(step) => step,
        None => Step::CARDINALS[driver.gen_range(0..Step::CARDINALS.len())],
    }
}

/// First step of a shortest 4-connected floor path, if one exists.
fn first_step_toward(dungeon: &Dungeon, from: Point, to: Point) -> Option<Step> {
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    came_from.insert(from, from);

    while let Some(p) = queue.pop_front() {
        if p == to {
            break;
        }
        for step in Step::CARDINALS {
            let next = p + step;
            if dungeon.grid.is_floor(next) && !came_from.contains_key(&next) {
                came_from.insert(next, p);
                queue.push_back(next);
            }
        }
    }

    let mut cursor = to;
    let mut previous = *came_from.get(&cursor)?;
    while previous != from {
        cursor = previous;
        previous = *came_from.get(&cursor)?;
    }
    Some(Step::toward(cursor.x - from.x, cursor.y - from.y))
}
