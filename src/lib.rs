//! Dungeon Core Library
//!
//! Deterministic logic for a seeded dungeon crawler:
//! - Seeded number stream (LCG) shared by generation and monster AI
//! - Dungeon builder (rooms, corridors, entrance/exit)
//! - Entity placement (loot, monsters, colored doors and keys)
//! - Monster AI (random, patrol, ambush, chase)
//! - Hero movement, inventory, damage and level transitions
//! - Tick driver with an intent API, read model and score record

pub mod constants;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod generation;
pub mod logging;
pub mod loot;
pub mod monster;
pub mod player;
pub mod rng;

pub use difficulty::{DifficultyProfile, Preset};
pub use engine::{Engine, EngineConfig, Intent, ScoreRecord};
pub use error::{ConfigError, ConfigResult};
pub use generation::Dungeon;
pub use player::{Hero, HeroClass};
