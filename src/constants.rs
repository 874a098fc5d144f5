//! Centralized game constants for the dungeon core.
//!
//! Per-module catalogs (monster types, loot table, hero classes) remain in
//! their respective modules as the single source of truth.

// =====================================================
// Seeded Generator
// =====================================================

/// LCG multiplier
pub const RNG_MULTIPLIER: u64 = 9301;

/// LCG increment
pub const RNG_INCREMENT: u64 = 49297;

/// LCG modulus; draws are `state / RNG_MODULUS`
pub const RNG_MODULUS: u64 = 233_280;

// =====================================================
// Dungeon Builder
// =====================================================

/// Smallest room edge (inclusive)
pub const ROOM_MIN_SIZE: usize = 4;

/// Largest room edge (inclusive)
pub const ROOM_MAX_SIZE: usize = 8;

/// Smallest map edge that fits a maximum-size room plus its buffer and border
pub const MIN_MAP_SIZE: usize = ROOM_MAX_SIZE + 4;

// =====================================================
// Monster AI
// =====================================================

/// Logical milliseconds per unit of monster speed: cadence = 1000 / speed
pub const CADENCE_BASE_MS: f32 = 1000.0;

/// Ambushers wake up when the hero is strictly closer than this
pub const AMBUSH_RADIUS: f32 = 5.0;

/// Consecutive unchanged decisions tolerated before a chaser starts wandering
pub const STUCK_THRESHOLD: u32 = 3;

/// Step budget of one wander episode
pub const WANDER_STEPS: u32 = 6;

/// Wander episodes a chaser may start per level; after that it only pursues
pub const MAX_WANDER_EPISODES: u32 = 5;

/// How far ahead (in tiles) a wander direction is scored
pub const WANDER_SCAN_DEPTH: i32 = 5;

/// Number of best-scored wander directions the random pick chooses from
pub const WANDER_TOP_CANDIDATES: usize = 3;

/// How many hero steps ahead a chaser extrapolates
pub const PREDICTION_LOOKAHEAD: i32 = 4;

// =====================================================
// Hero
// =====================================================

/// Invincibility window after taking damage (logical ms)
pub const INVINCIBILITY_MS: u64 = 1000;

/// Health granted by the cheat intent
pub const CHEAT_HEALTH: u32 = 100;

/// Gold granted by the cheat intent
pub const CHEAT_GOLD: u32 = 100;

/// Treasure of each kind granted by the cheat intent
pub const CHEAT_TREASURES: u32 = 10;

// =====================================================
// Difficulty
// =====================================================

/// Damage multiplier increment applied on every level-up
pub const DAMAGE_MULTIPLIER_STEP: f32 = 0.1;
