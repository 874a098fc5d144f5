//! Tick driver and intent API.
//!
//! The [`Engine`] owns the current dungeon, the persistent hero and the run
//! clock. Time is logical: every call that can move a monster or expire
//! invincibility takes `now` in milliseconds from the caller, so replaying the
//! same call sequence replays the same run.
//!
//! Per tick, in order:
//!   1. hero housekeeping (invincibility expiry)
//!   2. monster AI in array order
//!   3. contact reconciliation, then death check

pub mod config;
pub mod messages;

pub use config::{EngineConfig, ProfileSelection};
pub use messages::{GameSnapshot, Intent, RunStatus, ScoreRecord};

use tracing::{info, warn};

use crate::constants::{CHEAT_GOLD, CHEAT_HEALTH, CHEAT_TREASURES};
use crate::difficulty::DifficultyProfile;
use crate::error::ConfigResult;
use crate::generation::{Dungeon, KeyColor, Point, Step};
use crate::loot::LootKind;
use crate::monster::ai::{resolve_contacts, update_monsters};
use crate::player::{move_hero, Hero, HeroClass, MoveOutcome};
use crate::rng::SeededRng;

pub struct Engine {
    start_seed: u64,
    dungeon: Dungeon,
    hero: Hero,
    /// Drives level-up nudges; seeded with the starting seed
    progression_rng: SeededRng,
    now: u64,
    run_started_at: u64,
    reveal_map: bool,
    status: RunStatus,
}

impl Engine {
    pub fn new(config: &EngineConfig, now: u64) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_profile(
            config.seed,
            config.resolve_profile(),
            config.hero_class,
            now,
        ))
    }

    pub fn with_profile(
        seed: u64,
        profile: DifficultyProfile,
        hero_class: HeroClass,
        now: u64,
    ) -> Self {
        let dungeon = Dungeon::generate(seed, &profile);
        let hero = Hero::new(hero_class, dungeon.entrance);
        Self::with_dungeon(dungeon, hero, now)
    }

    /// Start a run on an already built level. The dungeon's seed becomes the
    /// run's starting seed.
    pub fn with_dungeon(mut dungeon: Dungeon, hero: Hero, now: u64) -> Self {
        arm_monsters(&mut dungeon, now);
        let seed = dungeon.seed;
        info!(seed, class = ?hero.class, "Run started");
        Self {
            start_seed: seed,
            dungeon,
            hero,
            progression_rng: SeededRng::new(seed),
            now,
            run_started_at: now,
            reveal_map: false,
            status: RunStatus::Running,
        }
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn reveal_map(&self) -> bool {
        self.reveal_map
    }

    /// Advance the world to logical time `now`. Returns the number of hits the
    /// hero took.
    pub fn tick(&mut self, now: u64) -> usize {
        if !self.is_running() {
            return 0;
        }
        self.now = now;
        self.hero.update(now);

        let mut hits = update_monsters(&mut self.dungeon, &mut self.hero, now);
        hits += resolve_contacts(&self.dungeon, &mut self.hero, now);

        if self.hero.is_dead() {
            self.finish_run();
        }
        hits
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Move { dx, dy } => {
                self.move_hero(dx, dy);
            }
            Intent::WarpToExit => self.warp_to_exit(),
            Intent::ToggleVisibility => self.toggle_visibility(),
            Intent::GrantCheatResources => self.grant_cheat_resources(),
        }
    }

    /// One hero step. Reaching the exit completes the level before returning.
    pub fn move_hero(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if !self.is_running() {
            return MoveOutcome::Blocked;
        }
        let outcome = move_hero(&mut self.hero, Step::toward(dx, dy), &mut self.dungeon);
        if outcome == MoveOutcome::ReachedExit {
            self.complete_level();
        }
        outcome
    }

    pub fn warp_to_exit(&mut self) {
        if !self.is_running() {
            return;
        }
        self.hero.position = self.dungeon.exit;
        warn!(level = self.hero.level, "Cheat: hero warped to exit");
    }

    pub fn toggle_visibility(&mut self) {
        self.reveal_map = !self.reveal_map;
    }

    pub fn grant_cheat_resources(&mut self) {
        if !self.is_running() {
            return;
        }
        self.hero.heal(CHEAT_HEALTH);
        self.hero.inventory.add_gold(CHEAT_GOLD);
        for color in KeyColor::ALL {
            self.hero.inventory.push_key(color);
        }
        for kind in LootKind::treasures() {
            self.hero.inventory.add_treasure(*kind, CHEAT_TREASURES);
        }
        warn!(level = self.hero.level, "Cheat: resources granted");
    }

    /// Whether a tile should be drawn: inside the hero's vision radius, or
    /// anywhere while the map is revealed.
    pub fn is_visible(&self, p: Point) -> bool {
        self.reveal_map || self.hero.can_see(p)
    }

    pub fn score_record(&self) -> ScoreRecord {
        ScoreRecord {
            score: self.hero.score,
            time_in_seconds: self.now.saturating_sub(self.run_started_at) as f64 / 1000.0,
            dungeon_level: self.hero.level,
            seed: self.start_seed,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            now: self.now,
            dungeon: &self.dungeon,
            hero: &self.hero,
            hero_invincible: self.hero.is_invincible(),
            reveal_map: self.reveal_map,
            status: &self.status,
        }
    }

    /// Replace the dungeon with the next, harder level. Hero health,
    /// inventory and score carry over.
    fn complete_level(&mut self) {
        let seed = self.dungeon.seed.wrapping_add(1);
        let profile = self.dungeon.profile.level_up(&mut self.progression_rng);
        let mut dungeon = Dungeon::generate(seed, &profile);
        arm_monsters(&mut dungeon, self.now);

        self.dungeon = dungeon;
        self.hero.position = self.dungeon.entrance;
        self.hero.level += 1;
        info!(
            level = self.hero.level,
            seed,
            damage_multiplier = profile.monster_damage_multiplier,
            score = self.hero.score,
            "Level completed"
        );
    }

    fn finish_run(&mut self) {
        let record = self.score_record();
        info!(
            score = record.score,
            level = record.dungeon_level,
            seconds = record.time_in_seconds,
            "Hero died, run over"
        );
        self.status = RunStatus::Over(record);
    }
}

/// Start every monster's cadence clock at `now` so nothing moves on the
/// first tick of a level.
fn arm_monsters(dungeon: &mut Dungeon, now: u64) {
    for monster in &mut dungeon.monsters {
        monster.last_move_at = now;
    }
}
