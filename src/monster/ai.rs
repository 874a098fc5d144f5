//! Monster AI controller.
//!
//! Each monster moves on its own cadence. When its gate opens, the single
//! dispatch point [`decide`] runs the strategy for its [`Brain`] variant and
//! the resulting step is applied only onto floor inside the grid. Doors do
//! not block monsters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Axis, Brain, Monster};
use crate::constants::{
    AMBUSH_RADIUS, MAX_WANDER_EPISODES, PREDICTION_LOOKAHEAD, STUCK_THRESHOLD,
    WANDER_SCAN_DEPTH, WANDER_STEPS, WANDER_TOP_CANDIDATES,
};
use crate::generation::{Dungeon, Grid, Point, Step};
use crate::player::{DamageOutcome, Hero};
use crate::rng::SeededRng;

/// Patrol direction along a fixed axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolState {
    pub axis: Axis,
    /// +1 or -1
    pub direction: i32,
}

impl PatrolState {
    pub fn new(axis: Axis) -> Self {
        Self { axis, direction: 1 }
    }

    pub fn step(&self) -> Step {
        match self.axis {
            Axis::Horizontal => Step::new(self.direction, 0),
            Axis::Vertical => Step::new(0, self.direction),
        }
    }
}

/// Chase sub-state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaseMode {
    /// Predict the hero and close in
    Pursuit,
    /// Walk the most open direction until the budget runs out
    Wander { direction: Step, steps_left: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseState {
    pub mode: ChaseMode,
    /// Position at the previous decision
    pub last_position: Point,
    /// Consecutive decisions without a position change
    pub stuck_count: u32,
    /// Hero position at the previous decision
    pub last_hero: Option<Point>,
    /// Last observed hero displacement, each component in {-1, 0, 1}
    pub hero_velocity: Step,
    /// Wander episodes started on this level
    pub wander_episodes: u32,
}

impl ChaseState {
    pub fn new(spawn: Point) -> Self {
        Self {
            mode: ChaseMode::Pursuit,
            last_position: spawn,
            stuck_count: 0,
            last_hero: None,
            hero_velocity: Step::IDLE,
            wander_episodes: 0,
        }
    }

    pub fn is_wandering(&self) -> bool {
        matches!(self.mode, ChaseMode::Wander { .. })
    }
}

/// Advance every due monster one move, in array order. Returns how many
/// contacts actually hurt the hero.
pub fn update_monsters(dungeon: &mut Dungeon, hero: &mut Hero, now: u64) -> usize {
    let Dungeon {
        grid,
        monsters,
        rng,
        ..
    } = dungeon;

    let mut hits = 0;
    for monster in monsters.iter_mut() {
        if !monster.is_due(now) {
            continue;
        }
        monster.last_move_at = now;

        let step = decide(monster, grid, hero.position, rng);
        let dest = monster.position + step;
        if !step.is_idle() && grid.is_floor(dest) {
            monster.position = dest;
        }

        if monster.position == hero.position
            && hero.take_damage(monster.damage, now) != DamageOutcome::Ignored
        {
            hits += 1;
        }
    }
    hits
}

/// Damage the hero for every monster sharing its cell (the hero may walk
/// into a monster between updates).
pub fn resolve_contacts(dungeon: &Dungeon, hero: &mut Hero, now: u64) -> usize {
    let here = hero.position;
    let mut hits = 0;
    for monster in dungeon.monsters.iter().filter(|m| m.position == here) {
        if hero.take_damage(monster.damage, now) != DamageOutcome::Ignored {
            hits += 1;
        }
    }
    hits
}

/// Strategy dispatch.
pub fn decide(monster: &mut Monster, grid: &Grid, hero: Point, rng: &mut SeededRng) -> Step {
    let position = monster.position;
    match &mut monster.brain {
        Brain::Random => random_step(rng),
        Brain::Patrol(state) => patrol_step(state, position, grid),
        Brain::Ambush(state) => ambush_step(state, position, grid, hero, rng),
        Brain::Chase(state) => chase_step(state, position, grid, hero, rng),
    }
}

fn random_step(rng: &mut SeededRng) -> Step {
    rng.pick(&Step::CARDINALS).copied().unwrap_or(Step::IDLE)
}

fn patrol_step(state: &mut PatrolState, position: Point, grid: &Grid) -> Step {
    let step = state.step();
    if grid.is_floor(position + step) {
        step
    } else {
        state.direction = -state.direction;
        state.step()
    }
}

fn ambush_step(
    state: &mut ChaseState,
    position: Point,
    grid: &Grid,
    hero: Point,
    rng: &mut SeededRng,
) -> Step {
    if position.distance(hero) >= AMBUSH_RADIUS {
        Step::IDLE
    } else {
        chase_step(state, position, grid, hero, rng)
    }
}

fn chase_step(
    state: &mut ChaseState,
    position: Point,
    grid: &Grid,
    hero: Point,
    rng: &mut SeededRng,
) -> Step {
    if position == state.last_position {
        state.stuck_count += 1;
    } else {
        state.stuck_count = 0;
    }
    state.last_position = position;

    if let Some(previous) = state.last_hero {
        state.hero_velocity = Step::toward(hero.x - previous.x, hero.y - previous.y);
    }
    state.last_hero = Some(hero);

    if !state.is_wandering()
        && state.stuck_count > STUCK_THRESHOLD
        && state.wander_episodes < MAX_WANDER_EPISODES
    {
        state.wander_episodes += 1;
        state.stuck_count = 0;
        state.mode = ChaseMode::Wander {
            direction: pick_wander_direction(grid, position, rng),
            steps_left: WANDER_STEPS,
        };
        debug!(
            x = position.x,
            y = position.y,
            episode = state.wander_episodes,
            "Chaser stuck, wandering"
        );
    }

    match state.mode {
        ChaseMode::Wander {
            direction,
            steps_left,
        } => {
            let direction = if grid.is_floor(position + direction) {
                direction
            } else {
                pick_wander_direction(grid, position, rng)
            };
            let steps_left = steps_left.saturating_sub(1);
            if steps_left == 0 {
                state.mode = ChaseMode::Pursuit;
                state.stuck_count = 0;
                debug!(x = position.x, y = position.y, "Wander budget spent, resuming chase");
            } else {
                state.mode = ChaseMode::Wander {
                    direction,
                    steps_left,
                };
            }
            direction
        }
        ChaseMode::Pursuit => pursue(state, position, grid, hero),
    }
}

fn pursue(state: &ChaseState, position: Point, grid: &Grid, hero: Point) -> Step {
    let target = predict_target(grid, hero, state.hero_velocity);
    let toward = Step::toward(target.x - position.x, target.y - position.y);
    if toward.is_idle() {
        return Step::IDLE;
    }

    let candidates = [
        toward,
        Step::new(toward.dx, 0),
        Step::new(0, toward.dy),
        Step::new(-toward.dy, toward.dx),
        Step::new(toward.dy, -toward.dx),
        toward.reversed(),
    ];
    candidates
        .into_iter()
        .filter(|s| !s.is_idle())
        .find(|s| grid.is_floor(position + *s))
        .unwrap_or(Step::IDLE)
}

/// Hero position extrapolated along its last displacement, clamped to the
/// grid and walked back toward the hero until it lands on floor.
pub fn predict_target(grid: &Grid, hero: Point, velocity: Step) -> Point {
    let ahead = Point::new(
        hero.x + velocity.dx * PREDICTION_LOOKAHEAD,
        hero.y + velocity.dy * PREDICTION_LOOKAHEAD,
    );
    let mut target = grid.clamp(ahead);
    while target != hero && !grid.is_floor(target) {
        target = target + Step::toward(hero.x - target.x, hero.y - target.y);
    }
    target
}

/// Score cardinal directions by open floor ahead, keep the best few and
/// pick one at random. Idle when boxed in.
pub fn pick_wander_direction(grid: &Grid, position: Point, rng: &mut SeededRng) -> Step {
    let mut scored: Vec<(Step, i32)> = Step::CARDINALS
        .iter()
        .map(|step| (*step, open_run(grid, position, *step)))
        .filter(|(_, run)| *run > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(WANDER_TOP_CANDIDATES);
    rng.pick(&scored).map(|(step, _)| *step).unwrap_or(Step::IDLE)
}

fn open_run(grid: &Grid, from: Point, step: Step) -> i32 {
    let mut run = 0;
    let mut cursor = from;
    while run < WANDER_SCAN_DEPTH {
        cursor = cursor + step;
        if !grid.is_floor(cursor) {
            break;
        }
        run += 1;
    }
    run
}
