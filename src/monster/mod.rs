//! Monster catalog and per-monster state.
//!
//! Monster = Kind (emoji, damage, speed) x Strategy. The strategy decides
//! which AI runs; its scratch state lives in [`Brain`], one variant per
//! strategy, so the state that exists always matches the behavior.

use serde::{Deserialize, Serialize};

use crate::constants::CADENCE_BASE_MS;
use crate::generation::Point;

pub mod ai;

pub use ai::{ChaseMode, ChaseState, PatrolState};

/// Movement strategy tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Random, // uniform cardinal steps
    Patrol, // back and forth along one axis
    Ambush, // waits until the hero is close, then chases
    Chase,  // predicts the hero and pursues, wanders when stuck
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Rat,
    Bat,
    Skeleton,
    Spider,
    Ghost,
    Ogre,
    Dragon,
}

impl MonsterKind {
    pub fn all() -> &'static [MonsterKind] {
        &[
            MonsterKind::Rat,
            MonsterKind::Bat,
            MonsterKind::Skeleton,
            MonsterKind::Spider,
            MonsterKind::Ghost,
            MonsterKind::Ogre,
            MonsterKind::Dragon,
        ]
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Rat => "🐀",
            Self::Bat => "🦇",
            Self::Skeleton => "💀",
            Self::Spider => "🕷️",
            Self::Ghost => "👻",
            Self::Ogre => "👹",
            Self::Dragon => "🐉",
        }
    }

    /// Damage before difficulty scaling
    pub fn base_damage(&self) -> u32 {
        match self {
            Self::Rat => 5,
            Self::Bat => 4,
            Self::Skeleton => 10,
            Self::Spider => 8,
            Self::Ghost => 12,
            Self::Ogre => 20,
            Self::Dragon => 30,
        }
    }

    /// Moves per second
    pub fn speed(&self) -> f32 {
        match self {
            Self::Rat => 2.0,
            Self::Bat => 4.0,
            Self::Skeleton => 1.5,
            Self::Spider => 2.0,
            Self::Ghost => 1.0,
            Self::Ogre => 0.8,
            Self::Dragon => 0.5,
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Rat | Self::Bat => Strategy::Random,
            Self::Skeleton => Strategy::Patrol,
            Self::Spider | Self::Dragon => Strategy::Ambush,
            Self::Ghost | Self::Ogre => Strategy::Chase,
        }
    }
}

/// Strategy-specific AI state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brain {
    Random,
    Patrol(PatrolState),
    Ambush(ChaseState),
    Chase(ChaseState),
}

impl Brain {
    pub fn for_strategy(strategy: Strategy, spawn: Point, axis: Axis) -> Self {
        match strategy {
            Strategy::Random => Brain::Random,
            Strategy::Patrol => Brain::Patrol(PatrolState::new(axis)),
            Strategy::Ambush => Brain::Ambush(ChaseState::new(spawn)),
            Strategy::Chase => Brain::Chase(ChaseState::new(spawn)),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Brain::Random => Strategy::Random,
            Brain::Patrol(_) => Strategy::Patrol,
            Brain::Ambush(_) => Strategy::Ambush,
            Brain::Chase(_) => Strategy::Chase,
        }
    }

    pub fn chase_state(&self) -> Option<&ChaseState> {
        match self {
            Brain::Ambush(state) | Brain::Chase(state) => Some(state),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub position: Point,
    /// Difficulty-scaled damage dealt on contact
    pub damage: u32,
    /// Logical ms between moves
    pub cadence_ms: u64,
    /// Logical time of the last scheduled move
    pub last_move_at: u64,
    pub brain: Brain,
}

impl Monster {
    pub fn new(kind: MonsterKind, position: Point, damage_multiplier: f32, axis: Axis) -> Self {
        Self {
            kind,
            position,
            damage: (kind.base_damage() as f32 * damage_multiplier).round() as u32,
            cadence_ms: (CADENCE_BASE_MS / kind.speed()).round() as u64,
            last_move_at: 0,
            brain: Brain::for_strategy(kind.strategy(), position, axis),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.brain.strategy()
    }

    /// Whether the cadence gate is open at `now`.
    pub fn is_due(&self, now: u64) -> bool {
        now.saturating_sub(self.last_move_at) >= self.cadence_ms
    }
}
