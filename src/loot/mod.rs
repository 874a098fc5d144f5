//! Loot catalog and collectible items.
//!
//! Every item grants its score value and exactly one effect: healing for
//! potions, a gold increment for gold, or a treasure counter for the rest.

use serde::{Deserialize, Serialize};

use crate::generation::Point;
use crate::rng::SeededRng;

/// Loot categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LootKind {
    Gold,
    Gem,
    Chalice,
    Crown,
    Potion,
    Elixir,
}

impl LootKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Gold => "💰",
            Self::Gem => "💎",
            Self::Chalice => "🏆",
            Self::Crown => "👑",
            Self::Potion => "🧪",
            Self::Elixir => "⚗️",
        }
    }

    pub fn score_value(&self) -> u32 {
        match self {
            Self::Gold => 10,
            Self::Gem => 50,
            Self::Chalice => 75,
            Self::Crown => 100,
            Self::Potion => 5,
            Self::Elixir => 15,
        }
    }

    pub fn healing(&self) -> Option<u32> {
        match self {
            Self::Potion => Some(25),
            Self::Elixir => Some(50),
            _ => None,
        }
    }

    /// Kinds tracked by per-type treasure counters.
    pub fn treasures() -> &'static [LootKind] {
        &[LootKind::Gem, LootKind::Chalice, LootKind::Crown]
    }
}

/// Drop weights; higher = more common
const LOOT_TABLE: &[(LootKind, f64)] = &[
    (LootKind::Gold, 40.0),
    (LootKind::Gem, 15.0),
    (LootKind::Chalice, 8.0),
    (LootKind::Crown, 4.0),
    (LootKind::Potion, 25.0),
    (LootKind::Elixir, 8.0),
];

/// One weighted draw from the loot table.
pub fn roll_kind(rng: &mut SeededRng) -> LootKind {
    let total: f64 = LOOT_TABLE.iter().map(|(_, w)| w).sum();
    let mut roll = rng.next_f64() * total;
    for (kind, weight) in LOOT_TABLE {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    LootKind::Gold
}

/// What collecting an item does to the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootEffect {
    Heal(u32),
    Gold,
    Treasure(LootKind),
}

/// A collectible lying in the dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    pub position: Point,
    pub kind: LootKind,
    pub value: u32,
    pub healing: Option<u32>,
    pub collected: bool,
}

impl LootItem {
    pub fn new(kind: LootKind, position: Point) -> Self {
        Self {
            position,
            kind,
            value: kind.score_value(),
            healing: kind.healing(),
            collected: false,
        }
    }

    /// Healing wins over gold, gold over treasure.
    pub fn effect(&self) -> LootEffect {
        match (self.healing, self.kind) {
            (Some(amount), _) => LootEffect::Heal(amount),
            (None, LootKind::Gold) => LootEffect::Gold,
            (None, kind) => LootEffect::Treasure(kind),
        }
    }
}
