//! Hero inventory.
//!
//! Keys are a stack: doors consume whichever key was picked up last,
//! whatever its color.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::generation::KeyColor;
use crate::loot::LootKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub keys: Vec<KeyColor>,
    pub gold: u32,
    pub treasures: BTreeMap<LootKind, u32>,
}

impl Inventory {
    pub fn push_key(&mut self, color: KeyColor) {
        self.keys.push(color);
    }

    /// Take the top key off the stack
    pub fn pop_key(&mut self) -> Option<KeyColor> {
        self.keys.pop()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn add_treasure(&mut self, kind: LootKind, count: u32) {
        let entry = self.treasures.entry(kind).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn treasure(&self, kind: LootKind) -> u32 {
        self.treasures.get(&kind).copied().unwrap_or(0)
    }
}
