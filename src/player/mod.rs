//! Hero state and interactions.
//!
//! The hero persists across levels. Every interaction takes the current
//! [`Dungeon`] as a parameter; nothing here keeps a reference to a level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::INVINCIBILITY_MS;
use crate::generation::{Dungeon, Point, Step};
use crate::loot::{LootEffect, LootItem};

pub mod inventory;

pub use inventory::Inventory;

/// Playable classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeroClass {
    #[default]
    Warrior,
    Rogue,
    Mage,
}

impl HeroClass {
    pub fn stats(&self) -> ClassStats {
        match self {
            HeroClass::Warrior => ClassStats {
                max_health: 120,
                vision_radius: 5.0,
                damage_multiplier: 1.2,
            },
            HeroClass::Rogue => ClassStats {
                max_health: 90,
                vision_radius: 7.0,
                damage_multiplier: 1.0,
            },
            HeroClass::Mage => ClassStats {
                max_health: 80,
                vision_radius: 6.0,
                damage_multiplier: 1.5,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub max_health: u32,
    /// Tiles (Euclidean) the hero can see
    pub vision_radius: f32,
    pub damage_multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible (or already dead): nothing happened
    Ignored,
    Hurt,
    Died,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Hero moved; `pickups` keys/loot were collected on entry
    Moved { pickups: usize },
    /// Wall, off-grid, or idle step
    Blocked,
    /// Locked door and no key
    DoorLocked,
    /// A key was spent; the hero stays put this move
    DoorUnlocked,
    /// Destination is the exit; the caller completes the level
    ReachedExit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub class: HeroClass,
    pub stats: ClassStats,
    pub position: Point,
    pub health: u32,
    pub inventory: Inventory,
    /// Current dungeon level, starting at 1
    pub level: u32,
    pub score: u32,
    /// Logical time at which the invincibility window ends
    pub invincible_until: Option<u64>,
}

impl Hero {
    pub fn new(class: HeroClass, position: Point) -> Self {
        let stats = class.stats();
        Self {
            class,
            health: stats.max_health,
            stats,
            position,
            inventory: Inventory::default(),
            level: 1,
            score: 0,
            invincible_until: None,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Housekeeping: close the invincibility window once it has elapsed.
    pub fn update(&mut self, now: u64) {
        if matches!(self.invincible_until, Some(until) if now >= until) {
            self.invincible_until = None;
        }
    }

    pub fn take_damage(&mut self, amount: u32, now: u64) -> DamageOutcome {
        if self.is_invincible() || self.is_dead() {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincible_until = Some(now + INVINCIBILITY_MS);
        if self.health == 0 {
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.stats.max_health);
    }

    /// Apply one loot item. Returns `false` if it was already collected.
    pub fn collect_loot(&mut self, item: &mut LootItem) -> bool {
        if item.collected {
            return false;
        }
        item.collected = true;
        self.score = self.score.saturating_add(item.value);
        match item.effect() {
            LootEffect::Heal(amount) => self.heal(amount),
            LootEffect::Gold => self.inventory.add_gold(1),
            LootEffect::Treasure(kind) => self.inventory.add_treasure(kind, 1),
        }
        true
    }

    /// Pick up every key and loot item on the hero's tile.
    pub fn collect_at(&mut self, dungeon: &mut Dungeon) -> usize {
        let here = self.position;
        let mut pickups = 0;
        for key in dungeon
            .keys
            .iter_mut()
            .filter(|k| !k.collected && k.position == here)
        {
            key.collected = true;
            self.inventory.push_key(key.color);
            pickups += 1;
        }
        for item in dungeon.loot.iter_mut().filter(|l| l.position == here) {
            if self.collect_loot(item) {
                pickups += 1;
            }
        }
        pickups
    }

    pub fn can_see(&self, p: Point) -> bool {
        self.position.distance(p) <= self.stats.vision_radius
    }
}

/// Move the hero one tile through the current dungeon.
///
/// Exit wins over everything. A locked door consumes the top key of the
/// stack regardless of color and the hero stays put this move.
pub fn move_hero(hero: &mut Hero, step: Step, dungeon: &mut Dungeon) -> MoveOutcome {
    let step = Step::toward(step.dx, step.dy);
    if step.is_idle() {
        return MoveOutcome::Blocked;
    }
    let dest = hero.position + step;

    if dest == dungeon.exit {
        return MoveOutcome::ReachedExit;
    }

    if let Some(door) = dungeon.door_at_mut(dest) {
        if door.locked {
            return match hero.inventory.pop_key() {
                Some(key) => {
                    door.locked = false;
                    debug!(?key, door = ?door.color, x = dest.x, y = dest.y, "Door unlocked");
                    MoveOutcome::DoorUnlocked
                }
                None => MoveOutcome::DoorLocked,
            };
        }
    }

    if !dungeon.grid.is_floor(dest) {
        return MoveOutcome::Blocked;
    }

    hero.position = dest;
    let pickups = hero.collect_at(dungeon);
    MoveOutcome::Moved { pickups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Door, Grid, Key, KeyColor};
    use crate::loot::LootKind;

    fn corridor() -> Dungeon {
        let grid = Grid::from_rows(&["#######", "#.....#", "#######"]);
        Dungeon::from_grid(5, grid, Point::new(1, 1), Point::new(5, 1))
    }

    #[test]
    fn test_new_hero_full_health() {
        let hero = Hero::new(HeroClass::Rogue, Point::new(0, 0));
        assert_eq!(hero.health, 90);
        assert_eq!(hero.level, 1);
        assert!(!hero.is_invincible());
    }

    #[test]
    fn test_damage_starts_invincibility() {
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(0, 0));
        assert_eq!(hero.take_damage(30, 1000), DamageOutcome::Hurt);
        assert_eq!(hero.health, 90);
        assert_eq!(hero.take_damage(30, 1500), DamageOutcome::Ignored);
        assert_eq!(hero.health, 90);

        hero.update(1999);
        assert!(hero.is_invincible());
        hero.update(2000);
        assert!(!hero.is_invincible());
        assert_eq!(hero.take_damage(30, 2000), DamageOutcome::Hurt);
        assert_eq!(hero.health, 60);
    }

    #[test]
    fn test_damage_clamps_and_kills() {
        let mut hero = Hero::new(HeroClass::Mage, Point::new(0, 0));
        assert_eq!(hero.take_damage(500, 0), DamageOutcome::Died);
        assert_eq!(hero.health, 0);
        hero.update(10_000);
        assert_eq!(hero.take_damage(5, 10_000), DamageOutcome::Ignored);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(0, 0));
        hero.health = 110;
        hero.heal(50);
        assert_eq!(hero.health, 120);
    }

    #[test]
    fn test_loot_collected_once() {
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(0, 0));
        let mut gem = LootItem::new(LootKind::Gem, Point::new(0, 0));
        assert!(hero.collect_loot(&mut gem));
        assert!(!hero.collect_loot(&mut gem));
        assert_eq!(hero.inventory.treasure(LootKind::Gem), 1);
        assert_eq!(hero.score, LootKind::Gem.score_value());
    }

    #[test]
    fn test_gold_increments_gold_only() {
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(0, 0));
        let mut gold = LootItem::new(LootKind::Gold, Point::new(0, 0));
        hero.collect_loot(&mut gold);
        assert_eq!(hero.inventory.gold, 1);
        assert!(hero.inventory.treasures.is_empty());
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let mut dungeon = corridor();
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(1, 1));
        assert_eq!(move_hero(&mut hero, Step::UP, &mut dungeon), MoveOutcome::Blocked);
        assert_eq!(move_hero(&mut hero, Step::LEFT, &mut dungeon), MoveOutcome::Blocked);
        assert_eq!(hero.position, Point::new(1, 1));
    }

    #[test]
    fn test_move_collects_on_entry() {
        let mut dungeon = corridor();
        dungeon.keys.push(Key {
            position: Point::new(2, 1),
            color: KeyColor::Blue,
            collected: false,
        });
        dungeon.loot.push(LootItem::new(LootKind::Crown, Point::new(2, 1)));
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(1, 1));

        let outcome = move_hero(&mut hero, Step::RIGHT, &mut dungeon);
        assert_eq!(outcome, MoveOutcome::Moved { pickups: 2 });
        assert_eq!(hero.inventory.keys, vec![KeyColor::Blue]);
        assert!(dungeon.keys[0].collected);
        assert!(dungeon.loot[0].collected);
        assert_eq!(hero.inventory.treasure(LootKind::Crown), 1);
    }

    #[test]
    fn test_exit_reported_without_moving() {
        let mut dungeon = corridor();
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(4, 1));
        assert_eq!(
            move_hero(&mut hero, Step::RIGHT, &mut dungeon),
            MoveOutcome::ReachedExit
        );
        assert_eq!(hero.position, Point::new(4, 1));
    }

    #[test]
    fn test_unlocked_door_is_passable() {
        let mut dungeon = corridor();
        dungeon.doors.push(Door {
            position: Point::new(3, 1),
            color: KeyColor::Red,
            locked: false,
        });
        let mut hero = Hero::new(HeroClass::Warrior, Point::new(2, 1));
        assert_eq!(
            move_hero(&mut hero, Step::RIGHT, &mut dungeon),
            MoveOutcome::Moved { pickups: 0 }
        );
        assert_eq!(hero.position, Point::new(3, 1));
    }

    #[test]
    fn test_vision_radius() {
        let hero = Hero::new(HeroClass::Warrior, Point::new(10, 10));
        assert!(hero.can_see(Point::new(13, 14)));
        assert!(!hero.can_see(Point::new(14, 14)));
    }
}
