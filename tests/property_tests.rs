//! Property-based tests using proptest
//!
//! Invariants that must hold for ALL seeds:
//! - Generation: deterministic, rooms apart, everything reachable, in bounds
//! - Monsters: always on floor, tick after tick
//! - Hero: health stays within [0, max]
//! - Difficulty: level-ups never get easier

use proptest::prelude::*;

use dungeon_core::difficulty::{DifficultyProfile, Preset};
use dungeon_core::engine::{Engine, Intent};
use dungeon_core::generation::{Dungeon, Point, Room};
use dungeon_core::player::{Hero, HeroClass};
use dungeon_core::rng::SeededRng;

fn preset_strategy() -> impl Strategy<Value = Preset> {
    prop_oneof![Just(Preset::Normal), Just(Preset::Hard)]
}

fn rooms_touch(a: &Room, b: &Room) -> bool {
    a.x < b.x + b.width + 1
        && b.x < a.x + a.width + 1
        && a.y < b.y + b.height + 1
        && b.y < a.y + a.height + 1
}

// ============================================================
// Generation Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>(), preset in preset_strategy()) {
        let profile = preset.profile();
        let a = Dungeon::generate(seed, &profile);
        let b = Dungeon::generate(seed, &profile);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_rooms_never_touch(seed in any::<u64>(), preset in preset_strategy()) {
        let d = Dungeon::generate(seed, &preset.profile());
        for (i, a) in d.rooms.iter().enumerate() {
            for b in d.rooms.iter().skip(i + 1) {
                prop_assert!(!rooms_touch(a, b), "rooms {:?} and {:?} touch", a, b);
            }
        }
    }

    #[test]
    fn prop_room_count_at_most_requested(seed in any::<u64>(), preset in preset_strategy()) {
        let profile = preset.profile();
        let d = Dungeon::generate(seed, &profile);
        prop_assert!(!d.rooms.is_empty());
        prop_assert!(d.rooms.len() <= profile.room_count.max);
        prop_assert!(profile.map_size.contains(d.grid.width));
        prop_assert!(profile.map_size.contains(d.grid.height));
    }

    #[test]
    fn prop_every_room_reachable(seed in any::<u64>(), preset in preset_strategy()) {
        let d = Dungeon::generate(seed, &preset.profile());
        let reachable = d.reachable_from(d.entrance);
        for room in &d.rooms {
            for cell in room.cells() {
                prop_assert!(reachable[cell.y as usize][cell.x as usize]);
            }
        }
    }

    #[test]
    fn prop_entrance_exit_strictly_inside(seed in any::<u64>(), preset in preset_strategy()) {
        let d = Dungeon::generate(seed, &preset.profile());
        for p in [d.entrance, d.exit] {
            prop_assert!(d.grid.is_floor(p));
            prop_assert!(p.x > 0 && p.y > 0);
            prop_assert!((p.x as usize) < d.grid.width - 1);
            prop_assert!((p.y as usize) < d.grid.height - 1);
        }
    }

    #[test]
    fn prop_doors_on_corridor_tiles(seed in any::<u64>()) {
        let d = Dungeon::generate(seed, &Preset::Hard.profile());
        prop_assert_eq!(d.doors.len(), d.keys.len());
        for (door, key) in d.doors.iter().zip(&d.keys) {
            prop_assert_eq!(door.color, key.color);
            prop_assert!(door.locked);
            prop_assert!(d.grid.is_floor(door.position));
            prop_assert_eq!(d.grid.floor_neighbors(door.position), 2);
            prop_assert!(d.rooms.iter().all(|r| !r.contains(door.position)));
        }
    }
}

// ============================================================
// Simulation Properties
// ============================================================

fn move_strategy() -> impl Strategy<Value = (i32, i32)> {
    prop_oneof![Just((0, -1)), Just((0, 1)), Just((-1, 0)), Just((1, 0))]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_monsters_stay_on_floor(
        seed in any::<u64>(),
        moves in prop::collection::vec(move_strategy(), 50..200),
    ) {
        let mut engine = Engine::with_profile(seed, Preset::Hard.profile(), HeroClass::Warrior, 0);
        for (i, (dx, dy)) in moves.into_iter().enumerate() {
            engine.apply(Intent::Move { dx, dy });
            engine.tick((i as u64 + 1) * 100);
            let d = engine.dungeon();
            for m in &d.monsters {
                prop_assert!(d.grid.is_floor(m.position), "monster off floor at {:?}", m.position);
            }
            let hero = engine.hero();
            prop_assert!(hero.health <= hero.stats.max_health);
            if !engine.is_running() {
                break;
            }
        }
    }

    #[test]
    fn prop_health_clamped(
        ops in prop::collection::vec((any::<bool>(), 0u32..300, 0u64..3000), 1..100),
    ) {
        let mut hero = Hero::new(HeroClass::Mage, Point::new(1, 1));
        let mut now = 0;
        for (is_damage, amount, dt) in ops {
            now += dt;
            hero.update(now);
            if is_damage {
                hero.take_damage(amount, now);
            } else {
                hero.heal(amount);
            }
            prop_assert!(hero.health <= hero.stats.max_health);
        }
    }

    #[test]
    fn prop_level_up_monotonic(seed in any::<u64>(), preset in preset_strategy(), levels in 1usize..40) {
        let mut rng = SeededRng::new(seed);
        let mut profile: DifficultyProfile = preset.profile();
        for _ in 0..levels {
            let next = profile.level_up(&mut rng);
            prop_assert!(next.monster_damage_multiplier > profile.monster_damage_multiplier);
            prop_assert!(next.room_count.min >= profile.room_count.min);
            prop_assert!(next.room_count.max >= profile.room_count.max);
            prop_assert!(next.map_size.min >= profile.map_size.min);
            prop_assert!(next.map_size.max >= profile.map_size.max);
            prop_assert_eq!(next.monster_count, profile.monster_count);
            prop_assert_eq!(next.loot_count, profile.loot_count);
            profile = next;
        }
    }
}
