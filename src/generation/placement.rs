//! Entity placement: loot, monsters, and colored door/key pairs.
//!
//! Only interior rooms (neither the entrance nor the exit room) receive
//! entities. A door goes on a corridor tile between two consecutive interior
//! rooms; its key lies in the earlier room. When no corridor tile qualifies,
//! the pair is dropped.

use tracing::debug;

use super::{Door, Dungeon, Grid, Key, KeyColor, Point, Room};
use crate::loot::{self, LootItem};
use crate::monster::{Axis, Monster, MonsterKind};
use crate::rng::SeededRng;

/// Populate a freshly laid-out dungeon. Returns the number of door/key pairs
/// skipped for lack of a corridor tile.
pub fn populate(dungeon: &mut Dungeon) -> usize {
    let Dungeon {
        profile,
        grid,
        rooms,
        loot: loot_items,
        monsters,
        doors,
        keys,
        rng,
        ..
    } = dungeon;
    let rooms: &[Room] = rooms;

    let interior: &[Room] = if rooms.len() > 2 {
        &rooms[1..rooms.len() - 1]
    } else {
        &[]
    };

    for room in interior {
        let loot_count = profile.loot_count.draw(rng);
        for _ in 0..loot_count {
            let position = random_cell(room, rng);
            loot_items.push(LootItem::new(loot::roll_kind(rng), position));
        }

        let monster_count = profile.monster_count.draw(rng);
        for _ in 0..monster_count {
            let position = random_cell(room, rng);
            let kind = *rng.pick(MonsterKind::all()).unwrap_or(&MonsterKind::Rat);
            let axis = if room.width >= room.height {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            monsters.push(Monster::new(
                kind,
                position,
                profile.monster_damage_multiplier,
                axis,
            ));
        }
    }

    let mut skipped = 0;
    for pair in interior.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        let color = *rng.pick(&KeyColor::ALL).unwrap_or(&KeyColor::Red);

        let mut candidates = corridor_tiles_between(grid, rooms, earlier, later);
        candidates.retain(|p| doors.iter().all(|d| d.position != *p));
        let Some(door_at) = rng.pick(&candidates).copied() else {
            debug!(?color, "No corridor tile between rooms, door/key pair skipped");
            skipped += 1;
            continue;
        };

        doors.push(Door {
            position: door_at,
            color,
            locked: true,
        });
        keys.push(Key {
            position: random_cell(earlier, rng),
            color,
            collected: false,
        });
    }

    skipped
}

fn random_cell(room: &Room, rng: &mut SeededRng) -> Point {
    let x = rng.range(room.x, room.x + room.width - 1);
    let y = rng.range(room.y, room.y + room.height - 1);
    Point::new(x as i32, y as i32)
}

/// Corridor tiles (exactly two floor neighbors) inside the box spanned by
/// both room centers, more than one tile away from either room and outside
/// every room.
pub fn corridor_tiles_between(grid: &Grid, rooms: &[Room], a: &Room, b: &Room) -> Vec<Point> {
    let (ca, cb) = (a.center(), b.center());
    let (min_x, max_x) = (ca.x.min(cb.x), ca.x.max(cb.x));
    let (min_y, max_y) = (ca.y.min(cb.y), ca.y.max(cb.y));

    let mut tiles = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Point::new(x, y);
            if grid.is_floor(p)
                && grid.floor_neighbors(p) == 2
                && a.distance_to(p) > 1
                && b.distance_to(p) > 1
                && !rooms.iter().any(|r| r.contains(p))
            {
                tiles.push(p);
            }
        }
    }
    tiles
}
