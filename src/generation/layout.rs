//! Grid, room and corridor layout.
//!
//! Draw order is part of the output: map size, room count, then per room
//! attempt width/height/x/y, then one coin flip per diagonal corridor step.

use tracing::debug;

use super::{Grid, Point, Room, Step, Tile};
use crate::constants::{ROOM_MAX_SIZE, ROOM_MIN_SIZE};
use crate::difficulty::DifficultyProfile;
use crate::rng::SeededRng;

/// Layout produced before any entity placement
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub entrance: Point,
    pub exit: Point,
    pub requested_rooms: usize,
}

pub fn build_layout(profile: &DifficultyProfile, rng: &mut SeededRng) -> Layout {
    let width = profile.map_size.draw(rng);
    let height = profile.map_size.draw(rng);
    let mut grid = Grid::new(width, height);

    // Phase 1: rooms. Failed attempts are dropped, never retried.
    let requested_rooms = profile.room_count.draw(rng);
    let mut rooms = Vec::with_capacity(requested_rooms);
    for attempt in 0..requested_rooms {
        match try_place_room(&grid, rng) {
            Some(room) => {
                carve_room(&mut grid, &room);
                rooms.push(room);
            }
            None => debug!(attempt, "Room attempt overlaps existing floor, skipped"),
        }
    }

    // Phase 2: chain corridors in creation order
    for pair in rooms.windows(2) {
        carve_corridor(&mut grid, pair[0].center(), pair[1].center(), rng);
    }

    // The first attempt always lands on an empty grid, so `rooms` is non-empty
    // for any validated profile.
    let entrance = rooms.first().map(Room::center).unwrap_or_default();
    let exit = rooms.last().map(Room::center).unwrap_or_default();

    Layout {
        grid,
        rooms,
        entrance,
        exit,
        requested_rooms,
    }
}

/// Draw one room and accept it only if its footprint plus a one-tile buffer
/// holds no floor yet.
fn try_place_room(grid: &Grid, rng: &mut SeededRng) -> Option<Room> {
    let w = rng.range(ROOM_MIN_SIZE, ROOM_MAX_SIZE);
    let h = rng.range(ROOM_MIN_SIZE, ROOM_MAX_SIZE);
    let x = rng.range(1, grid.width.saturating_sub(w + 1).max(1));
    let y = rng.range(1, grid.height.saturating_sub(h + 1).max(1));

    let room = Room {
        x,
        y,
        width: w,
        height: h,
    };

    if x + w >= grid.width || y + h >= grid.height {
        return None;
    }

    let blocked = (y - 1..=y + h).any(|by| {
        (x - 1..=x + w).any(|bx| grid.is_floor(Point::new(bx as i32, by as i32)))
    });

    if blocked {
        None
    } else {
        Some(room)
    }
}

fn carve_room(grid: &mut Grid, room: &Room) {
    for cell in room.cells() {
        grid.set(cell, Tile::Floor);
    }
}

/// Random monotonic walk from `from` to `to`: each step closes the gap on x
/// or y, with a coin flip deciding when both axes still differ.
fn carve_corridor(grid: &mut Grid, from: Point, to: Point, rng: &mut SeededRng) {
    let mut cursor = from;
    grid.set(cursor, Tile::Floor);

    while cursor != to {
        let toward = Step::toward(to.x - cursor.x, to.y - cursor.y);
        let step = match (toward.dx, toward.dy) {
            (0, dy) => Step::new(0, dy),
            (dx, 0) => Step::new(dx, 0),
            (dx, dy) => {
                if rng.coin_flip() {
                    Step::new(dx, 0)
                } else {
                    Step::new(0, dy)
                }
            }
        };
        cursor = cursor + step;
        grid.set(cursor, Tile::Floor);
    }
}
