//! Seeded dungeon generation.
//!
//! A dungeon is built in one pass over a single shared number stream:
//! layout (grid, rooms, corridors) first, then entity placement (loot,
//! monsters, doors and keys). The same seed and profile always produce the
//! same dungeon, down to every entity position.

pub mod layout;
pub mod placement;

use std::collections::VecDeque;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::difficulty::DifficultyProfile;
use crate::loot::LootItem;
use crate::monster::Monster;
use crate::rng::SeededRng;

/// Grid coordinate. Signed so that offsets can step off the map and be
/// rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A unit move with both components in `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const IDLE: Step = Step::new(0, 0);
    pub const UP: Step = Step::new(0, -1);
    pub const DOWN: Step = Step::new(0, 1);
    pub const LEFT: Step = Step::new(-1, 0);
    pub const RIGHT: Step = Step::new(1, 0);
    pub const CARDINALS: [Step; 4] = [Step::UP, Step::DOWN, Step::LEFT, Step::RIGHT];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Clamp both components into `{-1, 0, 1}`.
    pub fn toward(dx: i32, dy: i32) -> Self {
        Self::new(dx.signum(), dy.signum())
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn reversed(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

impl Add<Step> for Point {
    type Output = Point;

    fn add(self, step: Step) -> Point {
        Point::new(self.x + step.dx, self.y + step.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

/// Tile grid, indexed `tiles[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Vec<Tile>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::Wall; width]; height],
        }
    }

    /// Build a grid from rows of text: `#` is wall, anything else is floor.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c != '#' {
                    grid.tiles[y][x] = Tile::Floor;
                }
            }
        }
        grid
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn tile(&self, p: Point) -> Option<Tile> {
        if self.in_bounds(p) {
            Some(self.tiles[p.y as usize][p.x as usize])
        } else {
            None
        }
    }

    pub fn is_floor(&self, p: Point) -> bool {
        self.tile(p) == Some(Tile::Floor)
    }

    pub fn set(&mut self, p: Point, tile: Tile) {
        if self.in_bounds(p) {
            self.tiles[p.y as usize][p.x as usize] = tile;
        }
    }

    /// Floor cells among the 4-neighborhood.
    pub fn floor_neighbors(&self, p: Point) -> usize {
        Step::CARDINALS
            .iter()
            .filter(|s| self.is_floor(p + **s))
            .count()
    }

    /// Clamp a point into the grid.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0, self.width as i32 - 1),
            p.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// 4-connected floor reachability from `start`, indexed `[y][x]`.
    pub fn reachable_from(&self, start: Point) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; self.width]; self.height];
        if !self.is_floor(start) {
            return seen;
        }
        let mut queue = VecDeque::new();
        seen[start.y as usize][start.x as usize] = true;
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            for step in Step::CARDINALS {
                let next = p + step;
                if self.is_floor(next) && !seen[next.y as usize][next.x as usize] {
                    seen[next.y as usize][next.x as usize] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

/// Axis-aligned room, fully carved to floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn center(&self) -> Point {
        Point::new(
            (self.x + self.width / 2) as i32,
            (self.y + self.height / 2) as i32,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x as i32
            && p.y >= self.y as i32
            && p.x < (self.x + self.width) as i32
            && p.y < (self.y + self.height) as i32
    }

    /// Chebyshev distance from `p` to the room's bounding box (0 inside).
    pub fn distance_to(&self, p: Point) -> i32 {
        let left = self.x as i32;
        let top = self.y as i32;
        let right = (self.x + self.width) as i32 - 1;
        let bottom = (self.y + self.height) as i32 - 1;
        let dx = (left - p.x).max(p.x - right).max(0);
        let dy = (top - p.y).max(p.y - bottom).max(0);
        dx.max(dy)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| {
            (self.x..self.x + self.width).map(move |x| Point::new(x as i32, y as i32))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyColor {
    Red,
    Blue,
    Green,
}

impl KeyColor {
    pub const ALL: [KeyColor; 3] = [KeyColor::Red, KeyColor::Blue, KeyColor::Green];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub position: Point,
    pub color: KeyColor,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub position: Point,
    pub color: KeyColor,
    pub collected: bool,
}

/// One generated level.
///
/// Topology (grid, rooms, entrance, exit) never changes after generation;
/// only entity state (`collected`, `locked`, monster positions and AI state)
/// mutates during play. `rng` is the generation stream, left running so the
/// monster AI keeps drawing from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub seed: u64,
    pub profile: DifficultyProfile,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub entrance: Point,
    pub exit: Point,
    pub loot: Vec<LootItem>,
    pub monsters: Vec<Monster>,
    pub doors: Vec<Door>,
    pub keys: Vec<Key>,
    pub rng: SeededRng,
}

impl Dungeon {
    /// Build and populate a dungeon from a seed and difficulty profile.
    pub fn generate(seed: u64, profile: &DifficultyProfile) -> Self {
        let mut rng = SeededRng::new(seed);
        let layout = layout::build_layout(profile, &mut rng);
        let requested_rooms = layout.requested_rooms;

        let mut dungeon = Self {
            seed,
            profile: profile.clone(),
            grid: layout.grid,
            entrance: layout.entrance,
            exit: layout.exit,
            rooms: layout.rooms,
            loot: Vec::new(),
            monsters: Vec::new(),
            doors: Vec::new(),
            keys: Vec::new(),
            rng,
        };
        let skipped_pairs = placement::populate(&mut dungeon);

        let unreachable = dungeon.unreachable_rooms();
        if unreachable > 0 {
            warn!(seed, unreachable, "Generated dungeon has unreachable rooms");
        }

        info!(
            seed,
            width = dungeon.grid.width,
            height = dungeon.grid.height,
            requested_rooms,
            rooms = dungeon.rooms.len(),
            loot = dungeon.loot.len(),
            monsters = dungeon.monsters.len(),
            doors = dungeon.doors.len(),
            skipped_pairs,
            "Dungeon generated"
        );

        dungeon
    }

    /// Wrap a hand-built grid (tools and tests). No entities are placed.
    pub fn from_grid(seed: u64, grid: Grid, entrance: Point, exit: Point) -> Self {
        Self {
            seed,
            profile: DifficultyProfile::default(),
            grid,
            rooms: Vec::new(),
            entrance,
            exit,
            loot: Vec::new(),
            monsters: Vec::new(),
            doors: Vec::new(),
            keys: Vec::new(),
            rng: SeededRng::new(seed),
        }
    }

    pub fn door_at(&self, p: Point) -> Option<&Door> {
        self.doors.iter().find(|d| d.position == p)
    }

    pub fn door_at_mut(&mut self, p: Point) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.position == p)
    }

    /// Interior rooms: all but the entrance and exit rooms.
    pub fn interior_rooms(&self) -> &[Room] {
        if self.rooms.len() <= 2 {
            &[]
        } else {
            &self.rooms[1..self.rooms.len() - 1]
        }
    }

    pub fn reachable_from(&self, start: Point) -> Vec<Vec<bool>> {
        self.grid.reachable_from(start)
    }

    fn unreachable_rooms(&self) -> usize {
        let reachable = self.grid.reachable_from(self.entrance);
        self.rooms
            .iter()
            .filter(|room| {
                let c = room.center();
                !reachable[c.y as usize][c.x as usize]
            })
            .count()
    }
}
