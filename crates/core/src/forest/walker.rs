//! Floor growth strategies: pure random walk, room-and-corridor, and
//! winding corridors with occasional rooms.

use rand_chacha::ChaCha8Rng;

use super::config::{ForestConfig, WalkStrategy};
use super::grid::GridIndex;
use super::random::range_i32;
use super::rooms::stamp_room;
use crate::types::Pos;

/// Safety valve for the cavern walk: on a saturated region the walk may
/// legitimately stop short of the target count.
pub(super) const MAX_CAVERN_ATTEMPTS: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn step(self, pos: Pos) -> Pos {
        match self {
            Direction::Up => pos.up(),
            Direction::Right => pos.right(),
            Direction::Down => pos.down(),
            Direction::Left => pos.left(),
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

fn random_direction(rng: &mut ChaCha8Rng) -> Direction {
    match range_i32(rng, 0, 4) {
        0 => Direction::Up,
        1 => Direction::Right,
        2 => Direction::Down,
        _ => Direction::Left,
    }
}

/// Grows the floor set from the origin according to the configured strategy.
/// Expects an already-normalized config (see `ForestConfig::effective`).
pub(super) fn grow(grid: &mut GridIndex, rng: &mut ChaCha8Rng, config: &ForestConfig) {
    match config.strategy {
        WalkStrategy::Caverns => cavern_walk(grid, rng, config),
        WalkStrategy::Rooms => room_walk(grid, rng, config),
        WalkStrategy::Winding => winding_walk(grid, rng, config),
    }
}

fn cavern_walk(grid: &mut GridIndex, rng: &mut ChaCha8Rng, config: &ForestConfig) {
    let mut cur = Pos::ORIGIN;
    grid.insert_floor(cur);

    let mut attempts = 0;
    while grid.floor_count() < config.total_floor_count && attempts < MAX_CAVERN_ATTEMPTS {
        cur = random_direction(rng).step(cur);
        grid.insert_floor(cur);
        attempts += 1;
    }
}

fn room_walk(grid: &mut GridIndex, rng: &mut ChaCha8Rng, config: &ForestConfig) {
    let mut cur = Pos::ORIGIN;
    if config.start_in_room {
        stamp_room(grid, rng, cur, config.room_shape);
    } else {
        grid.insert_floor(cur);
    }

    while grid.floor_count() < config.total_floor_count {
        cur = take_a_hike(grid, rng, cur, config);
        stamp_room(grid, rng, cur, config.room_shape);
    }
}

fn winding_walk(grid: &mut GridIndex, rng: &mut ChaCha8Rng, config: &ForestConfig) {
    let mut cur = Pos::ORIGIN;
    if config.start_in_room {
        stamp_room(grid, rng, cur, config.room_shape);
    } else {
        grid.insert_floor(cur);
    }

    while grid.floor_count() < config.total_floor_count {
        cur = take_a_hike(grid, rng, cur, config);
        let roll = range_i32(rng, 0, 100);
        if roll > config.winding_hall_percent {
            stamp_room(grid, rng, cur, config.room_shape);
        }
    }
}

/// Carves one corridor of random length 9..=17 and returns the end position.
/// Width offsets apply perpendicular to the travel direction.
fn take_a_hike(grid: &mut GridIndex, rng: &mut ChaCha8Rng, start: Pos, config: &ForestConfig) -> Pos {
    let mut direction = random_direction(rng);
    let walk_length = range_i32(rng, 9, 18);

    let offsets: &[i32] =
        if config.use_hallway_width { config.hallway_width.offsets() } else { &[0] };

    let mut pos = start;
    for _ in 0..walk_length {
        if !config.persistent_direction {
            direction = random_direction(rng);
        }

        for &offset in offsets {
            let spread = if direction.is_vertical() {
                pos.offset(0, offset)
            } else {
                pos.offset(offset, 0)
            };
            grid.insert_floor(spread);
        }

        pos = direction.step(pos);
    }

    pos
}
