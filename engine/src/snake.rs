use std::collections::VecDeque;

use crate::geometry::{dist_between, is_between};
use crate::settings::{BoardSettings, INITIAL_FACING, MAX_TURN_COUNT, START_POSITION};
use crate::types::{Direction, Point};

/// A recorded direction change: the cell it happened on and what the snake
/// was facing before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub location: Point,
    pub previously_facing: Direction,
}

/// The snake stores no per-cell body. Its occupied cells are reconstructed
/// on demand by walking backwards from the head and replaying the recorded
/// turns, newest first — see [`Snake::walk`]. Every consumer of the body
/// (collision checks, food placement, rendering) runs the same replay.
#[derive(Clone, Debug)]
pub struct Snake {
    pub head: Point,
    /// Number of visible body cells, head included.
    pub length: usize,
    /// Length the snake is growing toward after eating.
    pub grow_to_length: usize,
    pub facing: Direction,
    pub dead: bool,
    turns: VecDeque<Turn>,
}

impl Snake {
    pub fn new(board: &BoardSettings) -> Self {
        Self {
            head: START_POSITION,
            length: board.initial_length,
            grow_to_length: board.initial_length,
            facing: INITIAL_FACING,
            dead: false,
            turns: VecDeque::with_capacity(MAX_TURN_COUNT),
        }
    }

    /// Turn history, newest first.
    pub fn turns(&self) -> impl ExactSizeIterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Records a turn at the head and adopts the new facing. Requests that
    /// match the current facing or would reverse the snake into itself are
    /// ignored. At capacity the oldest turn is evicted.
    pub fn turn(&mut self, facing: Direction) {
        if facing == self.facing || facing.is_opposite(self.facing) {
            return;
        }
        if self.turns.len() == MAX_TURN_COUNT {
            self.turns.pop_back();
        }
        self.turns.push_front(Turn {
            location: self.head,
            previously_facing: self.facing,
        });
        self.facing = facing;
    }

    /// Replays the whole body, head first.
    pub fn walk<'a>(&'a self, board: &'a BoardSettings) -> BodyWalk<'a> {
        self.walk_from(self.head, self.length, board)
    }

    fn walk_from<'a>(&'a self, start: Point, cells: usize, board: &'a BoardSettings) -> BodyWalk<'a> {
        BodyWalk {
            turns: &self.turns,
            board,
            current: start,
            travel: self.facing.opposite(),
            turn_idx: 0,
            remaining: cells,
            stopped: false,
        }
    }

    pub fn check_wall_collision(&self, board: &BoardSettings) -> bool {
        !board.in_interior(self.head)
    }

    /// Self collision only scans the stretch the head most recently
    /// traversed: the walk starts at the newest turn and looks for body
    /// cells that fall between it and the head. Turns evicted from the
    /// bounded history are invisible here, so crossings of very old body
    /// segments after heavy turning can go unreported.
    pub fn check_self_collision(&self, board: &BoardSettings) -> bool {
        if self.turns.len() < 3 {
            return false;
        }
        let newest = self.turns[0].location;
        let scanned = self.length.saturating_sub(dist_between(self.head, newest));
        self.walk_from(newest, scanned + 1, board)
            .skip(1)
            .any(|cell| is_between(cell, self.head, newest))
    }

    pub fn check_food_collision(&self, food: Point, board: &BoardSettings) -> bool {
        if let Some(newest) = self.turns.front() {
            return is_between(food, self.head, newest.location)
                && dist_between(food, self.head) <= self.length;
        }
        // Straight snake: no turn bounds the head segment, walk every cell.
        self.walk(board).any(|cell| cell == food)
    }

    /// The rendering variant of the replay: the axis-aligned segments
    /// between consecutive turn points, head end first. A border stop
    /// closes the last segment on the final in-interior cell.
    pub fn segments(&self, board: &BoardSettings) -> Vec<(Point, Point)> {
        let mut segments = Vec::with_capacity(self.turns.len() + 1);
        let mut current = self.head;
        let mut travel = self.facing.opposite();
        let mut from = self.head;
        let mut turn_idx = 0;
        let mut remaining = self.length;

        while remaining > 0 {
            if let Some(turn) = self.turns.get(turn_idx)
                && turn.location == current
            {
                travel = turn.previously_facing.opposite();
                segments.push((from, current));
                from = current;
                turn_idx += 1;
            }
            match step(current, travel, board) {
                Some(next) => current = next,
                None => break,
            }
            remaining -= 1;
        }

        segments.push((from, current));
        segments
    }
}

/// Iterator over occupied cells, produced by replaying the turn history
/// from a starting cell toward the tail. Stops early when the path runs
/// into the wall ring.
pub struct BodyWalk<'a> {
    turns: &'a VecDeque<Turn>,
    board: &'a BoardSettings,
    current: Point,
    travel: Direction,
    turn_idx: usize,
    remaining: usize,
    stopped: bool,
}

impl Iterator for BodyWalk<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.stopped || self.remaining == 0 {
            return None;
        }
        let cell = self.current;
        self.remaining -= 1;

        if let Some(turn) = self.turns.get(self.turn_idx)
            && turn.location == self.current
        {
            self.travel = turn.previously_facing.opposite();
            self.turn_idx += 1;
        }
        match step(self.current, self.travel, self.board) {
            Some(next) => self.current = next,
            None => self.stopped = true,
        }

        Some(cell)
    }
}

/// One cell in `travel` direction, or None once the path would leave the
/// playable interior.
fn step(from: Point, travel: Direction, board: &BoardSettings) -> Option<Point> {
    let next = match travel {
        Direction::Up => Point::new(from.x, from.y.checked_sub(1)?),
        Direction::Down => Point::new(from.x, from.y + 1),
        Direction::Left => Point::new(from.x.checked_sub(1)?, from.y),
        Direction::Right => Point::new(from.x + 1, from.y),
    };
    board.in_interior(next).then_some(next)
}
