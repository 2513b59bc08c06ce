use serde::{Deserialize, Serialize};

use crate::types::{Direction, Point};

/// Capacity of the recorded turn history. Too small and long bodies lose
/// their oldest corners.
pub const MAX_TURN_COUNT: usize = 50;

/// Capacity of the food table.
pub const MAX_FOOD_COUNT: usize = 5;

/// Cycles a food stays on the board before it expires.
pub const FOOD_DURATION: u64 = 200;

/// Length granted by eating one food.
pub const FOOD_LENGTH_INCREMENT: usize = 5;

/// A missing food spawns with probability one-in-this per cycle.
pub const FOOD_SPAWN_ONE_IN: usize = 50;

/// Score per remaining lifetime cycle of an eaten food.
pub const FOOD_SCORE_MULTIPLIER: u32 = 5;

/// Placement samples tried before a spawn is skipped for the cycle.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Starting head cell on either map.
pub const START_POSITION: Point = Point { x: 20, y: 20 };

/// Starting facing direction on either map.
pub const INITIAL_FACING: Direction = Direction::Right;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapSize {
    Small,
    Large,
}

/// Board geometry and snake sizing for one map preset. `draw_scale` is the
/// pixel multiplier a renderer may apply per cell; the simulation itself
/// only uses the cell grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSettings {
    pub width: usize,
    pub height: usize,
    pub draw_scale: usize,
    pub initial_length: usize,
}

impl BoardSettings {
    pub fn for_map_size(size: MapSize) -> Self {
        match size {
            MapSize::Small => Self {
                width: 60,
                height: 34,
                draw_scale: 4,
                initial_length: 20,
            },
            MapSize::Large => Self {
                width: 120,
                height: 70,
                draw_scale: 2,
                initial_length: 30,
            },
        }
    }

    /// Playable area, excluding the one-cell wall ring.
    pub fn in_interior(&self, p: Point) -> bool {
        p.x > 0 && p.x < self.width - 1 && p.y > 0 && p.y < self.height - 1
    }
}

/// Foods the board should hold at a given score.
pub fn target_food_count(score: u32) -> usize {
    if score < 5_000 {
        1
    } else if score < 10_000 {
        2
    } else {
        3
    }
}

/// Cells the head advances per cycle. Kept as a function of score so the
/// difficulty curve has somewhere to live.
pub fn snake_speed(_score: u32) -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_preset() {
        let board = BoardSettings::for_map_size(MapSize::Small);
        assert_eq!(board.width, 60);
        assert_eq!(board.height, 34);
        assert_eq!(board.draw_scale, 4);
        assert_eq!(board.initial_length, 20);
    }

    #[test]
    fn test_large_preset() {
        let board = BoardSettings::for_map_size(MapSize::Large);
        assert_eq!(board.width, 120);
        assert_eq!(board.height, 70);
        assert_eq!(board.draw_scale, 2);
        assert_eq!(board.initial_length, 30);
    }

    #[test]
    fn test_in_interior_excludes_wall_ring() {
        let board = BoardSettings::for_map_size(MapSize::Small);
        assert!(board.in_interior(Point::new(1, 1)));
        assert!(board.in_interior(Point::new(58, 32)));
        assert!(!board.in_interior(Point::new(0, 10)));
        assert!(!board.in_interior(Point::new(59, 10)));
        assert!(!board.in_interior(Point::new(10, 0)));
        assert!(!board.in_interior(Point::new(10, 33)));
    }

    #[test]
    fn test_target_food_count_thresholds() {
        assert_eq!(target_food_count(0), 1);
        assert_eq!(target_food_count(4_999), 1);
        assert_eq!(target_food_count(5_000), 2);
        assert_eq!(target_food_count(9_999), 2);
        assert_eq!(target_food_count(10_000), 3);
    }
}
