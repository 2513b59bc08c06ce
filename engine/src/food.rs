use crate::settings::{FOOD_DURATION, FOOD_LENGTH_INCREMENT};
use crate::types::Point;

/// One food pellet on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub location: Point,
    /// Length the snake gains by eating this food.
    pub value: usize,
    /// Cycle on which the expiry pass removes this food.
    pub delete_on_cycle: u64,
}

impl Food {
    pub fn new(location: Point, current_cycle: u64) -> Self {
        Self {
            location,
            value: FOOD_LENGTH_INCREMENT,
            delete_on_cycle: current_cycle + FOOD_DURATION,
        }
    }

    pub fn expired(&self, current_cycle: u64) -> bool {
        current_cycle >= self.delete_on_cycle
    }

    /// Cycles left before the expiry pass would remove this food.
    pub fn remaining_lifetime(&self, current_cycle: u64) -> u64 {
        self.delete_on_cycle.saturating_sub(current_cycle)
    }

    /// Marks the food for removal on the next expiry pass.
    pub fn expire_now(&mut self, current_cycle: u64) {
        self.delete_on_cycle = current_cycle;
    }
}
