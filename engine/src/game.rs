use crate::food::Food;
use crate::input::Buttons;
use crate::log;
use crate::rng::GameRng;
use crate::settings::{
    BoardSettings, FOOD_SCORE_MULTIPLIER, FOOD_SPAWN_ONE_IN, MAX_FOOD_COUNT,
    MAX_PLACEMENT_ATTEMPTS, snake_speed, target_food_count,
};
use crate::snake::Snake;
use crate::types::{Direction, Point};

/// One play session: the snake, the foods on the board, and the counters
/// the scoreboard shows. Created at game start, dropped at game over; the
/// session exclusively owns everything inside it.
pub struct GameState {
    pub snake: Snake,
    foods: Vec<Food>,
    pub board: BoardSettings,
    pub score: u32,
    pub current_cycle: u64,
    pub paused: bool,
}

impl GameState {
    pub fn new(board: BoardSettings) -> Self {
        Self {
            snake: Snake::new(&board),
            foods: Vec::with_capacity(MAX_FOOD_COUNT),
            board,
            score: 0,
            current_cycle: 0,
            paused: false,
        }
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advances the game by one cycle. `keys` is the merged mask of every
    /// button seen down since the previous cycle, so presses between
    /// cycles are not lost. Does nothing while paused or once the snake
    /// has died.
    pub fn process(&mut self, keys: Buttons, rng: &mut GameRng) {
        if self.paused || self.snake.dead {
            return;
        }

        self.current_cycle += 1;

        let current_cycle = self.current_cycle;
        self.foods.retain(|f| !f.expired(current_cycle));

        let speed = snake_speed(self.score);
        self.move_head(speed);

        // Growth is spread over every other cycle so it reads as gradual.
        if self.current_cycle % 2 == 0 {
            self.snake.length = (self.snake.length + speed).min(self.snake.grow_to_length);
        }

        self.clamp_head();

        self.snake.dead = self.snake.check_self_collision(&self.board)
            || self.snake.check_wall_collision(&self.board);
        if self.snake.dead {
            log!(
                "snake died at ({}, {}) on cycle {}",
                self.snake.head.x,
                self.snake.head.y,
                self.current_cycle
            );
        }

        for i in 0..self.foods.len() {
            if self
                .snake
                .check_food_collision(self.foods[i].location, &self.board)
            {
                self.eat_food(i);
            }
        }

        self.spawn_missing_foods(rng);
        self.apply_turn_request(keys);

        // Passive score for staying alive, once every 64 cycles.
        if self.current_cycle % 64 == 0 {
            self.score += 2 * self.snake.length as u32;
        }
    }

    fn move_head(&mut self, speed: usize) {
        let head = &mut self.snake.head;
        match self.snake.facing {
            Direction::Down => head.y += speed,
            Direction::Right => head.x += speed,
            // Unsigned coordinates: saturate at the low wall instead of
            // wrapping around.
            Direction::Up => head.y = head.y.saturating_sub(speed),
            Direction::Left => head.x = head.x.saturating_sub(speed),
        }
    }

    /// Index safety only; the wall collision check decides death.
    fn clamp_head(&mut self) {
        self.snake.head.x = self.snake.head.x.min(self.board.width - 1);
        self.snake.head.y = self.snake.head.y.min(self.board.height - 1);
    }

    fn eat_food(&mut self, index: usize) {
        let remaining = self.foods[index].remaining_lifetime(self.current_cycle);
        self.score += remaining as u32 * FOOD_SCORE_MULTIPLIER;
        self.snake.grow_to_length += self.foods[index].value;
        // Expiring it now lets the next cycle's expiry pass remove it.
        self.foods[index].expire_now(self.current_cycle);
        log!(
            "food eaten at ({}, {}), +{} score",
            self.foods[index].location.x,
            self.foods[index].location.y,
            remaining as u32 * FOOD_SCORE_MULTIPLIER
        );
    }

    fn spawn_missing_foods(&mut self, rng: &mut GameRng) {
        let target = target_food_count(self.score).min(MAX_FOOD_COUNT);
        let missing = target.saturating_sub(self.foods.len());
        for _ in 0..missing {
            // Spawns trickle in over many cycles rather than landing all
            // at once.
            if rng.random_range(0..FOOD_SPAWN_ONE_IN) != 0 {
                continue;
            }
            if let Some(food) = self.place_random_food(rng) {
                log!("food spawned at ({}, {})", food.location.x, food.location.y);
                self.foods.push(food);
            }
        }
    }

    /// Samples cells biased toward the middle of the board until one
    /// misses the snake body. A cycle that exhausts its attempts spawns
    /// nothing and simply tries again next cycle.
    fn place_random_food(&self, rng: &mut GameRng) -> Option<Food> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(self.board.width / 10..self.board.width * 9 / 10);
            let y = rng.random_range(self.board.height / 10..self.board.height * 9 / 10);
            let location = Point::new(x, y);

            if self.snake.walk(&self.board).all(|cell| cell != location) {
                return Some(Food::new(location, self.current_cycle));
            }
        }
        None
    }

    /// At most one turn per cycle; among the pressed directions the
    /// highest-priority button wins, whether or not it results in a turn.
    fn apply_turn_request(&mut self, keys: Buttons) {
        if keys.contains(Buttons::UP) {
            self.snake.turn(Direction::Up);
        } else if keys.contains(Buttons::RIGHT) {
            self.snake.turn(Direction::Right);
        } else if keys.contains(Buttons::DOWN) {
            self.snake.turn(Direction::Down);
        } else if keys.contains(Buttons::LEFT) {
            self.snake.turn(Direction::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{FOOD_DURATION, MapSize};

    fn small_game() -> (GameState, GameRng) {
        let board = BoardSettings::for_map_size(MapSize::Small);
        (GameState::new(board), GameRng::new(42))
    }

    fn large_game() -> (GameState, GameRng) {
        let board = BoardSettings::for_map_size(MapSize::Large);
        (GameState::new(board), GameRng::new(42))
    }

    /// Decoy food far from the snake's row that keeps the food table at
    /// its target count, so no random spawns interfere with a test.
    fn decoy_food() -> Food {
        Food {
            location: Point::new(50, 30),
            value: 5,
            delete_on_cycle: 1_000_000,
        }
    }

    #[test]
    fn test_new_game_is_fresh() {
        let (game, _) = small_game();
        assert_eq!(game.score, 0);
        assert_eq!(game.current_cycle, 0);
        assert!(!game.paused);
        assert!(game.foods().is_empty());
        assert!(!game.snake.dead);
    }

    #[test]
    fn test_first_cycle_on_large_map_moves_head_one_cell() {
        let (mut game, mut rng) = large_game();
        assert_eq!(game.snake.head, Point::new(20, 20));
        assert_eq!(game.snake.length, 30);

        game.process(Buttons::empty(), &mut rng);

        assert_eq!(game.current_cycle, 1);
        assert_eq!(game.snake.head, Point::new(21, 20));
        assert_eq!(game.snake.length, 30);
        assert_eq!(game.score, 0);
        assert!(!game.snake.dead);
    }

    #[test]
    fn test_running_into_the_right_wall_kills() {
        let (mut game, mut rng) = small_game();
        game.snake.head = Point::new(game.board.width - 2, 20);

        game.process(Buttons::empty(), &mut rng);

        assert_eq!(game.snake.head.x, game.board.width - 1);
        assert!(game.snake.check_wall_collision(&game.board));
        assert!(game.snake.dead);

        // A dead session stops processing entirely.
        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.current_cycle, 1);
    }

    #[test]
    fn test_low_wall_movement_does_not_underflow() {
        let (mut game, mut rng) = small_game();
        game.snake.head = Point::new(20, 1);
        game.snake.facing = Direction::Up;

        game.process(Buttons::empty(), &mut rng);

        assert_eq!(game.snake.head, Point::new(20, 0));
        assert!(game.snake.dead);
    }

    #[test]
    fn test_paused_game_ignores_process() {
        let (mut game, mut rng) = small_game();
        game.toggle_pause();
        game.process(Buttons::UP, &mut rng);
        assert_eq!(game.current_cycle, 0);
        assert_eq!(game.snake.head, Point::new(20, 20));

        game.toggle_pause();
        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.current_cycle, 1);
    }

    #[test]
    fn test_turn_is_recorded_at_the_moved_head() {
        let (mut game, mut rng) = small_game();
        game.process(Buttons::UP, &mut rng);

        assert_eq!(game.snake.facing, Direction::Up);
        let turn = *game.snake.turns().next().unwrap();
        assert_eq!(turn.location, Point::new(21, 20));
        assert_eq!(turn.previously_facing, Direction::Right);

        // The next cycle moves along the new facing.
        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.snake.head, Point::new(21, 19));
    }

    #[test]
    fn test_turn_priority_picks_the_highest_button() {
        let (mut game, mut rng) = small_game();
        game.process(Buttons::UP | Buttons::DOWN | Buttons::LEFT, &mut rng);
        assert_eq!(game.snake.facing, Direction::Up);
    }

    #[test]
    fn test_turn_priority_can_waste_the_cycle_on_a_rejected_button() {
        // RIGHT outranks DOWN, so pressing both while already facing
        // right turns nowhere at all.
        let (mut game, mut rng) = small_game();
        game.process(Buttons::RIGHT | Buttons::DOWN, &mut rng);
        assert_eq!(game.snake.facing, Direction::Right);
        assert_eq!(game.snake.turns().len(), 0);
    }

    #[test]
    fn test_no_instant_reversal() {
        let (mut game, mut rng) = small_game();
        game.process(Buttons::LEFT, &mut rng);
        assert_eq!(game.snake.facing, Direction::Right);
        assert_eq!(game.snake.turns().len(), 0);
    }

    #[test]
    fn test_growth_is_gradual_and_never_overshoots() {
        let (mut game, mut rng) = small_game();
        game.snake.grow_to_length = game.snake.length + 7;

        let mut previous = game.snake.length;
        for _ in 0..20 {
            // Park the head back each cycle so the wall stays out of play.
            game.snake.head = Point::new(20, 20);
            game.process(Buttons::empty(), &mut rng);
            assert!(game.snake.length >= previous);
            assert!(game.snake.length <= game.snake.grow_to_length);
            previous = game.snake.length;
        }
        // Gap of 7 at one cell per even cycle closes within 14 cycles.
        assert_eq!(game.snake.length, game.snake.grow_to_length);
    }

    #[test]
    fn test_eating_food_scores_by_remaining_lifetime() {
        let (mut game, mut rng) = small_game();
        game.foods.push(Food::new(Point::new(22, 20), 1));
        game.foods.push(decoy_food());

        game.process(Buttons::empty(), &mut rng); // head (21, 20), no hit
        assert_eq!(game.score, 0);

        game.process(Buttons::empty(), &mut rng); // head (22, 20), eats
        let remaining = (1 + FOOD_DURATION - 2) as u32;
        assert_eq!(game.score, remaining * FOOD_SCORE_MULTIPLIER);
        assert_eq!(game.snake.grow_to_length, game.board.initial_length + 5);
        // Eaten food is expired in place, gone after the next cycle's
        // expiry pass.
        assert_eq!(game.foods().len(), 2);
        assert_eq!(game.foods()[0].delete_on_cycle, 2);

        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.foods().len(), 1);
        assert_eq!(game.foods()[0].location, decoy_food().location);
    }

    #[test]
    fn test_expired_food_is_dropped_in_order() {
        let (mut game, mut rng) = small_game();
        let mut short_lived = Food::new(Point::new(40, 28), 0);
        short_lived.delete_on_cycle = 3;
        game.foods.push(short_lived);
        game.foods.push(decoy_food());

        game.process(Buttons::empty(), &mut rng);
        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.foods().len(), 2);

        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.foods().len(), 1);
        assert_eq!(game.foods()[0].location, decoy_food().location);
    }

    #[test]
    fn test_passive_score_every_64_cycles() {
        let (mut game, mut rng) = small_game();
        game.foods.push(decoy_food());

        for _ in 0..63 {
            game.snake.head = Point::new(20, 20);
            game.process(Buttons::empty(), &mut rng);
        }
        assert_eq!(game.score, 0);

        game.snake.head = Point::new(20, 20);
        game.process(Buttons::empty(), &mut rng);
        assert_eq!(game.current_cycle, 64);
        assert_eq!(game.score, 2 * game.snake.length as u32);
    }

    #[test]
    fn test_placed_food_never_overlaps_the_body() {
        let (mut game, mut rng) = small_game();
        // A few corners make the body non-trivial to miss.
        game.snake.head = Point::new(24, 20);
        game.snake.turn(Direction::Down);
        game.snake.head = Point::new(24, 26);
        game.snake.turn(Direction::Left);
        game.snake.head = Point::new(18, 26);

        for _ in 0..50 {
            let food = game
                .place_random_food(&mut rng)
                .expect("an almost empty board always has a free cell");
            assert!(game.snake.walk(&game.board).all(|cell| cell != food.location));
            assert_eq!(food.delete_on_cycle, game.current_cycle + FOOD_DURATION);
        }
    }

    #[test]
    fn test_food_spawns_up_to_the_target_count() {
        let (mut game, mut rng) = small_game();
        // With no food on the board, the 1-in-50 gate opens within a few
        // hundred cycles.
        for _ in 0..500 {
            game.snake.head = Point::new(20, 20);
            game.process(Buttons::empty(), &mut rng);
            if !game.foods().is_empty() {
                break;
            }
        }
        assert_eq!(game.foods().len(), 1);
        assert_eq!(game.foods().len(), target_food_count(game.score));
    }
}
