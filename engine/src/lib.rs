pub mod config;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logger;
pub mod rng;
pub mod settings;
pub mod snake;
pub mod types;

pub use food::Food;
pub use game::GameState;
pub use input::Buttons;
pub use rng::GameRng;
pub use settings::{BoardSettings, MapSize};
pub use snake::{BodyWalk, Snake, Turn};
pub use types::{Direction, Point};
