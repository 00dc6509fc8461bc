pub mod board;
pub mod engine;
pub mod error;
pub mod planner;
pub mod player;
pub mod rating;
pub mod rules;
pub mod win;

/// (row, col), zero-based from the top-left corner.
pub type Coord = (u8, u8);

pub use board::{Board, Cell, ObstacleColor};
pub use engine::{Cooldowns, Engine, Outcome, Stage};
pub use error::CaroError;
pub use planner::{Plan, plan};
pub use player::Player;
pub use rules::{Axis, Rules};
