pub mod geometry;
pub mod input;
pub mod params;
pub mod physics;
pub mod state;

pub use geometry::Rect;
pub use input::{move_player_paddle, KeyTracker, Keymap, PaddleInput, TickInput};
pub use params::MatchConfig;
pub use physics::PhysicsEvents;
pub use state::{Ball, Match, Paddle, ServeBias, Side};
