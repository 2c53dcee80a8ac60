//! Paddle Duel: terminal Pong against a reactive AI paddle.
//!
//! [`game`] holds the simulation (geometry, ball physics, player control,
//! scoring), [`ai`] drives the right paddle, and [`ui`] / [`game_modes`]
//! draw the match and run the fixed-rate loop in a terminal.

pub mod ai;
pub mod config;
pub mod debug;
pub mod game;
pub mod game_modes;
pub mod ui;
