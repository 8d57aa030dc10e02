//! Alien Invaders: a fixed-shooter arcade game.
//!
//! - `wave`: one attempt against a formation (ship, aliens, bolts, outcome)
//! - `formation`: the marching alien grid
//! - `animation`: the ship's explosion
//! - `app`: title / play / pause / game-over state machine
//! - `display`: crossterm rendering
//!
//! The simulation never touches the terminal: input comes in through
//! `KeyInput` and output goes out through `Surface`.

pub mod animation;
pub mod app;
pub mod config;
pub mod display;
pub mod draw;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod wave;

pub use app::{App, GameState};
pub use config::Config;
pub use error::GameError;
pub use wave::{Outcome, Wave};
