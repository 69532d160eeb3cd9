//! Idle Vibe Tycoon simulation core.
//!
//! The engine owns all game state. Hosts issue `PlayerCommand`s, drive
//! `tick` from their own timer, and drain narrative lines from the
//! engine's display queue.

pub mod clock;
pub mod command;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod event;
pub mod fatigue;
pub mod formulas;
pub mod procedural;
pub mod random_event;
pub mod repair;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod terminal;
pub mod types;

pub use engine::GameEngine;
pub use error::{GameError, GameResult};
