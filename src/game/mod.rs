//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Turn buffering, movement, collisions and fruit placement live here; the
//! terminal front end only feeds it key presses and frame times.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod queue;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use clock::TickClock;
pub use config::{GameConfig, GameMode, Rgb, Setting, Settings};
pub use direction::Direction;
pub use engine::{Cue, GameEngine, StepInfo, StepResult};
pub use queue::DirectionQueue;
pub use spawn::spawn;
pub use state::{Board, Collision, GameState, Phase, Position, Snake};
