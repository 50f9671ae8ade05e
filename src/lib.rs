//! Grid Snake - a smooth-scrolling Snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Sub-cell interpolation and TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Sound cues (audio module)
//! - Settings and high-score persistence (store module)
//! - The scene machine and terminal loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod store;
