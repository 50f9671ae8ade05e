//! Terminal presentation
//!
//! `interpolate` turns simulation state into sub-cell quads, `board` rasterizes
//! them, and `renderer` lays out the screens around the board.

pub mod board;
pub mod interpolate;
pub mod renderer;

pub use board::BoardWidget;
pub use interpolate::{Interpolator, Quad, QuadVariant, SegmentKind};
pub use renderer::{GameView, Renderer};
