pub mod menu;
pub mod play;
pub mod session;

pub use play::{PlayMode, Scene};
pub use session::Session;
