//! Sound cue playback
//!
//! Terminals have one sound: the bell. Meals, crashes, wins and menu choices
//! ring it; turns are only logged since a bell per key press drowns out the rest.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::game::Cue;

/// Sink for cues raised by the game
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue
pub struct Muted;

impl CuePlayer for Muted {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "muted cue");
    }
}

/// Rings the terminal bell on `out`
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rings_for(cue: Cue) -> bool {
        !matches!(cue, Cue::Turn(_))
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue");
        if !Self::rings_for(cue) {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            debug!(%err, "bell failed");
        }
    }
}

/// The player matching the sfx setting
pub fn cue_player(sfx_enabled: bool) -> Box<dyn CuePlayer> {
    if sfx_enabled {
        Box::new(TerminalBell::new(io::stderr()))
    } else {
        Box::new(Muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_bell_rings_for_events_not_turns() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Cue::Turn(Direction::Up));
        bell.play(Cue::Munch);
        bell.play(Cue::Turn(Direction::Left));
        bell.play(Cue::Collision);

        assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn test_muted_accepts_everything() {
        let mut muted = Muted;
        muted.play(Cue::Win);
        muted.play(Cue::Select);
    }
}
