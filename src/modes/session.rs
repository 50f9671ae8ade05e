//! One game from first frame to game over

use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::game::{Cue, Direction, GameConfig, GameEngine, GameState, Phase, StepResult, TickClock};
use crate::render::{Interpolator, Quad};

/// Engine, state and timing for a single game
pub struct Session<R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    clock: TickClock,
    interpolator: Interpolator,
}

impl Session<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let clock = TickClock::from_speed(config.speed);
        let interpolator = Interpolator::new(config.board, config.mode, config.snake_color);
        let mut engine = GameEngine::with_rng(config, rng);
        let state = engine.reset();

        Self {
            engine,
            state,
            clock,
            interpolator,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.engine.request_turn(&mut self.state, direction)
    }

    /// Feed one frame's elapsed time. Returns the step result when a tick ran.
    pub fn frame(&mut self, dt: Duration) -> Option<StepResult> {
        if self.state.phase != Phase::Running {
            self.clock.hold();
            return None;
        }
        if !self.clock.accumulate(dt) {
            return None;
        }
        Some(self.engine.step(&mut self.state))
    }

    /// Render fraction for the current frame, 0 until the snake moves
    pub fn fraction(&self) -> f32 {
        if self.state.phase == Phase::Running {
            self.clock.fraction()
        } else {
            0.0
        }
    }

    pub fn quads(&self) -> Vec<Quad> {
        self.interpolator.quads(
            self.state.snake.body(),
            self.state.snake.direction(),
            self.fraction(),
        )
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        self.engine.drain_cues()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Collision, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session<StdRng> {
        Session::with_rng(GameConfig::small(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_waits_for_first_turn() {
        let mut session = session();
        let head = session.state().snake.head();

        for _ in 0..10 {
            assert!(session.frame(Duration::from_millis(500)).is_none());
        }
        assert_eq!(session.state().snake.head(), head);
        assert_eq!(session.fraction(), 0.0);
    }

    #[test]
    fn test_first_tick_is_a_full_interval_after_turn() {
        let mut session = session();
        let interval = TickClock::from_speed(session.config().speed).interval();
        session.frame(interval * 3);

        assert!(session.request_turn(Direction::Down));
        assert!(session.frame(interval / 2).is_none());
        assert!(session.fraction() > 0.4 && session.fraction() < 0.6);
        assert!(session.frame(interval - interval / 2).is_some());
        assert_eq!(session.state().steps, 1);
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut session = session();
        let interval = TickClock::from_speed(session.config().speed).interval();
        session.request_turn(Direction::Down);

        assert!(session.frame(interval * 3).is_some());
        assert_eq!(session.state().steps, 1);
        assert!(session.frame(Duration::ZERO).is_some());
        assert_eq!(session.state().steps, 2);
    }

    #[test]
    fn test_runs_into_wall() {
        let mut session = session();
        let interval = TickClock::from_speed(session.config().speed).interval();
        session.request_turn(Direction::Up);

        let mut frames = 0;
        while !session.is_over() && frames < 100 {
            session.frame(interval);
            frames += 1;
        }

        assert_eq!(session.state().phase, Phase::Collided(Collision::Border));
        assert_eq!(session.state().snake.head().y, 0);
        assert!(session.drain_cues().contains(&Cue::Collision));
        assert!(session.frame(interval).is_none());
    }

    #[test]
    fn test_quads_follow_body() {
        let session = session();
        let quads = session.quads();
        let head = session.state().snake.head();

        assert!(quads.len() >= session.state().snake.len());
        assert!(quads.iter().any(|quad| {
            Position::new(quad.x.round() as i32, quad.y.round() as i32) == head
        }));
    }
}
