use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    spawn::spawn,
    state::{Collision, GameState, Phase, Position, Snake},
};

/// Sound triggers raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A turn was accepted
    Turn(Direction),
    /// A fruit was eaten
    Munch,
    Collision,
    Win,
    /// A menu entry was chosen
    Select,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate a fruit this step
    pub ate_fruit: bool,
    /// Type of collision if one occurred
    pub collision: Option<Collision>,
    /// Whether this step filled the board
    pub won: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                ate_fruit: false,
                collision: None,
                won: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
    cues: Vec<Cue>,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            cues: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let board = self.config.board;
        let start = Position::new(
            (board.width as f32 * 0.15).floor() as i32,
            board.height / 2,
        );
        let snake = Snake::new(start, Direction::Right, self.config.initial_snake_length);

        let mut fruits = Vec::with_capacity(self.config.fruit_count);
        for _ in 0..self.config.fruit_count {
            let occupied = snake.body().iter().chain(fruits.iter()).copied();
            if let Some(fruit) = spawn(board, occupied, &mut self.rng) {
                fruits.push(fruit);
            }
        }

        self.cues.clear();
        info!(
            width = board.width,
            height = board.height,
            mode = self.config.mode.label(),
            fruits = fruits.len(),
            "New game"
        );

        GameState::new(snake, fruits, board, self.config.mode)
    }

    /// Forward a turn request to the snake. The first accepted turn starts the game.
    pub fn request_turn(&mut self, state: &mut GameState, direction: Direction) -> bool {
        if state.is_over() {
            return false;
        }

        let accepted = state.snake.request_turn(direction);
        if accepted {
            if state.phase == Phase::NotStarted {
                state.phase = Phase::Running;
            }
            self.cues.push(Cue::Turn(direction));
        }
        accepted
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.phase != Phase::Running {
            return StepResult::idle(state.is_over());
        }

        let head = match state.snake.advance(state.board, state.mode) {
            Ok(head) => head,
            Err(collision) => {
                state.phase = Phase::Collided(collision);
                self.cues.push(Cue::Collision);
                info!(score = state.score, steps = state.steps, "Game over by {collision}");

                return StepResult {
                    terminated: true,
                    info: StepInfo {
                        ate_fruit: false,
                        collision: Some(collision),
                        won: false,
                    },
                };
            }
        };
        state.steps += 1;

        let Some(index) = state.fruits.iter().position(|&fruit| fruit == head) else {
            return StepResult::idle(false);
        };

        state.fruits.remove(index);
        state.score += 1;

        let occupied = state.snake.body().iter().chain(state.fruits.iter()).copied();
        let mut won = false;
        match spawn(state.board, occupied, &mut self.rng) {
            Some(fruit) => state.fruits.push(fruit),
            None if state.fruits.is_empty() => won = true,
            None => debug!(remaining = state.fruits.len(), "No room for replacement fruit"),
        }

        state.snake.grow();
        self.cues.push(Cue::Munch);

        if won {
            state.phase = Phase::Won;
            self.cues.push(Cue::Win);
            info!(score = state.score, steps = state.steps, "Board filled, game won");
        }

        StepResult {
            terminated: won,
            info: StepInfo {
                ate_fruit: true,
                collision: None,
                won,
            },
        }
    }

    /// Take the cues raised since the last call
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameMode;
    use crate::game::state::Board;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(11))
    }

    fn running_state(
        segments: &[(i32, i32)],
        direction: Direction,
        fruits: &[(i32, i32)],
        board: Board,
        mode: GameMode,
    ) -> GameState {
        let snake = Snake::from_segments(
            segments.iter().map(|&(x, y)| Position::new(x, y)),
            direction,
        );
        let fruits = fruits.iter().map(|&(x, y)| Position::new(x, y)).collect();
        GameState::new(snake, fruits, board, mode)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(GameConfig::default());
        let state = engine.reset();

        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.tail(), Position::new(1, 9));
        assert_eq!(state.snake.head(), Position::new(4, 9));
        assert_eq!(state.fruits.len(), 1);
        assert!(!state.snake.occupies(state.fruits[0]));
    }

    #[test]
    fn test_reset_spawns_disjoint_fruits() {
        let mut engine = engine(GameConfig::default().with_fruit_count(3));
        let state = engine.reset();

        assert_eq!(state.fruits.len(), 3);
        for (i, fruit) in state.fruits.iter().enumerate() {
            assert!(!state.snake.occupies(*fruit));
            assert!(!state.fruits[i + 1..].contains(fruit));
        }
    }

    #[test]
    fn test_no_movement_before_first_turn() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        let head = state.snake.head();

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_first_turn_starts_game() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();

        assert!(!engine.request_turn(&mut state, Direction::Left));
        assert_eq!(state.phase, Phase::NotStarted);

        assert!(engine.request_turn(&mut state, Direction::Up));
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(engine.drain_cues(), vec![Cue::Turn(Direction::Up)]);

        let head = state.snake.head();
        engine.step(&mut state);
        assert_eq!(state.snake.head(), head.moved_in_direction(Direction::Up));
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_fruit_consumption() {
        let mut engine = engine(GameConfig::small());
        let mut state = running_state(
            &[(1, 1), (2, 1), (3, 1)],
            Direction::Right,
            &[(4, 1)],
            Board::new(10, 10),
            GameMode::Regular,
        );
        engine.request_turn(&mut state, Direction::Right);
        engine.drain_cues();

        let result = engine.step(&mut state);

        assert!(result.info.ate_fruit);
        assert!(!result.terminated);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Position::new(4, 1));
        assert_eq!(state.fruits.len(), 1);
        assert!(!state.snake.occupies(state.fruits[0]));
        assert_eq!(engine.drain_cues(), vec![Cue::Munch]);
    }

    #[test]
    fn test_fruit_needs_exact_head_match() {
        let mut engine = engine(GameConfig::small());
        let mut state = running_state(
            &[(1, 1), (2, 1), (3, 1)],
            Direction::Right,
            &[(4, 2)],
            Board::new(10, 10),
            GameMode::Regular,
        );
        engine.request_turn(&mut state, Direction::Right);

        let result = engine.step(&mut state);

        assert!(!result.info.ate_fruit);
        assert_eq!(state.score, 0);
        assert_eq!(state.fruits, vec![Position::new(4, 2)]);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine(GameConfig::small());
        let mut state = running_state(
            &[(0, 1), (1, 1), (2, 1), (3, 1)],
            Direction::Right,
            &[(0, 3)],
            Board::new(4, 4),
            GameMode::Regular,
        );
        engine.request_turn(&mut state, Direction::Right);
        engine.drain_cues();
        let snake_before = state.snake.clone();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision, Some(Collision::Border));
        assert_eq!(state.phase, Phase::Collided(Collision::Border));
        assert_eq!(state.snake, snake_before);
        assert_eq!(engine.drain_cues(), vec![Cue::Collision]);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(GameConfig::small());
        let mut state = running_state(
            &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 0)],
            Direction::Up,
            &[(3, 3)],
            Board::new(4, 4),
            GameMode::Infinite,
        );
        engine.request_turn(&mut state, Direction::Left);

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision, Some(Collision::SelfCollision));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        engine.request_turn(&mut state, Direction::Up);
        state.phase = Phase::Collided(Collision::Border);
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
        assert!(!engine.request_turn(&mut state, Direction::Left));
    }

    #[test]
    fn test_filling_board_wins() {
        // Tail still doubled from the previous meal, so the move fills all three cells
        let mut engine = engine(GameConfig::new(3, 1));
        let mut state = running_state(
            &[(0, 0), (0, 0), (1, 0)],
            Direction::Right,
            &[(2, 0)],
            Board::new(3, 1),
            GameMode::Regular,
        );
        engine.request_turn(&mut state, Direction::Right);
        engine.drain_cues();

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(result.info.won);
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(state.score, 1);
        assert!(state.fruits.is_empty());
        assert_eq!(engine.drain_cues(), vec![Cue::Munch, Cue::Win]);
    }

    #[test]
    fn test_win_waits_for_last_fruit() {
        let mut engine = engine(GameConfig::new(4, 1));
        let mut state = running_state(
            &[(0, 0), (0, 0), (1, 0)],
            Direction::Right,
            &[(2, 0), (3, 0)],
            Board::new(4, 1),
            GameMode::Regular,
        );
        engine.request_turn(&mut state, Direction::Right);

        // No room for a replacement, but one fruit is still live
        let result = engine.step(&mut state);
        assert!(result.info.ate_fruit);
        assert!(!result.terminated);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.fruits, vec![Position::new(3, 0)]);

        let result = engine.step(&mut state);
        assert!(result.info.won);
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(state.score, 2);
    }
}
