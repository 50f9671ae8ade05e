use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::audio::{CuePlayer, cue_player};
use crate::game::{Cue, Direction, GameConfig, Phase, Setting, Settings};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{GameView, Renderer};
use crate::store::GameStore;

use super::menu::{GameOver, GameOverItem, MainMenu, MenuItem, OptionsMenu, OptionsRow, Outcome};
use super::session::Session;

/// Screen currently shown
pub enum Scene {
    MainMenu(MainMenu),
    Options(OptionsMenu),
    Playing(Session),
    GameOver(GameOver),
}

/// Interactive terminal game
pub struct PlayMode {
    store: GameStore,
    /// Options in effect for this run, possibly overridden from the command line
    settings: Settings,
    scene: Scene,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    player: Box<dyn CuePlayer>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(store: GameStore, settings: Settings) -> Self {
        let player = cue_player(settings.sfx_enabled);
        Self::with_player(store, settings, player)
    }

    pub fn with_player(store: GameStore, settings: Settings, player: Box<dyn CuePlayer>) -> Self {
        Self {
            store,
            settings,
            scene: Scene::MainMenu(MainMenu::new()),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            player,
            should_quit: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation and drawing share one ~60 FPS frame
        let mut frame_timer = interval(Duration::from_millis(16));
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.on_frame(now - last_frame);
                    last_frame = now;

                    terminal.draw(|frame| self.draw(frame)).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.metrics.games_played,
            wins = self.metrics.games_won,
            best = self.metrics.best_score,
            "Quitting"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    /// Apply one key command to the current scene
    pub fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match &mut self.scene {
            Scene::MainMenu(menu) => match action {
                KeyAction::Steer(Direction::Up) => menu.cursor.up(),
                KeyAction::Steer(Direction::Down) => menu.cursor.down(),
                KeyAction::Confirm => {
                    let item = menu.selected();
                    self.player.play(Cue::Select);
                    match item {
                        MenuItem::Play => self.start_game(),
                        MenuItem::Options => self.scene = Scene::Options(OptionsMenu::new()),
                        MenuItem::Exit => self.should_quit = true,
                    }
                }
                _ => {}
            },
            Scene::Options(menu) => match (action, menu.selected()) {
                (KeyAction::Steer(Direction::Up), _) => menu.cursor.up(),
                (KeyAction::Steer(Direction::Down), _) => menu.cursor.down(),
                (
                    KeyAction::Steer(Direction::Left | Direction::Right) | KeyAction::Confirm,
                    OptionsRow::Setting(setting),
                ) => {
                    self.settings.cycle(setting);
                    if setting == Setting::Sfx {
                        self.player = cue_player(self.settings.sfx_enabled);
                    }
                    self.player.play(Cue::Select);
                    self.store.data.settings = self.settings;
                    self.store.save_or_warn();
                }
                (KeyAction::Confirm, OptionsRow::Save) | (KeyAction::Back, _) => {
                    self.player.play(Cue::Select);
                    self.scene = Scene::MainMenu(MainMenu::new());
                }
                _ => {}
            },
            Scene::Playing(session) => match action {
                KeyAction::Steer(direction) => {
                    session.request_turn(direction);
                }
                KeyAction::Back => {
                    info!(score = session.state().score, "Game abandoned");
                    self.metrics.on_abandon();
                    self.scene = Scene::MainMenu(MainMenu::new());
                }
                _ => {}
            },
            Scene::GameOver(game_over) => match action {
                KeyAction::Steer(Direction::Up) => game_over.cursor.up(),
                KeyAction::Steer(Direction::Down) => game_over.cursor.down(),
                KeyAction::Confirm => {
                    let item = game_over.selected();
                    self.player.play(Cue::Select);
                    match item {
                        GameOverItem::Restart => self.start_game(),
                        GameOverItem::Back => self.scene = Scene::MainMenu(MainMenu::new()),
                    }
                }
                KeyAction::Restart => self.start_game(),
                KeyAction::Back => self.scene = Scene::MainMenu(MainMenu::new()),
                _ => {}
            },
        }
    }

    /// Advance the running game by `dt` and play any cues it raised
    pub fn on_frame(&mut self, dt: Duration) {
        self.metrics.update();

        let Scene::Playing(session) = &mut self.scene else {
            return;
        };
        session.frame(dt);
        for cue in session.drain_cues() {
            self.player.play(cue);
        }
        if session.is_over() {
            self.finish_game();
        }
    }

    pub fn start_game(&mut self) {
        let config = GameConfig::from_settings(&self.settings);
        self.scene = Scene::Playing(Session::new(config));
        self.metrics.on_game_start();
    }

    fn finish_game(&mut self) {
        let Scene::Playing(session) = &self.scene else {
            return;
        };
        let state = session.state();
        let outcome = match state.phase {
            Phase::Won => Outcome::Won,
            Phase::Collided(collision) => Outcome::Collided(collision),
            Phase::NotStarted | Phase::Running => return,
        };
        let score = state.score;

        let fingerprint = self.settings.fingerprint();
        let high_score = self.store.data.record_score(&fingerprint, score);
        self.store.save_or_warn();
        self.metrics.on_game_over(score, outcome == Outcome::Won);
        info!(score, high_score, %fingerprint, "Game finished");

        self.scene = Scene::GameOver(GameOver::new(outcome, score, high_score));
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.scene {
            Scene::MainMenu(menu) => self.renderer.render_main_menu(frame, menu),
            Scene::Options(menu) => self.renderer.render_options(frame, menu, &self.settings),
            Scene::Playing(session) => {
                let quads = session.quads();
                let view = GameView {
                    state: session.state(),
                    quads: &quads,
                    fruit_color: session.config().fruit_color,
                    high_score: self.store.data.high_score(&self.settings.fingerprint()),
                    metrics: &self.metrics,
                };
                self.renderer.render_game(frame, &view);
            }
            Scene::GameOver(game_over) => self.renderer.render_game_over(frame, game_over),
        }
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
