//! Selection state for the menu screens

use crate::game::{Collision, Setting};

/// A wrapping cursor over `len` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1) % self.len;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Options,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Options, MenuItem::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Options => "Options",
            MenuItem::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainMenu {
    pub cursor: Selection,
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            cursor: Selection::new(MenuItem::ALL.len()),
        }
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.cursor.index()]
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// A row of the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsRow {
    Setting(Setting),
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsMenu {
    pub cursor: Selection,
}

impl OptionsMenu {
    pub fn new() -> Self {
        Self {
            cursor: Selection::new(Setting::ALL.len() + 1),
        }
    }

    pub fn rows() -> impl Iterator<Item = OptionsRow> {
        Setting::ALL
            .into_iter()
            .map(OptionsRow::Setting)
            .chain(std::iter::once(OptionsRow::Save))
    }

    pub fn selected(&self) -> OptionsRow {
        Setting::ALL
            .get(self.cursor.index())
            .map(|&setting| OptionsRow::Setting(setting))
            .unwrap_or(OptionsRow::Save)
    }
}

impl Default for OptionsMenu {
    fn default() -> Self {
        Self::new()
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Collided(Collision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverItem {
    Restart,
    Back,
}

impl GameOverItem {
    pub const ALL: [GameOverItem; 2] = [GameOverItem::Restart, GameOverItem::Back];

    pub fn label(&self) -> &'static str {
        match self {
            GameOverItem::Restart => "Restart",
            GameOverItem::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub outcome: Outcome,
    pub score: u32,
    pub high_score: u32,
    pub cursor: Selection,
}

impl GameOver {
    pub fn new(outcome: Outcome, score: u32, high_score: u32) -> Self {
        Self {
            outcome,
            score,
            high_score,
            cursor: Selection::new(GameOverItem::ALL.len()),
        }
    }

    pub fn selected(&self) -> GameOverItem {
        GameOverItem::ALL[self.cursor.index()]
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "You Won",
            Outcome::Collided(_) => "Game Over",
        }
    }
}
