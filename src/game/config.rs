use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::state::Board;

/// Pixel size of the playing field, cells are carved out of it
pub const BOARD_PIXEL_WIDTH: u32 = 288;
pub const BOARD_PIXEL_HEIGHT: u32 = 432;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Multiply each channel by `factor`, truncating toward zero
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor) as u8;
        Rgb(scale(self.0), scale(self.1), scale(self.2))
    }
}

/// Step to the option after `current`, wrapping around
fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|&v| v == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

/// How boundaries and self-contact are handled
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum GameMode {
    /// Walls kill, self-contact kills
    #[default]
    Regular,
    /// Edges wrap around, self-contact kills
    Infinite,
    /// Edges wrap around, self-contact is ignored
    Peaceful,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Regular, GameMode::Infinite, GameMode::Peaceful];

    pub fn wraps(&self) -> bool {
        matches!(self, GameMode::Infinite | GameMode::Peaceful)
    }

    pub fn checks_self_collision(&self) -> bool {
        !matches!(self, GameMode::Peaceful)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Regular => "Regular",
            GameMode::Infinite => "Infinite",
            GameMode::Peaceful => "Peaceful",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum BoardSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl BoardSize {
    pub const ALL: [BoardSize; 4] = [
        BoardSize::Small,
        BoardSize::Medium,
        BoardSize::Large,
        BoardSize::ExtraLarge,
    ];

    /// Pixel edge of one cell
    pub fn cell_size(&self) -> u32 {
        match self {
            BoardSize::Small => 36,
            BoardSize::Medium => 24,
            BoardSize::Large => 18,
            BoardSize::ExtraLarge => 12,
        }
    }

    pub fn board(&self) -> Board {
        Board::from_pixels(BOARD_PIXEL_WIDTH, BOARD_PIXEL_HEIGHT, self.cell_size())
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoardSize::Small => "Small",
            BoardSize::Medium => "Medium",
            BoardSize::Large => "Large",
            BoardSize::ExtraLarge => "Extra Large",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum FruitCount {
    #[default]
    One,
    Two,
    Three,
}

impl FruitCount {
    pub const ALL: [FruitCount; 3] = [FruitCount::One, FruitCount::Two, FruitCount::Three];

    pub fn count(&self) -> usize {
        match self {
            FruitCount::One => 1,
            FruitCount::Two => 2,
            FruitCount::Three => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FruitCount::One => "One",
            FruitCount::Two => "Two",
            FruitCount::Three => "Three",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum SnakeSpeed {
    Slow,
    #[default]
    Moderate,
    Fast,
    VeryFast,
}

impl SnakeSpeed {
    pub const ALL: [SnakeSpeed; 4] = [
        SnakeSpeed::Slow,
        SnakeSpeed::Moderate,
        SnakeSpeed::Fast,
        SnakeSpeed::VeryFast,
    ];

    /// Cells moved per second
    pub fn ticks_per_second(&self) -> u32 {
        match self {
            SnakeSpeed::Slow => 6,
            SnakeSpeed::Moderate => 9,
            SnakeSpeed::Fast => 12,
            SnakeSpeed::VeryFast => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SnakeSpeed::Slow => "Slow",
            SnakeSpeed::Moderate => "Moderate",
            SnakeSpeed::Fast => "Fast",
            SnakeSpeed::VeryFast => "Very Fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnakeColor {
    #[default]
    Red,
    Blue,
    Orange,
    Pink,
    White,
    Black,
}

impl SnakeColor {
    pub const ALL: [SnakeColor; 6] = [
        SnakeColor::Red,
        SnakeColor::Blue,
        SnakeColor::Orange,
        SnakeColor::Pink,
        SnakeColor::White,
        SnakeColor::Black,
    ];

    pub fn rgb(&self) -> Rgb {
        match self {
            SnakeColor::Red => Rgb(255, 0, 0),
            SnakeColor::Blue => Rgb(0, 0, 255),
            SnakeColor::Orange => Rgb(255, 180, 0),
            SnakeColor::Pink => Rgb(178, 0, 211),
            SnakeColor::White => Rgb(217, 220, 238),
            SnakeColor::Black => Rgb(50, 50, 50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SnakeColor::Red => "Red",
            SnakeColor::Blue => "Blue",
            SnakeColor::Orange => "Orange",
            SnakeColor::Pink => "Pink",
            SnakeColor::White => "White",
            SnakeColor::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FruitColor {
    Red,
    Blue,
    Orange,
    #[default]
    Purple,
}

impl FruitColor {
    pub const ALL: [FruitColor; 4] = [
        FruitColor::Red,
        FruitColor::Blue,
        FruitColor::Orange,
        FruitColor::Purple,
    ];

    pub fn rgb(&self) -> Rgb {
        match self {
            FruitColor::Red => Rgb(212, 76, 77),
            FruitColor::Blue => Rgb(140, 156, 200),
            FruitColor::Orange => Rgb(208, 125, 0),
            FruitColor::Purple => Rgb(184, 130, 238),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FruitColor::Red => "Red",
            FruitColor::Blue => "Blue",
            FruitColor::Orange => "Orange",
            FruitColor::Purple => "Purple",
        }
    }
}

/// One row of the options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    BoardSize,
    SnakeColor,
    FruitColor,
    FruitCount,
    SnakeSpeed,
    GameMode,
    Sfx,
}

impl Setting {
    pub const ALL: [Setting; 7] = [
        Setting::BoardSize,
        Setting::SnakeColor,
        Setting::FruitColor,
        Setting::FruitCount,
        Setting::SnakeSpeed,
        Setting::GameMode,
        Setting::Sfx,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Setting::BoardSize => "Board Size",
            Setting::SnakeColor => "Snake Color",
            Setting::FruitColor => "Fruit Color",
            Setting::FruitCount => "Number of Fruits",
            Setting::SnakeSpeed => "Snake Speed",
            Setting::GameMode => "Game Mode",
            Setting::Sfx => "SFX Enabled",
        }
    }
}

/// Player-facing options, persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board_size: BoardSize,
    pub snake_color: SnakeColor,
    pub fruit_color: FruitColor,
    pub fruit_count: FruitCount,
    pub snake_speed: SnakeSpeed,
    pub game_mode: GameMode,
    pub sfx_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            snake_color: SnakeColor::default(),
            fruit_color: FruitColor::default(),
            fruit_count: FruitCount::default(),
            snake_speed: SnakeSpeed::default(),
            game_mode: GameMode::default(),
            sfx_enabled: true,
        }
    }
}

impl Settings {
    /// Advance one setting to its next option
    pub fn cycle(&mut self, setting: Setting) {
        match setting {
            Setting::BoardSize => self.board_size = cycle(&BoardSize::ALL, self.board_size),
            Setting::SnakeColor => self.snake_color = cycle(&SnakeColor::ALL, self.snake_color),
            Setting::FruitColor => self.fruit_color = cycle(&FruitColor::ALL, self.fruit_color),
            Setting::FruitCount => self.fruit_count = cycle(&FruitCount::ALL, self.fruit_count),
            Setting::SnakeSpeed => self.snake_speed = cycle(&SnakeSpeed::ALL, self.snake_speed),
            Setting::GameMode => self.game_mode = cycle(&GameMode::ALL, self.game_mode),
            Setting::Sfx => self.sfx_enabled = !self.sfx_enabled,
        }
    }

    /// Display text of the selected option
    pub fn value_label(&self, setting: Setting) -> &'static str {
        match setting {
            Setting::BoardSize => self.board_size.label(),
            Setting::SnakeColor => self.snake_color.label(),
            Setting::FruitColor => self.fruit_color.label(),
            Setting::FruitCount => self.fruit_count.label(),
            Setting::SnakeSpeed => self.snake_speed.label(),
            Setting::GameMode => self.game_mode.label(),
            Setting::Sfx => {
                if self.sfx_enabled {
                    "Yes"
                } else {
                    "No"
                }
            }
        }
    }

    /// High-score bucket for this combination of gameplay options
    pub fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.board_size.label(),
            self.fruit_count.label(),
            self.snake_speed.label(),
            self.game_mode.label()
        )
    }
}

/// Configuration for one game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Grid dimensions in cells
    pub board: Board,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Number of fruits kept on the board
    pub fruit_count: usize,
    /// Cells moved per second
    pub speed: u32,
    pub mode: GameMode,
    pub snake_color: Rgb,
    pub fruit_color: Rgb,
    pub sfx_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board: Board::new(width as i32, height as i32),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            board: settings.board_size.board(),
            initial_snake_length: 4,
            fruit_count: settings.fruit_count.count(),
            speed: settings.snake_speed.ticks_per_second(),
            mode: settings.game_mode,
            snake_color: settings.snake_color.rgb(),
            fruit_color: settings.fruit_color.rgb(),
            sfx_enabled: settings.sfx_enabled,
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fruit_count(mut self, fruit_count: usize) -> Self {
        self.fruit_count = fruit_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board, Board::new(12, 18));
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.fruit_count, 1);
        assert_eq!(config.speed, 9);
        assert_eq!(config.mode, GameMode::Regular);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 7);
        assert_eq!(config.board.width, 15);
        assert_eq!(config.board.height, 7);
    }

    #[test]
    fn test_board_sizes_divide_pixels() {
        assert_eq!(BoardSize::Small.board(), Board::new(8, 12));
        assert_eq!(BoardSize::Medium.board(), Board::new(12, 18));
        assert_eq!(BoardSize::Large.board(), Board::new(16, 24));
        assert_eq!(BoardSize::ExtraLarge.board(), Board::new(24, 36));
    }

    #[test]
    fn test_mode_policies() {
        assert!(!GameMode::Regular.wraps());
        assert!(GameMode::Infinite.wraps());
        assert!(GameMode::Peaceful.wraps());

        assert!(GameMode::Regular.checks_self_collision());
        assert!(GameMode::Infinite.checks_self_collision());
        assert!(!GameMode::Peaceful.checks_self_collision());
    }

    #[test]
    fn test_cycle_wraps_around() {
        let mut settings = Settings::default();
        settings.cycle(Setting::FruitCount);
        assert_eq!(settings.fruit_count, FruitCount::Two);
        settings.cycle(Setting::FruitCount);
        settings.cycle(Setting::FruitCount);
        assert_eq!(settings.fruit_count, FruitCount::One);

        settings.cycle(Setting::Sfx);
        assert!(!settings.sfx_enabled);
        assert_eq!(settings.value_label(Setting::Sfx), "No");
    }

    #[test]
    fn test_fingerprint_ignores_cosmetics() {
        let mut settings = Settings::default();
        let base = settings.fingerprint();
        assert_eq!(base, "Medium|One|Moderate|Regular");

        settings.cycle(Setting::SnakeColor);
        settings.cycle(Setting::Sfx);
        assert_eq!(settings.fingerprint(), base);

        settings.cycle(Setting::GameMode);
        assert_eq!(settings.fingerprint(), "Medium|One|Moderate|Infinite");
    }

    #[test]
    fn test_config_from_settings() {
        let settings = Settings {
            board_size: BoardSize::Small,
            fruit_count: FruitCount::Three,
            snake_speed: SnakeSpeed::VeryFast,
            game_mode: GameMode::Peaceful,
            ..Settings::default()
        };
        let config = GameConfig::from_settings(&settings);
        assert_eq!(config.board, Board::new(8, 12));
        assert_eq!(config.fruit_count, 3);
        assert_eq!(config.speed, 15);
        assert_eq!(config.mode, GameMode::Peaceful);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"game_mode":"Infinite"}"#).unwrap();
        assert_eq!(settings.game_mode, GameMode::Infinite);
        assert_eq!(settings.board_size, BoardSize::Medium);
        assert!(settings.sfx_enabled);
    }
}
