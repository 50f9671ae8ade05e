use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Phase, Rgb, Settings};
use crate::metrics::GameMetrics;
use crate::modes::menu::{GameOver, GameOverItem, MainMenu, MenuItem, OptionsMenu, OptionsRow, Outcome};

use super::board::{BoardWidget, board_extent};
use super::interpolate::Quad;

const STATUS_GREEN: Color = Color::Rgb(74, 117, 44);

/// Everything needed to draw one frame of a running game
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub quads: &'a [Quad],
    pub fruit_color: Rgb,
    pub high_score: u32,
    pub metrics: &'a GameMetrics,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_game(&self, frame: &mut Frame, view: &GameView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(view);
        frame.render_widget(stats, chunks[0]);

        let state = view.state;
        let (columns, rows) = board_extent(state.board);
        let frame_area = centered(chunks[1], columns + 2, rows + 2);
        if frame_area.width < columns + 2 || frame_area.height < rows + 2 {
            frame.render_widget(self.render_too_small(columns + 2, rows + 2), chunks[1]);
        } else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake ");
            let inner = block.inner(frame_area);
            frame.render_widget(block, frame_area);
            frame.render_widget(
                BoardWidget::new(state.board, view.quads, &state.fruits, view.fruit_color),
                inner,
            );
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    pub fn render_main_menu(&self, frame: &mut Frame, menu: &MainMenu) {
        let mut lines = title_lines("Main Menu");
        for item in MenuItem::ALL {
            lines.push(choice_line(item.label(), item == menu.selected()));
            lines.push(Line::from(""));
        }
        lines.push(hint_line("↑↓ to choose, Enter to select, Q to quit"));

        frame.render_widget(menu_paragraph(lines), frame.area());
    }

    pub fn render_options(&self, frame: &mut Frame, menu: &OptionsMenu, settings: &Settings) {
        let mut lines = title_lines("Options");
        let selected = menu.selected();

        for row in OptionsMenu::rows() {
            let is_selected = row == selected;
            match row {
                OptionsRow::Setting(setting) => {
                    lines.push(Line::from(Span::styled(
                        setting.label(),
                        Style::default().fg(Color::Gray),
                    )));
                    let value = format!("◀ {:^13} ▶", settings.value_label(setting));
                    lines.push(choice_line(&value, is_selected));
                }
                OptionsRow::Save => {
                    lines.push(Line::from(""));
                    lines.push(choice_line("Save", is_selected));
                }
            }
        }
        lines.push(Line::from(""));
        lines.push(hint_line("←→ or Enter to change, Esc to go back"));

        frame.render_widget(menu_paragraph(lines), frame.area());
    }

    pub fn render_game_over(&self, frame: &mut Frame, game_over: &GameOver) {
        let title_color = match game_over.outcome {
            Outcome::Won => Color::Green,
            Outcome::Collided(_) => Color::Red,
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                game_over.title(),
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )]),
        ];
        if let Outcome::Collided(collision) = game_over.outcome {
            lines.push(Line::from(Span::styled(
                format!("Game over by {collision}"),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game_over.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game_over.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        for item in GameOverItem::ALL {
            lines.push(choice_line(item.label(), item == game_over.selected()));
        }
        lines.push(Line::from(""));
        lines.push(hint_line("Enter to select, R to restart, Esc for menu"));

        let area = centered(frame.area(), 48, lines.len() as u16 + 2);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(title_color)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_stats(&self, view: &GameView) -> Paragraph<'_> {
        let status = match view.state.phase {
            Phase::NotStarted => "Press an arrow key to start",
            Phase::Running => "",
            Phase::Collided(_) => "Ouch!",
            Phase::Won => "Board cleared!",
        };
        let mut text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.high_score.max(view.state.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
        ])];
        text.push(Line::from(Span::styled(status, Style::default().fg(Color::Cyan))));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(STATUS_GREEN)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" for menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_too_small(&self, columns: u16, rows: u16) -> Paragraph<'_> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Board needs {columns}x{rows} cells")),
        ])
        .alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn title_lines(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ]
}

fn choice_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {label} <"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::White)))
    }
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
}

fn menu_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(STATUS_GREEN))
            .title(" Snake "),
    )
}
