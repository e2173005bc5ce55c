use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

const HEAD: &str = "██";
const BODY: &str = "▓▓";
const FOOD: &str = "● ";
const WALL: &str = "░░";
const EMPTY: &str = "  ";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid_area = centered(chunks[1], state);
        if state.is_alive() {
            frame.render_widget(self.render_grid(state), grid_area);
        } else {
            frame.render_widget(self.render_game_over(state), grid_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let grid = state.grid;
        let mut lines = Vec::with_capacity(grid.height as usize);

        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width as usize);

            for x in 0..grid.width {
                let pos = Position::new(x, y);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        HEAD,
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if pos == state.food {
                    // Drawn over the body when the two overlap
                    Span::styled(
                        FOOD,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body_segments().contains(&pos) {
                    Span::styled(BODY, Style::default().fg(Color::Green))
                } else if grid.is_wall(pos) {
                    Span::styled(WALL, Style::default().fg(Color::Rgb(128, 0, 32)))
                } else {
                    Span::raw(EMPTY)
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let speed_style = if state.accelerating {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Velocity: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:.2}", state.velocity), speed_style),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let reason = state
            .game_over_reason()
            .map(|reason| reason.to_string())
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(reason, Style::default().fg(Color::Gray))]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Magenta)),
            Span::raw(" to accelerate | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two terminal columns per cell, centred in `area` and clipped to it
fn centered(area: Rect, state: &GameState) -> Rect {
    let columns = u16::try_from(state.grid.width).unwrap_or(u16::MAX);
    let rows = u16::try_from(state.grid.height).unwrap_or(u16::MAX);
    let width = columns.saturating_mul(2).min(area.width);
    let height = rows.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
