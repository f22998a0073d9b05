use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::palette::Palette;
use crate::game::{GameSession, ObstacleKind, SessionPhase};
use crate::metrics::GameMetrics;
use crate::settings::Theme;

/// What occupies a cell, for drawing only
///
/// Body and pickup cells carry their display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CellView {
    Empty,
    Head,
    Body(f32),
    Pickup(f32),
    Obstacle(ObstacleKind),
}

fn body_glyph(factor: f32) -> &'static str {
    if factor > 1.0 {
        "▣ "
    } else {
        "□ "
    }
}

fn pickup_glyph(scale: f32) -> &'static str {
    if scale < 0.75 {
        "∘ "
    } else if scale < 0.9 {
        "o "
    } else {
        "O "
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &GameSession,
        metrics: &GameMetrics,
        theme: Theme,
    ) {
        let palette = Palette::for_theme(theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(session, metrics, theme);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.phase() == SessionPhase::Dead {
            let game_over = self.render_game_over(metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, session, &palette);
            frame.render_widget(grid, game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(session.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn cell_views(session: &GameSession) -> Vec<CellView> {
        let grid = session.grid();
        let mut cells = vec![CellView::Empty; grid.capacity()];

        for obstacle in session.obstacles() {
            cells[obstacle.cell] = CellView::Obstacle(obstacle.kind);
        }
        for pickup in session.pickups() {
            cells[pickup.cell] = CellView::Pickup(pickup.scale());
        }

        let snake = session.snake();
        for (segment, &cell) in snake.body().iter().zip(snake.occupancy()).skip(1) {
            cells[cell] = CellView::Body(segment.scale.factor());
        }
        cells[snake.head_index()] = CellView::Head;

        cells
    }

    fn render_grid(&self, _area: Rect, session: &GameSession, palette: &Palette) -> Paragraph<'_> {
        let grid = session.grid();
        let cells = Self::cell_views(session);
        let mut lines = Vec::with_capacity(grid.height);

        for row in cells.chunks(grid.width) {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    CellView::Head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(palette.mouth)
                            .add_modifier(Modifier::BOLD),
                    ),
                    CellView::Body(factor) => {
                        let style = Style::default().fg(palette.snake);
                        let style = if *factor > 1.0 {
                            style.add_modifier(Modifier::BOLD)
                        } else {
                            style
                        };
                        Span::styled(body_glyph(*factor), style)
                    }
                    CellView::Pickup(scale) => {
                        Span::styled(
                            pickup_glyph(*scale),
                            Style::default()
                                .fg(palette.candy)
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                    CellView::Obstacle(ObstacleKind::Rock) => {
                        Span::styled("▲ ", Style::default().fg(palette.rock))
                    }
                    CellView::Obstacle(ObstacleKind::Tree) => {
                        Span::styled("♣ ", Style::default().fg(palette.tree))
                    }
                    CellView::Empty => Span::styled(". ", Style::default().fg(palette.ground)),
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(palette.border))
                    .title(" Snake Garden "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        session: &GameSession,
        metrics: &GameMetrics,
        theme: Theme,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.snake().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Theme: ", Style::default().fg(Color::Yellow)),
            Span::styled(theme.name(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.last_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" or a direction to play again, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: SessionPhase) -> Paragraph<'_> {
        let toggle = if phase == SessionPhase::Running {
            " to pause | "
        } else {
            " to start | "
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(toggle),
            Span::styled("T", Style::default().fg(Color::Cyan)),
            Span::raw(" theme | "),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Pickup, SegmentScale};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_views_mark_every_item() {
        let session = GameSession::with_seed(GameConfig::default(), 8).unwrap();
        let cells = Renderer::cell_views(&session);

        assert_eq!(cells[210], CellView::Head);
        assert_eq!(cells[209], CellView::Body(1.0));
        let pickup = session.pickups()[0];
        assert_eq!(cells[pickup.cell], CellView::Pickup(pickup.scale()));
        let obstacles = cells
            .iter()
            .filter(|c| matches!(c, CellView::Obstacle(_)))
            .count();
        assert_eq!(obstacles, 20);
    }

    #[test]
    fn test_pickup_glyph_grows_with_points() {
        let glyphs: Vec<_> = (1..=3)
            .map(|points| pickup_glyph(Pickup::new(0, points).scale()))
            .collect();
        assert_eq!(glyphs, vec!["∘ ", "o ", "O "]);
    }

    #[test]
    fn test_swallowed_segment_drawn_bulging() {
        assert_eq!(body_glyph(SegmentScale::Normal.factor()), "□ ");
        assert_eq!(body_glyph(SegmentScale::Swallowed.factor()), "▣ ");
    }

    #[test]
    fn test_render_shows_score_and_board() {
        let session = GameSession::with_seed(GameConfig::default(), 8).unwrap();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal
            .draw(|frame| renderer.render(frame, &session, &metrics, Theme::Green))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score"));
        assert!(text.contains("Snake Garden"));
        assert!(text.contains("■"));
    }
}
