use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

use crate::game::{Command, GameSession};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::settings::{Settings, Theme};

/// Interactive terminal game
pub struct PlayMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    settings: Settings,
    settings_path: PathBuf,
    should_quit: bool,
    /// Set when the tick clock has to restart from a full period
    restart_clock: bool,
}

impl PlayMode {
    pub fn new(session: GameSession, settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            settings,
            settings_path,
            should_quit: false,
            restart_clock: false,
        }
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
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.session.config().tick_period_ms);
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let theme = self.settings.theme;
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics, theme);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync_clock(&mut tick_timer);

            if self.should_quit {
                break;
            }
        }

        info!(
            high_score = self.metrics.high_score,
            games = self.metrics.games_played,
            "leaving game"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::GameCommand(Command::Turn(direction)) => {
                self.session.set_direction(direction);
                // the first key press of a run also starts it
                self.start();
            }
            KeyAction::GameCommand(command) => {
                if self.session.apply(command) && self.session.is_running() {
                    self.restart_clock = true;
                }
            }
            KeyAction::CycleTheme => self.cycle_theme()?,
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        self.collect_events();
        Ok(())
    }

    fn start(&mut self) {
        if self.session.start() {
            self.restart_clock = true;
        }
    }

    fn update_game(&mut self) -> Result<()> {
        self.session.tick().context("Failed to advance the game")?;
        self.collect_events();
        Ok(())
    }

    fn collect_events(&mut self) {
        for event in self.session.drain_events() {
            self.metrics.record(&event);
        }
    }

    /// Restart the tick clock so a fresh start waits one full period
    fn sync_clock(&mut self, tick_timer: &mut Interval) {
        if std::mem::take(&mut self.restart_clock) {
            tick_timer.reset();
        }
    }

    fn cycle_theme(&mut self) -> Result<()> {
        self.settings.theme = self.settings.theme.next();
        info!(theme = self.settings.theme.name(), "theme changed");

        self.settings
            .save(&self.settings_path)
            .context("Failed to persist theme")
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
