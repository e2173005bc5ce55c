use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::{Stream, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval, timeout};
use tracing::{debug, error, info};

use crate::game::{CollisionType, GameConfig, GameEngine, GameState, Status};
use crate::input::{AccelerationMode, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Fixed delay between frames
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// How long the game-over panel stays up without a key press
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player quit (Q, Esc, Ctrl+C)
    Quit,
    GameOver(CollisionType),
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_delay: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, frame_delay: Duration) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::default(),
            frame_delay,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<SessionEnd> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        // Key release events only arrive with the enhanced keyboard protocol
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release reporting")?;
            self.input_handler = InputHandler::new(AccelerationMode::Hold);
        } else {
            self.input_handler = InputHandler::new(AccelerationMode::Toggle);
        }
        info!(mode = ?self.input_handler.mode(), "acceleration key configured");

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        if let Err(err) = self.cleanup_terminal(&mut terminal, enhanced) {
            error!(?err, "failed to restore terminal");
            if result.is_ok() {
                return Err(err);
            }
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<SessionEnd> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.frame_delay);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Input is drained between frames on this task, so it always
                // lands before the next simulation step
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f64();
                    last_frame = now;

                    let game_over = self.advance(dt);

                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;

                    if let Some(reason) = game_over {
                        let dismissed = wait_for_key(&mut event_stream, GAME_OVER_HOLD).await?;
                        debug!(dismissed, "game-over panel closed");
                        return Ok(SessionEnd::GameOver(reason));
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(steps = self.state.steps, "player quit");
                return Ok(SessionEnd::Quit);
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => {
                    self.engine.apply(&mut self.state, action);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {
                    debug!(code = ?key.code, "ignored key");
                }
            }
        }
    }

    /// One simulation step; returns the collision once the game has ended
    fn advance(&mut self, dt: f64) -> Option<CollisionType> {
        match self.engine.step(&mut self.state, dt).status {
            Status::Running => None,
            Status::GameOver { reason } => Some(reason),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        enhanced: bool,
    ) -> Result<()> {
        if enhanced {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to disable key release reporting")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for a key press or until `limit` runs out. Returns true when a key
/// ended the wait.
async fn wait_for_key<S>(events: &mut S, limit: Duration) -> Result<bool>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let pressed = async {
        while let Some(event) = events.next().await {
            if let Event::Key(key) = event.context("Failed to read terminal event")? {
                if key.kind != KeyEventKind::Release {
                    return Ok(true);
                }
            }
        }
        Ok::<_, anyhow::Error>(false)
    };

    match timeout(limit, pressed).await {
        Ok(result) => result,
        Err(_) => Ok(false),
    }
}
