//! The cooperative frame loop.
//!
//! A reader task turns stdin lines into [`InputEvent`]s. Each frame the loop
//! takes everything queued so far, applies it in order and prints a frame.

use settlers_core::Game;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::protocol::{parse_line, InputEvent};
use crate::render;

/// Whether the loop should keep running after a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One game plus what the next frame has to show
pub struct Session {
    game: Game,
    dump_state: bool,
}

impl Session {
    pub fn new(config: &HostConfig) -> Self {
        let game = match config.seed {
            Some(seed) => Game::with_seed(config.names(), config.colors(), seed),
            None => Game::new(config.names(), config.colors()),
        };
        Self {
            game,
            dump_state: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Apply one input. Rejections are already in the game log.
    pub fn apply(&mut self, input: InputEvent) -> Flow {
        match input {
            InputEvent::Action(action) => {
                if let Err(e) = self.game.apply_action(action) {
                    debug!(?action, error = %e, "action rejected");
                }
                Flow::Continue
            }
            InputEvent::DumpState => {
                self.dump_state = true;
                Flow::Continue
            }
            InputEvent::Quit => Flow::Quit,
        }
    }

    /// Apply a batch in order, stopping at the first quit
    pub fn apply_batch(&mut self, batch: Vec<InputEvent>) -> Flow {
        for input in batch {
            if self.apply(input) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Render the next frame, consuming the pending log lines
    pub fn render_frame(&mut self) -> String {
        let log = self.game.drain_log();
        let snapshot = self.game.snapshot();
        let mut out = render::frame(&log, &snapshot);

        if std::mem::take(&mut self.dump_state) {
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    out.push_str(&json);
                    out.push('\n');
                }
                Err(e) => warn!("Failed to serialize snapshot: {}", e),
            }
        }
        out
    }
}

/// Run the host until stdin closes or a quit command arrives
pub async fn run(config: HostConfig) -> anyhow::Result<()> {
    let mut session = Session::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel::<InputEvent>();

    // Spawn task to forward stdin lines into the channel
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_line(&line) {
                    Ok(Some(input)) => {
                        if tx.send(input).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Invalid input {:?}: {}", line, e),
                },
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(InputEvent::Quit);
    });

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / config.fps as f64));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // First frame shows the opening state
    print!("{}", session.render_frame());

    loop {
        ticker.tick().await;

        let mut batch = Vec::new();
        while let Ok(input) = rx.try_recv() {
            batch.push(input);
        }
        if batch.is_empty() {
            continue;
        }

        let flow = session.apply_batch(batch);
        print!("{}", session.render_frame());
        if flow == Flow::Quit {
            break;
        }
    }

    reader.abort();
    info!("Host stopped");
    Ok(())
}
