//! Terminal Bloxorz runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `bloxorz-term`.
//! Logging goes to `BLOXORZ_LOG_PATH` when set; the terminal itself is owned
//! by the game.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use bloxorz::core::{GameSnapshot, LevelController};
use bloxorz::input::{handle_key_event, should_quit};
use bloxorz::term::{FrameBuffer, GameView, Screen, Viewport};
use bloxorz::types::TICK_MS;
use bloxorz::{Args, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::from_env().with_args(Args::parse());
    config.init_logging()?;

    let catalog = config.load_catalog()?;
    let game = LevelController::with_timing(catalog, config.start_level, config.timing())?;

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, game);

    // Always try to restore terminal state.
    if let Err(err) = screen.exit() {
        log::warn!("failed to restore terminal: {}", err);
    }
    if let Err(err) = &result {
        log::error!("game loop failed: {:#}", err);
    }
    result
}

fn run(screen: &mut Screen, mut game: LevelController) -> Result<()> {
    log::info!(
        "{} levels, starting at {}",
        game.catalog().len(),
        game.current_level_index() + 1
    );

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = screen.size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut frame);
        screen.present(&mut frame)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        log::info!(
                            "quit on level {} after {} moves",
                            game.current_level_index() + 1,
                            game.move_count()
                        );
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if !game.apply_action(action)? {
                            log::trace!("{} ignored", action.as_str());
                        }
                    }
                }
                Event::Resize(..) => screen.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}
