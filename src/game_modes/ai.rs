use std::io;
use std::time::Instant;

use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::Config;
use crate::game::{KeyTracker, Keymap, Match, MatchConfig};
use crate::ui;

use super::common::{frame_duration, limit_frame_rate};

/// Run a single-player match against the AI until the player quits.
///
/// `seed` fixes the serve sequence; `exact_release` tells the key tracker
/// whether the terminal reports key releases.
pub fn run_game_vs_ai<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    seed: Option<u64>,
    exact_release: bool,
) -> Result<(), io::Error> {
    let match_config = MatchConfig::default();
    let mut game = match seed {
        Some(seed) => Match::with_seed(match_config, seed),
        None => Match::from_entropy(match_config),
    };

    let keymap = Keymap::from_bindings(&config.keybindings);
    let mut keys = KeyTracker::new(keymap, exact_release);
    let frame = frame_duration(config.display.target_fps);

    info!(?seed, exact_release, fps = config.display.target_fps, "match started");

    let mut ticks: u64 = 0;
    loop {
        let now = Instant::now();

        let input = keys.poll()?;
        if input.quit {
            break;
        }

        let events = game.update(input.paddle);
        ticks += 1;
        if events.any() {
            debug!(tick = ticks, ?events, "tick events");
        }

        terminal.draw(|f| ui::render(f, &game, &config.display, keys.keymap()))?;

        limit_frame_rate(now, frame);
    }

    info!(
        ticks,
        player = game.player_score(),
        ai = game.ai_score(),
        "match ended"
    );
    Ok(())
}
