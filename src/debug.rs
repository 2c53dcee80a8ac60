// Debug logging for Paddle Duel
// The terminal is owned by the game, so log output goes to a file instead

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::Level;

pub const LOG_FILE_PATH: &str = "/tmp/paddle-duel-debug.log";

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: Returns immediately, no subscriber and no file
/// - If enabled=true: Truncates the log file and routes `tracing` events at
///   DEBUG and above into it, without ANSI colors
pub fn init(enabled: bool) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    tracing::info!("To monitor: tail -f {}", LOG_FILE_PATH);
    Ok(())
}
