// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("paddle-duel");
    path.push("config.toml");
    path
}

/// Load configuration from the default location, creating it if missing
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, or write and return the defaults if the
/// file does not exist. A file that fails to parse is reported and replaced
/// by defaults in memory (the file itself is left untouched).
pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    if !path.exists() {
        create_default_config(path)?;
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)?;
    match parse_config(&contents) {
        Ok(config) => {
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).map_err(io::Error::other)?;

    let commented_toml = format!(
        "# Paddle Duel Configuration File\n\
         # Edit this file to customize controls and colors\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\"\n\
         # Esc and Ctrl-C always quit\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!(path = %path.display(), "created default config file");
    Ok(())
}
