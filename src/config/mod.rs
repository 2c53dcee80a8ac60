// Configuration module for Paddle Duel
// Handles loading controls and display settings from a TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config, load_config_from};
pub use types::{Config, DisplayConfig, KeyBindings};
