// Paddle Duel configuration types
// Gameplay physics is fixed; only controls and presentation are configurable

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left (player) paddle controls
    pub paddle_up: String,
    pub paddle_down: String,

    // Esc and Ctrl-C always quit as well
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddle_up: "W".to_string(),
            paddle_down: "S".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (the simulation advances once per frame)
    pub target_fps: u64,

    // Colors as RGB values 0-255
    pub paddle_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub score_color: [u8; 3],
    pub center_line_color: [u8; 3],
    pub instruction_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            paddle_color: [255, 255, 255],      // White
            ball_color: [255, 255, 255],        // White
            score_color: [255, 255, 255],       // White
            center_line_color: [200, 200, 200], // Grey
            instruction_color: [200, 200, 200], // Grey
        }
    }
}
