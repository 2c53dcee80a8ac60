// Fixed gameplay constants for a match

/// Immutable tuning for one match.
///
/// Every value is expressed in playfield pixels and per-tick units; the
/// simulation advances exactly once per tick, so speeds are pixels per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its side wall
    pub paddle_margin: f32,
    pub player_step: f32,
    /// Capped AI movement per tick (kept below `player_step` so the AI is beatable)
    pub ai_step: f32,

    pub ball_size: f32,
    pub ball_base_speed: f32,
    /// Horizontal speed added on every paddle hit
    pub speed_increment: f32,
    pub max_vy: f32,
    pub spin_factor: f32,
    /// Serve draws vy uniformly from [-serve_vy_range, serve_vy_range]
    pub serve_vy_range: f32,
    /// Minimum |vy| right after a serve
    pub serve_vy_floor: f32,

    pub instruction_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            paddle_width: 12.0,
            paddle_height: 100.0,
            paddle_margin: 30.0,
            player_step: 7.0,
            ai_step: 6.0,
            ball_size: 12.0,
            ball_base_speed: 6.0,
            speed_increment: 0.3,
            max_vy: 7.5,
            spin_factor: 2.5,
            serve_vy_range: 3.5,
            serve_vy_floor: 1.0,
            instruction_ticks: 180,
        }
    }
}

impl MatchConfig {
    /// Largest legal paddle `y` (top edge)
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    pub fn player_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    pub fn ai_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_margin - self.paddle_width
    }

    pub fn center(&self) -> (f32, f32) {
        (self.field_width / 2.0, self.field_height / 2.0)
    }
}
