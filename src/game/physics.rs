use super::params::MatchConfig;
use super::state::{Ball, Paddle, Side};

/// What happened to the ball during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub wall_bounce: bool,
    /// Paddle that returned the ball, if any
    pub paddle_hit: Option<Side>,
    /// Side that won the point, if any
    pub scored: Option<Side>,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.wall_bounce || self.paddle_hit.is_some() || self.scored.is_some()
    }
}

/// Move the ball by one tick of velocity
pub fn advance(ball: &mut Ball) {
    ball.rect.x += ball.vx;
    ball.rect.y += ball.vy;
}

/// Bounce off the top or bottom wall.
///
/// Touching a wall exactly counts as a hit. Returns true on a bounce.
pub fn resolve_wall_collision(ball: &mut Ball, config: &MatchConfig) -> bool {
    if ball.rect.top() <= 0.0 {
        ball.rect.set_top(0.0);
        ball.vy = -ball.vy;
        true
    } else if ball.rect.bottom() >= config.field_height {
        ball.rect.set_bottom(config.field_height);
        ball.vy = -ball.vy;
        true
    } else {
        false
    }
}

/// Return the ball off `paddle` if it is travelling toward that paddle and
/// the two overlap.
///
/// The horizontal speed is reflected and grows by the configured increment;
/// the vertical speed picks up spin proportional to how far from the paddle
/// center the ball struck, then is capped.
pub fn resolve_paddle_collision(
    ball: &mut Ball,
    paddle: &Paddle,
    side: Side,
    config: &MatchConfig,
) -> bool {
    let approaching = match side {
        Side::Left => ball.vx < 0.0,
        Side::Right => ball.vx > 0.0,
    };
    if !approaching || !ball.rect.overlaps(&paddle.rect) {
        return false;
    }

    let offset = (ball.rect.center_y() - paddle.rect.center_y()) / (config.paddle_height / 2.0);

    ball.vx = match side {
        Side::Left => -ball.vx + config.speed_increment,
        Side::Right => -ball.vx - config.speed_increment,
    };
    ball.vy = (ball.vy + offset * config.spin_factor).clamp(-config.max_vy, config.max_vy);

    true
}

/// Check both paddles, player first. At most one return per tick.
pub fn resolve_paddle_collisions(
    ball: &mut Ball,
    player: &Paddle,
    ai: &Paddle,
    config: &MatchConfig,
) -> Option<Side> {
    if resolve_paddle_collision(ball, player, Side::Left, config) {
        Some(Side::Left)
    } else if resolve_paddle_collision(ball, ai, Side::Right, config) {
        Some(Side::Right)
    } else {
        None
    }
}

/// Side that wins the point once the ball has fully left the field
pub fn check_scoring(ball: &Ball, config: &MatchConfig) -> Option<Side> {
    if ball.rect.right() < 0.0 {
        Some(Side::Right)
    } else if ball.rect.left() > config.field_width {
        Some(Side::Left)
    } else {
        None
    }
}
