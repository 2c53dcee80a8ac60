// Reactive ball tracker driving the right paddle

use crate::game::{Ball, MatchConfig, Paddle};

/// Paddle `y` that would line the paddle's center up with the ball's center
pub fn target_y(ball: &Ball, config: &MatchConfig) -> f32 {
    ball.rect.center_y() - config.paddle_height / 2.0
}

/// Step the AI paddle toward the ball by at most `ai_step`.
///
/// There is no lookahead and no snapping: when the paddle is within one step
/// of the target it may overshoot and swing back on the next tick.
pub fn track_ball(paddle: &mut Paddle, ball: &Ball, config: &MatchConfig) {
    let target = target_y(ball, config);

    if paddle.rect.y < target {
        paddle.rect.y += config.ai_step;
    } else if paddle.rect.y > target {
        paddle.rect.y -= config.ai_step;
    }

    paddle.clamp_to_field(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_centered_at(cy: f32, config: &MatchConfig) -> Ball {
        let mut ball = Ball::new(config);
        ball.rect.set_center(400.0, cy);
        ball
    }

    #[test]
    fn test_climbs_to_low_ball() {
        let config = MatchConfig::default();
        let ball = ball_centered_at(500.0, &config);
        let mut paddle = Paddle::new(config.ai_paddle_x(), &config);
        paddle.rect.y = 0.0;

        let mut previous = paddle.y();
        for _ in 0..75 {
            track_ball(&mut paddle, &ball, &config);
            assert_eq!(paddle.y() - previous, 6.0);
            previous = paddle.y();
        }
        assert_eq!(paddle.y(), 450.0);

        // On target: stays put
        track_ball(&mut paddle, &ball, &config);
        assert_eq!(paddle.y(), 450.0);
    }

    #[test]
    fn test_stops_at_bottom_wall() {
        let config = MatchConfig::default();
        let ball = ball_centered_at(594.0, &config);
        let mut paddle = Paddle::new(config.ai_paddle_x(), &config);
        paddle.rect.y = 0.0;

        for _ in 0..200 {
            track_ball(&mut paddle, &ball, &config);
            assert!(paddle.y() <= config.paddle_max_y());
        }
        assert_eq!(paddle.y(), 500.0);
    }

    #[test]
    fn test_moves_up_and_clamps_at_top() {
        let config = MatchConfig::default();
        let ball = ball_centered_at(6.0, &config);
        let mut paddle = Paddle::new(config.ai_paddle_x(), &config);

        track_ball(&mut paddle, &ball, &config);
        assert_eq!(paddle.y(), 244.0);

        for _ in 0..100 {
            track_ball(&mut paddle, &ball, &config);
            assert!(paddle.y() >= 0.0);
        }
        assert_eq!(paddle.y(), 0.0);
    }

    #[test]
    fn test_oscillates_near_target() {
        let config = MatchConfig::default();
        // Target 253 is not a multiple of the step away from 250
        let ball = ball_centered_at(303.0, &config);
        let mut paddle = Paddle::new(config.ai_paddle_x(), &config);

        track_ball(&mut paddle, &ball, &config);
        assert_eq!(paddle.y(), 256.0);
        track_ball(&mut paddle, &ball, &config);
        assert_eq!(paddle.y(), 250.0);
        track_ball(&mut paddle, &ball, &config);
        assert_eq!(paddle.y(), 256.0);
    }
}
