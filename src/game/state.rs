use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::geometry::Rect;
use super::input::{move_player_paddle, PaddleInput};
use super::params::MatchConfig;
use super::physics::{self, PhysicsEvents};
use crate::ai;

/// Which half of the field an entity belongs to.
/// The human plays `Left`, the AI plays `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Horizontal direction of the next serve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeBias {
    /// Coin flip
    Random,
    /// Serve travels toward the left edge (vx < 0)
    Left,
    /// Serve travels toward the right edge (vx > 0)
    Right,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    /// A motionless ball in the middle of the field
    pub fn new(config: &MatchConfig) -> Self {
        let (cx, cy) = config.center();
        let mut rect = Rect::new(0.0, 0.0, config.ball_size, config.ball_size);
        rect.set_center(cx, cy);
        Self {
            rect,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Recenter the ball and launch it with a fresh random velocity.
    ///
    /// The vertical speed is drawn from the serve range and pushed out to the
    /// serve floor so the ball never travels perfectly flat.
    pub fn reset<R: Rng + ?Sized>(&mut self, bias: ServeBias, config: &MatchConfig, rng: &mut R) {
        let (cx, cy) = config.center();
        self.rect.set_center(cx, cy);

        let range = config.serve_vy_range;
        let mut vy = rng.gen_range(-range..=range);
        if vy.abs() < config.serve_vy_floor {
            vy = if vy >= 0.0 {
                config.serve_vy_floor
            } else {
                -config.serve_vy_floor
            };
        }

        let speed = config.ball_base_speed;
        let vx = match bias {
            ServeBias::Left => -speed,
            ServeBias::Right => speed,
            ServeBias::Random => {
                if rng.gen_bool(0.5) {
                    speed
                } else {
                    -speed
                }
            }
        };

        self.vx = vx;
        self.vy = vy;
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Paddle at column `x`, vertically centered
    pub fn new(x: f32, config: &MatchConfig) -> Self {
        let y = (config.field_height - config.paddle_height) / 2.0;
        Self {
            rect: Rect::new(x, y, config.paddle_width, config.paddle_height),
        }
    }

    pub fn y(&self) -> f32 {
        self.rect.y
    }

    /// Pull the paddle back inside the field
    pub fn clamp_to_field(&mut self, config: &MatchConfig) {
        self.rect.y = self.rect.y.clamp(0.0, config.paddle_max_y());
    }
}

/// One player-vs-AI match: both paddles, the ball, the scores and the
/// start-of-match instruction countdown.
///
/// The generator `R` drives every serve; seed it for reproducible matches.
#[derive(Debug, Clone)]
pub struct Match<R = StdRng> {
    player: Paddle,
    ai: Paddle,
    ball: Ball,
    player_score: u32,
    ai_score: u32,
    instruction_ticks: u32,
    show_instructions: bool,
    config: MatchConfig,
    rng: R,
}

impl Match<StdRng> {
    pub fn with_seed(config: MatchConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: MatchConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Match<R> {
    /// Set up a fresh match and make the opening serve in a random direction
    pub fn new(config: MatchConfig, mut rng: R) -> Self {
        let player = Paddle::new(config.player_paddle_x(), &config);
        let ai = Paddle::new(config.ai_paddle_x(), &config);
        let mut ball = Ball::new(&config);
        ball.reset(ServeBias::Random, &config, &mut rng);
        debug!(vx = ball.vx, vy = ball.vy, "opening serve");

        Self {
            player,
            ai,
            ball,
            player_score: 0,
            ai_score: 0,
            instruction_ticks: config.instruction_ticks,
            show_instructions: config.instruction_ticks > 0,
            config,
            rng,
        }
    }

    /// Advance the match by one tick.
    ///
    /// Order is fixed: player paddle, AI paddle, ball motion, walls, paddles,
    /// scoring. A goal relaunches the ball on the same tick.
    pub fn update(&mut self, input: PaddleInput) -> PhysicsEvents {
        let config = &self.config;
        let mut events = PhysicsEvents::default();

        move_player_paddle(&mut self.player, input, config);
        ai::track_ball(&mut self.ai, &self.ball, config);

        physics::advance(&mut self.ball);

        if physics::resolve_wall_collision(&mut self.ball, config) {
            events.wall_bounce = true;
            debug!(y = self.ball.rect.y, vy = self.ball.vy, "wall bounce");
        }

        events.paddle_hit =
            physics::resolve_paddle_collisions(&mut self.ball, &self.player, &self.ai, config);
        if let Some(side) = events.paddle_hit {
            debug!(?side, vx = self.ball.vx, vy = self.ball.vy, "paddle hit");
        }

        events.scored = physics::check_scoring(&self.ball, config);
        if let Some(scorer) = events.scored {
            // The next serve heads toward the scorer's half
            let bias = match scorer {
                Side::Right => {
                    self.ai_score += 1;
                    ServeBias::Right
                }
                Side::Left => {
                    self.player_score += 1;
                    ServeBias::Left
                }
            };
            self.ball.reset(bias, &self.config, &mut self.rng);
            info!(
                ?scorer,
                player = self.player_score,
                ai = self.ai_score,
                vx = self.ball.vx,
                vy = self.ball.vy,
                "point scored, ball served"
            );
        }

        self.tick_instructions();

        events
    }

    fn tick_instructions(&mut self) {
        self.show_instructions = self.instruction_ticks > 0;
        if self.show_instructions {
            self.instruction_ticks -= 1;
        }
    }
}

impl<R> Match<R> {
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The whole field, anchored at the origin
    pub fn playfield(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.field_width, self.config.field_height)
    }

    pub fn player_paddle(&self) -> &Paddle {
        &self.player
    }

    pub fn ai_paddle(&self) -> &Paddle {
        &self.ai
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Replace the ball mid-match. Used to stage scenarios in tests.
    #[doc(hidden)]
    pub fn place_ball(&mut self, ball: Ball) {
        self.ball = ball;
    }

    /// Move the AI paddle to `y`, clamped to the field. Used to stage
    /// scenarios in tests.
    #[doc(hidden)]
    pub fn place_ai_paddle(&mut self, y: f32) {
        self.ai.rect.y = y;
        self.ai.clamp_to_field(&self.config);
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    /// Whether the control hints should be drawn this frame
    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }
}
