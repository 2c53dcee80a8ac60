//! Frame pacing shared by the game loop

use std::time::{Duration, Instant};

/// Duration of one frame at `fps` frames per second (0 is treated as 1)
pub fn frame_duration(fps: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / fps.max(1))
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// This function should be called at the end of each game loop iteration.
/// It sleeps for the remaining time if the frame finished early. A frame that
/// overran is not compensated; the next one simply starts late.
///
/// # Example
/// ```rust,no_run
/// use std::time::Instant;
/// use paddle_duel::game_modes::common::{frame_duration, limit_frame_rate};
/// let frame = frame_duration(60);
/// let frame_start = Instant::now();
/// // ... game loop logic ...
/// limit_frame_rate(frame_start, frame);
/// ```
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}
