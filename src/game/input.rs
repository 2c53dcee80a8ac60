use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::warn;

use super::params::MatchConfig;
use super::state::Paddle;
use crate::config::KeyBindings;

/// Without release events a fresh press counts as held this long. Covers the
/// keyboard's delay before auto-repeat starts (typically 250 to 660 ms).
pub const FIRST_HOLD_WINDOW: Duration = Duration::from_millis(700);

/// Once auto-repeat is flowing, a key counts as held this long after the
/// latest repeat.
pub const REPEAT_HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Held movement keys for one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Everything the game loop needs from the keyboard for one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    pub paddle: PaddleInput,
    pub quit: bool,
}

/// Move the player's paddle one tick. Both keys held cancel out.
pub fn move_player_paddle(paddle: &mut Paddle, input: PaddleInput, config: &MatchConfig) {
    if input.up {
        paddle.rect.y -= config.player_step;
    }
    if input.down {
        paddle.rect.y += config.player_step;
    }
    paddle.clamp_to_field(config);
}

/// Parse a key name from the config file.
///
/// Accepts single characters ("W", "s") and the named keys
/// "Up", "Down", "Left", "Right", "Enter", "Esc" and "Space".
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match name.to_ascii_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    }
}

/// Display form of a key for on-screen hints
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{:?}", other),
    }
}

/// Resolved key codes for the three game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub up: KeyCode,
    pub down: KeyCode,
    pub quit: KeyCode,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: KeyCode::Char('w'),
            down: KeyCode::Char('s'),
            quit: KeyCode::Char('q'),
        }
    }
}

impl Keymap {
    /// Resolve configured key names, keeping the default for any name that
    /// does not parse.
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let defaults = Self::default();
        let resolve = |name: &str, fallback: KeyCode| {
            parse_key(name).unwrap_or_else(|| {
                warn!(key = name, "unknown key name in config, using default");
                fallback
            })
        };

        Self {
            up: resolve(&bindings.paddle_up, defaults.up),
            down: resolve(&bindings.paddle_down, defaults.down),
            quit: resolve(&bindings.quit, defaults.quit),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct KeyHold {
    down: bool,
    repeating: bool,
    last_event: Option<Instant>,
}

impl KeyHold {
    /// A press or repeat. Plain terminals report repeats as presses, so a
    /// press arriving while the key is still held counts as a repeat.
    fn press(&mut self, now: Instant, kind: KeyEventKind, exact: bool) {
        self.repeating = kind == KeyEventKind::Repeat || self.is_held(now, exact);
        self.down = true;
        self.last_event = Some(now);
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    fn is_held(&self, now: Instant, exact: bool) -> bool {
        if !self.down {
            return false;
        }
        if exact {
            return true;
        }
        let window = if self.repeating {
            REPEAT_HOLD_WINDOW
        } else {
            FIRST_HOLD_WINDOW
        };
        self.last_event
            .is_some_and(|at| now.saturating_duration_since(at) < window)
    }
}

/// Turns terminal key events into the held-key set the match consumes.
///
/// With `exact_release` the terminal reports key releases (keyboard
/// enhancement protocol) and holds last until released. Otherwise a fresh
/// press holds for `FIRST_HOLD_WINDOW`, and each auto-repeat extends the hold
/// by `REPEAT_HOLD_WINDOW`.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    keymap: Keymap,
    exact_release: bool,
    up: KeyHold,
    down: KeyHold,
    quit: bool,
}

impl KeyTracker {
    pub fn new(keymap: Keymap, exact_release: bool) -> Self {
        Self {
            keymap,
            exact_release,
            up: KeyHold::default(),
            down: KeyHold::default(),
            quit: false,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Feed one key event observed at `now`
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let code = normalize(key.code);

        let is_quit = code == normalize(self.keymap.quit)
            || code == KeyCode::Esc
            || (code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if is_quit && key.kind != KeyEventKind::Release {
            self.quit = true;
            return;
        }

        let hold = if code == normalize(self.keymap.up) {
            &mut self.up
        } else if code == normalize(self.keymap.down) {
            &mut self.down
        } else {
            return;
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                hold.press(now, key.kind, self.exact_release)
            }
            KeyEventKind::Release => hold.release(),
        }
    }

    /// Held state as of `now`. Quit stays latched once seen.
    pub fn snapshot(&self, now: Instant) -> TickInput {
        TickInput {
            paddle: PaddleInput {
                up: self.up.is_held(now, self.exact_release),
                down: self.down.is_held(now, self.exact_release),
            },
            quit: self.quit,
        }
    }

    /// Drain pending terminal events without blocking and return this tick's input
    pub fn poll(&mut self) -> Result<TickInput, std::io::Error> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, Instant::now());
            }
        }

        Ok(self.snapshot(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_player_moves_by_step() {
        let config = MatchConfig::default();
        let mut paddle = Paddle::new(30.0, &config);

        move_player_paddle(&mut paddle, PaddleInput { up: true, down: false }, &config);
        assert_eq!(paddle.y(), 243.0);

        move_player_paddle(&mut paddle, PaddleInput { up: false, down: true }, &config);
        move_player_paddle(&mut paddle, PaddleInput { up: false, down: true }, &config);
        assert_eq!(paddle.y(), 257.0);
    }

    #[test]
    fn test_both_keys_cancel() {
        let config = MatchConfig::default();
        let mut paddle = Paddle::new(30.0, &config);

        move_player_paddle(&mut paddle, PaddleInput { up: true, down: true }, &config);
        assert_eq!(paddle.y(), 250.0);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let config = MatchConfig::default();
        let mut paddle = Paddle::new(30.0, &config);

        for _ in 0..100 {
            move_player_paddle(&mut paddle, PaddleInput { up: true, down: false }, &config);
            assert!(paddle.y() >= 0.0);
        }
        assert_eq!(paddle.y(), 0.0);

        for _ in 0..100 {
            move_player_paddle(&mut paddle, PaddleInput { up: false, down: true }, &config);
            assert!(paddle.y() <= 500.0);
        }
        assert_eq!(paddle.y(), 500.0);
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(parse_key("s"), Some(KeyCode::Char('s')));
        assert_eq!(parse_key("Up"), Some(KeyCode::Up));
        assert_eq!(parse_key("DOWN"), Some(KeyCode::Down));
        assert_eq!(parse_key("Esc"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("PageUp"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_keymap_falls_back_on_bad_names() {
        let bindings = KeyBindings {
            paddle_up: "Up".to_string(),
            paddle_down: "Nope".to_string(),
            quit: "X".to_string(),
        };
        let keymap = Keymap::from_bindings(&bindings);

        assert_eq!(keymap.up, KeyCode::Up);
        assert_eq!(keymap.down, KeyCode::Char('s'));
        assert_eq!(keymap.quit, KeyCode::Char('x'));
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fresh_press_held_until_autorepeat_starts() {
        let mut tracker = KeyTracker::new(Keymap::default(), false);
        let start = Instant::now();

        tracker.handle_key(key(KeyCode::Char('W'), KeyEventKind::Press), start);

        // Every 16 ms tick before a 500 ms repeat delay sees the key held
        let mut t = 0;
        while t < 500 {
            assert!(tracker.snapshot(start + ms(t)).paddle.up, "dropped at {} ms", t);
            t += 16;
        }
        for t in [16, 100, 240] {
            assert!(tracker.snapshot(start + ms(t)).paddle.up);
        }
        assert!(!tracker.snapshot(start + FIRST_HOLD_WINDOW).paddle.up);
        assert!(!tracker.snapshot(start + ms(240)).paddle.down);
    }

    #[test]
    fn test_autorepeat_shortens_window() {
        let mut tracker = KeyTracker::new(Keymap::default(), false);
        let start = Instant::now();

        tracker.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press), start);
        // Repeats arrive as presses every 33 ms after a 500 ms delay
        let mut t = 500;
        while t <= 1_000 {
            tracker.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press), start + ms(t));
            assert!(tracker.snapshot(start + ms(t + 16)).paddle.up);
            t += 33;
        }

        // Letting go: the last repeat was at 995 ms
        assert!(tracker.snapshot(start + ms(1_100)).paddle.up);
        assert!(!tracker.snapshot(start + ms(995) + REPEAT_HOLD_WINDOW).paddle.up);
    }

    #[test]
    fn test_new_press_after_expiry_is_fresh() {
        let mut tracker = KeyTracker::new(Keymap::default(), false);
        let start = Instant::now();

        tracker.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), start);
        tracker.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), start + ms(500));
        assert!(!tracker.snapshot(start + ms(700)).paddle.down);

        // A tap after the hold lapsed gets the long window again
        tracker.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), start + ms(2_000));
        assert!(tracker.snapshot(start + ms(2_400)).paddle.down);
    }

    #[test]
    fn test_exact_release_events() {
        let mut tracker = KeyTracker::new(Keymap::default(), true);
        let start = Instant::now();

        tracker.handle_key(key(KeyCode::Char('s'), KeyEventKind::Press), start);
        assert!(tracker.snapshot(start + Duration::from_secs(5)).paddle.down);

        tracker.handle_key(key(KeyCode::Char('s'), KeyEventKind::Release), start);
        assert!(!tracker.snapshot(start).paddle.down);
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();

        let mut tracker = KeyTracker::new(Keymap::default(), false);
        tracker.handle_key(key(KeyCode::Char('Q'), KeyEventKind::Press), now);
        assert!(tracker.snapshot(now).quit);

        let mut tracker = KeyTracker::new(Keymap::default(), false);
        tracker.handle_key(key(KeyCode::Esc, KeyEventKind::Press), now);
        assert!(tracker.snapshot(now).quit);

        let mut tracker = KeyTracker::new(Keymap::default(), false);
        let mut ctrl_c = key(KeyCode::Char('c'), KeyEventKind::Press);
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        tracker.handle_key(ctrl_c, now);
        assert!(tracker.snapshot(now).quit);

        // Plain 'c' is not bound
        let mut tracker = KeyTracker::new(Keymap::default(), false);
        tracker.handle_key(key(KeyCode::Char('c'), KeyEventKind::Press), now);
        assert_eq!(tracker.snapshot(now), TickInput::default());
    }
}
