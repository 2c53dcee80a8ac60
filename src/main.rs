use anyhow::{anyhow, bail, Context};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{info, warn};

use paddle_duel::game::input::key_label;
use paddle_duel::game::Keymap;
use paddle_duel::{config, debug, game_modes};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    debug: bool,
    seed: Option<u64>,
    help: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;

    debug::init(options.debug && !options.help).context("failed to initialize debug log")?;
    info!(?options, "session start");

    let config = config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "could not load config file, using defaults");
        config::Config::default()
    });

    if options.help {
        print_usage(&args[0], &Keymap::from_bindings(&config.keybindings));
        return Ok(());
    }

    // Setup terminal; the guard undoes whatever got set up, on every exit path
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut guard = TerminalGuard::default();
    execute!(io::stdout(), EnterAlternateScreen)?;

    // Terminals speaking the kitty keyboard protocol report key releases
    let exact_release = supports_keyboard_enhancement().unwrap_or(false);
    if exact_release {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        guard.keyboard_flags = true;
    }

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Run game
    let result = game_modes::run_game_vs_ai(&mut terminal, &config, options.seed, exact_release);

    drop(guard);
    info!("session end");
    result.context("game loop failed")
}

/// Restores the terminal when dropped, including on early returns and panics
#[derive(Debug, Default)]
struct TerminalGuard {
    keyboard_flags: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(self.keyboard_flags) {
            warn!(error = %e, "terminal restore incomplete");
        }
    }
}

/// Run every restore step, then report the first failure
fn restore_terminal(keyboard_flags: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    let pop = if keyboard_flags {
        execute!(stdout, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };

    first_error([
        pop,
        disable_raw_mode(),
        execute!(stdout, LeaveAlternateScreen, Show),
    ])
}

fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().collect()
}

/// Parse `--debug`, `--seed <n>` and `--help`
fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--seed" | "-s" => {
                let value = rest
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a number"))?;
                let seed = value
                    .parse()
                    .with_context(|| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--help" | "-h" => options.help = true,
            other => bail!("unknown argument: {} (try --help)", other),
        }
    }

    Ok(options)
}

/// Control summary for the help text, using the configured bindings
fn controls_line(keymap: &Keymap) -> String {
    format!(
        "Controls: {}/{} move your paddle, {} or Esc quits",
        key_label(keymap.up),
        key_label(keymap.down),
        key_label(keymap.quit)
    )
}

fn print_usage(program: &str, keymap: &Keymap) {
    println!("Paddle Duel - Terminal Pong vs AI");
    println!();
    println!("Usage:");
    println!("  {}                 # Play against the AI", program);
    println!("  {} --seed <n>      # Reproducible serves", program);
    println!("  {} --debug         # Log to {}", program, debug::LOG_FILE_PATH);
    println!();
    println!("{}", controls_line(keymap));
    println!(
        "Config:   {}",
        config::get_config_path().display()
    );
}
