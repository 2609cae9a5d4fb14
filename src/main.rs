use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use retro_asteroids::{GameConfig, GameState};

mod app;
mod rendering;
mod terminal_io;

use app::App;
use rendering::{OutputTarget, ScreenBuffer};
use terminal_io::SimulatedInput;

const DEBUG_WIDTH: u16 = 80;
const DEBUG_HEIGHT: u16 = 24;
const DEBUG_QUIT_FRAME: u64 = 120;

/// Command-line options.
///
/// `--debug [WIDTH HEIGHT [FRAMES]]` runs headless against a screen buffer with
/// scripted input. `--seed N` fixes the RNG seed. A bare number caps the frame
/// count of a normal run.
#[derive(Debug, Default, PartialEq)]
struct HostOptions {
    debug: bool,
    width: Option<u16>,
    height: Option<u16>,
    max_frames: Option<u64>,
    seed: Option<u64>,
}

impl HostOptions {
    fn from_args(args: &[String]) -> Self {
        let mut options = HostOptions::default();
        let mut positional = Vec::new();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" => options.debug = true,
                "--seed" => options.seed = iter.next().and_then(|s| s.parse().ok()),
                other => positional.push(other),
            }
        }

        if options.debug && positional.len() >= 2 {
            options.width = positional[0].parse().ok();
            options.height = positional[1].parse().ok();
            options.max_frames = positional.get(2).and_then(|s| s.parse().ok());
        } else {
            options.max_frames = positional.first().and_then(|s| s.parse().ok());
        }
        options
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = HostOptions::from_args(&args);

    let level = if options.debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    simple_logging::log_to_file("retro-asteroids.log", level)?;
    info!("Starting retro-asteroids with {:?}", options);

    let mut config = GameConfig::default();
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    let mut state = GameState::new(config);

    if options.debug {
        let width = options.width.unwrap_or(DEBUG_WIDTH);
        let height = options.height.unwrap_or(DEBUG_HEIGHT);
        info!("Debug resolution set to {}x{}", width, height);
        let stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height));
        let quit_frame = options.max_frames.unwrap_or(DEBUG_QUIT_FRAME);
        let simulated_input = Some(SimulatedInput::demo(quit_frame));
        let mut app = App::new(width, height, stdout_target, simulated_input, true, options.max_frames);
        return app.run(&mut state);
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = run_terminal(&mut state, options.max_frames);

    // Always hand the terminal back, even when the loop failed
    let mut stdout = io::stdout();
    let restore = crossterm::execute!(stdout, Show)
        .and_then(|_| disable_raw_mode())
        .and_then(|_| stdout.flush());
    if let Err(e) = &restore {
        error!("Failed to restore terminal: {}", e);
    }
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    info!("Exiting retro-asteroids.");
    result.and(restore)
}

fn run_terminal(state: &mut GameState, max_frames: Option<u64>) -> io::Result<()> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);
    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;

    let mut app = App::new(width, height, stdout_target, None, false, max_frames);
    app.run(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("retro-asteroids").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_debug_args() {
        let options = HostOptions::from_args(&args(&["--debug", "100", "30", "50", "--seed", "9"]));
        assert_eq!(
            options,
            HostOptions { debug: true, width: Some(100), height: Some(30), max_frames: Some(50), seed: Some(9) }
        );
    }

    #[test]
    fn test_parse_frame_cap() {
        let options = HostOptions::from_args(&args(&["600"]));
        assert_eq!(options.max_frames, Some(600));
        assert!(!options.debug);
        assert_eq!(HostOptions::from_args(&args(&[])), HostOptions::default());
    }
}
