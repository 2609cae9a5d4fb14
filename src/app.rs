use std::io::{self, Write};
use std::time::Duration;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyEventKind},
};
use log::{error, info};
use retro_asteroids::{GameEvent, GameState, InputState, Vector2D};
use retro_asteroids::constants::INITIAL_ASTEROID_COUNT;

use crate::rendering::{GameGrid, OutputTarget, WRECK_FRAMES};
use crate::terminal_io::{HostAction, SimulatedInput, action_for_key};

const FRAME_MILLIS: u64 = 33;
const BANNER_FRAMES: u64 = 45;

/// Terminal host: polls keys, drives `GameState`, paints the grid.
pub struct App {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl App {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        App {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    pub fn run(&mut self, state: &mut GameState) -> io::Result<()> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        state.spawn_asteroids(INITIAL_ASTEROID_COUNT);
        let mut game_grid = self.new_grid(state);
        let mut current_banner: Option<(String, u64)> = None;
        let mut wreck: Option<(Vector2D, u64)> = None;
        let mut running = true;
        let mut frame_count = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            let mut input = InputState::default();
            match self.poll_action(frame_count)? {
                Some(HostAction::Quit) => running = false,
                Some(HostAction::TogglePause) => state.toggle_pause(),
                Some(HostAction::Play(pressed)) => input = pressed,
                None => {}
            }
            if self.grid_is_stale(&game_grid) {
                game_grid = self.new_grid(state);
            }

            if !state.is_paused() {
                state.update(&input);
            }
            for event in state.drain_events() {
                if let GameEvent::PlayerDied { position, .. } = event {
                    wreck = Some((position, frame_count));
                }
                if let Some(message) = banner_for(&event) {
                    current_banner = Some((message, frame_count + BANNER_FRAMES));
                }
            }
            if current_banner.as_ref().is_some_and(|(_, until)| *until <= frame_count) {
                current_banner = None;
            }

            game_grid.clear();
            state.draw(&mut game_grid);
            if let Some((position, since)) = wreck {
                let age = frame_count - since;
                if age < WRECK_FRAMES {
                    game_grid.wreck(position, age);
                } else {
                    wreck = None;
                }
            }
            if let Some((message, _)) = &current_banner {
                let x = (game_grid.width / 2).saturating_sub(message.len() as u16 / 2);
                game_grid.write_text(x, (game_grid.height / 2).saturating_sub(3), message);
            }
            self.render(&game_grid)?;

            if state.is_game_over() {
                running = false;
                if let Some((position, since)) = wreck {
                    self.play_out_wreck(state, &mut game_grid, position, frame_count - since)?;
                }
            }
            frame_count += 1;
        }

        info!("Leaving game loop after {} frames on level {}", frame_count, state.level);
        if state.is_game_over() && !self.debug_mode_active {
            self.show_game_over_screen(state.level)?;
        }
        Ok(())
    }

    /// Finishes the explosion over the frozen final frame.
    fn play_out_wreck(&mut self, state: &GameState, game_grid: &mut GameGrid, position: Vector2D, age: u64) -> io::Result<()> {
        for age in age + 1..WRECK_FRAMES {
            game_grid.clear();
            state.draw(game_grid);
            game_grid.wreck(position, age);
            self.render(game_grid)?;
            if !self.debug_mode_active {
                std::thread::sleep(Duration::from_millis(FRAME_MILLIS));
            }
        }
        Ok(())
    }

    fn new_grid(&self, state: &GameState) -> GameGrid {
        GameGrid::new(self.terminal_width, self.terminal_height, state.config.field_width, state.config.field_height)
    }

    fn grid_is_stale(&self, grid: &GameGrid) -> bool {
        grid.width != self.terminal_width || grid.height != self.terminal_height
    }

    fn poll_action(&mut self, frame_count: u64) -> io::Result<Option<HostAction>> {
        let mut current_event: Option<Event> = None;
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    current_event = Some(sim_input.read()?);
                }
            }
        } else if event::poll(Duration::from_millis(FRAME_MILLIS)).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            current_event = Some(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
        }

        match current_event {
            Some(Event::Key(key_event)) if key_event.kind != KeyEventKind::Release => {
                Ok(Some(action_for_key(key_event.code)))
            }
            Some(Event::Resize(new_width, new_height)) => {
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target)?;
        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        self.stdout_target.execute_move_to(MoveTo(0, 0))?;
        self.stdout_target.flush()?;
        Ok(())
    }

    fn wait_for_key(&self) -> io::Result<()> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }

    fn write_centered(&mut self, lines: &[&str], start_y: u16) -> io::Result<()> {
        for (i, line) in lines.iter().enumerate() {
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.execute_move_to(MoveTo(x, start_y.saturating_add(i as u16)))?;
            write!(self.stdout_target, "{}", line)?;
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        let blank = GameGrid::new(self.terminal_width, self.terminal_height, 1.0, 1.0);
        blank.clear_screen_manual(&mut self.stdout_target)
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r"RETRO ASTEROIDS",
            r"",
            r"Arrows / WASD : steer and thrust",
            r"Space         : fire",
            r"p             : pause",
            r"q             : quit",
            r"",
            r"Press any key to start...",
        ];
        self.clear_screen()?;
        let start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        self.write_centered(&title_art, start_y)?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        self.wait_for_key()?;
        self.clear_screen()?;
        self.stdout_target.flush()?;
        Ok(())
    }

    fn show_game_over_screen(&mut self, level: u32) -> io::Result<()> {
        self.clear_screen()?;
        let level_msg = format!("Reached level {}", level);
        let lines = ["GAME OVER!", "", level_msg.as_str(), "", "Press any key to exit..."];
        let start_y = (self.terminal_height / 2).saturating_sub(2);
        self.write_centered(&lines, start_y)?;
        self.stdout_target.flush()?;

        // Let a held fire key drain before waiting
        std::thread::sleep(Duration::from_millis(500));
        while event::poll(Duration::from_millis(0))? {
            event::read()?;
        }
        self.wait_for_key()
    }
}

fn banner_for(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::LevelCleared { level, .. } => Some(format!("LEVEL {}", level)),
        GameEvent::PowerUpCollected { kind } => Some(format!("{} ACQUIRED", kind.label().to_uppercase())),
        GameEvent::ShieldAbsorbed => Some("SHIELD DOWN".to_string()),
        GameEvent::PlayerDied { lives_left, .. } if *lives_left > 0 => Some(format!("SHIP LOST - {} LEFT", lives_left)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_asteroids::{PowerUpKind, Vector2D};

    #[test]
    fn test_banners() {
        assert_eq!(banner_for(&GameEvent::LevelCleared { level: 4, asteroids: 13 }).as_deref(), Some("LEVEL 4"));
        assert_eq!(
            banner_for(&GameEvent::PowerUpCollected { kind: PowerUpKind::TriShot }).as_deref(),
            Some("TRISHOT ACQUIRED")
        );
        assert_eq!(banner_for(&GameEvent::PlayerDied { position: Vector2D::default(), lives_left: 0 }), None);
        assert_eq!(banner_for(&GameEvent::PlayerRespawned), None);
    }
}
