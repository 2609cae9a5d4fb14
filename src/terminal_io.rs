use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode};
use retro_asteroids::InputState;

/// What the host should do with one key press.
#[derive(Debug, PartialEq)]
pub enum HostAction {
    Play(InputState),
    TogglePause,
    Quit,
}

pub fn action_for_key(code: KeyCode) -> HostAction {
    let mut input = InputState::default();
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return HostAction::Quit,
        KeyCode::Char('p') => return HostAction::TogglePause,
        KeyCode::Up | KeyCode::Char('w') => input.thrust = true,
        KeyCode::Left | KeyCode::Char('a') => input.rotate_left = true,
        KeyCode::Right | KeyCode::Char('d') => input.rotate_right = true,
        KeyCode::Char(' ') => input.fire = true,
        _ => {}
    }
    HostAction::Play(input)
}

// --- SimulatedInput for headless debug runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// A short scripted flight: thrust, turn, shoot a few times, then quit.
    pub fn demo(quit_frame: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(1, Event::Key(KeyCode::Up.into()));
        events.insert(2, Event::Key(KeyCode::Right.into()));
        for frame in (3..quit_frame).step_by(10) {
            events.insert(frame, Event::Key(KeyCode::Char(' ').into()));
        }
        events.insert(4, Event::Key(KeyCode::Left.into()));
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}
