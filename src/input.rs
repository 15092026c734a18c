use std::collections::HashSet;

use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    /// Keys that went down since the last [`KeyboardState::begin_frame`].
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    /// Clears the per-frame pressed set. Held keys stay down.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
    }

    /// Tracks key transitions from an SDL event. Repeats are ignored.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.press(*keycode),
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.release(*keycode),
            _ => {}
        }
    }

    pub fn press(&mut self, key: Keycode) {
        self.down.insert(key);
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Keycode) {
        self.down.remove(&key);
    }

    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }
}
