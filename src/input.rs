use std::collections::HashSet;

use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    /// Keys that went down this frame. Auto-repeat does not count.
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    /// Forgets the per-frame presses. Call before polling events.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
    }

    /// Feeds one SDL event into the state.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::KeyDown {
            keycode: Some(keycode),
            repeat,
            ..
        } = event
        {
            self.key_down(*keycode, *repeat);
        }
    }

    fn key_down(&mut self, keycode: Keycode, repeat: bool) {
        if !repeat {
            self.pressed.insert(keycode);
        }
    }

    pub fn was_pressed(&self, keycode: Keycode) -> bool {
        self.pressed.contains(&keycode)
    }
}
