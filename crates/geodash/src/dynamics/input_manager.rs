use std::f64::consts::TAU;

use crate::{
    dynamics::OrbitControls,
    world::{InputEvent, Key, MouseButton},
};

/// Radians turned per arrow-key press.
const KEY_ROTATE_STEP: f64 = 0.05;
const KEY_DOLLY_STEP: f64 = 0.95;
const WHEEL_DOLLY_BASE: f64 = 0.95;

/// Translates raw pointer/keyboard events into orbit-control input.
#[derive(Debug, Clone)]
pub struct InputState {
    pub mouse_button_states: [bool; MouseButton::Count as usize],
    pub mouse_position: (f64, f64),
    pub keyboard_states: [bool; Key::Count as usize],
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            mouse_button_states: [false; MouseButton::Count as usize],
            mouse_position: (0.0, 0.0),
            keyboard_states: [false; Key::Count as usize],
        }
    }

    pub fn reset(&mut self) {
        *self = InputState::new();
    }

    /// `viewport_height` scales drags so a full-height drag turns the globe
    /// one revolution.
    pub fn queue_event(&mut self, event: InputEvent, orbit: &mut OrbitControls, viewport_height: f64) {
        match event {
            InputEvent::MouseMoved(x, y) => {
                let (lx, ly) = self.mouse_position;
                self.mouse_position = (x, y);
                if self.mouse_button_states[MouseButton::Left as usize] && viewport_height > 0.0 {
                    let dx = x - lx;
                    let dy = y - ly;
                    orbit.rotate(-TAU * dx / viewport_height, -TAU * dy / viewport_height);
                }
            }

            InputEvent::MouseScrolled(delta) => {
                // positive delta scrolls toward the globe
                orbit.dolly(WHEEL_DOLLY_BASE.powf(delta));
            }

            InputEvent::MouseButtonPressed(MouseButton::Count)
            | InputEvent::MouseButtonReleased(MouseButton::Count)
            | InputEvent::KeyPressed(Key::Count)
            | InputEvent::KeyReleased(Key::Count) => {}

            InputEvent::MouseButtonPressed(button) => {
                self.mouse_button_states[button as usize] = true;
            }

            InputEvent::MouseButtonReleased(button) => {
                self.mouse_button_states[button as usize] = false;
            }

            InputEvent::KeyPressed(key) => {
                self.keyboard_states[key as usize] = true;
                match key {
                    Key::ArrowLeft => orbit.rotate(KEY_ROTATE_STEP, 0.0),
                    Key::ArrowRight => orbit.rotate(-KEY_ROTATE_STEP, 0.0),
                    Key::ArrowUp => orbit.rotate(0.0, KEY_ROTATE_STEP),
                    Key::ArrowDown => orbit.rotate(0.0, -KEY_ROTATE_STEP),
                    Key::ZoomIn => orbit.dolly(KEY_DOLLY_STEP),
                    Key::ZoomOut => orbit.dolly(1.0 / KEY_DOLLY_STEP),
                    Key::Count => {}
                }
            }

            InputEvent::KeyReleased(key) => {
                self.keyboard_states[key as usize] = false;
            }

            InputEvent::WindowFocused(false) => self.reset(),
            InputEvent::WindowFocused(true) => {}
        }
    }
}
