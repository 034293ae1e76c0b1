//! Input-state snapshot
//!
//! The windowing collaborator delivers discrete events; the engine keeps a
//! synchronous snapshot of the current input state. There is no queuing:
//! handlers run immediately and the last position event wins.

use std::collections::HashSet;

use crate::foundation::math::Vec2;

/// Key codes delivered by the windowing collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Q key
    Q,
    /// E key
    E,
    /// R key
    R,
    /// Space bar
    Space,
    /// Left shift
    Shift,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// F1 function key (debug overlay toggle)
    F1,
    /// Any key the engine has no binding for
    Other(u32),
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// A discrete event from the windowing collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// A key changed state
    Key {
        /// Which key
        key: KeyCode,
        /// True on press, false on release
        pressed: bool,
    },
    /// A mouse button changed state
    MouseButton {
        /// Which button
        button: MouseButton,
        /// True on press, false on release
        pressed: bool,
    },
    /// The cursor moved to a new window position
    MouseMove {
        /// Cursor X in window coordinates
        x: f32,
        /// Cursor Y in window coordinates
        y: f32,
    },
    /// The window was resized
    Resize {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
}

/// Snapshot of the current input state
#[derive(Debug)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
    /// Current cursor position
    pub mouse_position: Vec2,
    /// Cursor movement since the last [`InputState::end_frame`]
    pub mouse_delta: Vec2,
    /// Cursor position where the last button press started
    pub click_start: Vec2,
    /// Left button held
    pub mouse_left: bool,
    /// Right button held
    pub mouse_right: bool,
    /// Middle button held
    pub mouse_middle: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            mouse_position: Vec2::zeros(),
            mouse_delta: Vec2::zeros(),
            click_start: Vec2::zeros(),
            mouse_left: false,
            mouse_right: false,
            mouse_middle: false,
        }
    }

    /// Fold one window event into the snapshot
    pub fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Key { key, pressed } => {
                if pressed {
                    self.pressed.insert(key);
                } else {
                    self.pressed.remove(&key);
                }
            }
            WindowEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.click_start = self.mouse_position;
                }
                match button {
                    MouseButton::Left => self.mouse_left = pressed,
                    MouseButton::Right => self.mouse_right = pressed,
                    MouseButton::Middle => self.mouse_middle = pressed,
                }
            }
            WindowEvent::MouseMove { x, y } => {
                let next = Vec2::new(x, y);
                self.mouse_delta += next - self.mouse_position;
                self.mouse_position = next;
            }
            // Resize is consumed by the renderer, not the input snapshot.
            WindowEvent::Resize { .. } => {}
        }
    }

    /// Whether a key is currently held
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Reset per-frame accumulators; call once after each simulate step
    pub fn end_frame(&mut self) {
        self.mouse_delta = Vec2::zeros();
    }
}
