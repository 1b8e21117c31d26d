use crate::core::camera::Direction;

/// Input event types the engine understands.
/// Key codes are DOM `keyCode` values as forwarded by the host shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The drawing surface changed size.
    Resize { width: u32, height: u32 },
}

/// Keys with a meaning in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Toggles orbit rings.
    R,
    Other(u32),
}

impl Key {
    pub fn from_code(key_code: u32) -> Self {
        match key_code {
            33 => Key::PageUp,
            34 => Key::PageDown,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            82 => Key::R,
            other => Key::Other(other),
        }
    }

    /// Movement direction bound to this key, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::PageUp => Some(Direction::Forward),
            Key::PageDown => Some(Direction::Backward),
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            Key::R | Key::Other(_) => None,
        }
    }
}

/// A queue of input events.
/// The host pushes events between frames; the frame loop drains them once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
