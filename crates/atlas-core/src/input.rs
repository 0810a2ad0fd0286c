//! Raw input event vocabulary shared by the describer and the stores.

/// Keyboard modifier state at event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A discrete input event in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    KeyDown {
        /// Logical key value, e.g. `"Escape"`.
        key: String,
        /// Physical key code, e.g. `"ArrowLeft"`.
        code: String,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Pointer position, if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y, .. }
            | InputEvent::PointerUp { x, y, .. } => Some((*x, *y)),
            InputEvent::KeyDown { .. } => None,
        }
    }

    /// Key/code pair, if this is a keyboard event.
    pub fn key_info(&self) -> Option<(&str, &str)> {
        match self {
            InputEvent::KeyDown { key, code, .. } => Some((key.as_str(), code.as_str())),
            _ => None,
        }
    }
}
