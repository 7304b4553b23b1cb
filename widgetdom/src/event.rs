/// A file carried by a drop or file-input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// File name as reported by the host (no directory component).
    pub name: String,
    /// Declared MIME type. Empty when the host could not determine one.
    pub mime_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl DroppedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Size of the file in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// High-level events with element targeting.
///
/// A `target` of `None` on a pointer event means "whatever is under the
/// pointer": the document resolves it by hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event, targeted at the focused element
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Mouse click event
    Click {
        target: Option<String>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// A drag carrying files entered an element
    DragEnter {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// A drag carrying files moved over an element
    DragOver {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// A drag left an element
    DragLeave {
        target: Option<String>,
        x: u16,
        y: u16,
    },
    /// Files were dropped
    Drop {
        target: Option<String>,
        x: u16,
        y: u16,
        files: Vec<DroppedFile>,
    },
    /// A file input's selection changed
    Change {
        target: String,
        files: Vec<DroppedFile>,
    },
}

impl Event {
    /// Convenience constructor for a left click on a known element.
    pub fn click_on(target: impl Into<String>) -> Self {
        Event::Click {
            target: Some(target.into()),
            x: 0,
            y: 0,
            button: MouseButton::Left,
        }
    }

    /// Convenience constructor for a left click resolved by hit testing.
    pub fn click_at(x: u16, y: u16) -> Self {
        Event::Click {
            target: None,
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Convenience constructor for an unmodified key press on an element.
    pub fn key_on(target: impl Into<String>, key: Key) -> Self {
        Event::Key {
            target: Some(target.into()),
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Key { .. } => EventKind::KeyDown,
            Event::Click { .. } => EventKind::Click,
            Event::DragEnter { .. } => EventKind::DragEnter,
            Event::DragOver { .. } => EventKind::DragOver,
            Event::DragLeave { .. } => EventKind::DragLeave,
            Event::Drop { .. } => EventKind::Drop,
            Event::Change { .. } => EventKind::Change,
        }
    }

    /// The explicit target, if the event carries one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Key { target, .. }
            | Event::Click { target, .. }
            | Event::DragEnter { target, .. }
            | Event::DragOver { target, .. }
            | Event::DragLeave { target, .. }
            | Event::Drop { target, .. } => target.as_deref(),
            Event::Change { target, .. } => Some(target),
        }
    }

    /// Pointer position for pointer-driven events.
    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            Event::Click { x, y, .. }
            | Event::DragEnter { x, y, .. }
            | Event::DragOver { x, y, .. }
            | Event::DragLeave { x, y, .. }
            | Event::Drop { x, y, .. } => Some((*x, *y)),
            Event::Key { .. } | Event::Change { .. } => None,
        }
    }

    /// Files carried by drop and change events; empty otherwise.
    pub fn files(&self) -> &[DroppedFile] {
        match self {
            Event::Drop { files, .. } | Event::Change { files, .. } => files,
            _ => &[],
        }
    }
}

/// Event type used when registering listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    Click,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    Change,
}

/// Keys the widgets react to. Anything else arrives as `Char` or is not
/// forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
}

impl Key {
    /// Space arrives as a character key.
    pub fn is_space(&self) -> bool {
        matches!(self, Key::Char(' '))
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
