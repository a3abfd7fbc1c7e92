//! Input events the combobox reacts to.
//!
//! The host translates its platform events (winit, a browser, a test
//! harness) into these and feeds them to
//! [`Combobox::handle_event`](super::Combobox::handle_event). Printable
//! characters arrive as [`ComboboxEvent::Text`], never as keys.

use crate::geometry::Point;

/// Non-text keys the combobox handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
}

/// An event delivered to the combobox.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboboxEvent {
    /// The input gained focus.
    Focus,
    /// The input lost focus.
    Blur,
    /// Text typed or pasted at the cursor.
    Text(String),
    /// The search input's clear control was activated.
    Clear,
    /// A key was pressed while the input had focus.
    Key(Key),
    /// The pointer moved, in window coordinates.
    PointerMove(Point),
    /// The primary pointer button was pressed, in window coordinates.
    PointerPress(Point),
}

impl ComboboxEvent {
    /// Convenience for a text event.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<Key> for ComboboxEvent {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        assert_eq!(ComboboxEvent::text("ap"), ComboboxEvent::Text("ap".to_string()));
        assert_eq!(ComboboxEvent::from(Key::Enter), ComboboxEvent::Key(Key::Enter));
        assert_ne!(ComboboxEvent::from(Key::Backspace), ComboboxEvent::Clear);
    }
}
