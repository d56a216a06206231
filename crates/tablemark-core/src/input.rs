//! Pointer and keyboard events, already resolved to grid cells.

use crate::grid::CellPoint;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false, meta: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false, meta: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false, meta: false };
    pub const META: Self = Self { shift: false, ctrl: false, alt: false, meta: true };
}

/// Pointer event over the grid.
///
/// `cell` is the cell under the pointer; the host hit-tests its own layout.
/// Header cells map to row 0 / column 0 and fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        cell: CellPoint,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        cell: CellPoint,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up,
    /// The pointer-up will never arrive (window blur, visibility loss).
    Cancel,
}

/// Arrow keys handled by keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Map a key name ("ArrowUp", "Up", "up") to an arrow key.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("Arrow").unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(ArrowKey::Up),
            "down" => Some(ArrowKey::Down),
            "left" => Some(ArrowKey::Left),
            "right" => Some(ArrowKey::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ArrowKey::Up => ArrowKey::Down,
            ArrowKey::Down => ArrowKey::Up,
            ArrowKey::Left => ArrowKey::Right,
            ArrowKey::Right => ArrowKey::Left,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, ArrowKey::Up | ArrowKey::Down)
    }
}

/// Key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: ArrowKey,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: ArrowKey, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_key_names() {
        assert_eq!(ArrowKey::from_name("ArrowUp"), Some(ArrowKey::Up));
        assert_eq!(ArrowKey::from_name("Left"), Some(ArrowKey::Left));
        assert_eq!(ArrowKey::from_name("down"), Some(ArrowKey::Down));
        assert_eq!(ArrowKey::from_name("Tab"), None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(ArrowKey::Up.opposite(), ArrowKey::Down);
        assert_eq!(ArrowKey::Right.opposite(), ArrowKey::Left);
        assert!(ArrowKey::Down.is_vertical());
        assert!(!ArrowKey::Left.is_vertical());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind": "down", "cell": {"col": 2, "row": 3}, "modifiers": {"shift": true}}"#)
                .unwrap();
        assert_eq!(
            event,
            PointerEvent::Down { cell: CellPoint::new(2, 3), modifiers: Modifiers::SHIFT }
        );

        let event: PointerEvent = serde_json::from_str(r#"{"kind": "move", "cell": {"col": 4, "row": 4}}"#).unwrap();
        assert_eq!(event, PointerEvent::Move { cell: CellPoint::new(4, 4), modifiers: Modifiers::NONE });

        let event: PointerEvent = serde_json::from_str(r#"{"kind": "cancel"}"#).unwrap();
        assert_eq!(event, PointerEvent::Cancel);
    }
}
