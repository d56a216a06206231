//! Live multi-range selection and its gesture state.

mod overlap;

pub use overlap::resolve_overlaps;

use crate::grid::CellPoint;
use crate::input::ArrowKey;
use crate::rectangle::Rectangle;

/// Ordered set of ranges the user is currently selecting.
///
/// The last range is the one that pointer drags and shift-clicks extend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ranges: Vec<Rectangle>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges(ranges: Vec<Rectangle>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[Rectangle] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn first(&self) -> Option<&Rectangle> {
        self.ranges.first()
    }

    pub fn last(&self) -> Option<&Rectangle> {
        self.ranges.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Rectangle> {
        self.ranges.last_mut()
    }

    /// Drop everything and select a single range.
    pub fn replace(&mut self, range: Rectangle) {
        self.ranges.clear();
        self.ranges.push(range);
    }

    /// Add an independent range after the existing ones.
    pub fn push(&mut self, range: Rectangle) {
        self.ranges.push(range);
    }

    pub fn remove(&mut self, index: usize) -> Rectangle {
        self.ranges.remove(index)
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Check if any range covers the cell.
    pub fn contains(&self, point: CellPoint) -> bool {
        self.ranges.iter().any(|r| r.contains(point))
    }

    /// Move the last range's drag corner. Returns false when nothing is selected.
    pub fn set_drag_corner(&mut self, point: CellPoint) -> bool {
        match self.ranges.last_mut() {
            Some(range) => {
                range.set_drag_corner(point);
                true
            }
            None => false,
        }
    }

    /// Shift-click extension of the last range toward `point`.
    ///
    /// Each axis is adjusted only if the clicked coordinate differs from the
    /// anchor: a smaller coordinate moves the anchor edge, a larger one moves
    /// the drag edge.
    pub fn extend_last_toward(&mut self, point: CellPoint) -> bool {
        let Some(range) = self.ranges.last_mut() else {
            return false;
        };
        if point.col != range.x1 {
            if point.col < range.x1 {
                range.x1 = point.col;
            } else {
                range.x2 = point.col;
            }
        }
        if point.row != range.y1 {
            if point.row < range.y1 {
                range.y1 = point.row;
            } else {
                range.y2 = point.row;
            }
        }
        true
    }

    /// Status line text, e.g. `"Selected: B3:D5 F1"`.
    pub fn describe(&self) -> String {
        let mut text = String::from("Selected:");
        for range in &self.ranges {
            text.push(' ');
            text.push_str(&range.to_a1());
        }
        text
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rectangle> {
        self.ranges.iter()
    }

    pub fn to_vec(&self) -> Vec<Rectangle> {
        self.ranges.clone()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Rectangle;
    type IntoIter = std::slice::Iter<'a, Rectangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Gesture state of the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down; the last range follows the pointer.
    Dragging {
        /// Cell the pointer was last seen over, for move dedup.
        target: CellPoint,
    },
    /// Keyboard shift-extension; remembers the last growth direction.
    Extending { prev_direction: ArrowKey },
}

impl SelectionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn prev_direction(&self) -> Option<ArrowKey> {
        match self {
            Self::Extending { prev_direction } => Some(*prev_direction),
            _ => None,
        }
    }
}
