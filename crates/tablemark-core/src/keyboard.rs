//! Arrow-key navigation and shift-extension of the first selected range.

use crate::grid::{CellPoint, GridSize};
use crate::input::ArrowKey;
use crate::rectangle::Rectangle;

/// What an arrow key did to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Plain arrow: the selection collapsed onto the neighbouring cell.
    Moved,
    /// Shift+arrow grew the range by one cell.
    Extended,
    /// Shift+arrow against the last growth direction pulled an edge back.
    Shrunk,
}

/// Result of one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub range: Rectangle,
    pub motion: Motion,
    /// Direction memory after this step.
    pub prev_direction: Option<ArrowKey>,
}

/// One-cell-per-press navigation over a grid of fixed size.
///
/// Up/left grow by moving the anchor edge (`y1`/`x1`), down/right grow by
/// moving the drag edge (`y2`/`x2`). Pressing the opposite of the last growth
/// direction walks the last grown edge back before growing the other way.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardNavigator {
    size: GridSize,
}

impl KeyboardNavigator {
    pub fn new(size: GridSize) -> Self {
        Self { size }
    }

    /// Apply one key press to `range`. `None` means the press is a no-op
    /// (grid edge reached).
    pub fn step(
        &self,
        range: Rectangle,
        key: ArrowKey,
        shift: bool,
        prev_direction: Option<ArrowKey>,
    ) -> Option<Step> {
        if !self.can_leave_anchor(range.anchor(), key) {
            return None;
        }
        let step = if shift {
            self.extend(range, key, prev_direction)
        } else {
            let cell = offset(range.anchor(), key)?;
            Step {
                range: Rectangle::cell(cell),
                motion: Motion::Moved,
                prev_direction: None,
            }
        };
        self.in_grid(&step.range).then_some(step)
    }

    fn extend(&self, range: Rectangle, key: ArrowKey, prev_direction: Option<ArrowKey>) -> Step {
        let Rectangle { x1, y1, x2, y2 } = range;
        let collapsed = if key.is_vertical() { y1 == y2 } else { x1 == x2 };
        let reversing = !collapsed && prev_direction == Some(key.opposite());

        if reversing {
            let range = match key {
                ArrowKey::Up => Rectangle::new(x1, y1, x2, y2.wrapping_sub(1)),
                ArrowKey::Down => Rectangle::new(x1, y1 + 1, x2, y2),
                ArrowKey::Left => Rectangle::new(x1, y1, x2.wrapping_sub(1), y2),
                ArrowKey::Right => Rectangle::new(x1 + 1, y1, x2, y2),
            };
            return Step { range, motion: Motion::Shrunk, prev_direction };
        }

        let range = match key {
            ArrowKey::Up => Rectangle::new(x1, y1 - 1, x2, y2),
            ArrowKey::Down => Rectangle::new(x1, y1, x2, y2 + 1),
            ArrowKey::Left => Rectangle::new(x1 - 1, y1, x2, y2),
            ArrowKey::Right => Rectangle::new(x1, y1, x2 + 1, y2),
        };
        Step { range, motion: Motion::Extended, prev_direction: Some(key) }
    }

    /// Presses are gated on the anchor cell having a neighbour in that direction.
    fn can_leave_anchor(&self, anchor: CellPoint, key: ArrowKey) -> bool {
        match key {
            ArrowKey::Up => anchor.row > 1,
            ArrowKey::Down => anchor.row < self.size.rows,
            ArrowKey::Left => anchor.col > 1,
            ArrowKey::Right => anchor.col < self.size.cols,
        }
    }

    fn in_grid(&self, range: &Rectangle) -> bool {
        self.size.contains(range.anchor()) && self.size.contains(range.drag_corner())
    }
}

fn offset(point: CellPoint, key: ArrowKey) -> Option<CellPoint> {
    let CellPoint { col, row } = point;
    Some(match key {
        ArrowKey::Up => CellPoint::new(col, row.checked_sub(1)?),
        ArrowKey::Down => CellPoint::new(col, row + 1),
        ArrowKey::Left => CellPoint::new(col.checked_sub(1)?, row),
        ArrowKey::Right => CellPoint::new(col + 1, row),
    })
}
