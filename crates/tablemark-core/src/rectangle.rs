//! Directed cell range: anchor corner plus drag corner.

use crate::grid::{CellPoint, column_to_letter};
use serde::{Deserialize, Serialize};

/// A rectangular range of cells.
///
/// `(x1, y1)` is where the gesture started and `(x2, y2)` is where it is now.
/// The corners are never normalized, so `x1 > x2` or `y1 > y2` is valid;
/// use [`Rectangle::bounds`] for containment and iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// Normalized edges of a [`Rectangle`], all inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rectangle {
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// A 1×1 range anchored at `point`.
    pub const fn cell(point: CellPoint) -> Self {
        Self::new(point.col, point.row, point.col, point.row)
    }

    /// Range spanning from an anchor to a drag corner.
    pub const fn from_corners(anchor: CellPoint, drag: CellPoint) -> Self {
        Self::new(anchor.col, anchor.row, drag.col, drag.row)
    }

    pub const fn anchor(&self) -> CellPoint {
        CellPoint::new(self.x1, self.y1)
    }

    pub const fn drag_corner(&self) -> CellPoint {
        CellPoint::new(self.x2, self.y2)
    }

    /// Move the drag corner, keeping the anchor.
    pub fn set_drag_corner(&mut self, point: CellPoint) {
        self.x2 = point.col;
        self.y2 = point.row;
    }

    pub fn is_single_cell(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            top: self.y1.min(self.y2),
            left: self.x1.min(self.x2),
            right: self.x1.max(self.x2),
            bottom: self.y1.max(self.y2),
        }
    }

    /// Check if a cell lies inside the normalized range.
    pub fn contains(&self, point: CellPoint) -> bool {
        self.bounds().contains(point)
    }

    /// Check if `candidate` lies inside this range, testing against this
    /// range's own corner ordering rather than its normalized bounds.
    ///
    /// Each candidate corner is checked against one edge only: on an
    /// ascending axis `x1`/`y1` against the low edge and `x2`/`y2` against the
    /// high edge, the other way round on a descending axis. Any candidate
    /// inside the bounds matches, so a single cell is plain containment. A
    /// candidate reaching past the bounds can match one orientation of the
    /// same range and not the other.
    pub fn encloses(&self, candidate: &Rectangle) -> bool {
        let Rectangle { x1, y1, x2, y2 } = *candidate;
        let x_inside = if self.x1 <= self.x2 {
            x1 >= self.x1 && x2 <= self.x2
        } else {
            x1 <= self.x1 && x2 >= self.x2
        };
        let y_inside = if self.y1 <= self.y2 {
            y1 >= self.y1 && y2 <= self.y2
        } else {
            y1 <= self.y1 && y2 >= self.y2
        };
        x_inside && y_inside
    }

    /// Every covered cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellPoint> {
        let b = self.bounds();
        (b.top..=b.bottom).flat_map(move |row| (b.left..=b.right).map(move |col| CellPoint::new(col, row)))
    }

    /// Spreadsheet notation of the directed corners, e.g. `"B3"` or `"B3:D5"`.
    pub fn to_a1(&self) -> String {
        let anchor = format!("{}{}", column_to_letter(self.x1), self.y1);
        if self.is_single_cell() {
            anchor
        } else {
            format!("{}:{}{}", anchor, column_to_letter(self.x2), self.y2)
        }
    }
}

impl Bounds {
    #[inline]
    pub fn contains(&self, point: CellPoint) -> bool {
        (self.top..=self.bottom).contains(&point.row) && (self.left..=self.right).contains(&point.col)
    }

    /// True if the two ranges share at least one cell.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.top > other.bottom
            || self.bottom < other.top
            || self.left > other.right
            || self.right < other.left)
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.top <= other.top
            && self.left <= other.left
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_reversed_corners() {
        let rect = Rectangle::new(5, 7, 2, 3);
        let b = rect.bounds();
        assert_eq!((b.top, b.left, b.right, b.bottom), (3, 2, 5, 7));
        assert_eq!(b.width(), 4);
        assert_eq!(b.height(), 5);
        // corners are kept as given
        assert_eq!(rect.anchor(), CellPoint::new(5, 7));
        assert_eq!(rect.drag_corner(), CellPoint::new(2, 3));
    }

    #[test]
    fn test_contains() {
        let rect = Rectangle::new(4, 4, 2, 2);
        assert!(rect.contains(CellPoint::new(3, 3)));
        assert!(rect.contains(CellPoint::new(2, 4)));
        assert!(!rect.contains(CellPoint::new(5, 3)));
        assert!(!rect.contains(CellPoint::new(3, 1)));
    }

    #[test]
    fn test_encloses_point_in_every_orientation() {
        let point = Rectangle::cell(CellPoint::new(3, 3));
        assert!(Rectangle::new(2, 2, 4, 4).encloses(&point));
        assert!(Rectangle::new(4, 2, 2, 4).encloses(&point));
        assert!(Rectangle::new(2, 4, 4, 2).encloses(&point));
        assert!(Rectangle::new(4, 4, 2, 2).encloses(&point));
        assert!(!Rectangle::new(4, 4, 5, 5).encloses(&point));
        assert!(!Rectangle::new(5, 5, 4, 4).encloses(&point));
    }

    #[test]
    fn test_encloses_inner_candidate_in_any_orientation() {
        for stored in [Rectangle::new(1, 1, 5, 5), Rectangle::new(5, 5, 1, 1)] {
            assert!(stored.encloses(&Rectangle::new(2, 2, 3, 3)));
            assert!(stored.encloses(&Rectangle::new(3, 3, 2, 2)));
        }
    }

    #[test]
    fn test_encloses_depends_on_stored_orientation() {
        // x1 lies past the right edge; only the descending range checks it
        let candidate = Rectangle::new(7, 3, 3, 3);
        assert!(Rectangle::new(1, 1, 5, 5).encloses(&candidate));
        assert!(!Rectangle::new(5, 1, 1, 5).encloses(&candidate));
        assert_eq!(Rectangle::new(1, 1, 5, 5).bounds(), Rectangle::new(5, 1, 1, 5).bounds());
    }

    #[test]
    fn test_overlap_and_containment() {
        let a = Rectangle::new(1, 1, 4, 4).bounds();
        let b = Rectangle::new(3, 3, 2, 2).bounds();
        let c = Rectangle::new(5, 1, 6, 2).bounds();
        assert!(a.overlaps(&b));
        assert!(a.contains_bounds(&b));
        assert!(!b.contains_bounds(&a));
        assert!(!a.overlaps(&c));
        // touching edges share cells
        assert!(a.overlaps(&Rectangle::new(4, 4, 6, 6).bounds()));
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let cells: Vec<_> = Rectangle::new(3, 2, 2, 1).cells().collect();
        assert_eq!(
            cells,
            vec![
                CellPoint::new(2, 1),
                CellPoint::new(3, 1),
                CellPoint::new(2, 2),
                CellPoint::new(3, 2),
            ]
        );
    }

    #[test]
    fn test_to_a1() {
        assert_eq!(Rectangle::new(2, 3, 2, 3).to_a1(), "B3");
        assert_eq!(Rectangle::new(2, 3, 4, 5).to_a1(), "B3:D5");
        assert_eq!(Rectangle::new(28, 10, 1, 1).to_a1(), "AB10:A1");
    }
}
