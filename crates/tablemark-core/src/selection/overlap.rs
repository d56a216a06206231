//! Post-gesture cleanup of overlapping ranges.

use super::SelectionSet;
use crate::rectangle::Rectangle;

/// Remove redundant ranges from the selection.
///
/// Pairs `(i, j)` are scanned in order. For the first overlapping pair found,
/// range `i` is dropped if `j` contains it, otherwise range `j` is dropped,
/// and the scan restarts. Disjoint ranges are never touched. This is not a
/// union merge: of two partially overlapping ranges, the one compared second
/// is discarded.
///
/// Returns the removed ranges in removal order.
pub fn resolve_overlaps(selection: &mut SelectionSet) -> Vec<Rectangle> {
    let mut removed = Vec::new();
    while let Some(index) = find_redundant(selection.ranges()) {
        let range = selection.remove(index);
        log::debug!("Dropped overlapping range {}", range.to_a1());
        removed.push(range);
    }
    removed
}

/// Index of the first range that must go, if any.
fn find_redundant(ranges: &[Rectangle]) -> Option<usize> {
    for (i, a) in ranges.iter().enumerate() {
        let a_bounds = a.bounds();
        for (j, b) in ranges.iter().enumerate() {
            if i == j {
                continue;
            }
            let b_bounds = b.bounds();
            if !a_bounds.overlaps(&b_bounds) {
                continue;
            }
            return Some(if b_bounds.contains_bounds(&a_bounds) { i } else { j });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ranges: &[Rectangle]) -> SelectionSet {
        SelectionSet::from_ranges(ranges.to_vec())
    }

    #[test]
    fn test_contained_range_is_removed() {
        let outer = Rectangle::new(1, 1, 5, 5);
        let inner = Rectangle::new(2, 2, 3, 3);

        let mut selection = set(&[inner, outer]);
        assert_eq!(resolve_overlaps(&mut selection), vec![inner]);
        assert_eq!(selection.ranges(), &[outer]);

        // order does not matter
        let mut selection = set(&[outer, inner]);
        assert_eq!(resolve_overlaps(&mut selection), vec![inner]);
        assert_eq!(selection.ranges(), &[outer]);
    }

    #[test]
    fn test_containment_uses_normalized_bounds() {
        let outer = Rectangle::new(5, 5, 1, 1);
        let inner = Rectangle::new(3, 4, 2, 2);
        let mut selection = set(&[inner, outer]);
        resolve_overlaps(&mut selection);
        assert_eq!(selection.ranges(), &[outer]);
    }

    #[test]
    fn test_disjoint_ranges_untouched() {
        let a = Rectangle::new(1, 1, 2, 2);
        let b = Rectangle::new(4, 1, 5, 2);
        let c = Rectangle::new(1, 4, 1, 9);
        let mut selection = set(&[a, b, c]);
        assert!(resolve_overlaps(&mut selection).is_empty());
        assert_eq!(selection.ranges(), &[a, b, c]);
    }

    #[test]
    fn test_identical_ranges_collapse_to_one() {
        let a = Rectangle::new(2, 2, 3, 3);
        let mut selection = set(&[a, a]);
        assert_eq!(resolve_overlaps(&mut selection).len(), 1);
        assert_eq!(selection.ranges(), &[a]);
    }

    #[test]
    fn test_partial_overlap_drops_later_range() {
        let a = Rectangle::new(1, 1, 3, 3);
        let b = Rectangle::new(2, 2, 5, 5);
        let mut selection = set(&[a, b]);
        assert_eq!(resolve_overlaps(&mut selection), vec![b]);
        assert_eq!(selection.ranges(), &[a]);
    }

    #[test]
    fn test_chain_of_containment() {
        let big = Rectangle::new(1, 1, 10, 10);
        let mid = Rectangle::new(2, 2, 6, 6);
        let small = Rectangle::new(3, 3, 3, 3);
        let far = Rectangle::new(12, 12, 12, 12);
        let mut selection = set(&[small, mid, far, big]);
        let removed = resolve_overlaps(&mut selection);
        assert_eq!(removed.len(), 2);
        assert_eq!(selection.ranges(), &[far, big]);
    }
}
