//! Click-to-select lookup of annotation blocks.

use crate::annotation::{AnnotationBlock, AnnotationStore, BlockId};
use crate::grid::CellPoint;
use crate::rectangle::Rectangle;

/// A block hit by a point query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMatch {
    pub id: BlockId,
    /// Position of the block in store order.
    pub index: usize,
    /// Which of the block's ranges contained the point.
    pub range_index: usize,
}

/// Find the first block whose ranges contain `candidate`.
///
/// Blocks are tested in store order, so when regions overlap the earlier
/// block wins.
pub fn match_block(store: &AnnotationStore, candidate: &Rectangle) -> Option<BlockMatch> {
    store.iter().enumerate().find_map(|(index, block)| {
        block
            .selections
            .iter()
            .position(|range| range.encloses(candidate))
            .map(|range_index| BlockMatch { id: block.id(), index, range_index })
    })
}

/// Point variant of [`match_block`].
pub fn block_at(store: &AnnotationStore, point: CellPoint) -> Option<&AnnotationBlock> {
    match_block(store, &Rectangle::cell(point)).and_then(|m| store.blocks().get(m.index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AnnotationStore {
        AnnotationStore::from_blocks(vec![
            AnnotationBlock::new(vec![Rectangle::new(1, 2, 1, 10)]).with_role("mainSubject"),
            AnnotationBlock::new(vec![Rectangle::new(4, 10, 2, 2), Rectangle::new(6, 2, 6, 4)])
                .with_role("dependentVar"),
            AnnotationBlock::new(vec![Rectangle::new(3, 3, 3, 3)]).with_role("shadowed"),
        ])
    }

    #[test]
    fn test_point_inside_block() {
        let store = store();
        let hit = match_block(&store, &Rectangle::cell(CellPoint::new(1, 5))).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.id, store.blocks()[0].id());
    }

    #[test]
    fn test_point_inside_reversed_range() {
        let store = store();
        let hit = match_block(&store, &Rectangle::cell(CellPoint::new(2, 10))).unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.range_index, 0);

        let hit = match_block(&store, &Rectangle::cell(CellPoint::new(6, 3))).unwrap();
        assert_eq!((hit.index, hit.range_index), (1, 1));
    }

    #[test]
    fn test_point_outside_every_block() {
        let store = store();
        assert!(match_block(&store, &Rectangle::cell(CellPoint::new(5, 5))).is_none());
        assert!(match_block(&store, &Rectangle::cell(CellPoint::new(1, 1))).is_none());
        assert!(block_at(&AnnotationStore::new(), CellPoint::new(1, 1)).is_none());
    }

    #[test]
    fn test_earlier_block_wins() {
        let store = store();
        let block = block_at(&store, CellPoint::new(3, 3)).unwrap();
        assert_eq!(block.role(), Some("dependentVar"));
    }
}
