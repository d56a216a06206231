//! Per-cell decoration tags derived from the selection and the block store.
//!
//! Decorations are recomputed from scratch on every change; nothing is
//! patched in place. Hosts that want incremental redraws diff two maps with
//! [`DecorationMap::changed_cells`].

use crate::annotation::{AnnotationBlock, AnnotationStore};
use crate::grid::{CellPoint, GridSize};
use crate::selection::SelectionSet;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single visual tag on a cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decoration {
    /// Cell is part of the live selection.
    Active,
    /// Role of the block being edited, on live-selected cells.
    ActiveRole(String),
    /// Type of the block being edited, on live-selected cells.
    ActiveType(String),
    /// Role of a saved block covering the cell.
    Role(String),
    /// Type of a saved block covering the cell.
    Type(String),
    BorderTop,
    BorderLeft,
    BorderRight,
    BorderBottom,
    /// Bottom-right cell of a live range.
    ResizeCorner,
}

impl Decoration {
    /// Class name used by the presentation layer.
    pub fn class_name(&self) -> String {
        match self {
            Decoration::Active => "active".to_string(),
            Decoration::ActiveRole(role) => format!("active-role-{}", role),
            Decoration::ActiveType(type_) => format!("active-type-{}", type_),
            Decoration::Role(role) => format!("role-{}", role),
            Decoration::Type(type_) => format!("type-{}", type_),
            Decoration::BorderTop => "cell-border-top".to_string(),
            Decoration::BorderLeft => "cell-border-left".to_string(),
            Decoration::BorderRight => "cell-border-right".to_string(),
            Decoration::BorderBottom => "cell-border-bottom".to_string(),
            Decoration::ResizeCorner => "cell-resize-corner".to_string(),
        }
    }

    /// The saved-block tag matching a live role/type tag.
    pub fn persisted(&self) -> Option<Decoration> {
        match self {
            Decoration::ActiveRole(role) => Some(Decoration::Role(role.clone())),
            Decoration::ActiveType(type_) => Some(Decoration::Type(type_.clone())),
            _ => None,
        }
    }

    /// Tags that only exist while a selection is live.
    pub fn is_live(&self) -> bool {
        !matches!(self, Decoration::Role(_) | Decoration::Type(_))
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name())
    }
}

/// The tag set of one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellDecoration {
    tags: BTreeSet<Decoration>,
}

impl CellDecoration {
    pub fn tags(&self) -> &BTreeSet<Decoration> {
        &self.tags
    }

    pub fn has(&self, tag: &Decoration) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.tags.iter().map(Decoration::class_name).collect()
    }

    fn insert(&mut self, tag: Decoration) {
        self.tags.insert(tag);
    }
}

/// Decorations for every cell that has at least one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationMap {
    cells: BTreeMap<CellPoint, CellDecoration>,
}

impl DecorationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, point: CellPoint) -> Option<&CellDecoration> {
        self.cells.get(&point)
    }

    /// Check if a cell carries a tag.
    pub fn has(&self, point: CellPoint, tag: &Decoration) -> bool {
        self.cells.get(&point).is_some_and(|cell| cell.has(tag))
    }

    pub fn class_names(&self, point: CellPoint) -> Vec<String> {
        self.cells.get(&point).map(CellDecoration::class_names).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellPoint, &CellDecoration)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells tagged with `tag`, ordered by column then row.
    pub fn cells_with(&self, tag: &Decoration) -> Vec<CellPoint> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.has(tag))
            .map(|(point, _)| *point)
            .collect()
    }

    /// Cells whose tag sets differ between `self` and `previous`.
    pub fn changed_cells(&self, previous: &DecorationMap) -> Vec<CellPoint> {
        let points: BTreeSet<&CellPoint> = self.cells.keys().chain(previous.cells.keys()).collect();
        points
            .into_iter()
            .filter(|point| self.cells.get(*point) != previous.cells.get(*point))
            .copied()
            .collect()
    }

    fn tag(&mut self, point: CellPoint, tag: Decoration) {
        self.cells.entry(point).or_default().insert(tag);
    }

    /// Overwrite the tags of a cell; an empty set removes it.
    fn set(&mut self, point: CellPoint, tags: &[Decoration]) {
        if tags.is_empty() {
            self.cells.remove(&point);
        } else {
            let cell = CellDecoration { tags: tags.iter().cloned().collect() };
            self.cells.insert(point, cell);
        }
    }

    /// Union of both maps, cell by cell.
    fn merge(mut self, other: &DecorationMap) -> Self {
        for (point, cell) in &other.cells {
            let target = self.cells.entry(*point).or_default();
            target.tags.extend(cell.tags.iter().cloned());
        }
        self
    }
}

/// Tags contributed by saved blocks.
///
/// Each covered cell takes the role/type of the last block in store order
/// that covers it; a block without role or type blanks the cells it covers.
pub fn project_blocks(store: &AnnotationStore, size: GridSize) -> DecorationMap {
    let mut map = DecorationMap::new();
    for block in store {
        let mut tags = Vec::new();
        if let Some(role) = block.role() {
            tags.push(Decoration::Role(role.to_string()));
        }
        if let Some(type_) = block.type_() {
            tags.push(Decoration::Type(type_.to_string()));
        }
        for range in &block.selections {
            for point in range.cells().filter(|p| size.contains(*p)) {
                map.set(point, &tags);
            }
        }
    }
    map
}

/// Tags for the live selection: `active`, the edited block's role/type and
/// the border markers of each range.
pub fn project_selection(
    selection: &SelectionSet,
    editing: Option<&AnnotationBlock>,
    size: GridSize,
) -> DecorationMap {
    let mut extra = Vec::new();
    if let Some(block) = editing {
        if let Some(role) = block.role() {
            extra.push(Decoration::ActiveRole(role.to_string()));
        }
        if let Some(type_) = block.type_() {
            extra.push(Decoration::ActiveType(type_.to_string()));
        }
    }

    let mut map = DecorationMap::new();
    for range in selection {
        let b = range.bounds();
        for point in range.cells().filter(|p| size.contains(*p)) {
            map.tag(point, Decoration::Active);
            for tag in &extra {
                map.tag(point, tag.clone());
            }
            if point.row == b.top {
                map.tag(point, Decoration::BorderTop);
            }
            if point.col == b.left {
                map.tag(point, Decoration::BorderLeft);
            }
            if point.col == b.right {
                map.tag(point, Decoration::BorderRight);
            }
            if point.row == b.bottom {
                map.tag(point, Decoration::BorderBottom);
            }
            if point.row == b.bottom && point.col == b.right {
                map.tag(point, Decoration::ResizeCorner);
            }
        }
    }
    map
}

/// Keeps the block layer between store changes and combines it with the
/// live layer on every redraw.
#[derive(Debug, Clone)]
pub struct HighlightProjector {
    size: GridSize,
    blocks: DecorationMap,
}

impl HighlightProjector {
    pub fn new(size: GridSize) -> Self {
        Self { size, blocks: DecorationMap::new() }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Recompute the block layer. Call after any store change.
    pub fn refresh_blocks(&mut self, store: &AnnotationStore) {
        self.blocks = project_blocks(store, self.size);
        log::trace!("Block layer covers {} cells", self.blocks.len());
    }

    pub fn block_layer(&self) -> &DecorationMap {
        &self.blocks
    }

    /// Full decoration map for the current state.
    pub fn render(&self, selection: &SelectionSet, editing: Option<&AnnotationBlock>) -> DecorationMap {
        self.blocks.clone().merge(&project_selection(selection, editing, self.size))
    }
}
