//! Annotation editing session: owns the selection, the block store and the
//! gesture state, and turns input events into state changes.
//!
//! All handlers run synchronously on the caller's thread. A key press that
//! arrives mid-drag is applied to whatever the last handler left behind.

use crate::annotation::{AnnotationBlock, AnnotationStore, BlockId};
use crate::config::EditorConfig;
use crate::grid::{CellPoint, GridSize, TableGrid};
use crate::highlight::{DecorationMap, HighlightProjector};
use crate::input::{KeyEvent, PointerEvent};
use crate::keyboard::{KeyboardNavigator, Motion};
use crate::matcher::match_block;
use crate::rectangle::Rectangle;
use crate::selection::{SelectionSet, SelectionState, resolve_overlaps};
use crate::storage::{AnnotationPayload, StorageResult};
use std::collections::BTreeMap;

/// Notifications for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Live selection changed; decorations need a redraw.
    SelectionChanged,
    /// A pointer gesture finished; open the annotation form.
    GestureCompleted,
    /// A click or arrow key landed on a saved block; open the form pre-filled.
    BlockMatched(BlockId),
    /// Blocks were added, replaced, removed or reloaded.
    BlocksChanged,
}

/// State of one annotation editing session.
pub struct AnnotationSession {
    config: EditorConfig,
    size: GridSize,
    selection: SelectionSet,
    state: SelectionState,
    store: AnnotationStore,
    /// Block whose ranges are shown as the live selection, if any.
    selected_block: Option<BlockId>,
    projector: HighlightProjector,
    /// Pending notifications for the host.
    events: Vec<SessionEvent>,
}

impl AnnotationSession {
    pub fn new(config: EditorConfig, size: GridSize) -> Self {
        Self {
            config,
            size,
            selection: SelectionSet::new(),
            state: SelectionState::Idle,
            store: AnnotationStore::new(),
            selected_block: None,
            projector: HighlightProjector::new(size),
            events: Vec::new(),
        }
    }

    /// Session over a table, padded to the configured minimum size.
    pub fn for_grid(config: EditorConfig, grid: &TableGrid) -> Self {
        let size = grid.size(&config);
        Self::new(config, size)
    }

    // --- read paths ---

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn selected_block(&self) -> Option<&AnnotationBlock> {
        self.selected_block.and_then(|id| self.store.get(id))
    }

    /// Decorations for every cell, recomputed from the current state.
    pub fn decorations(&self) -> DecorationMap {
        self.projector.render(&self.selection, self.selected_block())
    }

    /// Status line describing the live selection.
    pub fn status_text(&self) -> String {
        self.selection.describe()
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // --- input ---

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { cell, modifiers } => {
                if !self.size.contains(cell) {
                    log::debug!("Ignoring pointer down outside grid at {:?}", cell);
                    return;
                }
                let additional = self.config.platform.is_additional_selection(&modifiers);
                let extend = modifiers.shift && !self.selection.is_empty();
                if !additional && !extend {
                    self.start_plain(cell);
                    return;
                }
                self.selected_block = None;
                if self.select_block_at(cell) {
                    return;
                }
                if additional {
                    self.start_additional(cell);
                } else {
                    self.extend_shift(cell);
                }
            }
            PointerEvent::Move { cell, modifiers } => {
                if !modifiers.shift {
                    self.update_drag(self.size.clamp(cell));
                }
            }
            PointerEvent::Up => self.end_drag(),
            PointerEvent::Cancel => self.cancel_gesture(),
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        let Some(&first) = self.selection.first() else {
            return;
        };
        let navigator = KeyboardNavigator::new(self.size);
        let Some(step) = navigator.step(first, event.key, event.modifiers.shift, self.state.prev_direction()) else {
            return;
        };

        self.selection.replace(step.range);
        self.events.push(SessionEvent::SelectionChanged);

        match (step.motion, step.prev_direction) {
            (Motion::Moved, _) => {
                self.state = SelectionState::Idle;
                self.selected_block = None;
                self.select_block_at(step.range.anchor());
            }
            (_, Some(prev_direction)) => {
                self.state = SelectionState::Extending { prev_direction };
            }
            (_, None) => {
                self.state = SelectionState::Idle;
            }
        }
    }

    // --- selection protocol ---

    /// Plain pointer-down: select a saved block under `point`, or start a new
    /// single-range drag there. Returns true if a block was selected.
    pub fn start_plain(&mut self, point: CellPoint) -> bool {
        self.selected_block = None;
        if self.select_block_at(point) {
            return true;
        }
        self.begin_drag(point);
        false
    }

    /// Add an independent range at `point` and drag it.
    pub fn start_additional(&mut self, point: CellPoint) {
        self.selection.push(Rectangle::cell(point));
        self.state = SelectionState::Dragging { target: point };
        self.events.push(SessionEvent::SelectionChanged);
        log::debug!("Started additional range at {}", Rectangle::cell(point).to_a1());
    }

    /// Shift-click: grow the last range toward `point`.
    pub fn extend_shift(&mut self, point: CellPoint) {
        if self.selection.extend_last_toward(point) {
            self.state = SelectionState::Dragging { target: point };
            self.events.push(SessionEvent::SelectionChanged);
        }
    }

    /// Follow the pointer with the last range's drag corner.
    /// Returns false when not dragging or the pointer stayed on the same cell.
    pub fn update_drag(&mut self, point: CellPoint) -> bool {
        let SelectionState::Dragging { target } = self.state else {
            return false;
        };
        if target == point {
            return false;
        }
        self.selection.set_drag_corner(point);
        self.state = SelectionState::Dragging { target: point };
        self.events.push(SessionEvent::SelectionChanged);
        log::trace!("Drag corner moved to {:?}", point);
        true
    }

    /// Finish a drag: drop redundant ranges and ask for the annotation form.
    pub fn end_drag(&mut self) {
        if !self.state.is_dragging() {
            return;
        }
        self.state = SelectionState::Idle;
        let removed = resolve_overlaps(&mut self.selection);
        if !removed.is_empty() {
            log::debug!("Removed {} overlapping ranges", removed.len());
        }
        log::debug!("{}", self.selection.describe());
        self.events.push(SessionEvent::SelectionChanged);
        self.events.push(SessionEvent::GestureCompleted);
    }

    /// Abandon a drag whose pointer-up will never arrive.
    pub fn cancel_gesture(&mut self) {
        if self.state.is_dragging() {
            log::debug!("Drag cancelled");
            self.state = SelectionState::Idle;
        }
    }

    /// The annotation form was dismissed.
    pub fn close_form(&mut self) {
        self.selected_block = None;
        self.selection.clear();
        self.state = SelectionState::Idle;
        self.events.push(SessionEvent::SelectionChanged);
    }

    // --- block store ---

    /// Save the live selection as a block with the submitted form values.
    ///
    /// Replaces the selected block in place, or appends a new one. The store
    /// is updated before anything is persisted; the returned payload is the
    /// full block list to hand to storage. `None` if nothing is selected.
    pub fn submit_block(&mut self, values: BTreeMap<String, String>) -> StorageResult<Option<AnnotationPayload>> {
        if self.selection.is_empty() {
            return Ok(None);
        }
        let block = AnnotationBlock::from_fields(self.selection.to_vec(), values);
        match self.selected_block {
            Some(id) if self.store.replace(id, block.clone()) => {
                log::info!("Updated annotation block {}", id);
            }
            _ => {
                let id = self.store.add(block);
                log::info!("Added annotation block {}", id);
            }
        }
        self.blocks_changed();
        self.close_form();
        AnnotationPayload::from_blocks(self.store.blocks()).map(Some)
    }

    /// Delete the selected block; returns the payload of the remaining blocks.
    pub fn delete_selected_block(&mut self) -> StorageResult<Option<AnnotationPayload>> {
        let Some(id) = self.selected_block else {
            return Ok(None);
        };
        if self.store.remove(id).is_none() {
            return Ok(None);
        }
        log::info!("Deleted annotation block {}", id);
        self.blocks_changed();
        self.close_form();
        AnnotationPayload::from_blocks(self.store.blocks()).map(Some)
    }

    /// Replace the whole store, e.g. after loading a project.
    pub fn replace_blocks(&mut self, blocks: Vec<AnnotationBlock>) {
        self.store = AnnotationStore::from_blocks(blocks);
        self.selected_block = None;
        self.blocks_changed();
    }

    /// Change the visible grid size after the table was reloaded.
    pub fn resize(&mut self, size: GridSize) {
        self.size = size;
        self.projector = HighlightProjector::new(size);
        self.projector.refresh_blocks(&self.store);
        self.events.push(SessionEvent::SelectionChanged);
    }

    fn begin_drag(&mut self, point: CellPoint) {
        self.selection.replace(Rectangle::cell(point));
        self.state = SelectionState::Dragging { target: point };
        self.events.push(SessionEvent::SelectionChanged);
        log::debug!("Started range at {}", Rectangle::cell(point).to_a1());
    }

    /// Show the block under `point` as the live selection.
    fn select_block_at(&mut self, point: CellPoint) -> bool {
        let Some(hit) = match_block(&self.store, &Rectangle::cell(point)) else {
            return false;
        };
        let Some(block) = self.store.get(hit.id) else {
            return false;
        };
        self.selection = SelectionSet::from_ranges(block.selections.clone());
        self.selected_block = Some(hit.id);
        self.state = SelectionState::Idle;
        self.events.push(SessionEvent::SelectionChanged);
        self.events.push(SessionEvent::BlockMatched(hit.id));
        log::debug!("Matched annotation block {} at {:?}", hit.id, point);
        true
    }

    fn blocks_changed(&mut self) {
        self.projector.refresh_blocks(&self.store);
        self.events.push(SessionEvent::BlocksChanged);
    }
}
