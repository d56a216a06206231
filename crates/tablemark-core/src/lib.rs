//! Tablemark Core Library
//!
//! Grid selection and annotation-block engine for marking up regions of a
//! spreadsheet-like table. Platform agnostic: the host feeds pointer and
//! keyboard events in and reads decorations back out.

pub mod annotation;
pub mod config;
pub mod grid;
pub mod highlight;
pub mod input;
pub mod keyboard;
pub mod matcher;
pub mod rectangle;
pub mod selection;
pub mod session;
pub mod storage;

pub use annotation::{AnnotationBlock, AnnotationStore, BlockId};
pub use config::{ConfigError, EditorConfig, Platform};
pub use grid::{CellPoint, GridSize, TableGrid, column_to_letter};
pub use highlight::{CellDecoration, Decoration, DecorationMap, HighlightProjector};
pub use input::{ArrowKey, KeyEvent, Modifiers, PointerEvent};
pub use keyboard::{KeyboardNavigator, Motion, Step};
pub use matcher::{BlockMatch, block_at, match_block};
pub use rectangle::{Bounds, Rectangle};
pub use selection::{SelectionSet, SelectionState, resolve_overlaps};
pub use session::{AnnotationSession, SessionEvent};
pub use storage::{
    AnnotationPayload, AnnotationStorage, MemoryStorage, StorageError, StorageResult, SubmitError, load_blocks,
    persist,
};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
