//! Feeds a recorded script through an annotation session.

use crate::script::{Script, ScriptError, ScriptStep};
use tablemark_core::{
    AnnotationSession, AnnotationStorage, CellPoint, EditorConfig, Rectangle, SessionEvent, TableGrid, load_blocks,
    persist,
};

/// A session bound to a project and its storage backend.
pub struct Replay<S: AnnotationStorage> {
    session: AnnotationSession,
    storage: S,
    project: String,
    grid: TableGrid,
    /// Messages the user would have seen in an alert.
    alerts: Vec<String>,
}

impl<S: AnnotationStorage> Replay<S> {
    /// Open the script's project, restoring any stored annotations.
    pub async fn open(config: EditorConfig, script: &Script, storage: S) -> Result<Self, ScriptError> {
        let grid = script.table();
        let mut session = AnnotationSession::for_grid(config, &grid);
        let blocks = load_blocks(&storage, &script.project).await?;
        log::info!("Loaded {} annotation blocks for {}", blocks.len(), script.project);
        session.replace_blocks(blocks);
        session.take_events();

        Ok(Self {
            session,
            storage,
            project: script.project.clone(),
            grid,
            alerts: Vec::new(),
        })
    }

    pub fn session(&self) -> &AnnotationSession {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Apply one step and return the notifications it produced.
    ///
    /// A failed save is recorded as an alert; the local store keeps the change.
    pub async fn apply(&mut self, step: &ScriptStep) -> Result<Vec<SessionEvent>, ScriptError> {
        let payload = match step {
            ScriptStep::Pointer { event } => {
                self.session.handle_pointer(*event);
                None
            }
            ScriptStep::Key { .. } => {
                if let Some(event) = step.key_event() {
                    self.session.handle_key(event);
                }
                None
            }
            ScriptStep::Submit { fields } => self.session.submit_block(fields.clone())?,
            ScriptStep::Delete => self.session.delete_selected_block()?,
            ScriptStep::Close => {
                self.session.close_form();
                None
            }
        };

        if let Some(payload) = payload {
            if let Err(err) = persist(&self.storage, &self.project, &payload).await {
                self.alerts.push(err.to_string());
            }
        }
        Ok(self.session.take_events())
    }

    pub async fn run(&mut self, steps: &[ScriptStep]) -> Result<(), ScriptError> {
        for (index, step) in steps.iter().enumerate() {
            let events = self.apply(step).await?;
            if !events.is_empty() {
                log::debug!("Step {}: {:?}", index, events);
            }
        }
        Ok(())
    }

    /// Text report of the final state: status line, then every decorated
    /// cell in reading order with its content and class names.
    pub fn render(&self) -> String {
        let map = self.session.decorations();
        let mut cells: Vec<CellPoint> = map.iter().map(|(point, _)| *point).collect();
        cells.sort_by_key(|p| (p.row, p.col));

        let mut out = String::new();
        out.push_str(&self.session.status_text());
        out.push('\n');
        out.push_str(&format!("Blocks: {}\n", self.session.store().len()));
        for point in cells {
            let text = self.grid.cell(point).unwrap_or("");
            out.push_str(&format!(
                "{:<6} {:<16} {}\n",
                Rectangle::cell(point).to_a1(),
                text,
                map.class_names(point).join(" ")
            ));
        }
        out
    }
}
