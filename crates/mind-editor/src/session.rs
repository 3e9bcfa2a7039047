//! Editing session: the application context a host window drives.
//!
//! Holds the active map, the controller, the configuration, and the typed
//! filename. The host forwards input through [`Session::handle_event`],
//! mirrors [`Session::text_input_active`] into the platform text-input
//! state, and calls [`Session::paint`] once per frame.

use crate::controller::{Action, Controller, FilenameEdit};
use crate::input::InputEvent;
use mind_core::{
    ConfigError, EditorConfig, FixedMetrics, MindMap, PersistError, TextMeasure,
};
use mind_render::{Canvas, FilenameLabel, FrameView, Overlay, paint_frame};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub struct Session {
    map: MindMap,
    controller: Controller,
    config: EditorConfig,
    /// Map name without extension, as typed in the filename label.
    filename: String,
    text_input: bool,
    /// Last save/load outcome, for display.
    status: Option<String>,
    measure: Box<dyn TextMeasure>,
}

impl Session {
    /// Session measuring text with fixed metrics.
    pub fn new(config: EditorConfig, width: f32, height: f32) -> Self {
        Self::with_measure(config, width, height, Box::new(FixedMetrics::default()))
    }

    pub fn with_measure(
        config: EditorConfig,
        width: f32,
        height: f32,
        measure: Box<dyn TextMeasure>,
    ) -> Self {
        Self {
            map: MindMap::new(),
            controller: Controller::new(&config, width, height),
            filename: config.default_filename.clone(),
            config,
            text_input: false,
            status: None,
            measure,
        }
    }

    pub fn map(&self) -> &MindMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MindMap {
        &mut self.map
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether the host should have platform text input enabled.
    pub fn text_input_active(&self) -> bool {
        self.text_input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Path the map is saved to and loaded from.
    pub fn map_path(&self) -> Result<PathBuf, ConfigError> {
        self.config.map_path(&self.filename)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &InputEvent) {
        let label = self.filename_label();
        let actions = self.controller.handle(event, &self.map, &label);
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Mutate(mutation) => {
                self.map.apply_mutation(mutation);
            }
            Action::EditFilename(FilenameEdit::Append(text)) => self.filename.push_str(&text),
            Action::EditFilename(FilenameEdit::Pop) => {
                self.filename.pop();
            }
            Action::Save => self.report("saved", Self::save),
            Action::Load => self.report("loaded", Self::load),
            Action::StartTextInput => self.text_input = true,
            Action::StopTextInput => self.text_input = false,
        }
    }

    fn report(&mut self, verb: &str, op: fn(&mut Self) -> Result<PathBuf, SessionError>) {
        self.status = Some(match op(self) {
            Ok(path) => format!("{verb} {}", path.display()),
            Err(e) => {
                log::warn!("{e}");
                e.to_string()
            }
        });
    }

    // ─── Files ───────────────────────────────────────────────────────────

    /// Save the active map under the current filename.
    pub fn save(&mut self) -> Result<PathBuf, SessionError> {
        let path = self.map_path()?;
        self.map.save(&path)?;
        Ok(path)
    }

    /// Replace the active map with the one saved under the current filename.
    ///
    /// On failure the active map is left as it was. On success the zoom
    /// resets to 100% and the pan comes from the file.
    pub fn load(&mut self) -> Result<PathBuf, SessionError> {
        let path = self.map_path()?;
        let mut map = MindMap::load(&path)?;
        map.refresh_layouts(self.measure.as_ref());
        self.map = map;
        self.controller.viewport.reset_zoom();
        self.controller.reset_gestures();
        Ok(path)
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    pub fn filename_label(&self) -> FilenameLabel {
        FilenameLabel::new(&self.config.map_file_name(&self.filename), self.measure.as_ref())
    }

    pub fn frame_view(&self) -> FrameView {
        let viewport = &self.controller.viewport;
        FrameView {
            width: viewport.width,
            height: viewport.height,
            zoom: viewport.zoom(),
            pan: self.controller.effective_pan(self.map.pan),
        }
    }

    /// Screen-space labels for the current frame, including the status line.
    pub fn overlay(&self) -> Overlay {
        let measure = self.measure.as_ref();
        Overlay::new(
            &self.config.map_file_name(&self.filename),
            self.controller.viewport.zoom_percent(),
            measure,
        )
        .with_status(self.status(), measure)
    }

    /// Refresh stale node layouts, then paint the frame.
    pub fn paint(&mut self, canvas: &mut dyn Canvas) {
        self.map.refresh_layouts(self.measure.as_ref());
        let overlay = self.overlay();
        paint_frame(canvas, &self.map, &self.frame_view(), &overlay);
    }
}
