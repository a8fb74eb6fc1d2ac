//! Linear undo/redo history of committed images plus the pending adjustments.
//!
//! `EditSession` is the single owner of editing state. Every transition that
//! moves the cursor (commit, undo, redo, reset) or replaces the image
//! (upload, start new) also discards pending adjustments.
use crate::editor::adjustments::{Adjustment, AdjustmentSet};
use crate::editor::image::ImageState;

const DEFAULT_DOWNLOAD_NAME: &str = "image.png";

#[derive(Debug, Default)]
pub struct EditSession {
    history: Vec<ImageState>,
    cursor: Option<usize>,
    adjustments: AdjustmentSet,
    error: Option<String>,
    source_name: Option<String>,
    epoch: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly uploaded original.
    pub fn upload(&mut self, image: ImageState, name: Option<String>) {
        tracing::info!(mime = image.mime_type(), bytes = image.data().len(), "image uploaded");
        self.history = vec![image];
        self.cursor = Some(0);
        self.adjustments.reset();
        self.error = None;
        self.source_name = name;
        self.epoch += 1;
    }

    /// Append after the cursor, dropping any redo tail.
    pub fn commit(&mut self, image: ImageState) {
        let keep = self.cursor.map(|c| c + 1).unwrap_or(0);
        if keep < self.history.len() {
            tracing::debug!(discarded = self.history.len() - keep, "truncating redo tail");
        }
        self.history.truncate(keep);
        self.history.push(image);
        self.cursor = Some(self.history.len() - 1);
        self.adjustments.reset();
    }

    pub fn undo(&mut self) {
        if let Some(c) = self.cursor.filter(|c| *c > 0) {
            self.cursor = Some(c - 1);
            self.adjustments.reset();
        }
    }

    pub fn redo(&mut self) {
        if let Some(c) = self.cursor.filter(|c| c + 1 < self.history.len()) {
            self.cursor = Some(c + 1);
            self.adjustments.reset();
        }
    }

    /// Back to the original without truncating.
    pub fn reset(&mut self) {
        if !self.history.is_empty() {
            self.cursor = Some(0);
            self.adjustments.reset();
        }
    }

    pub fn start_new(&mut self) {
        self.history.clear();
        self.cursor = None;
        self.adjustments.reset();
        self.error = None;
        self.source_name = None;
        self.epoch += 1;
    }

    pub fn current(&self) -> Option<&ImageState> {
        self.cursor.and_then(|c| self.history.get(c))
    }

    pub fn original(&self) -> Option<&ImageState> {
        self.history.first()
    }

    pub fn history(&self) -> &[ImageState] {
        &self.history
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.history.len())
    }

    pub fn can_reset(&self) -> bool {
        self.can_undo() || self.has_pending_adjustments()
    }

    pub fn has_pending_adjustments(&self) -> bool {
        !self.adjustments.is_default()
    }

    pub fn adjustments(&self) -> &AdjustmentSet {
        &self.adjustments
    }

    pub fn set_adjustment(&mut self, adjustment: Adjustment, value: i32) {
        self.adjustments.set(adjustment, value);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The single message slot; a new message replaces the old one.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn download_name(&self) -> String {
        format!("edited-{}", self.source_name.as_deref().unwrap_or(DEFAULT_DOWNLOAD_NAME))
    }

    /// Bumped whenever the whole session is replaced.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
