//! Runs model edits against the session, one at a time.
//!
//! The orchestrator owns the in-flight guard: a second `apply_edit` while
//! one is pending is rejected with `AppError::EditInProgress`, so results
//! always commit in the order their requests were issued. A result whose
//! session was replaced meanwhile (new upload or start over) is dropped.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::editor::adjustments::Adjustment;
use crate::editor::history::EditSession;
use crate::editor::image::ImageState;
use crate::error::{AppError, AppResult};
use crate::prompt::adjustments::build_adjustment_prompt;
use crate::prompt::presets::{Panel, QuickAction};
use crate::prompt::suggestions::SuggestionKind;

/// The remote edit operations the orchestrator depends on.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    async fn edit_image(&self, image: &ImageState, prompt: &str) -> AppResult<ImageState>;

    async fn suggest(&self, kind: SuggestionKind, theme: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edited image is now the current state.
    Committed,
    /// Nothing to submit.
    Skipped,
    /// The session was replaced while the request was pending.
    Discarded,
}

struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct EditOrchestrator<E> {
    editor: E,
    session: Arc<RwLock<EditSession>>,
    in_flight: AtomicBool,
}

impl<E: ImageEditor> EditOrchestrator<E> {
    pub fn new(editor: E) -> Self {
        Self::with_session(editor, Arc::new(RwLock::new(EditSession::new())))
    }

    pub fn with_session(editor: E, session: Arc<RwLock<EditSession>>) -> Self {
        EditOrchestrator { editor, session, in_flight: AtomicBool::new(false) }
    }

    /// Shared handle for views that render the session.
    pub fn session(&self) -> Arc<RwLock<EditSession>> {
        Arc::clone(&self.session)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> AppResult<FlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| FlightGuard(&self.in_flight))
            .map_err(|_| AppError::EditInProgress)
    }

    fn ensure_idle(&self) -> AppResult<()> {
        if self.is_busy() {
            return Err(AppError::EditInProgress);
        }
        Ok(())
    }

    pub async fn upload(&self, image: ImageState, name: Option<String>) -> AppResult<()> {
        self.ensure_idle()?;
        self.session.write().await.upload(image, name);
        Ok(())
    }

    /// Drop the whole session; a pending edit's result will be discarded.
    pub async fn start_new(&self) {
        self.session.write().await.start_new();
    }

    pub async fn undo(&self) -> AppResult<()> {
        self.ensure_idle()?;
        self.session.write().await.undo();
        Ok(())
    }

    pub async fn redo(&self) -> AppResult<()> {
        self.ensure_idle()?;
        self.session.write().await.redo();
        Ok(())
    }

    pub async fn reset(&self) -> AppResult<()> {
        self.ensure_idle()?;
        self.session.write().await.reset();
        Ok(())
    }

    pub async fn set_adjustment(&self, adjustment: Adjustment, value: i32) {
        self.session.write().await.set_adjustment(adjustment, value);
    }

    /// Send `instruction` for the current image and commit the result.
    ///
    /// On failure the session keeps its history and adjustments; only the
    /// error slot changes.
    pub async fn apply_edit(&self, instruction: &str) -> AppResult<EditOutcome> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Ok(EditOutcome::Skipped);
        }
        let _guard = self.begin()?;

        let (image, epoch) = {
            let mut session = self.session.write().await;
            let image = session.current().cloned().ok_or(AppError::NoImage)?;
            session.clear_error();
            (image, session.epoch())
        };

        tracing::info!(image = %image.id(), "applying edit: {}", instruction);
        match self.editor.edit_image(&image, instruction).await {
            Ok(edited) => {
                let mut session = self.session.write().await;
                if session.epoch() != epoch {
                    tracing::warn!(image = %edited.id(), "session replaced while editing; dropping result");
                    return Ok(EditOutcome::Discarded);
                }
                session.commit(edited);
                Ok(EditOutcome::Committed)
            }
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "edit failed: {}", e);
                let mut session = self.session.write().await;
                if session.epoch() == epoch {
                    session.set_error(e.user_message());
                }
                Err(e)
            }
        }
    }

    /// Turn pending slider changes into an instruction and apply it.
    pub async fn apply_adjustments(&self) -> AppResult<EditOutcome> {
        let prompt = build_adjustment_prompt(self.session.read().await.adjustments());
        if prompt.is_empty() {
            return Ok(EditOutcome::Skipped);
        }
        self.apply_edit(&prompt).await
    }

    /// Apply the text typed into one of the prompt panels.
    pub async fn apply_panel(&self, panel: Panel, text: &str) -> AppResult<EditOutcome> {
        if panel == Panel::Adjustments {
            return self.apply_adjustments().await;
        }
        match panel.instruction(text)? {
            Some(prompt) => self.apply_edit(&prompt).await,
            None => Ok(EditOutcome::Skipped),
        }
    }

    pub async fn apply_quick_action(&self, action: &QuickAction) -> AppResult<EditOutcome> {
        match action.prompt {
            Some(prompt) => self.apply_edit(prompt).await,
            None => {
                let prompt = self.suggest(SuggestionKind::Magic, "").await;
                self.apply_edit(&prompt).await
            }
        }
    }

    /// Fetch a suggestion, falling back to a canned prompt on failure.
    pub async fn suggest(&self, kind: SuggestionKind, theme: &str) -> String {
        match self.editor.suggest(kind, theme).await {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(?kind, "failed to generate suggestion: {}", e);
                kind.fallback(theme)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    use crate::error::ErrorKind;
    use crate::prompt::presets::quick_action;

    #[derive(Default)]
    struct FakeEditor {
        prompts: Mutex<Vec<String>>,
        refuse_with: Mutex<Option<String>>,
    }

    #[async_trait]
    impl ImageEditor for FakeEditor {
        async fn edit_image(&self, image: &ImageState, prompt: &str) -> AppResult<ImageState> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let refusal = self.refuse_with.lock().unwrap().clone();
            if let Some(message) = refusal {
                return Err(AppError::SafetyBlock(message));
            }
            let mut data = image.data().to_vec();
            data.push(b'\'');
            Ok(ImageState::from_bytes(data, image.mime_type()))
        }

        async fn suggest(&self, kind: SuggestionKind, _theme: &str) -> AppResult<String> {
            match kind {
                SuggestionKind::Magic => Ok("wrap it in stardust".to_string()),
                _ => Err(AppError::Server("quota".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct GatedEditor {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ImageEditor for GatedEditor {
        async fn edit_image(&self, image: &ImageState, _prompt: &str) -> AppResult<ImageState> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(ImageState::from_bytes(b"late".to_vec(), image.mime_type()))
        }

        async fn suggest(&self, _kind: SuggestionKind, _theme: &str) -> AppResult<String> {
            Ok(String::new())
        }
    }

    fn image(bytes: &[u8]) -> ImageState {
        ImageState::from_bytes(bytes.to_vec(), "image/png")
    }

    #[tokio::test]
    async fn adjustments_become_a_committed_edit() {
        let orch = EditOrchestrator::new(FakeEditor::default());
        orch.upload(image(b"X"), Some("x.png".into())).await.unwrap();
        orch.set_adjustment(Adjustment::Brightness, 150).await;

        assert_eq!(orch.apply_adjustments().await.unwrap(), EditOutcome::Committed);

        let prompts = orch.editor.prompts.lock().unwrap().clone();
        assert_eq!(
            prompts,
            vec!["Apply the following image adjustments: increase the brightness moderately.".to_string()]
        );
        let session = orch.session();
        let s = session.read().await;
        assert_eq!(s.len(), 2);
        assert_eq!(s.cursor(), Some(1));
        assert_eq!(s.current().unwrap().data(), b"X'");
        assert!(s.adjustments().is_default());
    }

    #[tokio::test]
    async fn default_adjustments_submit_nothing() {
        let orch = EditOrchestrator::new(FakeEditor::default());
        orch.upload(image(b"X"), None).await.unwrap();
        assert_eq!(orch.apply_adjustments().await.unwrap(), EditOutcome::Skipped);
        assert_eq!(orch.apply_edit("   ").await.unwrap(), EditOutcome::Skipped);
        assert!(orch.editor.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_edit_leaves_state_untouched() {
        let editor = FakeEditor::default();
        *editor.refuse_with.lock().unwrap() = Some("Request blocked for safety reasons.".to_string());
        let orch = EditOrchestrator::new(editor);
        orch.upload(image(b"X"), None).await.unwrap();
        orch.set_adjustment(Adjustment::Sepia, 40).await;

        let err = orch.apply_adjustments().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SafetyBlock);

        let session = orch.session();
        let s = session.read().await;
        assert_eq!(s.len(), 1);
        assert_eq!(s.adjustments().sepia, 40);
        assert_eq!(s.error(), Some("Request blocked for safety reasons."));
        assert!(!orch.is_busy());
    }

    #[tokio::test]
    async fn edit_without_an_image_is_rejected() {
        let orch = EditOrchestrator::new(FakeEditor::default());
        assert!(matches!(orch.apply_edit("brighter").await, Err(AppError::NoImage)));
        assert!(!orch.is_busy());
    }

    #[tokio::test]
    async fn overlapping_edits_are_rejected() {
        let orch = Arc::new(EditOrchestrator::new(GatedEditor::default()));
        orch.upload(image(b"X"), None).await.unwrap();

        let first = {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move { orch.apply_edit("first").await })
        };
        orch.editor.started.notified().await;

        assert!(matches!(orch.apply_edit("second").await, Err(AppError::EditInProgress)));
        assert!(matches!(orch.upload(image(b"Y"), None).await, Err(AppError::EditInProgress)));
        assert!(matches!(orch.undo().await, Err(AppError::EditInProgress)));

        orch.editor.release.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), EditOutcome::Committed);
        assert_eq!(orch.session().read().await.len(), 2);
        assert!(!orch.is_busy());
    }

    #[tokio::test]
    async fn result_for_a_replaced_session_is_discarded() {
        let orch = Arc::new(EditOrchestrator::new(GatedEditor::default()));
        orch.upload(image(b"X"), None).await.unwrap();

        let pending = {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move { orch.apply_edit("slow").await })
        };
        orch.editor.started.notified().await;
        orch.start_new().await;
        orch.editor.release.notify_one();

        assert_eq!(pending.await.unwrap().unwrap(), EditOutcome::Discarded);
        assert!(orch.session().read().await.is_empty());
    }

    #[tokio::test]
    async fn panels_and_quick_actions_route_through_apply_edit() {
        let orch = EditOrchestrator::new(FakeEditor::default());
        orch.upload(image(b"X"), None).await.unwrap();

        orch.apply_panel(Panel::Card, "Birthday").await.unwrap();
        orch.apply_quick_action(quick_action("magic").unwrap()).await.unwrap();
        orch.apply_quick_action(quick_action("bw").unwrap()).await.unwrap();

        let prompts = orch.editor.prompts.lock().unwrap().clone();
        assert!(prompts[0].contains("\"Birthday\""));
        assert_eq!(prompts[1], "wrap it in stardust");
        assert_eq!(prompts[2], "Convert this image to high-contrast black and white.");
        assert_eq!(orch.session().read().await.len(), 4);
    }

    #[tokio::test]
    async fn failed_suggestion_falls_back() {
        let orch = EditOrchestrator::new(FakeEditor::default());
        let lut = orch.suggest(SuggestionKind::Lut, "").await;
        assert_eq!(lut, SuggestionKind::Lut.fallback(""));
    }
}
