//! Before/after comparator interaction.
//!
//! The split runs from 0 (only the original is visible) to 100 (only the
//! edited image is visible). Time is passed in by the caller so the
//! auto-hide behaviour is deterministic.
use std::time::{Duration, Instant};

use uuid::Uuid;

pub const HANDLE_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Horizontal extent of the comparison surface in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f32,
    pub width: f32,
}

impl SurfaceBounds {
    pub fn new(left: f32, width: f32) -> Self {
        SurfaceBounds { left, width }
    }

    /// Map a pointer x coordinate to a split percentage.
    pub fn percent_at(&self, client_x: f32) -> f32 {
        if self.width <= 0.0 {
            return 100.0;
        }
        let x = (client_x - self.left).clamp(0.0, self.width);
        x * 100.0 / self.width
    }
}

/// Pointer and touch input, already unified by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Press { x: f32 },
    Move { x: f32 },
    Release,
}

/// Proof that a drag is in progress; moves are captured globally while it lives.
///
/// Returned by a press and consumed by the release, so the global
/// subscription ends exactly when the drag does.
#[derive(Debug, PartialEq, Eq)]
pub struct DragCapture {
    generation: u64,
}

#[derive(Debug)]
pub struct ComparatorController {
    split_percent: f32,
    dragging: bool,
    handle_visible: bool,
    hide_at: Option<Instant>,
    shown_image: Option<Uuid>,
    drag_generation: u64,
}

impl Default for ComparatorController {
    fn default() -> Self {
        Self {
            split_percent: 100.0,
            dragging: false,
            handle_visible: false,
            hide_at: None,
            shown_image: None,
            drag_generation: 0,
        }
    }
}

impl ComparatorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn split_percent(&self) -> f32 {
        self.split_percent
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle_visible(&self) -> bool {
        self.handle_visible
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Right inset of the edited layer's clip, in percent.
    pub fn clip_inset(&self) -> f32 {
        100.0 - self.split_percent
    }

    /// Dispatch one input event.
    ///
    /// A `Move` while not dragging is ignored; it only tracks once a press
    /// has started a capture.
    pub fn handle(&mut self, event: PointerEvent, surface: &SurfaceBounds, now: Instant) -> Option<DragCapture> {
        match event {
            PointerEvent::Enter => {
                self.show_until_idle();
                None
            }
            PointerEvent::Leave => {
                if !self.dragging {
                    self.arm_hide(now);
                }
                None
            }
            PointerEvent::Press { x } => Some(self.press(x, surface)),
            PointerEvent::Move { x } => {
                if self.dragging {
                    self.drag_to(x, surface, now);
                }
                None
            }
            PointerEvent::Release => {
                if self.dragging {
                    self.release(
                        DragCapture {
                            generation: self.drag_generation,
                        },
                        now,
                    );
                }
                None
            }
        }
    }

    pub fn press(&mut self, x: f32, surface: &SurfaceBounds) -> DragCapture {
        self.dragging = true;
        self.drag_generation += 1;
        self.show_until_idle();
        self.split_percent = surface.percent_at(x);
        DragCapture {
            generation: self.drag_generation,
        }
    }

    fn drag_to(&mut self, x: f32, surface: &SurfaceBounds, now: Instant) {
        self.split_percent = surface.percent_at(x);
        self.arm_hide(now);
    }

    /// End the drag owning `capture`; a stale capture is ignored.
    pub fn release(&mut self, capture: DragCapture, now: Instant) {
        if !self.dragging || capture.generation != self.drag_generation {
            return;
        }
        self.dragging = false;
        self.arm_hide(now);
    }

    /// Advance the clock; hides the handle once the idle deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.hide_at {
            if now >= deadline && !self.dragging {
                self.handle_visible = false;
                self.hide_at = None;
            }
        }
    }

    /// Reset the split whenever a different image is shown.
    pub fn sync_image(&mut self, image_id: Uuid) {
        if self.shown_image != Some(image_id) {
            self.shown_image = Some(image_id);
            self.split_percent = 100.0;
        }
    }

    fn show_until_idle(&mut self) {
        self.hide_at = None;
        self.handle_visible = true;
    }

    fn arm_hide(&mut self, now: Instant) {
        self.handle_visible = true;
        self.hide_at = Some(now + HANDLE_HIDE_DELAY);
    }
}
