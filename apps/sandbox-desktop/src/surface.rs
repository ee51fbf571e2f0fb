use sandbox_input::{CaptureError, CaptureSurface};
use std::sync::Arc;
use winit::window::{CursorGrabMode, Window};

/// Pointer capture on a winit window: grab plus hidden cursor.
pub struct WindowCapture {
    window: Arc<Window>,
}

impl WindowCapture {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl CaptureSurface for WindowCapture {
    fn request_capture(&mut self) -> Result<(), CaptureError> {
        // Not every platform supports Locked; Confined still keeps deltas flowing.
        self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
            .map_err(|e| CaptureError(e.to_string()))?;
        self.window.set_cursor_visible(false);
        Ok(())
    }

    fn release_capture(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("failed to release cursor grab: {e}");
        }
        self.window.set_cursor_visible(true);
    }
}
