use crate::code::{InputCode, PointerButton, PointerCode};
use crate::error::{CaptureError, InputError};
use crate::registry::ActionRegistry;

/// Host surface able to grant exclusive, relative-motion pointer capture.
pub trait CaptureSurface {
    fn request_capture(&mut self) -> Result<(), CaptureError>;
    fn release_capture(&mut self);
}

/// A surface with nothing to capture (headless hosts). Requests always succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl CaptureSurface for NoCapture {
    fn request_capture(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release_capture(&mut self) {}
}

/// Guards the capture request behind a `captured` flag so repeated requests
/// reach the host at most once.
pub struct PointerCapture {
    surface: Box<dyn CaptureSurface>,
    captured: bool,
}

impl PointerCapture {
    pub fn new(surface: Box<dyn CaptureSurface>) -> Self {
        Self {
            surface,
            captured: false,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Request capture unless already held. A refused request leaves the flag
    /// clear so the next attempt retries.
    pub fn acquire(&mut self) {
        if self.captured {
            return;
        }
        match self.surface.request_capture() {
            Ok(()) => {
                self.captured = true;
                tracing::debug!("pointer captured");
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    pub fn release(&mut self) {
        if !self.captured {
            return;
        }
        self.surface.release_capture();
        self.captured = false;
        tracing::debug!("pointer released");
    }

    /// The host revoked capture on its own (focus loss, Escape handled by the OS).
    pub fn invalidate(&mut self) {
        self.captured = false;
    }
}

/// Last known absolute cursor position.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    last_position: Option<(f32, f32)>,
}

impl PointerState {
    pub fn record(&mut self, x: f32, y: f32) {
        self.last_position = Some((x, y));
    }

    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.last_position
    }

    /// Map the last position into `[-1, 1]` on both axes, `y` up.
    pub fn normalized(&self, width: f32, height: f32) -> Option<(f32, f32)> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let (x, y) = self.last_position?;
        let nx = (x / width) * 2.0 - 1.0;
        let ny = 1.0 - (y / height) * 2.0;
        Some((nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0)))
    }
}

/// Turns pointer motion, wheel and button notifications into dispatches.
///
/// Motion deltas are forwarded in raw device units; reactions own scaling.
pub struct PointerNormalizer {
    capture: PointerCapture,
    state: PointerState,
    capture_on_press: bool,
}

impl PointerNormalizer {
    pub fn new(surface: Box<dyn CaptureSurface>, capture_on_press: bool) -> Self {
        Self {
            capture: PointerCapture::new(surface),
            state: PointerState::default(),
            capture_on_press,
        }
    }

    pub fn pointer_move(
        &mut self,
        registry: &mut ActionRegistry,
        dx: f32,
        dy: f32,
    ) -> Result<(), InputError> {
        if dx != 0.0 {
            registry.dispatch(&PointerCode::X.into(), dx)?;
        }
        if dy != 0.0 {
            registry.dispatch(&PointerCode::Y.into(), dy)?;
        }
        Ok(())
    }

    /// Absolute cursor position. Recorded only; never dispatched.
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.state.record(x, y);
    }

    /// Negative `delta_y` scrolls up. The magnitude is always `1.0`.
    pub fn wheel(&mut self, registry: &mut ActionRegistry, delta_y: f32) -> Result<(), InputError> {
        let code = if delta_y < 0.0 {
            PointerCode::WheelUp
        } else {
            PointerCode::WheelDown
        };
        registry.dispatch(&code.into(), 1.0)
    }

    pub fn button(
        &mut self,
        registry: &mut ActionRegistry,
        button: PointerButton,
        pressed: bool,
    ) -> Result<(), InputError> {
        if pressed && self.capture_on_press {
            self.capture.acquire();
        }
        let Some(code) = button.code() else {
            return Ok(());
        };
        registry.dispatch(&InputCode::Pointer(code), if pressed { 1.0 } else { 0.0 })
    }

    pub fn capture(&mut self) -> &mut PointerCapture {
        &mut self.capture
    }

    pub fn is_captured(&self) -> bool {
        self.capture.is_captured()
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }
}
