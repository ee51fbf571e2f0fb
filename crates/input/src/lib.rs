//! Input Layer: keyboard, pointer and gamepad input unified behind one action registry.
//!
//! # Invariants
//! - At most one binding per control; a later bind at the same control wins.
//! - Unbound and unknown input is dropped, never an error.
//! - Magnitudes reach reactions untransformed beyond device normalization:
//!   keys and buttons `1.0`/`0.0`, pointer motion in raw pixels, wheel `1.0`,
//!   gamepad axes in their raw analog range.
//! - Gamepads are polled once per tick and diffed against the last snapshot.
//! - Pointer capture is requested at most once while held.

pub mod action;
pub mod code;
pub mod config;
pub mod error;
pub mod event;
pub mod gamepad;
pub mod hub;
pub mod keyboard;
pub mod pointer;
pub mod registry;
pub mod system;

pub use action::{Binding, Reaction};
pub use code::{DeviceClass, GamepadAxis, GamepadButton, InputCode, PointerButton, PointerCode};
pub use config::{InputConfig, RepeatPolicy};
pub use error::{CaptureError, ConfigError, InputError, ReactionError};
pub use event::RawEvent;
pub use gamepad::{GamepadSnapshot, GamepadSource, PollingBridge, VirtualGamepads};
pub use hub::{EventFilter, EventHub, InputListener, ListenerId, Subscription};
pub use pointer::{CaptureSurface, NoCapture, PointerState};
pub use registry::ActionRegistry;
pub use system::InputSystem;
