//! Camera Rig: fly camera state plus the bindings that let input move it.
//!
//! # Invariants
//! - The rig owns no device handling; it only registers bindings.
//! - Reactions set camera state or intents; integration over time happens in
//!   [`FlyCamera::update`], once per tick after input polling.

pub mod camera;
pub mod config;
pub mod rig;

pub use camera::{FlyCamera, MoveIntent};
pub use config::{FreeCamConfig, SandboxConfig};
pub use rig::bind_free_cam;
