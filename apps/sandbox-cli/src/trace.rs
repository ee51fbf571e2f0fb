//! Recorded input traces and their headless replay.

use sandbox_camera::{FlyCamera, SandboxConfig, bind_free_cam};
use sandbox_input::{
    EventHub, GamepadSnapshot, InputError, InputSystem, NoCapture, RawEvent, VirtualGamepads,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One step of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEntry {
    /// A host notification, delivered through the event hub.
    Event { event: RawEvent },
    /// The state a connected pad will report from now on.
    GamepadState {
        index: usize,
        snapshot: GamepadSnapshot,
    },
    /// A frame: gamepad poll, then camera update over `dt` seconds.
    Tick { dt: f32 },
}

/// Camera pose after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub tick: u64,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl Pose {
    fn of(tick: u64, camera: &FlyCamera) -> Self {
        Self {
            tick,
            position: camera.position.to_array(),
            yaw_degrees: camera.yaw.to_degrees(),
            pitch_degrees: camera.pitch.to_degrees(),
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        write!(
            f,
            "tick {:>4}: pos ({x:.3}, {y:.3}, {z:.3}) yaw {:.2} pitch {:.2}",
            self.tick, self.yaw_degrees, self.pitch_degrees
        )
    }
}

/// Host-side state of a replay: the virtual pads and the camera they drive.
struct Replay {
    hub: EventHub,
    input: Rc<RefCell<InputSystem>>,
    camera: Rc<RefCell<FlyCamera>>,
    pads: VirtualGamepads,
    ticks: u64,
}

impl Replay {
    fn step(&mut self, entry: &TraceEntry) -> Result<Option<Pose>, InputError> {
        match entry {
            TraceEntry::Event { event } => {
                match event {
                    RawEvent::GamepadConnected { index, snapshot } => {
                        self.pads.set(*index, snapshot.clone());
                    }
                    RawEvent::GamepadDisconnected { index } => self.pads.remove(*index),
                    _ => {}
                }
                self.hub.emit(event)?;
                Ok(None)
            }
            TraceEntry::GamepadState { index, snapshot } => {
                self.pads.set(*index, snapshot.clone());
                Ok(None)
            }
            TraceEntry::Tick { dt } => {
                self.input.borrow_mut().tick(&self.pads)?;
                let mut camera = self.camera.borrow_mut();
                camera.update(*dt);
                self.ticks += 1;
                Ok(Some(Pose::of(self.ticks, &camera)))
            }
        }
    }
}

/// Run `entries` through a fresh input system bound to the free-cam rig.
/// Returns the pose after every tick.
pub fn replay(entries: &[TraceEntry], config: &SandboxConfig) -> Result<Vec<Pose>, InputError> {
    let camera = Rc::new(RefCell::new(FlyCamera::new(&config.free_cam)));
    let mut input = InputSystem::new(&config.input, Box::new(NoCapture));
    bind_free_cam(&mut input, &camera, &config.free_cam);
    let input = Rc::new(RefCell::new(input));

    let mut replay = Replay {
        hub: EventHub::new(),
        input: Rc::clone(&input),
        camera,
        pads: VirtualGamepads::new(),
        ticks: 0,
    };
    let subscription = InputSystem::attach(&input, &mut replay.hub);

    let mut poses = Vec::new();
    let outcome = entries.iter().try_for_each(|entry| {
        poses.extend(replay.step(entry)?);
        Ok::<_, InputError>(())
    });
    subscription.detach(&mut replay.hub);
    outcome?;

    tracing::debug!(ticks = replay.ticks, entries = entries.len(), "replay finished");
    Ok(poses)
}
