//! Free-cam rig: binds pointer, keyboard and gamepad controls to a [`FlyCamera`].
//!
//! | Action | Control | Effect |
//! |---|---|---|
//! | `RotateCameraX` | pointer X | yaw by `dx * rotation_speed` |
//! | `RotateCameraY` | pointer Y | pitch by `-dy * rotation_speed`, clamped |
//! | `ZoomCamera` / `ZoomOutCamera` | wheel up / down | step along the view |
//! | `MoveForward` .. `MoveDown` | `KeyW` `KeyS` `KeyA` `KeyD` `Space` `ShiftLeft` | held movement |
//! | `GamepadMoveX/Y` | left stick | analog movement |
//! | `GamepadLookX/Y` | right stick | analog look rate |

use crate::camera::{FlyCamera, MoveIntent};
use crate::config::FreeCamConfig;
use sandbox_input::{Binding, GamepadAxis, InputCode, InputSystem, PointerCode};
use std::cell::RefCell;
use std::rc::Rc;

/// Wrap a camera mutation as a reaction.
fn on_camera(
    camera: &Rc<RefCell<FlyCamera>>,
    f: impl Fn(&mut FlyCamera, f32) + 'static,
) -> impl FnMut(f32) + 'static {
    let camera = Rc::clone(camera);
    move |magnitude| f(&mut camera.borrow_mut(), magnitude)
}

fn deadzone(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold { 0.0 } else { value }
}

/// Register the free-cam bindings on `input`. Does nothing when disabled.
pub fn bind_free_cam(
    input: &mut InputSystem,
    camera: &Rc<RefCell<FlyCamera>>,
    config: &FreeCamConfig,
) {
    if !config.enabled {
        tracing::debug!("free cam disabled, no bindings registered");
        return;
    }

    let rotation = config.rotation_speed;
    input.bind(Binding::new(
        "RotateCameraX",
        PointerCode::X,
        on_camera(camera, move |cam, dx| cam.turn(dx * rotation)),
    ));
    input.bind(Binding::new(
        "RotateCameraY",
        PointerCode::Y,
        on_camera(camera, move |cam, dy| cam.tilt(-dy * rotation)),
    ));

    let zoom = config.zoom_step;
    input.bind(Binding::new(
        "ZoomCamera",
        PointerCode::WheelUp,
        on_camera(camera, move |cam, notches| cam.advance(notches * zoom)),
    ));
    input.bind(Binding::new(
        "ZoomOutCamera",
        PointerCode::WheelDown,
        on_camera(camera, move |cam, notches| cam.advance(-notches * zoom)),
    ));

    let keys: [(&str, &str, fn(&mut MoveIntent, f32)); 6] = [
        ("MoveForward", "KeyW", |i, v| i.forward = v),
        ("MoveBack", "KeyS", |i, v| i.back = v),
        ("MoveLeft", "KeyA", |i, v| i.left = v),
        ("MoveRight", "KeyD", |i, v| i.right = v),
        ("MoveUp", "Space", |i, v| i.up = v),
        ("MoveDown", "ShiftLeft", |i, v| i.down = v),
    ];
    for (name, key, set) in keys {
        input.bind(Binding::new(
            name,
            InputCode::key(key),
            on_camera(camera, move |cam, held| set(&mut cam.intent, held)),
        ));
    }

    let dz = config.stick_deadzone;
    input.bind(Binding::new(
        "GamepadMoveX",
        GamepadAxis::LEFT_STICK_X,
        on_camera(camera, move |cam, v| cam.intent.stick.x = deadzone(v, dz)),
    ));
    // Stick Y is positive downward; pushing up moves forward.
    input.bind(Binding::new(
        "GamepadMoveY",
        GamepadAxis::LEFT_STICK_Y,
        on_camera(camera, move |cam, v| cam.intent.stick.y = -deadzone(v, dz)),
    ));
    input.bind(Binding::new(
        "GamepadLookX",
        GamepadAxis::RIGHT_STICK_X,
        on_camera(camera, move |cam, v| cam.intent.look.x = deadzone(v, dz)),
    ));
    input.bind(Binding::new(
        "GamepadLookY",
        GamepadAxis::RIGHT_STICK_Y,
        on_camera(camera, move |cam, v| cam.intent.look.y = deadzone(v, dz)),
    ));

    tracing::info!(bindings = input.registry().len(), "free cam bound");
}
