use crate::code::{DeviceClass, PointerButton};
use crate::gamepad::GamepadSnapshot;
use serde::{Deserialize, Serialize};

/// A device notification as delivered by the host, before normalization.
///
/// Units follow the host conventions the input layer expects: pointer deltas
/// in device pixels, `delta_y < 0` meaning "scroll up".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    KeyDown {
        code: String,
        #[serde(default)]
        repeat: bool,
    },
    KeyUp {
        code: String,
    },
    PointerMove {
        dx: f32,
        dy: f32,
    },
    CursorMoved {
        x: f32,
        y: f32,
    },
    Wheel {
        delta_y: f32,
    },
    PointerButton {
        button: PointerButton,
        pressed: bool,
    },
    GamepadConnected {
        index: usize,
        #[serde(default = "GamepadSnapshot::neutral")]
        snapshot: GamepadSnapshot,
    },
    GamepadDisconnected {
        index: usize,
    },
}

impl RawEvent {
    pub fn device_class(&self) -> DeviceClass {
        match self {
            Self::KeyDown { .. } | Self::KeyUp { .. } => DeviceClass::Keyboard,
            Self::PointerMove { .. }
            | Self::CursorMoved { .. }
            | Self::Wheel { .. }
            | Self::PointerButton { .. } => DeviceClass::Pointer,
            Self::GamepadConnected { .. } | Self::GamepadDisconnected { .. } => {
                DeviceClass::Gamepad
            }
        }
    }
}
