use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of conventional gamepad buttons (standard layout, indices 0..16).
pub const GAMEPAD_BUTTON_COUNT: usize = 16;
/// Number of conventional gamepad axes (two sticks, indices 0..4).
pub const GAMEPAD_AXIS_COUNT: usize = 4;

/// The three structurally different input paradigms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Keyboard,
    Pointer,
    Gamepad,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 3] = [Self::Keyboard, Self::Pointer, Self::Gamepad];
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keyboard => "keyboard",
            Self::Pointer => "pointer",
            Self::Gamepad => "gamepad",
        };
        f.write_str(name)
    }
}

/// Closed vocabulary of pointer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerCode {
    X,
    Y,
    WheelUp,
    WheelDown,
    LeftButton,
    MiddleButton,
    RightButton,
}

impl PointerCode {
    pub const ALL: [PointerCode; 7] = [
        Self::X,
        Self::Y,
        Self::WheelUp,
        Self::WheelDown,
        Self::LeftButton,
        Self::MiddleButton,
        Self::RightButton,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::WheelUp => "WheelUp",
            Self::WheelDown => "WheelDown",
            Self::LeftButton => "LeftButton",
            Self::MiddleButton => "MiddleButton",
            Self::RightButton => "RightButton",
        }
    }
}

/// A physical pointer button as reported by the host.
///
/// Buttons beyond the three conventional ones have no [`PointerCode`] and are
/// dropped as unknown input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    Other(u16),
}

impl PointerButton {
    pub fn code(self) -> Option<PointerCode> {
        match self {
            Self::Left => Some(PointerCode::LeftButton),
            Self::Middle => Some(PointerCode::MiddleButton),
            Self::Right => Some(PointerCode::RightButton),
            Self::Other(_) => None,
        }
    }
}

/// Gamepad button index in the standard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GamepadButton(u8);

impl GamepadButton {
    pub const SOUTH: Self = Self(0);
    pub const EAST: Self = Self(1);
    pub const WEST: Self = Self(2);
    pub const NORTH: Self = Self(3);
    pub const LEFT_BUMPER: Self = Self(4);
    pub const RIGHT_BUMPER: Self = Self(5);
    pub const LEFT_TRIGGER: Self = Self(6);
    pub const RIGHT_TRIGGER: Self = Self(7);
    pub const BACK: Self = Self(8);
    pub const START: Self = Self(9);
    pub const LEFT_STICK: Self = Self(10);
    pub const RIGHT_STICK: Self = Self(11);
    pub const DPAD_UP: Self = Self(12);
    pub const DPAD_DOWN: Self = Self(13);
    pub const DPAD_LEFT: Self = Self(14);
    pub const DPAD_RIGHT: Self = Self(15);

    /// Returns `None` for indices outside the standard layout.
    pub fn new(index: usize) -> Option<Self> {
        (index < GAMEPAD_BUTTON_COUNT).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..GAMEPAD_BUTTON_COUNT as u8).map(Self)
    }

    pub fn label(self) -> &'static str {
        const LABELS: [&str; GAMEPAD_BUTTON_COUNT] = [
            "South", "East", "West", "North", "LeftBumper", "RightBumper", "LeftTrigger",
            "RightTrigger", "Back", "Start", "LeftStick", "RightStick", "DPadUp", "DPadDown",
            "DPadLeft", "DPadRight",
        ];
        LABELS[self.index()]
    }
}

impl TryFrom<u8> for GamepadButton {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or_else(|| format!("gamepad button {value} out of range"))
    }
}

impl From<GamepadButton> for u8 {
    fn from(button: GamepadButton) -> u8 {
        button.0
    }
}

/// Gamepad axis index in the standard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GamepadAxis(u8);

impl GamepadAxis {
    pub const LEFT_STICK_X: Self = Self(0);
    pub const LEFT_STICK_Y: Self = Self(1);
    pub const RIGHT_STICK_X: Self = Self(2);
    pub const RIGHT_STICK_Y: Self = Self(3);

    /// Returns `None` for indices outside the standard layout.
    pub fn new(index: usize) -> Option<Self> {
        (index < GAMEPAD_AXIS_COUNT).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..GAMEPAD_AXIS_COUNT as u8).map(Self)
    }

    pub fn label(self) -> &'static str {
        const LABELS: [&str; GAMEPAD_AXIS_COUNT] =
            ["LeftStickX", "LeftStickY", "RightStickX", "RightStickY"];
        LABELS[self.index()]
    }
}

impl TryFrom<u8> for GamepadAxis {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or_else(|| format!("gamepad axis {value} out of range"))
    }
}

impl From<GamepadAxis> for u8 {
    fn from(axis: GamepadAxis) -> u8 {
        axis.0
    }
}

/// A control within a device class. This is the identity key of a binding:
/// the device class is implied by the variant, so codes never collide across
/// classes.
///
/// Keyboard codes are host-provided physical key identifiers (`"KeyW"`,
/// `"Space"`) and are treated opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCode {
    Key(String),
    Pointer(PointerCode),
    GamepadButton(GamepadButton),
    GamepadAxis(GamepadAxis),
}

impl InputCode {
    pub fn key(code: impl Into<String>) -> Self {
        Self::Key(code.into())
    }

    pub fn device_class(&self) -> DeviceClass {
        match self {
            Self::Key(_) => DeviceClass::Keyboard,
            Self::Pointer(_) => DeviceClass::Pointer,
            Self::GamepadButton(_) | Self::GamepadAxis(_) => DeviceClass::Gamepad,
        }
    }
}

impl From<PointerCode> for InputCode {
    fn from(code: PointerCode) -> Self {
        Self::Pointer(code)
    }
}

impl From<GamepadButton> for InputCode {
    fn from(button: GamepadButton) -> Self {
        Self::GamepadButton(button)
    }
}

impl From<GamepadAxis> for InputCode {
    fn from(axis: GamepadAxis) -> Self {
        Self::GamepadAxis(axis)
    }
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(code) => write!(f, "keyboard:{code}"),
            Self::Pointer(code) => write!(f, "pointer:{}", code.as_str()),
            Self::GamepadButton(button) => write!(f, "gamepad:button:{}", button.index()),
            Self::GamepadAxis(axis) => write!(f, "gamepad:axis:{}", axis.index()),
        }
    }
}
