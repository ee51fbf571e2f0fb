use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use sandbox_input::{GamepadSnapshot, GamepadSource, RawEvent};
use std::collections::HashMap;

/// Standard-layout axes. Stick Y is flipped so down is positive.
const AXES: [(Axis, f32); 4] = [
    (Axis::LeftStickX, 1.0),
    (Axis::LeftStickY, -1.0),
    (Axis::RightStickX, 1.0),
    (Axis::RightStickY, -1.0),
];

/// Standard-layout buttons, in index order.
const BUTTONS: [Button; 16] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

/// Gamepad state read through gilrs.
pub struct GilrsGamepads {
    gilrs: Gilrs,
    ids: HashMap<usize, GamepadId>,
}

impl GilrsGamepads {
    pub fn new() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => Some(Self {
                gilrs,
                ids: HashMap::new(),
            }),
            Err(e) => {
                tracing::warn!("gamepad support unavailable: {e}");
                None
            }
        }
    }

    /// Connect notifications for pads already present at startup.
    pub fn connected(&mut self) -> Vec<RawEvent> {
        let ids: Vec<GamepadId> = self.gilrs.gamepads().map(|(id, _)| id).collect();
        ids.into_iter().filter_map(|id| self.connect(id)).collect()
    }

    /// Drain gilrs' event queue so its cached state is current, translating
    /// connection changes into notifications.
    pub fn pump(&mut self) -> Vec<RawEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::Connected => events.extend(self.connect(event.id)),
                EventType::Disconnected => {
                    let index = usize::from(event.id);
                    self.ids.remove(&index);
                    events.push(RawEvent::GamepadDisconnected { index });
                }
                _ => {}
            }
        }
        events
    }

    fn connect(&mut self, id: GamepadId) -> Option<RawEvent> {
        let index = usize::from(id);
        self.ids.insert(index, id);
        tracing::debug!(index, name = self.gilrs.gamepad(id).name(), "gilrs gamepad");
        let snapshot = self.snapshot(index)?;
        Some(RawEvent::GamepadConnected { index, snapshot })
    }
}

impl GamepadSource for GilrsGamepads {
    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot> {
        let pad = self.gilrs.connected_gamepad(*self.ids.get(&index)?)?;
        Some(GamepadSnapshot {
            axes: AXES
                .iter()
                .map(|&(axis, sign)| pad.value(axis) * sign)
                .collect(),
            buttons: BUTTONS
                .iter()
                .map(|&button| pad.button_data(button).map_or(0.0, |data| data.value()))
                .collect(),
        })
    }
}
