//! Gamepad polling bridge.
//!
//! Gamepads push no change notifications, so once per tick the bridge reads
//! every connected pad's state and diffs it against the last snapshot:
//! - an axis whose value changed dispatches the new raw value;
//! - a button crossing the press threshold dispatches `1.0` (press) or `0.0` (release).
//!
//! Codes are not qualified by pad index: two pads sharing a control drive the
//! same binding.

use crate::code::{GAMEPAD_AXIS_COUNT, GAMEPAD_BUTTON_COUNT, GamepadAxis, GamepadButton, InputCode};
use crate::error::InputError;
use crate::registry::ActionRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Axis and button values of one pad at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadSnapshot {
    #[serde(default)]
    pub axes: Vec<f32>,
    #[serde(default)]
    pub buttons: Vec<f32>,
}

impl GamepadSnapshot {
    /// All sticks centred and all buttons up, in the standard layout.
    pub fn neutral() -> Self {
        Self {
            axes: vec![0.0; GAMEPAD_AXIS_COUNT],
            buttons: vec![0.0; GAMEPAD_BUTTON_COUNT],
        }
    }

    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    pub fn button(&self, index: usize) -> f32 {
        self.buttons.get(index).copied().unwrap_or(0.0)
    }
}

/// Where the bridge reads current pad state from.
pub trait GamepadSource {
    /// Current state of the pad at `index`, or `None` if the source cannot
    /// read it this tick.
    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot>;
}

/// Per-pad record of the last dispatched state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedGamepad {
    pub index: usize,
    last: GamepadSnapshot,
}

impl ConnectedGamepad {
    pub fn last_snapshot(&self) -> &GamepadSnapshot {
        &self.last
    }

    /// Dispatch every difference between the baseline and `current`.
    /// Entries missing from either snapshot read as `0.0`. A failing reaction
    /// does not stop the remaining changes; the first error is returned.
    fn dispatch_changes(
        &self,
        current: &GamepadSnapshot,
        threshold: f32,
        registry: &mut ActionRegistry,
    ) -> Result<(), InputError> {
        let mut first_error = None;
        let mut record = |result: Result<(), InputError>| {
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        };

        let axis_count = current.axes.len().max(self.last.axes.len());
        for i in 0..axis_count {
            let value = current.axis(i);
            if same_axis_value(value, self.last.axis(i)) {
                continue;
            }
            if let Some(axis) = GamepadAxis::new(i) {
                record(registry.dispatch(&InputCode::GamepadAxis(axis), value));
            }
        }

        let button_count = current.buttons.len().max(self.last.buttons.len());
        for i in 0..button_count {
            let was_pressed = self.last.button(i) >= threshold;
            let pressed = current.button(i) >= threshold;
            if pressed == was_pressed {
                continue;
            }
            if let Some(button) = GamepadButton::new(i) {
                let magnitude = if pressed { 1.0 } else { 0.0 };
                record(registry.dispatch(&InputCode::GamepadButton(button), magnitude));
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// NaN compares unequal to itself; a stick stuck at NaN is not a change.
fn same_axis_value(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Tracks connected pads and converts their level state into dispatches.
#[derive(Debug)]
pub struct PollingBridge {
    pads: BTreeMap<usize, ConnectedGamepad>,
    button_threshold: f32,
}

impl Default for PollingBridge {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl PollingBridge {
    pub fn new(button_threshold: f32) -> Self {
        Self {
            pads: BTreeMap::new(),
            button_threshold,
        }
    }

    /// Start tracking a pad. The initial snapshot becomes the baseline so the
    /// first poll only reports real changes.
    pub fn connect(&mut self, index: usize, initial: GamepadSnapshot) {
        let replaced = self
            .pads
            .insert(
                index,
                ConnectedGamepad {
                    index,
                    last: initial,
                },
            )
            .is_some();
        if replaced {
            tracing::debug!(index, "gamepad reconnected, baseline reset");
        } else {
            tracing::info!(index, "gamepad connected");
        }
    }

    /// Stop tracking a pad. Bindings to gamepad codes stay registered.
    pub fn disconnect(&mut self, index: usize) -> bool {
        let removed = self.pads.remove(&index).is_some();
        if removed {
            tracing::info!(index, "gamepad disconnected");
        }
        removed
    }

    /// Diff every connected pad against `source` and dispatch changes, in
    /// ascending pad index order.
    ///
    /// Every change is dispatched and every baseline advanced even when a
    /// reaction fails, so no edge is lost or delivered twice. The first
    /// reaction error is returned once the poll completes.
    pub fn poll(
        &mut self,
        source: &dyn GamepadSource,
        registry: &mut ActionRegistry,
    ) -> Result<(), InputError> {
        let mut first_error = None;
        for pad in self.pads.values_mut() {
            let Some(current) = source.snapshot(pad.index) else {
                continue;
            };
            if let Err(e) = pad.dispatch_changes(&current, self.button_threshold, registry) {
                first_error.get_or_insert(e);
            }
            pad.last = current;
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn is_connected(&self, index: usize) -> bool {
        self.pads.contains_key(&index)
    }

    pub fn connected(&self) -> impl Iterator<Item = &ConnectedGamepad> {
        self.pads.values()
    }

    pub fn len(&self) -> usize {
        self.pads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }
}

/// In-memory gamepad source for tests and scripted replays.
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepads {
    pads: HashMap<usize, GamepadSnapshot>,
}

impl VirtualGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, snapshot: GamepadSnapshot) {
        self.pads.insert(index, snapshot);
    }

    pub fn remove(&mut self, index: usize) {
        self.pads.remove(&index);
    }

    pub fn set_axis(&mut self, index: usize, axis: usize, value: f32) {
        let pad = self.pads.entry(index).or_default();
        if pad.axes.len() <= axis {
            pad.axes.resize(axis + 1, 0.0);
        }
        pad.axes[axis] = value;
    }

    pub fn set_button(&mut self, index: usize, button: usize, value: f32) {
        let pad = self.pads.entry(index).or_default();
        if pad.buttons.len() <= button {
            pad.buttons.resize(button + 1, 0.0);
        }
        pad.buttons[button] = value;
    }
}

impl GamepadSource for VirtualGamepads {
    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot> {
        self.pads.get(&index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Binding;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(InputCode, f32)>>>;

    fn bind_recorder(registry: &mut ActionRegistry, log: &Log, code: impl Into<InputCode>) {
        let code = code.into();
        let log = Rc::clone(log);
        let tag = code.clone();
        registry.bind(Binding::new(code.to_string(), code, move |m| {
            log.borrow_mut().push((tag.clone(), m))
        }));
    }

    fn setup() -> (PollingBridge, ActionRegistry, VirtualGamepads, Log) {
        let log = Log::default();
        let mut registry = ActionRegistry::new();
        for axis in GamepadAxis::all() {
            bind_recorder(&mut registry, &log, axis);
        }
        for button in GamepadButton::all() {
            bind_recorder(&mut registry, &log, button);
        }
        let mut pads = VirtualGamepads::new();
        pads.set(0, GamepadSnapshot::neutral());
        let mut bridge = PollingBridge::new(0.5);
        bridge.connect(0, GamepadSnapshot::neutral());
        (bridge, registry, pads, log)
    }

    #[test]
    fn axis_change_dispatches_once() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        pads.set_axis(0, 0, 0.7);
        bridge.poll(&pads, &mut registry).unwrap();
        bridge.poll(&pads, &mut registry).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![(InputCode::from(GamepadAxis::LEFT_STICK_X), 0.7)]
        );
    }

    #[test]
    fn initial_snapshot_is_baseline() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        let mut tilted = GamepadSnapshot::neutral();
        tilted.axes[1] = -0.4;
        bridge.connect(1, tilted.clone());
        pads.set(1, tilted);

        bridge.poll(&pads, &mut registry).unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn button_edges_use_threshold() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        let trigger = GamepadButton::RIGHT_TRIGGER.index();

        pads.set_button(0, trigger, 0.3);
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set_button(0, trigger, 0.8);
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set_button(0, trigger, 0.9);
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set_button(0, trigger, 0.1);
        bridge.poll(&pads, &mut registry).unwrap();

        let code = InputCode::from(GamepadButton::RIGHT_TRIGGER);
        assert_eq!(*log.borrow(), vec![(code.clone(), 1.0), (code, 0.0)]);
    }

    #[test]
    fn disconnected_pad_never_dispatches() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        assert!(bridge.disconnect(0));
        pads.set_axis(0, 2, 1.0);
        bridge.poll(&pads, &mut registry).unwrap();

        assert!(log.borrow().is_empty());
        assert!(!bridge.is_connected(0));
        assert!(registry.is_bound(&GamepadAxis::RIGHT_STICK_X.into()));
    }

    #[test]
    fn unknown_indices_are_ignored() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        pads.set_axis(0, 7, 0.5);
        pads.set_button(0, 20, 1.0);
        bridge.poll(&pads, &mut registry).unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(bridge.connected().next().unwrap().last_snapshot().axis(7), 0.5);
    }

    #[test]
    fn pads_share_codes() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        bridge.connect(1, GamepadSnapshot::neutral());
        pads.set(1, GamepadSnapshot::neutral());

        pads.set_button(0, 0, 1.0);
        pads.set_button(1, 0, 1.0);
        bridge.poll(&pads, &mut registry).unwrap();

        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn unreadable_pad_is_skipped_and_keeps_baseline() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        pads.remove(0);
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set(0, GamepadSnapshot::neutral());
        pads.set_axis(0, 3, -1.0);
        bridge.poll(&pads, &mut registry).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![(InputCode::from(GamepadAxis::RIGHT_STICK_Y), -1.0)]
        );
    }

    #[test]
    fn failing_reaction_does_not_refire_edge() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        registry.bind(Binding::fallible("Jump", GamepadButton::SOUTH, |_| {
            Err("no ground".into())
        }));

        pads.set_button(0, 0, 1.0);
        pads.set_axis(0, 0, 0.2);
        assert!(bridge.poll(&pads, &mut registry).is_err());
        bridge.poll(&pads, &mut registry).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![(InputCode::from(GamepadAxis::LEFT_STICK_X), 0.2)]
        );
    }

    #[test]
    fn failing_axis_reaction_keeps_button_edges_paired() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        registry.bind(Binding::fallible("Steer", GamepadAxis::LEFT_STICK_X, |_| {
            Err("steering jammed".into())
        }));

        pads.set_axis(0, 0, 0.9);
        pads.set_button(0, 0, 1.0);
        assert!(bridge.poll(&pads, &mut registry).is_err());
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set_button(0, 0, 0.0);
        bridge.poll(&pads, &mut registry).unwrap();

        let south = InputCode::from(GamepadButton::SOUTH);
        assert_eq!(*log.borrow(), vec![(south.clone(), 1.0), (south, 0.0)]);
    }

    #[test]
    fn failure_on_one_pad_still_polls_the_next() {
        let (mut bridge, mut registry, mut pads, log) = setup();
        registry.bind(Binding::fallible("Jump", GamepadButton::SOUTH, |_| {
            Err("no ground".into())
        }));
        bridge.connect(1, GamepadSnapshot::neutral());
        pads.set(1, GamepadSnapshot::neutral());

        pads.set_button(0, 0, 1.0);
        pads.set_axis(1, 2, 0.6);
        assert!(bridge.poll(&pads, &mut registry).is_err());

        assert_eq!(
            *log.borrow(),
            vec![(InputCode::from(GamepadAxis::RIGHT_STICK_X), 0.6)]
        );
    }

    #[test]
    fn entries_missing_from_shorter_snapshot_read_as_released() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        pads.set_button(0, 0, 1.0);
        pads.set_axis(0, 1, 0.8);
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set(0, GamepadSnapshot::default());
        bridge.poll(&pads, &mut registry).unwrap();
        pads.set_button(0, 0, 1.0);
        bridge.poll(&pads, &mut registry).unwrap();

        let south = InputCode::from(GamepadButton::SOUTH);
        let stick_y = InputCode::from(GamepadAxis::LEFT_STICK_Y);
        assert_eq!(
            *log.borrow(),
            vec![
                (stick_y.clone(), 0.8),
                (south.clone(), 1.0),
                (stick_y, 0.0),
                (south.clone(), 0.0),
                (south, 1.0),
            ]
        );
    }

    #[test]
    fn nan_axis_dispatches_once() {
        let (mut bridge, mut registry, mut pads, log) = setup();

        pads.set_axis(0, 0, f32::NAN);
        bridge.poll(&pads, &mut registry).unwrap();
        bridge.poll(&pads, &mut registry).unwrap();

        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].1.is_nan());
    }
}
