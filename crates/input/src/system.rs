use crate::action::Binding;
use crate::code::{DeviceClass, InputCode};
use crate::config::InputConfig;
use crate::error::InputError;
use crate::event::RawEvent;
use crate::gamepad::{GamepadSource, PollingBridge};
use crate::hub::{EventFilter, EventHub, Subscription};
use crate::keyboard::KeyboardNormalizer;
use crate::pointer::{CaptureSurface, PointerNormalizer, PointerState};
use crate::registry::ActionRegistry;
use std::cell::RefCell;
use std::rc::Rc;

/// The input layer: one registry fed by the keyboard and pointer normalizers
/// and by the gamepad polling bridge.
///
/// Everything runs on the host's event thread. A dispatch completes before
/// the next notification is handled; reactions must not call back into the
/// system that is dispatching them.
pub struct InputSystem {
    registry: ActionRegistry,
    keyboard: KeyboardNormalizer,
    pointer: PointerNormalizer,
    gamepads: PollingBridge,
}

impl InputSystem {
    pub fn new(config: &InputConfig, surface: Box<dyn CaptureSurface>) -> Self {
        Self {
            registry: ActionRegistry::new(),
            keyboard: KeyboardNormalizer::new(config.repeat_policy),
            pointer: PointerNormalizer::new(surface, config.capture_on_press),
            gamepads: PollingBridge::new(config.button_threshold),
        }
    }

    pub fn bind(&mut self, binding: Binding) {
        self.registry.bind(binding);
    }

    pub fn unbind(&mut self, code: &InputCode) -> Option<Binding> {
        self.registry.unbind(code)
    }

    pub fn dispatch(&mut self, code: &InputCode, magnitude: f32) -> Result<(), InputError> {
        self.registry.dispatch(code, magnitude)
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Normalize one host notification and dispatch it.
    pub fn handle(&mut self, event: &RawEvent) -> Result<(), InputError> {
        let registry = &mut self.registry;
        match event {
            RawEvent::KeyDown { code, repeat } => self.keyboard.key_down(registry, code, *repeat),
            RawEvent::KeyUp { code } => self.keyboard.key_up(registry, code),
            RawEvent::PointerMove { dx, dy } => self.pointer.pointer_move(registry, *dx, *dy),
            RawEvent::CursorMoved { x, y } => {
                self.pointer.cursor_moved(*x, *y);
                Ok(())
            }
            RawEvent::Wheel { delta_y } => self.pointer.wheel(registry, *delta_y),
            RawEvent::PointerButton { button, pressed } => {
                self.pointer.button(registry, *button, *pressed)
            }
            RawEvent::GamepadConnected { index, snapshot } => {
                self.gamepads.connect(*index, snapshot.clone());
                Ok(())
            }
            RawEvent::GamepadDisconnected { index } => {
                self.gamepads.disconnect(*index);
                Ok(())
            }
        }
    }

    /// Per-frame hook: poll connected gamepads. Call once per tick, before
    /// camera and scene updates.
    pub fn tick(&mut self, source: &dyn GamepadSource) -> Result<(), InputError> {
        self.gamepads.poll(source, &mut self.registry)
    }

    pub fn release_capture(&mut self) {
        self.pointer.capture().release();
    }

    /// The host took capture and focus away; held keys will get no release.
    pub fn focus_lost(&mut self) {
        self.pointer.capture().invalidate();
        self.keyboard.clear_held();
    }

    pub fn is_captured(&self) -> bool {
        self.pointer.is_captured()
    }

    pub fn pointer_state(&self) -> &PointerState {
        self.pointer.state()
    }

    pub fn gamepads(&self) -> &PollingBridge {
        &self.gamepads
    }

    /// Register one listener per device class on `hub`, each forwarding to
    /// [`InputSystem::handle`].
    pub fn attach(system: &Rc<RefCell<Self>>, hub: &mut EventHub) -> Subscription {
        let ids = DeviceClass::ALL
            .into_iter()
            .map(|class| {
                let system = Rc::clone(system);
                hub.subscribe(EventFilter::Device(class), move |event: &RawEvent| {
                    system.borrow_mut().handle(event)
                })
            })
            .collect();
        tracing::debug!(listeners = hub.listener_count(), "input system attached");
        Subscription::new(ids)
    }
}
