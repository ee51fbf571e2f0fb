use crate::action::Binding;
use crate::code::InputCode;
use crate::error::InputError;
use std::collections::HashMap;

/// Maps controls to bindings. At most one binding per [`InputCode`];
/// a later bind at the same code replaces the earlier one.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    bindings: HashMap<InputCode, Binding>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a binding, replacing any binding at the same code.
    pub fn bind(&mut self, binding: Binding) {
        tracing::debug!(action = binding.name(), code = %binding.code(), "bind");
        if let Some(replaced) = self.bindings.insert(binding.code().clone(), binding) {
            tracing::debug!(
                replaced = replaced.name(),
                code = %replaced.code(),
                "binding replaced"
            );
        }
    }

    /// Remove the binding at `code`, if any.
    pub fn unbind(&mut self, code: &InputCode) -> Option<Binding> {
        let removed = self.bindings.remove(code);
        if let Some(ref binding) = removed {
            tracing::debug!(action = binding.name(), %code, "unbind");
        }
        removed
    }

    /// Invoke the reaction bound at `code` with `magnitude`.
    ///
    /// Unbound codes are silently dropped. A reaction error is returned to the
    /// caller; the registry itself is left untouched.
    pub fn dispatch(&mut self, code: &InputCode, magnitude: f32) -> Result<(), InputError> {
        match self.bindings.get_mut(code) {
            Some(binding) => binding.react(magnitude),
            None => Ok(()),
        }
    }

    pub fn is_bound(&self, code: &InputCode) -> bool {
        self.bindings.contains_key(code)
    }

    /// Name of the binding at `code`.
    pub fn action_name(&self, code: &InputCode) -> Option<&str> {
        self.bindings.get(code).map(Binding::name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{GamepadAxis, PointerCode};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(&'static str, f32)>>>;

    fn recorder(log: &Log, tag: &'static str) -> impl FnMut(f32) + 'static {
        let log = Rc::clone(log);
        move |m| log.borrow_mut().push((tag, m))
    }

    #[test]
    fn dispatch_invokes_bound_reaction_once() {
        let log = Log::default();
        let mut registry = ActionRegistry::new();
        registry.bind(Binding::new("RotateCameraX", PointerCode::X, recorder(&log, "x")));

        registry.dispatch(&PointerCode::X.into(), 5.0).unwrap();
        registry.dispatch(&PointerCode::Y.into(), 3.0).unwrap();

        assert_eq!(*log.borrow(), vec![("x", 5.0)]);
    }

    #[test]
    fn unbound_code_is_dropped() {
        let mut registry = ActionRegistry::new();
        assert!(registry.dispatch(&InputCode::key("KeyQ"), 1.0).is_ok());
        assert!(registry.is_empty());
    }

    #[test]
    fn later_bind_replaces_earlier() {
        let log = Log::default();
        let mut registry = ActionRegistry::new();
        registry.bind(Binding::new("First", InputCode::key("KeyW"), recorder(&log, "first")));
        registry.bind(Binding::new("Second", InputCode::key("KeyW"), recorder(&log, "second")));

        registry.dispatch(&InputCode::key("KeyW"), 1.0).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.action_name(&InputCode::key("KeyW")), Some("Second"));
        assert_eq!(*log.borrow(), vec![("second", 1.0)]);
    }

    #[test]
    fn unbind_removes_and_is_noop_when_absent() {
        let log = Log::default();
        let mut registry = ActionRegistry::new();
        let code = InputCode::from(GamepadAxis::LEFT_STICK_X);
        registry.bind(Binding::new("Strafe", code.clone(), recorder(&log, "strafe")));

        assert!(registry.unbind(&code).is_some());
        assert!(registry.unbind(&code).is_none());
        registry.dispatch(&code, 0.5).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failing_reaction_leaves_registry_intact() {
        let log = Log::default();
        let mut registry = ActionRegistry::new();
        registry.bind(Binding::fallible("Flaky", InputCode::key("KeyF"), |_| {
            Err("flaky".into())
        }));
        registry.bind(Binding::new("Steady", InputCode::key("KeyG"), recorder(&log, "g")));

        assert!(registry.dispatch(&InputCode::key("KeyF"), 1.0).is_err());
        registry.dispatch(&InputCode::key("KeyG"), 1.0).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.is_bound(&InputCode::key("KeyF")));
        assert_eq!(*log.borrow(), vec![("g", 1.0)]);
    }
}
