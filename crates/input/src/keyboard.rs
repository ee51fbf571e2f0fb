use crate::code::InputCode;
use crate::config::RepeatPolicy;
use crate::error::InputError;
use crate::registry::ActionRegistry;
use std::collections::HashSet;

/// Turns key-down/key-up notifications into `1.0`/`0.0` dispatches.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    policy: RepeatPolicy,
    held: HashSet<String>,
}

impl KeyboardNormalizer {
    pub fn new(policy: RepeatPolicy) -> Self {
        Self {
            policy,
            held: HashSet::new(),
        }
    }

    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }

    /// A key went down. `repeat` is the host's auto-repeat flag; a down for a
    /// key already held is treated as a repeat even when the host does not say so.
    pub fn key_down(
        &mut self,
        registry: &mut ActionRegistry,
        code: &str,
        repeat: bool,
    ) -> Result<(), InputError> {
        let first_press = self.held.insert(code.to_owned());
        if (repeat || !first_press) && self.policy == RepeatPolicy::Suppress {
            tracing::trace!(code, "key repeat suppressed");
            return Ok(());
        }
        registry.dispatch(&InputCode::key(code), 1.0)
    }

    pub fn key_up(&mut self, registry: &mut ActionRegistry, code: &str) -> Result<(), InputError> {
        self.held.remove(code);
        registry.dispatch(&InputCode::key(code), 0.0)
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Forget held keys, e.g. when the host loses focus and will not deliver
    /// the matching releases.
    pub fn clear_held(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Binding;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bound_registry(code: &str) -> (ActionRegistry, Rc<RefCell<Vec<f32>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut registry = ActionRegistry::new();
        registry.bind(Binding::new("Move", InputCode::key(code), move |m| {
            sink.borrow_mut().push(m)
        }));
        (registry, log)
    }

    #[test]
    fn press_then_release_dispatches_one_then_zero() {
        let (mut registry, log) = bound_registry("KeyW");
        let mut keyboard = KeyboardNormalizer::default();

        keyboard.key_down(&mut registry, "KeyW", false).unwrap();
        keyboard.key_down(&mut registry, "KeyQ", false).unwrap();
        keyboard.key_up(&mut registry, "KeyW").unwrap();

        assert_eq!(*log.borrow(), vec![1.0, 0.0]);
    }

    #[test]
    fn forward_policy_passes_repeats_through() {
        let (mut registry, log) = bound_registry("KeyW");
        let mut keyboard = KeyboardNormalizer::new(RepeatPolicy::Forward);

        keyboard.key_down(&mut registry, "KeyW", false).unwrap();
        keyboard.key_down(&mut registry, "KeyW", true).unwrap();
        keyboard.key_down(&mut registry, "KeyW", true).unwrap();

        assert_eq!(*log.borrow(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn suppress_policy_drops_repeats_until_release() {
        let (mut registry, log) = bound_registry("KeyW");
        let mut keyboard = KeyboardNormalizer::new(RepeatPolicy::Suppress);

        keyboard.key_down(&mut registry, "KeyW", false).unwrap();
        keyboard.key_down(&mut registry, "KeyW", true).unwrap();
        // Host without a repeat flag: a second down while held is still a repeat.
        keyboard.key_down(&mut registry, "KeyW", false).unwrap();
        keyboard.key_up(&mut registry, "KeyW").unwrap();
        keyboard.key_down(&mut registry, "KeyW", false).unwrap();

        assert_eq!(*log.borrow(), vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn clear_held_allows_fresh_press() {
        let (mut registry, log) = bound_registry("KeyW");
        let mut keyboard = KeyboardNormalizer::new(RepeatPolicy::Suppress);

        keyboard.key_down(&mut registry, "KeyW", false).unwrap();
        keyboard.clear_held();
        assert!(!keyboard.is_held("KeyW"));
        keyboard.key_down(&mut registry, "KeyW", false).unwrap();

        assert_eq!(*log.borrow(), vec![1.0, 1.0]);
    }
}
