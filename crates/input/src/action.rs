use crate::code::{DeviceClass, InputCode};
use crate::error::{InputError, ReactionError};
use std::fmt;

/// A user-supplied reaction, invoked with the dispatched magnitude.
pub type Reaction = Box<dyn FnMut(f32) -> Result<(), ReactionError>>;

/// A named association between a control and a reaction.
///
/// Gameplay and camera code produce bindings; the registry only routes to
/// them and never transforms the magnitude.
pub struct Binding {
    name: String,
    code: InputCode,
    reaction: Reaction,
}

impl Binding {
    /// Bind an infallible reaction.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<InputCode>,
        mut reaction: impl FnMut(f32) + 'static,
    ) -> Self {
        Self::fallible(name, code, move |magnitude| {
            reaction(magnitude);
            Ok(())
        })
    }

    /// Bind a reaction whose errors propagate out of dispatch.
    pub fn fallible(
        name: impl Into<String>,
        code: impl Into<InputCode>,
        reaction: impl FnMut(f32) -> Result<(), ReactionError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            reaction: Box::new(reaction),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &InputCode {
        &self.code
    }

    pub fn device_class(&self) -> DeviceClass {
        self.code.device_class()
    }

    pub(crate) fn react(&mut self, magnitude: f32) -> Result<(), InputError> {
        (self.reaction)(magnitude).map_err(|source| InputError::Reaction {
            name: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PointerCode;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn reaction_receives_magnitude() {
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let mut binding = Binding::new("ZoomCamera", PointerCode::WheelUp, move |m| sink.set(m));
        binding.react(1.0).unwrap();
        assert_eq!(seen.get(), 1.0);
        assert_eq!(binding.device_class(), DeviceClass::Pointer);
    }

    #[test]
    fn fallible_reaction_error_carries_name() {
        let mut binding = Binding::fallible("Explode", InputCode::key("KeyX"), |_| {
            Err("boom".into())
        });
        let err = binding.react(1.0).unwrap_err();
        assert!(err.to_string().contains("Explode"));
        assert!(err.to_string().contains("boom"));
    }
}
