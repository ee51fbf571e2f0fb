//! Host-side listener registry.
//!
//! [`EventHub`] stands in for the host's listener API: the host pushes every
//! device notification through [`EventHub::emit`], and subscribers receive the
//! ones matching their filter. Registration is scoped: whoever attaches gets a
//! [`Subscription`] back and detaches through it, so setup/teardown cycles
//! never accumulate listeners.

use crate::code::DeviceClass;
use crate::error::InputError;
use crate::event::RawEvent;
use std::collections::BTreeMap;

/// Receives host device notifications.
pub trait InputListener {
    fn on_event(&mut self, event: &RawEvent) -> Result<(), InputError>;
}

impl<F> InputListener for F
where
    F: FnMut(&RawEvent) -> Result<(), InputError>,
{
    fn on_event(&mut self, event: &RawEvent) -> Result<(), InputError> {
        self(event)
    }
}

/// Which notifications a listener wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Device(DeviceClass),
}

impl EventFilter {
    fn matches(self, event: &RawEvent) -> bool {
        match self {
            Self::All => true,
            Self::Device(class) => event.device_class() == class,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct ListenerEntry {
    listener: Box<dyn InputListener>,
    filter: EventFilter,
}

#[derive(Default)]
pub struct EventHub {
    next_id: u64,
    // Ordered by id, i.e. by subscription order.
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        filter: EventFilter,
        listener: impl InputListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                filter,
            },
        );
        tracing::trace!(?id, ?filter, "listener subscribed");
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            tracing::trace!(?id, "listener unsubscribed");
        }
        removed
    }

    /// Deliver one notification to every matching listener, in subscription
    /// order. The first listener error stops delivery of this event.
    pub fn emit(&mut self, event: &RawEvent) -> Result<(), InputError> {
        for entry in self.listeners.values_mut() {
            if entry.filter.matches(event) {
                entry.listener.on_event(event)?;
            }
        }
        Ok(())
    }

    /// Deliver a batch in order, stopping at the first error.
    pub fn emit_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a RawEvent>,
    ) -> Result<(), InputError> {
        for event in events {
            self.emit(event)?;
        }
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Listeners registered by one attach call. Detach it to remove them.
#[derive(Debug)]
#[must_use = "listeners stay attached until the subscription is detached"]
pub struct Subscription {
    ids: Vec<ListenerId>,
}

impl Subscription {
    pub(crate) fn new(ids: Vec<ListenerId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }

    pub fn detach(self, hub: &mut EventHub) {
        for id in self.ids {
            hub.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn filter_routes_by_device_class() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        let sink = Rc::clone(&seen);
        hub.subscribe(
            EventFilter::Device(DeviceClass::Keyboard),
            move |event: &RawEvent| -> Result<(), InputError> {
                sink.borrow_mut().push(event.clone());
                Ok(())
            },
        );

        hub.emit(&RawEvent::Wheel { delta_y: 1.0 }).unwrap();
        hub.emit(&RawEvent::KeyUp { code: "KeyA".into() }).unwrap();

        assert_eq!(*seen.borrow(), vec![RawEvent::KeyUp { code: "KeyA".into() }]);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            hub.subscribe(EventFilter::All, move |_: &RawEvent| -> Result<(), InputError> {
                order.borrow_mut().push(tag);
                Ok(())
            });
        }

        hub.emit(&RawEvent::PointerMove { dx: 1.0, dy: 0.0 }).unwrap();

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_unknown_id_is_false() {
        let mut hub = EventHub::new();
        let id = hub.subscribe(EventFilter::All, |_: &RawEvent| -> Result<(), InputError> {
            Ok(())
        });
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        assert_eq!(hub.listener_count(), 0);
    }
}
