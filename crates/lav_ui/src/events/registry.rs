//! Per-element handler registry

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::warn;
use slotmap::{new_key_type, SlotMap};

use super::types::{EventKind, EventPayload, UIEvent};

new_key_type! {
    /// Handle returned by [`Events::subscribe`]; stays unique after removal
    pub struct SubscriptionId;
}

/// Shared handler callback
///
/// Returns true if the event was consumed (stops forwarding).
pub type EventHandler = Rc<RefCell<dyn FnMut(&UIEvent) -> bool>>;

struct Subscription {
    kind: EventKind,
    handler: EventHandler,
}

/// Registry mapping event kinds to ordered handlers
///
/// Handlers run in subscription order. Dispatch works on a snapshot, so handlers may
/// subscribe or unsubscribe while an event is in flight; subscriptions removed mid-flight
/// are skipped.
#[derive(Default)]
pub struct Events {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    by_kind: HashMap<EventKind, Vec<SubscriptionId>>,
}

impl Events {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a typed handler for exactly `E`'s kind
    pub fn subscribe<E, F>(&mut self, mut handler: F) -> SubscriptionId
    where
        E: EventPayload,
        F: FnMut(&E) -> bool + 'static,
    {
        self.subscribe_kind(E::KIND, move |event| {
            E::from_event(event).is_some_and(|payload| handler(payload))
        })
    }

    /// Subscribe an untyped handler for `kind`
    pub fn subscribe_kind<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&UIEvent) -> bool + 'static,
    {
        let handler: EventHandler = Rc::new(RefCell::new(handler));
        let id = self.subscriptions.insert(Subscription { kind, handler });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Remove a subscription
    ///
    /// # Returns
    /// `false` when the handle was already removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_kind.get_mut(&subscription.kind) {
            ids.retain(|existing| *existing != id);
        }
        true
    }

    /// True while the handle is registered
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    /// Number of handlers registered for `kind`
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// True when nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Remove every subscription
    pub fn clear(&mut self) {
        self.subscriptions.clear();
        self.by_kind.clear();
    }

    /// Ordered copy of the handlers for `kind`
    pub fn snapshot(&self, kind: EventKind) -> Vec<(SubscriptionId, EventHandler)> {
        self.by_kind
            .get(&kind)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.subscriptions.get(*id).map(|s| (*id, Rc::clone(&s.handler))))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Invoke the handlers registered for the event's kind
    ///
    /// # Returns
    /// `true` if a handler consumed the event; later handlers are not called
    pub fn dispatch(&self, event: &UIEvent) -> bool {
        for (id, handler) in self.snapshot(event.kind()) {
            if !self.is_subscribed(id) {
                continue;
            }
            if invoke(&handler, event) {
                return true;
            }
        }
        false
    }
}

/// Run one handler, skipping it if it is already running further up the stack
pub(crate) fn invoke(handler: &EventHandler, event: &UIEvent) -> bool {
    match handler.try_borrow_mut() {
        Ok(mut callback) => (&mut *callback)(event),
        Err(_) => {
            warn!("Skipping re-entrant handler for {:?}", event.kind());
            false
        }
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(EventKind, usize)> = self
            .by_kind
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(kind, ids)| (*kind, ids.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| *kind as u8);
        f.debug_struct("Events").field("handlers", &counts).finish()
    }
}
