//! In-process publish/subscribe for simulation events.
//!
//! Delivery is synchronous, in subscription order, on the caller's stack.
//! Handlers only ever see `&SimEvent`; they cannot reach the bus or the
//! world, so they cannot subscribe, unsubscribe or issue commands mid-dispatch.

use vanguard_core::events::{EventKind, SimEvent};

/// Handle returned by `subscribe`, usable with `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&SimEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// `None` receives every kind.
    kind: Option<EventKind>,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&SimEvent) + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(handler))
    }

    /// Register a handler for every event.
    pub fn subscribe_all(&mut self, handler: impl FnMut(&SimEvent) + 'static) -> SubscriptionId {
        self.add(None, Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every matching handler. Returns how many ran.
    pub fn publish(&mut self, event: &SimEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for sub in &mut self.subscribers {
            if sub.kind.is_none_or(|k| k == kind) {
                (sub.handler)(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn add(&mut self, kind: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, handler });
        id
    }
}
