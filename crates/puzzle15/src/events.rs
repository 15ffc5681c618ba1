use bevy::prelude::*;

/// Notifications a session sends to its view.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ShuffleComplete,
    /// The tile at `from` slid into the empty slot at `to`.
    MoveApplied { from: usize, to: usize },
    TimerTick { remaining: f32 },
    Won { score: u32 },
    Lost,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn FnMut(&SessionEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &SessionEvent) {
        trace!("event {event:?} -> {} subscriber(s)", self.subscribers.len());
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
