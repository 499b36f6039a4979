use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Receives notifications synchronously from a [`Channel`].
///
/// Subscribers only ever see `&T` while the world is mutably borrowed, so
/// they cannot issue requests from inside `notify`. Queue them instead.
pub trait Subscriber<T>: Send {
    fn notify(&mut self, event: &T);
}

impl<T, F> Subscriber<T> for F
where
    F: FnMut(&T) + Send,
{
    fn notify(&mut self, event: &T) {
        self(event)
    }
}

/// Handle returned by [`Channel::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Typed outbound channel owned by the world.
pub struct Channel<T> {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber<T>>)>,
    next_id: u64,
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl Subscriber<T> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Delivers `event` to every subscriber in subscription order.
    pub fn publish(&mut self, event: &T) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber.notify(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Shared buffer subscriber that records every event it sees.
///
/// Clones share the same buffer, so one clone can be handed to the channel
/// while another is kept for draining.
#[derive(Debug)]
pub struct EventLog<T> {
    events: Arc<Mutex<Vec<T>>>,
}

impl<T> EventLog<T> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        // A poisoned buffer still holds valid events.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone> EventLog<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().clone()
    }
}

impl<T> Clone for EventLog<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> Subscriber<T> for EventLog<T> {
    fn notify(&mut self, event: &T) {
        self.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_in_subscription_order() {
        let mut channel = Channel::<u32>::new();
        let log = EventLog::new();
        let seen = log.clone();
        channel.subscribe(move |event: &u32| {
            let mut log = seen.clone();
            log.notify(&(event * 10));
        });
        channel.subscribe(log.clone());

        channel.publish(&1);
        channel.publish(&2);

        assert_eq!(log.drain(), vec![10, 1, 20, 2]);
        assert!(log.is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut channel = Channel::<&'static str>::new();
        let log = EventLog::new();
        let id = channel.subscribe(log.clone());

        channel.publish(&"a");
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.publish(&"b");

        assert_eq!(log.drain(), vec!["a"]);
        assert_eq!(channel.subscriber_count(), 0);
    }
}
