use tokio::sync::broadcast::{self, error::TryRecvError};

/// How many events a subscriber can fall behind before it starts losing them.
const CAPACITY: usize = 64;

/// Multicast stream of events. Every live [`Subscription`] receives every event published after
/// it subscribed. Publishing with no subscribers drops the event.
pub struct Broadcast<T> {
    name: &'static str,
    sender: broadcast::Sender<T>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            sender: self.sender.clone(),
        }
    }
}

impl<T: Clone + std::fmt::Debug> Broadcast<T> {
    pub fn new(name: &'static str) -> Self {
        let (sender, _) = broadcast::channel(CAPACITY);
        Self { name, sender }
    }

    pub fn publish(&self, event: T) {
        log::trace!("Publishing {} event: {event:?}.", self.name);

        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            log::trace!("Nobody listens to {} events, dropping {event:?}.", self.name);
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            name: self.name,
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions. This is what the [`super::ExclusivityArbiter`] observes.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Listening end of a [`Broadcast`]. Drop it to unsubscribe.
pub struct Subscription<T> {
    name: &'static str,
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Next pending event, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<T> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(lost)) => {
                    log::warn!("Subscriber of {} events lost {lost} of them.", self.name);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// All pending events.
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let broadcast = Broadcast::new("test");
        let mut early = broadcast.subscribe();

        broadcast.publish(1);
        let mut late = broadcast.subscribe();
        broadcast.publish(2);

        assert_eq!(vec![1, 2], early.drain());
        assert_eq!(vec![2], late.drain());
        assert_eq!(None, late.try_next());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let broadcast = Broadcast::new("test");
        broadcast.publish("nobody");

        let mut subscription = broadcast.subscribe();
        assert_eq!(None, subscription.try_next());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let broadcast = Broadcast::<u8>::new("test");
        assert_eq!(0, broadcast.subscriber_count());

        let first = broadcast.subscribe();
        let second = broadcast.clone().subscribe();
        assert_eq!(2, broadcast.subscriber_count());

        drop(first);
        assert_eq!(1, broadcast.subscriber_count());

        drop(second);
        assert_eq!(0, broadcast.subscriber_count());
    }

    #[test]
    fn lagging_subscriber_keeps_the_newest_events() {
        let broadcast = Broadcast::new("test");
        let mut subscription = broadcast.subscribe();

        for i in 0..CAPACITY + 10 {
            broadcast.publish(i);
        }

        let received = subscription.drain();
        assert_eq!(CAPACITY, received.len());
        assert_eq!(Some(&(CAPACITY + 9)), received.last());
    }
}
