/// Decides whether a consumer of a shared stream may act on its events, by watching how many
/// subscribers the stream has.
///
/// A consumer which keeps its own subscription is exclusive while it is the only subscriber. As
/// soon as anyone else subscribes, e.g. a pin which got grabbed and listens to drags, exclusivity
/// is revoked. It comes back once the count falls to one again. An empty stream is exclusive too,
/// so a consumer which is about to subscribe is not held back.
#[derive(Debug, Clone, Default)]
pub struct ExclusivityArbiter {
    exclusive: bool,
    last_count: usize,
}

impl ExclusivityArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    /// Feed the current subscriber count. Returns the new state, but only when it changed.
    pub fn observe(&mut self, count: usize) -> Option<bool> {
        let exclusive = count <= 1;

        if count != self.last_count {
            log::trace!("Subscriber count changed {} -> {count}.", self.last_count);
            self.last_count = count;
        }

        if exclusive == self.exclusive {
            return None;
        }

        log::debug!(
            "Exclusivity {} at {count} subscriber(s).",
            if exclusive { "granted" } else { "revoked" }
        );
        self.exclusive = exclusive;
        Some(exclusive)
    }
}
