//! Active-item tracking over the host's visibility observer
//!
//! Every listing region is observed with one shared sink so crossings
//! arrive in the order they happened. The most recent region to enter the
//! threshold is the active one; leaving the threshold never changes it.

use std::collections::HashMap;

use futures::{FutureExt, StreamExt};

use crate::surface::{visibility_channel, RegionId, VisibilityEvent, VisibilityObserver, VisibilityStream};

pub struct VisibilityTracker {
    events: Option<VisibilityStream>,
    positions: HashMap<RegionId, usize>,
    active: usize,
}

impl VisibilityTracker {
    /// Observe the first `count` regions of the container, one per listing.
    /// The first listing is active until an event says otherwise.
    pub fn attach(observer: &mut dyn VisibilityObserver, count: usize) -> Self {
        let (sink, stream) = visibility_channel();
        let mut positions = HashMap::with_capacity(count);
        for position in 0..count {
            let region = RegionId(position);
            positions.insert(region, position);
            observer.observe(region, sink.clone());
        }
        tracing::debug!(count, "Visibility tracker attached");
        Self {
            events: Some(stream),
            positions,
            active: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    /// Apply one event; returns the feed position if it entered the threshold.
    pub fn handle(&mut self, event: VisibilityEvent) -> Option<usize> {
        if !event.visible {
            return None;
        }
        let position = *self.positions.get(&event.region)?;
        self.active = position;
        Some(position)
    }

    /// Drain every pending event. Returns the new active position if it
    /// differs from the one before draining.
    pub fn settle(&mut self) -> Option<usize> {
        let before = self.active;
        while let Some(event) = self.try_next() {
            if let Some(position) = self.handle(event) {
                tracing::trace!(position, "Region entered visibility threshold");
            }
        }
        (self.active != before).then_some(self.active)
    }

    fn try_next(&mut self) -> Option<VisibilityEvent> {
        let stream = self.events.as_mut()?;
        match stream.next().now_or_never() {
            Some(Some(event)) => Some(event),
            Some(None) => {
                // Every sink is gone; the observer disconnected on its own
                self.events = None;
                None
            }
            None => None,
        }
    }

    /// Release all observation. Pending and future events are dropped.
    pub fn teardown(&mut self, observer: &mut dyn VisibilityObserver) {
        observer.disconnect();
        if let Some(mut stream) = self.events.take() {
            stream.close();
        }
        tracing::debug!("Visibility tracker torn down");
    }
}
