//! Region visibility capability provided by the host surface

use futures::channel::mpsc;

/// A region inside the scroll container, addressed by layout position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

/// A region crossed the visibility threshold in either direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub region: RegionId,
    pub visible: bool,
}

pub type VisibilitySink = mpsc::UnboundedSender<VisibilityEvent>;
pub type VisibilityStream = mpsc::UnboundedReceiver<VisibilityEvent>;

pub fn visibility_channel() -> (VisibilitySink, VisibilityStream) {
    mpsc::unbounded()
}

/// "Observe region visibility ratio relative to a root container."
///
/// Implementors report the current state of a region as soon as it is
/// observed, then one event per threshold crossing. Events for every
/// observed region go to the sink handed over at `observe`, in the order
/// the crossings happened.
pub trait VisibilityObserver {
    fn observe(&mut self, region: RegionId, sink: VisibilitySink);

    /// Stop observing everything. No event may be sent afterwards.
    fn disconnect(&mut self);
}
