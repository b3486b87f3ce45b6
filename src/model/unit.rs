//! Transient state of one presentation unit in the feed

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::surface::VideoElement;
use super::listing::{Listing, ListingId, MediaKind};

/// Load progress of a deferred embedded player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Poster only
    #[default]
    NotLoaded,
    /// Debounce running; poster plus spinner
    Loading,
    /// Player is live
    Loaded,
}

/// A scheduled embed load. The ticket identifies this particular
/// activation so a completion from an earlier one can be told apart.
pub(crate) struct PendingLoad {
    pub(crate) ticket: u64,
    pub(crate) handle: JoinHandle<()>,
}

pub struct UnitState {
    pub listing: ListingId,
    pub kind: MediaKind,
    pub liked: bool,
    /// Displayed like count, starting from the listing's count
    pub likes: u32,
    pub muted: bool,
    pub load: LoadPhase,
    pub(crate) active_since: Option<Instant>,
    pub(crate) video: Option<Box<dyn VideoElement>>,
    pub(crate) pending: Option<PendingLoad>,
}

impl UnitState {
    pub fn new(listing: &Listing, muted: bool, video: Option<Box<dyn VideoElement>>) -> Self {
        Self {
            listing: listing.id.clone(),
            kind: listing.media.kind,
            liked: false,
            likes: listing.likes,
            muted,
            load: LoadPhase::NotLoaded,
            active_since: None,
            video,
            pending: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_since.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.video.as_ref().is_some_and(|v| v.is_playing())
    }

    pub fn video_position(&self) -> Duration {
        self.video.as_ref().map(|v| v.position()).unwrap_or_default()
    }

    /// Time since this unit became active
    pub fn active_for(&self, now: Instant) -> Option<Duration> {
        self.active_since.map(|t| now.saturating_duration_since(t))
    }

    /// Fill ratio of the bottom sweep: runs while active and the embedded
    /// player has not loaded, empty otherwise.
    pub fn sweep_ratio(&self, now: Instant, sweep: Duration) -> f64 {
        match self.active_for(now) {
            Some(_) if self.load == LoadPhase::Loaded => 0.0,
            Some(_) if sweep.is_zero() => 1.0,
            Some(elapsed) => (elapsed.as_secs_f64() / sweep.as_secs_f64()).min(1.0),
            None => 0.0,
        }
    }

    /// Optimistic local like toggle
    pub fn toggle_like(&mut self) {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes = self.likes.saturating_add(1);
        }
        self.liked = !self.liked;
    }

    /// Flip mute for this unit only. Image units have nothing to mute.
    pub fn toggle_mute(&mut self) -> bool {
        if !self.kind.has_audio() {
            return false;
        }
        self.muted = !self.muted;
        if let Some(video) = self.video.as_mut() {
            video.set_muted(self.muted);
        }
        true
    }

    pub(crate) fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            tracing::debug!(listing = %self.listing, ticket = pending.ticket, "Pending embed load cancelled");
        }
    }
}

impl Drop for UnitState {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::listing;

    #[test]
    fn like_toggle_round_trip() {
        let l = listing("a", MediaKind::Image, 950);
        let mut unit = UnitState::new(&l, true, None);
        unit.toggle_like();
        assert!(unit.liked);
        assert_eq!(unit.likes, 951);
        unit.toggle_like();
        assert!(!unit.liked);
        assert_eq!(unit.likes, 950);
    }

    #[test]
    fn image_units_ignore_mute() {
        let l = listing("a", MediaKind::Image, 0);
        let mut unit = UnitState::new(&l, true, None);
        assert!(!unit.toggle_mute());
        assert!(unit.muted);
    }

    #[test]
    fn sweep_only_runs_while_active_and_not_loaded() {
        let l = listing("a", MediaKind::Embed, 0);
        let mut unit = UnitState::new(&l, true, None);
        let now = Instant::now();
        let sweep = Duration::from_secs(3);
        assert_eq!(unit.sweep_ratio(now, sweep), 0.0);

        unit.active_since = Some(now);
        let half = unit.sweep_ratio(now + Duration::from_millis(1500), sweep);
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(unit.sweep_ratio(now + Duration::from_secs(10), sweep), 1.0);

        unit.load = LoadPhase::Loaded;
        assert_eq!(unit.sweep_ratio(now + Duration::from_secs(1), sweep), 0.0);
    }
}
