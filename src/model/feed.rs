//! Feed renderer state: one unit per listing, playback follows the active unit
//!
//! Direct video plays while its unit is active and is paused and rewound
//! when it stops being active. Embedded players load only after a short
//! debounce so that units merely scrolled past never load.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use crate::config::PlaybackConfig;
use crate::surface::{SimulatedVideo, VideoElement};
use super::listing::{Listing, ListingId, MediaKind};
use super::store::ListingStore;
use super::unit::{LoadPhase, PendingLoad, UnitState};

/// Deferred completions delivered back to the feed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedMessage {
    EmbedLoadDue { listing: ListingId, ticket: u64 },
}

pub struct FeedState {
    order: Vec<ListingId>,
    units: HashMap<ListingId, UnitState>,
    active: usize,
    next_ticket: u64,
    load_delay: Duration,
    messages: UnboundedSender<FeedMessage>,
}

impl FeedState {
    /// Mount one unit per listing with simulated video elements and make
    /// the first one active.
    pub fn mount(
        store: &ListingStore,
        config: &PlaybackConfig,
        messages: UnboundedSender<FeedMessage>,
    ) -> Self {
        let autoplay = config.autoplay_allowed;
        let muted = config.start_muted;
        Self::mount_with(store, config, messages, |listing| {
            Box::new(SimulatedVideo::new(listing.media.source.clone(), muted, autoplay)) as Box<dyn VideoElement>
        })
    }

    pub fn mount_with<F>(
        store: &ListingStore,
        config: &PlaybackConfig,
        messages: UnboundedSender<FeedMessage>,
        make_video: F,
    ) -> Self
    where
        F: Fn(&Listing) -> Box<dyn VideoElement>,
    {
        let mut order = Vec::with_capacity(store.len());
        let mut units = HashMap::with_capacity(store.len());
        for listing in store.iter() {
            let video = (listing.media.kind == MediaKind::Video).then(|| make_video(listing));
            order.push(listing.id.clone());
            units.insert(listing.id.clone(), UnitState::new(listing, config.start_muted, video));
        }

        let mut feed = Self {
            order,
            units,
            active: 0,
            next_ticket: 0,
            load_delay: config.embed_load_delay(),
            messages,
        };
        feed.activate(0);
        tracing::info!(units = feed.order.len(), "Feed mounted");
        feed
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn unit_at(&self, index: usize) -> Option<&UnitState> {
        self.order.get(index).and_then(|id| self.units.get(id))
    }

    fn unit_at_mut(&mut self, index: usize) -> Option<&mut UnitState> {
        let id = self.order.get(index)?;
        self.units.get_mut(id)
    }

    /// Move playback to the unit at `index`
    pub fn set_active(&mut self, index: usize) {
        if index == self.active || index >= self.order.len() {
            return;
        }
        tracing::info!(from = self.active, to = index, "Active unit changed");
        self.deactivate(self.active);
        self.active = index;
        self.activate(index);
    }

    fn activate(&mut self, index: usize) {
        let ticket = self.next_ticket + 1;
        let delay = self.load_delay;
        let messages = self.messages.clone();
        let Some(unit) = self.unit_at_mut(index) else {
            return;
        };
        unit.active_since = Some(Instant::now());

        match unit.kind {
            MediaKind::Video => {
                if let Some(video) = unit.video.as_mut() {
                    video.set_muted(unit.muted);
                    if let Err(e) = video.play() {
                        // Poster stays up; nothing to surface
                        tracing::debug!(listing = %unit.listing, error = %e, "Autoplay prevented");
                    }
                }
            }
            MediaKind::Embed => {
                unit.cancel_pending();
                let listing = unit.listing.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = messages.send(FeedMessage::EmbedLoadDue { listing, ticket });
                });
                unit.pending = Some(PendingLoad { ticket, handle });
                unit.load = LoadPhase::Loading;
                self.next_ticket = ticket;
            }
            MediaKind::Image => {}
        }
    }

    fn deactivate(&mut self, index: usize) {
        let Some(unit) = self.unit_at_mut(index) else {
            return;
        };
        unit.active_since = None;

        match unit.kind {
            MediaKind::Video => {
                if let Some(video) = unit.video.as_mut() {
                    video.pause();
                    video.seek(Duration::ZERO);
                }
            }
            MediaKind::Embed => {
                unit.cancel_pending();
                unit.load = LoadPhase::NotLoaded;
            }
            MediaKind::Image => {}
        }
    }

    /// Apply a deferred completion. Returns whether it changed anything;
    /// completions for a unit that has since been deactivated are dropped.
    pub fn handle_message(&mut self, message: FeedMessage) -> bool {
        match message {
            FeedMessage::EmbedLoadDue { listing, ticket } => {
                let Some(unit) = self.units.get_mut(&listing) else {
                    return false;
                };
                let current = unit.pending.as_ref().map(|p| p.ticket);
                if current != Some(ticket) || unit.load != LoadPhase::Loading {
                    tracing::debug!(%listing, ticket, "Stale embed load ignored");
                    return false;
                }
                unit.pending = None;
                unit.load = LoadPhase::Loaded;
                tracing::info!(%listing, "Embedded player loaded");
                true
            }
        }
    }

    pub fn toggle_like(&mut self, index: usize) -> Option<(bool, u32)> {
        let unit = self.unit_at_mut(index)?;
        unit.toggle_like();
        tracing::debug!(listing = %unit.listing, liked = unit.liked, likes = unit.likes, "Like toggled");
        Some((unit.liked, unit.likes))
    }

    pub fn toggle_mute(&mut self, index: usize) -> Option<bool> {
        let unit = self.unit_at_mut(index)?;
        if !unit.toggle_mute() {
            return None;
        }
        tracing::debug!(listing = %unit.listing, muted = unit.muted, "Mute toggled");
        Some(unit.muted)
    }

    /// Tear every unit down: pending loads are cancelled, video stops
    pub fn unmount(&mut self) {
        self.deactivate(self.active);
        for unit in self.units.values_mut() {
            unit.cancel_pending();
        }
        self.units.clear();
        self.order.clear();
        self.active = 0;
        tracing::info!("Feed unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::mixed_store;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    const EMBED: usize = 0;
    const VIDEO: usize = 1;
    const IMAGE: usize = 2;

    fn mounted(config: &PlaybackConfig) -> (FeedState, mpsc::UnboundedReceiver<FeedMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FeedState::mount(&mixed_store(), config, tx), rx)
    }

    #[derive(Default)]
    struct Calls(Vec<&'static str>);

    /// Video element that records what the feed asked of it
    struct RecordingVideo {
        calls: Arc<Mutex<Calls>>,
        muted: bool,
        playing: bool,
        reject: bool,
    }

    impl VideoElement for RecordingVideo {
        fn play(&mut self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().0.push("play");
            if self.reject {
                anyhow::bail!("NotAllowedError");
            }
            self.playing = true;
            Ok(())
        }
        fn pause(&mut self) {
            self.calls.lock().unwrap().0.push("pause");
            self.playing = false;
        }
        fn seek(&mut self, position: Duration) {
            assert_eq!(position, Duration::ZERO);
            self.calls.lock().unwrap().0.push("seek0");
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
        fn position(&self) -> Duration {
            Duration::ZERO
        }
    }

    fn recording(reject: bool) -> (FeedState, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let (tx, _rx) = mpsc::unbounded_channel();
        let shared = calls.clone();
        let feed = FeedState::mount_with(&mixed_store(), &PlaybackConfig::default(), tx, move |_| {
            Box::new(RecordingVideo {
                calls: shared.clone(),
                muted: true,
                playing: false,
                reject,
            }) as Box<dyn VideoElement>
        });
        (feed, calls)
    }

    #[tokio::test]
    async fn first_unit_is_active_on_mount() {
        let (feed, _rx) = mounted(&PlaybackConfig::default());
        assert_eq!(feed.active(), 0);
        assert!(feed.unit_at(EMBED).unwrap().is_active());
        assert_eq!(feed.unit_at(EMBED).unwrap().load, LoadPhase::Loading);
        assert!(!feed.unit_at(VIDEO).unwrap().is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn embed_loads_after_debounce() {
        let (mut feed, mut rx) = mounted(&PlaybackConfig::default());
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let message = rx.try_recv().unwrap();
        assert!(feed.handle_message(message));
        assert_eq!(feed.unit_at(EMBED).unwrap().load, LoadPhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_before_debounce_prevents_load() {
        let (mut feed, mut rx) = mounted(&PlaybackConfig::default());
        feed.set_active(VIDEO);
        assert_eq!(feed.unit_at(EMBED).unwrap().load, LoadPhase::NotLoaded);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());

        // even a completion that slipped through is dropped
        let stale = FeedMessage::EmbedLoadDue {
            listing: ListingId::new("e"),
            ticket: 1,
        };
        assert!(!feed.handle_message(stale));
        assert_eq!(feed.unit_at(EMBED).unwrap().load, LoadPhase::NotLoaded);
    }

    #[tokio::test(start_paused = true)]
    async fn scrolling_back_restarts_debounce() {
        let (mut feed, mut rx) = mounted(&PlaybackConfig::default());
        feed.set_active(VIDEO);
        feed.set_active(EMBED);
        assert_eq!(feed.unit_at(EMBED).unwrap().load, LoadPhase::Loading);

        tokio::time::sleep(Duration::from_millis(150)).await;
        let message = rx.try_recv().unwrap();
        assert_eq!(
            message,
            FeedMessage::EmbedLoadDue {
                listing: ListingId::new("e"),
                ticket: 2,
            }
        );
        assert!(feed.handle_message(message));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn video_plays_when_active_and_rewinds_when_left() {
        let (mut feed, calls) = recording(false);
        feed.set_active(VIDEO);
        assert!(feed.unit_at(VIDEO).unwrap().is_playing());

        feed.set_active(IMAGE);
        assert!(!feed.unit_at(VIDEO).unwrap().is_playing());
        assert_eq!(calls.lock().unwrap().0, vec!["play", "pause", "seek0"]);
    }

    #[tokio::test]
    async fn autoplay_rejection_is_swallowed() {
        let (mut feed, calls) = recording(true);
        feed.set_active(VIDEO);
        let unit = feed.unit_at(VIDEO).unwrap();
        assert!(unit.is_active());
        assert!(!unit.is_playing());
        assert_eq!(calls.lock().unwrap().0, vec!["play"]);
    }

    #[tokio::test]
    async fn blocked_simulated_video_keeps_poster() {
        let config = PlaybackConfig {
            autoplay_allowed: false,
            ..PlaybackConfig::default()
        };
        let (mut feed, _rx) = mounted(&config);
        feed.set_active(VIDEO);
        assert!(!feed.unit_at(VIDEO).unwrap().is_playing());
    }

    #[tokio::test]
    async fn unmuted_video_stays_unmuted_on_return() {
        let (mut feed, _calls) = recording(false);
        feed.set_active(VIDEO);
        assert_eq!(feed.toggle_mute(VIDEO), Some(false));
        feed.set_active(IMAGE);
        feed.set_active(VIDEO);
        let unit = feed.unit_at(VIDEO).unwrap();
        assert!(!unit.muted);
        assert!(!unit.video.as_ref().unwrap().is_muted());
    }

    #[tokio::test]
    async fn mute_is_per_unit() {
        let (mut feed, _rx) = mounted(&PlaybackConfig::default());
        assert_eq!(feed.toggle_mute(EMBED), Some(false));
        assert!(feed.unit_at(VIDEO).unwrap().muted);
        assert_eq!(feed.toggle_mute(IMAGE), None);
    }

    #[tokio::test]
    async fn likes_are_per_unit() {
        let (mut feed, _rx) = mounted(&PlaybackConfig::default());
        assert_eq!(feed.toggle_like(VIDEO), Some((true, 951)));
        assert_eq!(feed.unit_at(EMBED).unwrap().likes, 1500);
        assert!(!feed.unit_at(EMBED).unwrap().liked);
        assert_eq!(feed.toggle_like(VIDEO), Some((false, 950)));
    }

    #[tokio::test]
    async fn out_of_range_activation_is_ignored() {
        let (mut feed, _rx) = mounted(&PlaybackConfig::default());
        feed.set_active(99);
        assert_eq!(feed.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_pending_loads() {
        let (mut feed, mut rx) = mounted(&PlaybackConfig::default());
        feed.unmount();
        assert!(feed.is_empty());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
