//! Main application model with state management

use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::surface::SnapViewport;
use crate::tracker::VisibilityTracker;
use super::feed::{FeedMessage, FeedState};
use super::listing::Listing;
use super::modal::{ContactOutcome, Modal, ModalController};
use super::store::ListingStore;

/// Short-lived status line message
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
}

/// Main application model containing all state
pub struct AppModel {
    pub config: Config,
    pub store: ListingStore,
    pub viewport: SnapViewport,
    pub tracker: VisibilityTracker,
    pub feed: FeedState,
    pub modals: ModalController,
    notice: Option<Notice>,
    should_quit: bool,
}

impl AppModel {
    /// Mount the feed over `store` in a viewport `height` rows tall
    pub fn new(
        config: Config,
        store: ListingStore,
        height: u16,
        messages: UnboundedSender<FeedMessage>,
    ) -> Self {
        let mut viewport = SnapViewport::new(store.len(), height, &config.feed);
        let tracker = VisibilityTracker::attach(&mut viewport, store.len());
        let feed = FeedState::mount(&store, &config.playback, messages);
        Self {
            config,
            store,
            viewport,
            tracker,
            feed,
            modals: ModalController::new(),
            notice: None,
            should_quit: false,
        }
    }

    // ========================================================================
    // Feed
    // ========================================================================

    pub fn active_index(&self) -> usize {
        self.feed.active()
    }

    pub fn active_listing(&self) -> Option<&Listing> {
        self.store.get(self.feed.active())
    }

    /// Hand the tracker's settled position to the feed
    pub fn sync_active(&mut self) -> Option<usize> {
        let position = self.tracker.settle()?;
        self.feed.set_active(position);
        Some(position)
    }

    /// Advance scrolling, then let the feed follow
    pub fn tick(&mut self, now: Instant) {
        self.viewport.tick(now);
        self.sync_active();
        self.auto_clear_notice(now);
    }

    pub fn handle_feed_message(&mut self, message: FeedMessage) {
        self.feed.handle_message(message);
    }

    pub fn page(&mut self, delta: i32, now: Instant) {
        self.viewport.page(delta, now);
    }

    pub fn scroll_lines(&mut self, delta: i32, now: Instant) {
        self.viewport.scroll_lines(delta, now);
        self.sync_active();
    }

    pub fn resize(&mut self, height: u16) {
        self.viewport.resize(height);
        self.sync_active();
    }

    pub fn toggle_like(&mut self) {
        let index = self.feed.active();
        self.feed.toggle_like(index);
    }

    pub fn toggle_mute(&mut self) {
        let index = self.feed.active();
        self.feed.toggle_mute(index);
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn modal(&self) -> &Modal {
        self.modals.modal()
    }

    pub fn open_share(&mut self) {
        self.modals.open_share();
    }

    pub fn open_specs(&mut self) {
        if let Some(id) = self.active_listing().map(|l| l.id.clone()) {
            self.modals.open_specs(id);
        }
    }

    /// The listing shown in the specs drawer, if it is open
    pub fn specs_listing(&self) -> Option<&Listing> {
        match self.modals.modal() {
            Modal::Specs(id) => self.store.find(id),
            _ => None,
        }
    }

    /// Contact the seller of the active listing
    pub fn contact_seller(&mut self) {
        let seller = self.active_listing().map(|l| l.seller.name.clone());
        if self.modals.contact_seller() == ContactOutcome::Contact {
            self.open_chat(seller);
        }
    }

    /// Contact button inside the specs drawer
    pub fn contact_from_specs(&mut self) {
        let seller = self.specs_listing().map(|l| l.seller.name.clone());
        if self.modals.contact_from_specs() == ContactOutcome::Contact {
            self.open_chat(seller);
        }
    }

    fn open_chat(&mut self, seller: Option<String>) {
        let seller = seller.unwrap_or_else(|| "seller".to_string());
        tracing::info!(seller = %seller, "Opening chat with seller");
        self.show_notice(format!("Opening chat with {}...", seller));
    }

    // ========================================================================
    // Status notices
    // ========================================================================

    pub fn show_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            shown_at: Instant::now(),
        });
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn auto_clear_notice(&mut self, now: Instant) {
        let lifetime = self.config.ui.notice_lifetime();
        if self
            .notice
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= lifetime)
        {
            self.notice = None;
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    /// Release observation and stop all media
    pub fn unmount(&mut self) {
        if !self.tracker.is_attached() {
            return;
        }
        self.tracker.teardown(&mut self.viewport);
        self.feed.unmount();
    }
}
