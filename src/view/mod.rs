//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared formatting and layout helpers
//! - `layout`: Bottom tab bar and status line
//! - `unit`: A single listing unit
//! - `feed`: The snapping feed of units plus the end-of-feed footer
//! - `overlays`: Auth sheet, share sheet and specs drawer

mod utils;
mod layout;
mod unit;
mod feed;
mod overlays;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppModel, Modal};

pub struct AppView;

impl AppView {
    /// Rows available to the feed in a terminal `total` rows tall
    pub fn feed_height(total: u16) -> u16 {
        total.saturating_sub(layout::TAB_BAR_HEIGHT).max(1)
    }

    pub fn render(frame: &mut Frame, model: &AppModel, now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),                         // Feed
                Constraint::Length(layout::TAB_BAR_HEIGHT), // Tab bar
            ])
            .split(frame.area());

        feed::render_feed(frame, chunks[0], model, now);
        layout::render_tab_bar(frame, chunks[1], model);

        // At most one overlay, above everything else
        match model.modal() {
            Modal::Closed => {}
            Modal::Auth => {
                overlays::render_backdrop(frame);
                overlays::render_auth(frame, model.modals.cursor());
            }
            Modal::Share => {
                overlays::render_backdrop(frame);
                overlays::render_share(frame, model.active_listing(), model.modals.cursor());
            }
            Modal::Specs(_) => {
                overlays::render_backdrop(frame);
                if let Some(listing) = model.specs_listing() {
                    overlays::render_specs(frame, listing);
                }
            }
        }
    }
}
