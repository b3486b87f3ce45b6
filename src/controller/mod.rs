//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the terminal, the model and the view.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key, mouse and resize event handling
//! - `feed_events`: Listener for deferred embed loads

mod input;
mod feed_events;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    /// Advance scroll animation, visibility and notices to `now`
    pub async fn tick(&self, now: Instant) {
        self.model.lock().await.tick(now);
    }
}
