//! Listener for messages produced by the feed's background tasks

use tokio::sync::mpsc::UnboundedReceiver;

use crate::model::FeedMessage;
use super::AppController;

impl AppController {
    pub fn start_feed_event_listener(&self, mut messages: UnboundedReceiver<FeedMessage>) {
        let model = self.model.clone();
        tracing::info!("Starting feed event listener");

        tokio::spawn(async move {
            while let Some(message) = messages.recv().await {
                let mut model_guard = model.lock().await;

                if model_guard.should_quit() {
                    tracing::debug!("Feed event listener shutting down");
                    break;
                }

                tracing::trace!(?message, "Feed message");
                model_guard.handle_feed_message(message);
            }
        });
    }
}
