//! Key, mouse and resize event handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::model::{Modal, SignInOption};
use crate::view::AppView;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;
        let now = Instant::now();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return Ok(());
        }

        // An open overlay takes every key
        match model.modal().clone() {
            Modal::Auth => {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('x') => model.modals.dismiss(),
                    KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => model.modals.cursor_next(),
                    KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => model.modals.cursor_prev(),
                    KeyCode::Enter => {
                        model.modals.confirm();
                    }
                    KeyCode::Char(c @ '1'..='4') => {
                        let index = c as usize - '1' as usize;
                        model.modals.sign_in(SignInOption::ALL[index]);
                    }
                    _ => {}
                }
                return Ok(());
            }
            Modal::Share => {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('s') => model.modals.dismiss(),
                    KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Tab => {
                        model.modals.cursor_next()
                    }
                    KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::BackTab => {
                        model.modals.cursor_prev()
                    }
                    KeyCode::Enter => {
                        model.modals.confirm();
                    }
                    _ => {}
                }
                return Ok(());
            }
            Modal::Specs(_) => {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('i') => model.modals.dismiss(),
                    KeyCode::Char('c') | KeyCode::Enter => model.contact_from_specs(),
                    _ => {}
                }
                return Ok(());
            }
            Modal::Closed => {}
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown | KeyCode::Char(' ') => {
                model.page(1, now);
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => {
                model.page(-1, now);
            }
            KeyCode::Home => {
                let units = model.viewport.units() as i32;
                model.page(-(units + 1), now);
            }
            KeyCode::End => {
                let units = model.viewport.units() as i32;
                model.page(units + 1, now);
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                model.toggle_like();
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                model.toggle_mute();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                model.open_share();
            }
            KeyCode::Char('i') | KeyCode::Char('I') | KeyCode::Enter => {
                model.open_specs();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                model.contact_seller();
            }
            _ => {}
        }
        Ok(())
    }

    /// Wheel scrolling drives the feed directly; the viewport snaps once
    /// the wheel goes quiet. Ignored while an overlay is open.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        let mut model = self.model.lock().await;
        if model.modal().is_open() {
            return Ok(());
        }

        let step = model.config.feed.wheel_step_rows as i32;
        match mouse.kind {
            MouseEventKind::ScrollDown => model.scroll_lines(step, Instant::now()),
            MouseEventKind::ScrollUp => model.scroll_lines(-step, Instant::now()),
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_resize(&self, _width: u16, height: u16) -> Result<()> {
        let feed_height = AppView::feed_height(height);
        tracing::debug!(height, feed_height, "Terminal resized");
        self.model.lock().await.resize(feed_height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::{mpsc, Mutex};

    use crate::config::Config;
    use crate::controller::AppController;
    use crate::model::fixtures::mixed_store;
    use crate::model::{AppModel, ListingId, Modal};

    fn controller() -> AppController {
        let (tx, _rx) = mpsc::unbounded_channel();
        let model = AppModel::new(Config::default(), mixed_store(), 20, tx);
        AppController::new(Arc::new(Mutex::new(model)))
    }

    async fn press(controller: &AppController, code: KeyCode) {
        controller
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .await
            .unwrap();
    }

    async fn settle(controller: &AppController) {
        let later = std::time::Instant::now() + Duration::from_secs(1);
        controller.tick(later).await;
    }

    #[tokio::test]
    async fn arrow_keys_page_through_the_feed() {
        let controller = controller();
        press(&controller, KeyCode::Down).await;
        settle(&controller).await;
        assert_eq!(controller.model.lock().await.active_index(), 1);

        press(&controller, KeyCode::Up).await;
        settle(&controller).await;
        assert_eq!(controller.model.lock().await.active_index(), 0);
    }

    #[tokio::test]
    async fn overlay_swallows_feed_keys() {
        let controller = controller();
        press(&controller, KeyCode::Char('s')).await;
        assert_eq!(controller.model.lock().await.modal(), &Modal::Share);

        // would page and like if the feed had focus
        press(&controller, KeyCode::Down).await;
        press(&controller, KeyCode::Char('l')).await;
        settle(&controller).await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.active_index(), 0);
            assert!(!model.feed.unit_at(0).unwrap().liked);
        }

        press(&controller, KeyCode::Esc).await;
        assert_eq!(controller.model.lock().await.modal(), &Modal::Closed);
    }

    #[tokio::test]
    async fn contact_flow_through_sign_in() {
        let controller = controller();
        press(&controller, KeyCode::Char('i')).await;
        assert_eq!(
            controller.model.lock().await.modal(),
            &Modal::Specs(ListingId::new("e"))
        );

        press(&controller, KeyCode::Char('c')).await;
        assert_eq!(controller.model.lock().await.modal(), &Modal::Auth);

        press(&controller, KeyCode::Char('2')).await;
        {
            let model = controller.model.lock().await;
            assert_eq!(model.modal(), &Modal::Closed);
            assert!(model.modals.is_authenticated());
        }

        press(&controller, KeyCode::Char('c')).await;
        let model = controller.model.lock().await;
        assert_eq!(model.modal(), &Modal::Closed);
        assert_eq!(model.notice().unwrap().text, "Opening chat with Seller e...");
    }

    #[tokio::test]
    async fn ctrl_c_quits_even_with_overlay_open() {
        let controller = controller();
        press(&controller, KeyCode::Char('c')).await;
        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(controller.model.lock().await.should_quit());
    }
}
