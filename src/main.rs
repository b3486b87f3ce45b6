mod config;
mod controller;
mod logging;
mod model;
mod surface;
mod tracker;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Instant;
use anyhow::Result;
use tokio::sync::{mpsc, Mutex};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{AppModel, ListingStore};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Drift-RS Starting ===");

    let config = Config::load()?;
    let store = ListingStore::bundled()?;
    tracing::info!(listings = store.len(), "Listing store loaded");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();
    let app_model = AppModel::new(config, store, AppView::feed_height(size.height), feed_tx);
    let model = Arc::new(Mutex::new(app_model));

    let controller = AppController::new(model.clone());
    controller.start_feed_event_listener(feed_rx);

    let res = run_app(&mut terminal, model.clone(), controller).await;

    model.lock().await.unmount();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Drift-RS shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> Result<()> {
    let tick_rate = model.lock().await.config.ui.tick_rate();

    loop {
        let now = Instant::now();
        controller.tick(now).await;

        let should_quit = {
            let model_guard = model.lock().await;
            terminal.draw(|f| {
                AppView::render(f, &model_guard, now);
            })?;
            model_guard.should_quit()
        };

        if should_quit {
            break;
        }

        if event::poll(tick_rate)? {
            let result = match event::read()? {
                Event::Key(key) => controller.handle_key_event(key).await,
                Event::Mouse(mouse) => controller.handle_mouse_event(mouse).await,
                Event::Resize(width, height) => controller.handle_resize(width, height).await,
                _ => Ok(()),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "Event handling failed");
            }
        }
    }

    Ok(())
}
