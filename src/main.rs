mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::{Args, Config};
use controller::AppController;
use model::{AppModel, Route, ServiceClient, Session};
use view::{AppView, ViewState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Args::parse());

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== tunescout starting ===");
    tracing::info!(
        backend = %config.urls.backend,
        music_service = %config.urls.music_service,
        debounce_ms = config.debounce.as_millis() as u64,
        "Configuration loaded"
    );

    let session = config
        .access_token
        .clone()
        .map(Session::with_token)
        .unwrap_or_default();
    let client = ServiceClient::new(config.urls.clone(), session)
        .context("Failed to build HTTP client")?;
    tracing::debug!(authenticated = client.session().is_authenticated(), "Service client ready");

    let model = AppModel::new();
    let controller = AppController::new(model.clone(), Arc::new(client), config.debounce);

    if let Some(path) = config.open.as_deref() {
        match Route::parse(path) {
            Some(route) => controller.navigate(route).await,
            None => tracing::warn!(path, "Ignoring unknown start location"),
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("tunescout shutting down");
    Ok(())
}

async fn snapshot(model: &AppModel) -> ViewState {
    let route = model.current_route().await;
    ViewState {
        ui_state: model.get_ui_state().await,
        search: model.get_search_state().await,
        full_results: model.get_full_results().await,
        detail: model.card_for(&route).await,
        route,
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: AppModel,
    controller: AppController,
) -> Result<()> {
    loop {
        let state = snapshot(&model).await;

        terminal.draw(|f| AppView::render(f, &state))?;

        // Short poll keeps the spinner and async results flowing
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
