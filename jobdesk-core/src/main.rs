//! src/main.rs
//! ============================================================================
//! # jobdesk: terminal client for the job board API
//!
//! Browse, filter, add, edit and delete job postings served by the jobs
//! REST API.

use std::{
    io::{self, Stdout},
    sync::Arc,
};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend as Backend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use jobdesk_core::{
    Logger,
    api::{HttpJobsApi, JobsApi},
    config::Config,
    controller::{
        ActionDispatcher, EventLoop, FetchController, MutationCoordinator, TaskResult,
    },
    model::{AppState, JobStore, UIState},
    util::debounce::DebounceConfig,
    view::{UIRenderer, theme},
};

type AppTerminal = Terminal<Backend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app: App = App::new()
        .await
        .context("Failed to initialize application")?;

    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    dispatcher: ActionDispatcher,
    renderer: UIRenderer,
    shutdown: Arc<Notify>,
    // flushes the log writer on drop
    _log_guard: WorkerGuard,
}

impl App {
    async fn new() -> Result<Self> {
        // config first: it says where the logs go
        let (config, config_err) = match Config::load().await {
            Ok(cfg) => (cfg, None),
            Err(e) => {
                let mut cfg = Config::default();
                cfg.apply_env_override(std::env::var(jobdesk_core::config::API_URL_ENV).ok());
                (cfg, Some(e))
            }
        };

        let log_guard = Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
        info!("Starting jobdesk");
        if let Some(e) = config_err {
            warn!("Failed to load config, using defaults: {:#}", e);
        }
        theme::init_theme();

        let api: Arc<dyn JobsApi> = Arc::new(
            HttpJobsApi::new(config.api.base_url.as_str(), config.api.request_timeout)
                .context("Failed to build HTTP client")?,
        );
        info!(base_url = %config.api.base_url, "jobs API configured");

        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let (fetch, due_rx) = FetchController::new(
            Arc::clone(&api),
            DebounceConfig::with_delay(config.list.debounce),
            task_tx.clone(),
        );
        let mutations = MutationCoordinator::new(api, task_tx);

        let state = AppState::new(
            JobStore::new(config.list.page_size),
            UIState::new(
                config.notifications.success_ttl,
                config.notifications.error_ttl,
            ),
        );
        let mut dispatcher = ActionDispatcher::new(state, fetch, mutations);
        dispatcher.start();

        let terminal: AppTerminal = setup_terminal().context("Failed to initialize terminal")?;

        info!("Application initialization complete");

        Ok(Self {
            terminal,
            event_loop: EventLoop::new(task_rx, due_rx),
            dispatcher,
            renderer: UIRenderer::new(config.api.base_url),
            shutdown: Arc::new(Notify::new()),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();

        info!("Starting main event loop");

        loop {
            self.render()?;

            let action = tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_action = self.event_loop.next_action(&self.dispatcher.state) => {
                    match maybe_action {
                        Some(action) => action,
                        None => {
                            info!("Event stream ended");
                            break;
                        }
                    }
                }
            };

            if !self.dispatcher.handle(action) {
                info!("Quit action received");
                break;
            }
        }

        info!("Main event loop ended");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let state = &mut self.dispatcher.state;
        if !state.ui.needs_redraw() {
            return Ok(());
        }

        let renderer = &mut self.renderer;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, &*state))
            .context("Failed to draw terminal")?;

        state.ui.clear_redraw();
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = Arc::clone(&self.shutdown);

        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C signal");
                    shutdown.notify_one();
                }
                Err(e) => {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            error!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend: Backend<Stdout> = Backend::new(stdout);
    let terminal: AppTerminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

/// Restore the terminal before the default hook prints the panic.
fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
