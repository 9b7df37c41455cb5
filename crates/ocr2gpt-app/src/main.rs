use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ocr2gpt_capture::PrimaryMonitor;
use ocr2gpt_config::Config;
use ocr2gpt_ui::bridge::UiBridge;
use tracing_subscriber::EnvFilter;

pub mod backend;
pub mod capture_context;
pub mod cli;
pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod status;


use self::backend::build_recognizer;
use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = profile::load_config(cli.config.as_deref())?;
    profile::apply_overrides(&mut config, &cli);

    init_tracing(&config, cli.log_json);
    match &cli.config {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file given, using environment and defaults"),
    }
    for problem in ocr2gpt_config::env_diagnostics() {
        tracing::warn!("{problem}");
    }

    if let Some(path) = &cli.write_default_config {
        return profile::write_config(path, &config);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("ocr2gpt-worker")
        .build()?;

    run(runtime, config)
}

fn init_tracing(config: &Config, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stdout)).init();
    }
}

/// Backend tasks on the runtime, slint on the main thread
fn run(runtime: tokio::runtime::Runtime, config: Config) -> anyhow::Result<()> {
    let recognizer = build_recognizer(&config.recognition);
    match &recognizer {
        Some(r) => tracing::info!("Recognition backend: {}", r.metadata().name),
        None => tracing::info!("Screenshot-only mode, recognition disabled"),
    }

    let ui_config = config.ui.clone();
    let hide_delay = Duration::from_millis(config.capture.hide_delay_ms);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let (bridge, handle) = UiBridge::new();

    let mut tasks = {
        let _guard = runtime.enter();
        controller.spawn_tasks(bridge, Arc::new(PrimaryMonitor), recognizer)
    };

    let ui_result = ocr2gpt_ui::run_ui(handle, ui_config, hide_delay);
    if let Err(e) = &ui_result {
        tracing::error!("UI exited with error: {e:#}");
    }

    controller.shutdown();
    runtime.block_on(async {
        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::warn!("Task exited with error: {e:#}"),
                    Err(e) => tracing::error!("Task panicked: {e}"),
                }
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!("Tasks did not stop in time, aborting");
            tasks.abort_all();
        }
    });
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    tracing::info!("Shutdown complete");
    ui_result
}
