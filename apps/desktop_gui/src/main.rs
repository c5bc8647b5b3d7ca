mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ZipcastApp;

#[derive(Parser, Debug)]
struct Args {
    /// Backend API base URL; overrides zipcast.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let api_base_url = match config::normalize_base_url(&settings.api_base_url) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!("invalid configuration: {err:#}");
            std::process::exit(2);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(api_base_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Zipcast")
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([440.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Zipcast",
        options,
        Box::new(|_cc| Ok(Box::new(ZipcastApp::new(cmd_tx, ui_rx)))),
    )
}
