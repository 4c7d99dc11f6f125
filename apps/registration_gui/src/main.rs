mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use registration_core::{
    config::{load_settings, parse_endpoint_url},
    HttpRegistrationEndpoint,
};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::RegistrationApp;

#[derive(Parser, Debug)]
#[command(about = "Registro para sorteo")]
struct Args {
    /// Registration endpoint; wins over registration.toml and the environment.
    #[arg(long)]
    endpoint_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load registration settings")?;
    if let Some(raw) = args.endpoint_url.as_deref() {
        settings.endpoint_url = parse_endpoint_url(raw)?;
    }
    tracing::info!(endpoint = %settings.endpoint_url, "starting registration window");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(
        cmd_rx,
        ui_tx,
        HttpRegistrationEndpoint::from_settings(&settings),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Registro para Sorteo")
            .with_inner_size([760.0, 840.0])
            .with_min_inner_size([480.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Registro para Sorteo",
        options,
        Box::new(|_cc| Ok(Box::new(RegistrationApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("registration window failed: {err}"))
}
