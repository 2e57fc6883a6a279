//! # myhomed: myHome floor-plan daemon
//!
//! Composition root that wires the adapters to the editor core.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Build the HTTP gateway and load the floor plan through the editor
//! - Bootstrap the push channel and mirror live device updates into the scene
//! - Shut down cleanly on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod headless;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use myhome_adapter_http_reqwest::HttpGateway;
use myhome_app::editor::Editor;
use myhome_app::live_update::LiveUpdateListener;

use crate::config::Config;
use crate::headless::{HeadlessDialogs, LogSurface};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading myhome.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let gateway = HttpGateway::new(&config.server).context("building the HTTP client")?;
    tracing::info!(base_url = gateway.base_url(), "using dashboard");

    let mut editor = Editor::new(gateway.clone(), LogSurface, HeadlessDialogs);
    editor.load().await.context("loading the floor plan")?;
    let devices: usize = editor.scene().zones().iter().map(|zone| zone.devices.len()).sum();
    tracing::info!(
        zones = editor.scene().zones().len(),
        devices,
        device_types = editor.device_types().len(),
        "floor plan loaded"
    );

    let listener = LiveUpdateListener::default();
    let (sink, mut messages) = mpsc::channel(config.mqtt.capacity);
    let dashboard_host = gateway.host().unwrap_or_else(|| "localhost".to_string());
    let connection = match myhome_adapter_mqtt::bootstrap(
        &gateway,
        &config.mqtt,
        &dashboard_host,
        listener.topics(),
        sink,
    )
    .await
    {
        Ok(connection) => Some(connection),
        Err(err) => {
            tracing::warn!(error = %err, "live updates unavailable");
            None
        }
    };

    loop {
        tokio::select! {
            Some(message) = messages.recv() => {
                if listener.handle(editor.scene_mut(), &message) {
                    tracing::info!(topic = %message.topic, "device icon refreshed");
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("listening for Ctrl-C")?;
                tracing::info!("shutting down");
                break;
            }
        }
    }

    if let Some(connection) = connection {
        connection.close().await.context("closing the broker connection")?;
    }
    Ok(())
}
