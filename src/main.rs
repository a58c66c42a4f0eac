mod api;
mod app;
mod catalog;
mod config;
mod gallery;
mod lightbox;
mod net;
mod resolve;
mod state;
mod status;

use std::sync::Arc;
use std::time::Duration;

use api::ApiClient;
use app::GalleristApp;
use config::AppConfig;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const SERVER_URL_ENV: &str = "GALLERIST_SERVER";

/// Accepts operator-typed URLs: scheme optional, trailing slashes
/// dropped so endpoint paths can be appended directly.
fn normalize_server_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn resolve_server_url(env_value: Option<String>, config: &AppConfig) -> String {
    if let Some(raw) = env_value {
        if !raw.trim().is_empty() {
            return normalize_server_url(&raw);
        }
    }
    if let Some(raw) = config.server_url.as_deref() {
        if !raw.trim().is_empty() {
            return normalize_server_url(raw);
        }
    }
    DEFAULT_SERVER_URL.to_string()
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load();
    let server_url = resolve_server_url(std::env::var(SERVER_URL_ENV).ok(), &config);
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    eprintln!("gallerist: server = {}", server_url);

    let client = match ApiClient::new(server_url, timeout) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("gallerist: {err:#}");
            std::process::exit(1);
        }
    };

    let width = config.window_width.unwrap_or(1200.0);
    let height = config.window_height.unwrap_or(800.0);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gallerist")
            .with_app_id("gallerist")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "gallerist",
        native_options,
        Box::new(|cc| Ok(Box::new(GalleristApp::new(cc, config, client)))),
    )
}
