//! Runs the bulk adder's HTTP interface on a random local port.

use lidarr_bulk_adder::config::{EnvOverrides, FileSettings};
use lidarr_bulk_adder::reconcile::{PacingPolicy, RunOptions};
use lidarr_bulk_adder::server::{make_app, ServerConfig};
use lidarr_bulk_adder::ClientTimeouts;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// When dropped, the server shuts down and the settings directory is removed.
pub struct TestApp {
    pub base_url: String,
    pub settings_path: PathBuf,
    pub client: reqwest::Client,
    _settings_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the app with an optional settings file already written.
    pub async fn spawn(settings: Option<FileSettings>) -> Self {
        let settings_dir = TempDir::new().expect("Failed to create temp dir");
        let settings_path = settings_dir.path().join("config.json");
        if let Some(settings) = settings {
            settings
                .save(&settings_path)
                .expect("Failed to write settings");
        }

        let app = make_app(ServerConfig {
            settings_path: settings_path.clone(),
            env: EnvOverrides::default(),
            run_options: RunOptions {
                timeouts: ClientTimeouts {
                    lookup: Duration::from_secs(5),
                    list_tracked: Duration::from_secs(5),
                    create: Duration::from_secs(5),
                },
                pacing: PacingPolicy::none(),
            },
            ..Default::default()
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener.local_addr().expect("Failed to get local address").port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            settings_path,
            client: reqwest::Client::new(),
            _settings_dir: settings_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
