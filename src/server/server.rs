use anyhow::{Context, Result};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

use super::state::ServerState;
use super::{log_requests, ServerConfig};
use crate::config::SettingsUpdate;
use crate::reconcile::{decode_upload, reconcile_text, NoOpObserver, ReconcileError};

const PASTE_FIELD: &str = "artist_list_paste";
const FILE_FIELD: &str = "artist_list_file";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStats {
    pub uptime: String,
    pub configured: bool,
    pub lidarr_url: String,
    pub root_folder_path: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let config = state.load_configuration();
    let configured = config.is_configured();
    if !configured {
        warn!("Lidarr URL or API Key is not configured.");
    }
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        configured,
        lidarr_url: config.catalog_base_url,
        root_folder_path: config.root_folder_path,
    })
}

async fn run_batch_for_text(state: &ServerState, text: &str) -> Response {
    // One batch at a time against the remote service.
    let _guard = state.batch_lock.lock().await;
    let config = state.load_configuration();

    match reconcile_text(text, &config, state.config.run_options, &NoOpObserver).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e @ (ReconcileError::NoNames | ReconcileError::Configuration(_))) => {
            warn!("{}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e @ ReconcileError::ClientSetup(_)) => {
            error!("{}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Form upload: pasted text wins over an uploaded file when both are sent.
async fn add_artists(State(state): State<ServerState>, mut multipart: Multipart) -> Response {
    let mut pasted: Option<String> = None;
    let mut uploaded: Option<Vec<u8>> = None;
    let mut file_field_sent = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
        };

        match field.name() {
            Some(PASTE_FIELD) => match field.text().await {
                Ok(text) => pasted = Some(text),
                Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
            },
            Some(FILE_FIELD) => {
                file_field_sent = true;
                let has_file_name = field.file_name().is_some_and(|name| !name.is_empty());
                match field.bytes().await {
                    Ok(bytes) if has_file_name => uploaded = Some(bytes.to_vec()),
                    Ok(_) => {}
                    Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
                }
            }
            _ => {}
        }
    }

    let text = match (pasted, uploaded) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some(bytes)) => match decode_upload(&bytes) {
            Ok(text) => text,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        // A file input with nothing chosen.
        _ if file_field_sent => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Please paste a list of artists or upload a file.",
            )
        }
        _ => return error_response(StatusCode::BAD_REQUEST, "No artist data provided."),
    };

    run_batch_for_text(&state, &text).await
}

async fn add_artists_text(State(state): State<ServerState>, body: String) -> Response {
    run_batch_for_text(&state, &body).await
}

async fn get_settings(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.load_configuration().to_view())
}

async fn post_settings(
    State(state): State<ServerState>,
    Json(update): Json<SettingsUpdate>,
) -> Response {
    let settings = match update.into_file_settings() {
        Ok(settings) => settings,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Lidarr URL, API Key, and Root Folder Path cannot be empty.",
            )
        }
    };

    if let Err(e) = settings.save(&state.config.settings_path) {
        error!("Error saving settings: {:#}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error saving settings. Check the logs.",
        );
    }

    info!("Settings saved to {:?}", state.config.settings_path);
    Json(state.load_configuration().to_view()).into_response()
}

pub fn make_app(config: ServerConfig) -> Router {
    let state = ServerState::new(config);

    Router::new()
        .route("/", get(home))
        .route("/add", post(add_artists))
        .route("/add/text", post(add_artists_text))
        .route("/settings", get(get_settings).post(post_settings))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Ready to serve at port {}!", port);
    Ok(axum::serve(listener, app).await?)
}
