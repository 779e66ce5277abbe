//! In-process stand-in for the Lidarr artist API.
//!
//! Serves lookup, list and create on a random local port. Lookups are keyed
//! by lowercased term; created artists join the tracked set.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use super::TEST_API_KEY;

#[derive(Default)]
struct FakeState {
    catalog: Mutex<HashMap<String, Value>>,
    tracked: Mutex<Vec<Value>>,
    created: Mutex<Vec<Value>>,
    lookup_delays: Mutex<HashMap<String, Duration>>,
    create_failure: Mutex<Option<(StatusCode, String)>>,
    request_count: Mutex<usize>,
}

type SharedState = Arc<FakeState>;

pub struct FakeLidarr {
    /// Base URL, e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    state: SharedState,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("X-Api-Key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == TEST_API_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

async fn lookup(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    *state.request_count.lock().unwrap() += 1;
    if !authorized(&headers) {
        return unauthorized();
    }
    let term = params.get("term").cloned().unwrap_or_default().to_lowercase();

    let delay = state.lookup_delays.lock().unwrap().get(&term).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let results = state
        .catalog
        .lock()
        .unwrap()
        .get(&term)
        .cloned()
        .unwrap_or_else(|| json!([]));
    Json(results).into_response()
}

async fn list_artists(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    *state.request_count.lock().unwrap() += 1;
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(Value::Array(state.tracked.lock().unwrap().clone())).into_response()
}

async fn create_artist(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *state.request_count.lock().unwrap() += 1;
    if !authorized(&headers) {
        return unauthorized();
    }
    let failure = state.create_failure.lock().unwrap().clone();
    if let Some((status, body)) = failure {
        return (status, body).into_response();
    }

    state
        .tracked
        .lock()
        .unwrap()
        .push(json!({ "id": state.created.lock().unwrap().len() + 1, "artistName": body["artistName"] }));
    state.created.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

impl FakeLidarr {
    pub async fn spawn() -> Self {
        let state: SharedState = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/api/v1/artist/lookup", get(lookup))
            .route("/api/v1/artist", get(list_artists).post(create_artist))
            .with_state(state.clone());

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
                .expect("Fake Lidarr failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Registers a lookup that returns one artist.
    pub fn add_artist(&self, term: &str, foreign_artist_id: &str, artist_name: &str) {
        self.set_lookup(
            term,
            json!([{ "foreignArtistId": foreign_artist_id, "artistName": artist_name }]),
        );
    }

    /// Registers a raw lookup response body.
    pub fn set_lookup(&self, term: &str, body: Value) {
        self.state
            .catalog
            .lock()
            .unwrap()
            .insert(term.to_lowercase(), body);
    }

    pub fn delay_lookup(&self, term: &str, delay: Duration) {
        self.state
            .lookup_delays
            .lock()
            .unwrap()
            .insert(term.to_lowercase(), delay);
    }

    pub fn track(&self, artist_name: &str) {
        self.state
            .tracked
            .lock()
            .unwrap()
            .push(json!({ "artistName": artist_name }));
    }

    pub fn fail_create(&self, status: StatusCode, body: &str) {
        *self.state.create_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn created(&self) -> Vec<Value> {
        self.state.created.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        *self.state.request_count.lock().unwrap()
    }
}
