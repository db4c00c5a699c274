use axum::{
  extract::{State, WebSocketUpgrade},
  http::{header::USER_AGENT, HeaderMap, Method},
  response::IntoResponse,
  routing::get,
  Json, Router,
};
use dashmap::DashMap;
use serde::Serialize;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod protocol;
mod transport;

use config::{DeviceProfile, GameConfig};
use game::session::Session;
use game::types::SessionStats;

#[derive(Clone)]
struct AppState {
  sessions: DashMap<String, Arc<Session>>,
  config: GameConfig,
}

#[derive(Debug, Serialize)]
struct OkResponse {
  ok: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
  id: String,
  #[serde(flatten)]
  stats: SessionStats,
}

#[derive(Debug, Serialize)]
struct SessionsResponse {
  sessions: Vec<SessionSummary>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = GameConfig::from_env();
  config.validate()?;

  let state = Arc::new(AppState {
    sessions: DashMap::new(),
    config,
  });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET])
    .allow_headers(Any);

  let app: Router = Router::new()
    .route("/api/health", get(health))
    .route("/api/config", get(config_get))
    .route("/api/sessions", get(sessions_get))
    .route("/api/play", get(ws_handler))
    .layer(cors)
    .with_state(state);

  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(8787);

  let address = format!("0.0.0.0:{port}");
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}

async fn health() -> impl IntoResponse {
  Json(OkResponse { ok: true })
}

async fn config_get(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.config.clone())
}

async fn sessions_get(State(state): State<Arc<AppState>>) -> Json<SessionsResponse> {
  let live: Vec<Arc<Session>> = state
    .sessions
    .iter()
    .map(|entry| Arc::clone(entry.value()))
    .collect();

  let mut sessions = Vec::with_capacity(live.len());
  for session in live {
    sessions.push(SessionSummary {
      id: session.id().to_string(),
      stats: session.stats().await,
    });
  }

  Json(SessionsResponse { sessions })
}

async fn ws_handler(
  ws: WebSocketUpgrade,
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> impl IntoResponse {
  let user_agent = headers
    .get(USER_AGENT)
    .and_then(|value| value.to_str().ok());
  let profile = DeviceProfile::detect(user_agent);
  let (session, io) = Session::new(state.config.clone(), profile);

  ws.on_upgrade(move |socket| async move {
    let _registration = Registration::new(state, Arc::clone(&session));
    tracing::info!(session_id = %session.id(), ?profile, "session connected");
    transport::ws_session::handle_socket(socket, session, io).await;
  })
}

/// Keeps a session listed in the registry only while a live socket owns it.
struct Registration {
  state: Arc<AppState>,
  session_id: String,
}

impl Registration {
  fn new(state: Arc<AppState>, session: Arc<Session>) -> Self {
    let session_id = session.id().to_string();
    state.sessions.insert(session_id.clone(), session);
    Self { state, session_id }
  }
}

impl Drop for Registration {
  fn drop(&mut self) {
    self.state.sessions.remove(&self.session_id);
  }
}
