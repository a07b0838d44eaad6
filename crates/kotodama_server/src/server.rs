//! HTTP and WebSocket front end.

use axum::body::Body;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use kotodama_core::PlayerId;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ServerConfig;
use crate::manager::RoomManager;
use crate::room::RoomSummary;

/// Shared state of the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    rooms: RoomManager,
    default_room: String,
}

impl AppState {
    /// Builds server state from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            rooms: RoomManager::new(config.room_settings())
                .with_pinned_room(config.default_room().clone()),
            default_room: config.default_room().clone(),
        }
    }

    /// Room registry.
    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_default_room))
        .route("/ws/{room}", get(ws_named_room))
        .route("/rooms", get(list_rooms))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at ws://{}:{}/ws", config.host(), config.port());

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    Json(state.rooms.list_rooms())
}

async fn ws_default_room(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let room = state.default_room.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, state, room))
}

async fn ws_named_room(
    ws: WebSocketUpgrade,
    Path(room): Path<String>,
    State(state): State<AppState>,
) -> Response {
    if room.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "room id required").into_response();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state, room))
}

fn new_connection_id() -> PlayerId {
    PlayerId::new(format!("{:016x}", rand::random::<u64>()))
}

/// Pumps one WebSocket until it closes.
#[instrument(skip(socket, state))]
async fn handle_socket(socket: WebSocket, state: AppState, room: String) {
    let conn = new_connection_id();
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel();

    state.rooms.connect(&room, &conn, outbox);

    let writer_conn = conn.clone();
    let writer = tokio::spawn(async move {
        while let Some(event) = inbox.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!(conn = %writer_conn, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!(conn = %writer_conn, "Socket closed while sending");
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => state.rooms.dispatch(&room, &conn, text.as_str()),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(%conn, error = %e, "WebSocket error");
                break;
            }
        }
    }

    state.rooms.disconnect(&room, &conn);
    writer.abort();
}
