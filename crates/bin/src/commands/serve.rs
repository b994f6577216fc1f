//! Serve command - runs the Ideaboard web server.

use std::path::Path;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::broadcast::error::RecvError,
};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use ideaboard::{ClientEvent, Connection, Relay, ServerEvent, Store};

use crate::cli::ServeArgs;

/// Shared application state
#[derive(Clone)]
struct AppState {
    relay: Relay,
}

/// Run the Ideaboard server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ideaboard=info".parse()?))
        .init();

    let store = open_store(&args.store.data_dir).await?;
    let relay = Relay::new(store);

    if !args.static_dir.is_dir() {
        warn!(
            "Static directory {} does not exist; only /ws and /health will respond",
            args.static_dir.display()
        );
    }

    let app = router(relay, &args.static_dir);

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    println!(
        "Ideaboard server listening at http://localhost:{}",
        local_addr.port()
    );
    println!();
    println!("Available endpoints:");
    println!("  GET  /        - Static assets from {}", args.static_dir.display());
    println!("  GET  /ws      - WebSocket event stream");
    println!("  GET  /health  - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Create the data directory and an empty document if they are missing.
async fn open_store(data_dir: &Path) -> Result<Store, Box<dyn std::error::Error>> {
    let store = Store::in_dir(data_dir);
    store.ensure_exists().await?;
    info!("Using idea store at {}", store.path().display());
    Ok(store)
}

/// Build the application router.
fn router(relay: Relay, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(handle_ws_upgrade))
        .route("/health", get(handle_health_endpoint))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(AppState { relay })
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!("Failed to set up SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
            info!("Received SIGINT, initiating graceful shutdown...");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT, initiating graceful shutdown..."),
    }
}

// ============================================================================
// WebSocket Handlers
// ============================================================================

/// Handler for GET /ws - upgrade into the event relay
async fn handle_ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.relay))
}

/// Drive one client connection until it closes.
///
/// Broadcasts are forwarded by a separate task so a slow client never holds
/// up event handling for anyone else. Failures while handling this client's
/// events are logged and do not end the connection.
async fn handle_socket(socket: WebSocket, relay: Relay) {
    let connection = relay.connect().await;
    let initial = connection.initial_ideas();
    let Connection {
        id,
        mut session,
        mut events,
        ..
    } = connection;
    let (mut sink, mut stream) = socket.split();

    if let Err(e) = send_event(&mut sink, &initial).await {
        debug!(connection = %id, "Failed to send initial ideas: {e}");
        return;
    }

    let forward = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if send_event(&mut sink, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(connection = %id, skipped, "Client fell behind, broadcasts dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match ClientEvent::from_json(text.as_str()) {
                Ok(event) => {
                    let name = event.name();
                    if let Err(e) = relay.handle(&mut session, event).await {
                        error!(connection = %id, event = name, "Failed to handle event: {e}");
                    }
                }
                Err(e) => debug!(connection = %id, "Ignoring frame: {e}"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    forward.abort();
    info!(connection = %id, "Client disconnected");
}

async fn send_event(
    sink: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = event.to_json()?;
    sink.send(Message::Text(json.into())).await?;
    Ok(())
}

// ============================================================================
// Health Handler
// ============================================================================

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    ideas: usize,
    clients: usize,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy",
        ideas: state.relay.ideas().await.len(),
        clients: state.relay.client_count(),
    })
}
