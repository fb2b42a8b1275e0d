// Server module entry point
// Listener creation, accept loop and per-connection handling

pub mod connection;
pub mod listener;

pub use listener::create_reusable_listener;

use crate::config::AppState;
use crate::logger;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept loop: one spawned task per inbound connection.
///
/// Only a failing accept call can end this loop; the caller treats that
/// as fatal after logging.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::spawn_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
