//! Connection handling module
//!
//! One spawned task per connection: wraps the stream for hyper, serves
//! HTTP/1.1 through the request handler, and bounds the whole exchange
//! with the configured read/write timeouts.

use crate::config::AppState;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

/// Serve one accepted connection in its own task
pub fn spawn_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        // Hyper applies one timeout to the connection; use the larger
        // of the two configured directions
        let timeout_duration = std::time::Duration::from_secs(std::cmp::max(
            state.config.server.read_timeout,
            state.config.server.write_timeout,
        ));

        let svc_state = Arc::clone(&state);
        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&svc_state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_connection_timeout(timeout_duration.as_secs()),
        }
    });
}
