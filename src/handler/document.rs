//! Document handler module
//!
//! GET streams the full persisted document; POST replaces it with the
//! request body. Failures recover locally into 500 responses with short
//! plain-text diagnostics and a server-side log line.

use crate::config::AppState;
use crate::http::{self, response};
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::sync::Arc;

/// Serve the current document contents
pub async fn read_document(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    match state.store.read().await {
        Ok(content) => response::build_document_response(content, is_head),
        Err(e) => {
            logger::log_error(&format!(
                "document open on get '{}': {e}",
                state.store.path().display()
            ));
            http::build_500_response("error reading document")
        }
    }
}

/// Replace the document with the request body
pub async fn write_document(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // Reject oversized bodies up front, before buffering anything
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("read request body on post: {e}"));
            return http::build_500_response("error reading request body");
        }
    };

    apply_write(state, &body).await
}

/// Write collected body bytes into the store
async fn apply_write(state: &Arc<AppState>, body: &[u8]) -> Response<Full<Bytes>> {
    match state.store.write(body).await {
        Ok(()) => http::build_ok_response(),
        Err(e) => {
            // Partial writes are not rolled back; the log line is the
            // only record of what happened
            logger::log_error(&format!(
                "document write on post '{}': {e}",
                state.store.path().display()
            ));
            http::build_500_response("error writing document")
        }
    }
}

/// Validate Content-Length and reject with 413 when over the cap
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req
        .headers()
        .get("content-length")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    if content_length > max_body_size {
        logger::log_error(&format!(
            "Request body too large: {content_length} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::DocumentStore;
    use tempfile::TempDir;

    fn state_with_store(dir: &TempDir) -> Arc<AppState> {
        let config = Config::load_from("no-such-config").expect("defaults");
        let store = DocumentStore::open(dir.path().join("pad.txt")).expect("open");
        Arc::new(AppState::new(config, store))
    }

    #[tokio::test]
    async fn test_read_before_any_write_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_store(&dir);
        let resp = read_document(&state, false).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "0");
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_store(&dir);

        let resp = apply_write(&state, b"the latest pad text").await;
        assert_eq!(resp.status(), 200);

        assert_eq!(
            state.store.read().await.expect("read"),
            b"the latest pad text"
        );
    }

    #[tokio::test]
    async fn test_empty_write_overwrites_not_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_store(&dir);

        apply_write(&state, b"previous content").await;
        let resp = apply_write(&state, b"").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(state.store.read().await.expect("read"), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn test_write_failure_is_a_500() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_store(&dir);

        std::fs::remove_file(state.store.path()).expect("remove");
        let resp = apply_write(&state, b"doomed").await;
        assert_eq!(resp.status(), 500);
    }

    #[tokio::test]
    async fn test_read_failure_is_a_500() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_store(&dir);

        std::fs::remove_file(state.store.path()).expect("remove");
        let resp = read_document(&state, false).await;
        assert_eq!(resp.status(), 500);
    }
}
