//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches method and path,
//! dispatches to the document or static asset handlers, and emits one
//! access log line per completed request.

use crate::config::AppState;
use crate::handler::{document, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Fixed route of the persisted document
const DOCUMENT_PATH: &str = "/data";
/// Route prefix of the static asset tree
const STATIC_PREFIX: &str = "/static/";

/// Per-request context for the GET/HEAD handlers
pub struct RequestContext {
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

impl RequestContext {
    fn from_request(req: &Request<hyper::body::Incoming>) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        Self {
            is_head: *req.method() == Method::HEAD,
            if_none_match: header("if-none-match"),
            range_header: header("range"),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let referer = req
        .headers()
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route_request(req, &state, &path).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            method.to_string(),
            path,
        );
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.referer = referer;
        entry.user_agent = user_agent;
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Match method and path to a handler
async fn route_request(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    path: &str,
) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let ctx = RequestContext::from_request(&req);

    match (&method, path) {
        (&Method::GET | &Method::HEAD, "/") => static_files::serve_home(state, &ctx).await,
        (&Method::GET | &Method::HEAD, DOCUMENT_PATH) => {
            document::read_document(state, ctx.is_head).await
        }
        (&Method::POST, DOCUMENT_PATH) => document::write_document(req, state).await,
        (_, DOCUMENT_PATH) => {
            logger::log_warning(&format!("Method not allowed on {path}: {method}"));
            http::build_405_response("GET, HEAD, POST")
        }
        (&Method::GET | &Method::HEAD, _) if path.starts_with(STATIC_PREFIX) => {
            // Prefix is stripped before filesystem lookup
            let subpath = &path[STATIC_PREFIX.len()..];
            static_files::serve_static(state, subpath, &ctx).await
        }
        _ => http::build_404_response(),
    }
}
