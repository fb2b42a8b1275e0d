//! Static asset serving module
//!
//! The fixed home page at `/` and the asset tree under `/static/`, with
//! traversal protection, MIME detection, ETag validation and single
//! byte ranges.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeParseResult, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Serve the configured home page file.
///
/// On open failure the response keeps the default status and carries a
/// short diagnostic, matching the permissive contract of this route.
pub async fn serve_home(state: &Arc<AppState>, ctx: &RequestContext) -> Response<Full<Bytes>> {
    let home_page = &state.config.assets.home_page;
    match fs::read(home_page).await {
        Ok(content) => build_asset_response(&content, home_page, ctx),
        Err(e) => {
            logger::log_error(&format!("home page open '{home_page}': {e}"));
            http::build_text_response("error reading home page")
        }
    }
}

/// Serve one file from the static root, `subpath` already stripped of
/// the `/static/` route prefix
pub async fn serve_static(
    state: &Arc<AppState>,
    subpath: &str,
    ctx: &RequestContext,
) -> Response<Full<Bytes>> {
    let Some(file_path) = resolve_static_path(&state.config.assets.static_root, subpath) else {
        return http::build_404_response();
    };

    match fs::read(&file_path).await {
        Ok(content) => build_asset_response(&content, &file_path.to_string_lossy(), ctx),
        Err(e) => {
            logger::log_error(&format!(
                "static file read '{}': {e}",
                file_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Resolve a request subpath to a file inside the static root.
///
/// Returns None for missing files and for any path that escapes the
/// root after canonicalization.
pub fn resolve_static_path(static_root: &str, subpath: &str) -> Option<PathBuf> {
    if subpath.is_empty() {
        return None;
    }

    // Cheap structural check before touching the filesystem
    let relative = Path::new(subpath.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        logger::log_warning(&format!("Rejected static path: {subpath}"));
        return None;
    }

    let root = match Path::new(static_root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{static_root}': {e}"
            ));
            return None;
        }
    };

    // Missing file is an ordinary 404, not worth a log line
    let resolved = root.join(relative).canonicalize().ok()?;

    if !resolved.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {subpath} -> {}",
            resolved.display()
        ));
        return None;
    }

    resolved.is_file().then_some(resolved)
}

/// Build the response for loaded asset bytes: 304 on ETag match, 206 or
/// 416 for ranges, full 200 otherwise
fn build_asset_response(
    content: &[u8],
    name: &str,
    ctx: &RequestContext,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(content);
    if cache::etag_matches(ctx.if_none_match.as_deref(), &etag) {
        return response::build_304_response(&etag);
    }

    let content_type = mime::content_type_for(
        Path::new(name).extension().and_then(|e| e.to_str()),
    );
    let total_size = content.len();

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeParseResult::Valid(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(content[range.start..=range.end].to_vec())
            };
            response::build_partial_response(
                body,
                content_type,
                &etag,
                range.start,
                range.end,
                total_size,
                ctx.is_head,
            )
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(total_size),
        RangeParseResult::None => response::build_file_response(
            Bytes::from(content.to_owned()),
            content_type,
            &etag,
            ctx.is_head,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::DocumentStore;
    use tempfile::TempDir;

    fn ctx() -> RequestContext {
        RequestContext {
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    fn state_with_assets(dir: &TempDir) -> Arc<AppState> {
        let static_root = dir.path().join("static");
        std::fs::create_dir_all(&static_root).expect("mkdir");
        std::fs::write(static_root.join("index.html"), b"<html>pad</html>").expect("write");
        std::fs::write(static_root.join("app.js"), b"console.log('pad');").expect("write");

        let mut config = Config::load_from("no-such-config").expect("defaults");
        config.assets.static_root = static_root.to_string_lossy().into_owned();
        config.assets.home_page = static_root.join("index.html").to_string_lossy().into_owned();

        let store = DocumentStore::open(dir.path().join("pad.txt")).expect("open");
        Arc::new(AppState::new(config, store))
    }

    #[tokio::test]
    async fn test_home_serves_configured_file_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);
        let resp = serve_home(&state, &ctx()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "16");
    }

    #[tokio::test]
    async fn test_home_failure_keeps_default_status() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);
        std::fs::remove_file(&state.config.assets.home_page).expect("remove");
        let resp = serve_home(&state, &ctx()).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_static_file_found_and_typed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);
        let resp = serve_static(&state, "app.js", &ctx()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
    }

    #[tokio::test]
    async fn test_static_file_missing_is_404() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);
        let resp = serve_static(&state, "missing.css", &ctx()).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_static_etag_match_is_304() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);

        let first = serve_static(&state, "app.js", &ctx()).await;
        let etag = first.headers()["ETag"].to_str().expect("etag").to_string();

        let mut revalidate = ctx();
        revalidate.if_none_match = Some(etag);
        let resp = serve_static(&state, "app.js", &revalidate).await;
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn test_static_range_request() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_with_assets(&dir);

        let mut ranged = ctx();
        ranged.range_header = Some("bytes=0-6".to_string());
        let resp = serve_static(&state, "app.js", &ranged).await;
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-6/19");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let static_root = dir.path().join("static");
        std::fs::create_dir_all(&static_root).expect("mkdir");
        std::fs::write(dir.path().join("secret.txt"), b"outside").expect("write");

        let root = static_root.to_string_lossy().into_owned();
        assert!(resolve_static_path(&root, "../secret.txt").is_none());
        assert!(resolve_static_path(&root, "a/../../secret.txt").is_none());
        assert!(resolve_static_path(&root, "/etc/hosts").is_none());
        assert!(resolve_static_path(&root, "").is_none());
    }

    #[test]
    fn test_resolve_finds_nested_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let static_root = dir.path().join("static");
        std::fs::create_dir_all(static_root.join("js")).expect("mkdir");
        std::fs::write(static_root.join("js/main.js"), b"x").expect("write");

        let root = static_root.to_string_lossy().into_owned();
        let resolved = resolve_static_path(&root, "js/main.js").expect("resolved");
        assert!(resolved.ends_with("js/main.js"));
    }
}
