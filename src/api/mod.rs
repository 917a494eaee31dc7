// API module entry
// Route registration and request dispatch for the items resource

pub mod error;
pub mod items;
mod response;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

use crate::config::AppState;
use crate::logger;
use crate::logger::AccessLogEntry;
use crate::routing::{Route, RouteAction, RouteMatch, RouteTable};

use error::ApiError;

/// Build the route table for the items service
///
/// Two registered patterns, both restricted to GET: the collection path
/// and the collection-plus-identifier path.
pub fn route_table() -> RouteTable {
    RouteTable::new(vec![
        Route::new("list_items", Method::GET, "/items", RouteAction::ListItems),
        Route::new("get_item", Method::GET, "/items/{name}", RouteAction::FetchItem),
    ])
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // 1. Answer preflight requests before touching the route table
    if method == Method::OPTIONS {
        return Ok(response::options_response(state.config.http.enable_cors));
    }

    // 2. Reject oversized request bodies up front
    let resp = if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        // 3. Resolve the route and run the matched handler
        route_response(&state, &method, &path)
    };

    // 4. Access log
    if state.config.logging.access_log {
        let entry = access_entry(&req, peer_addr, &resp, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(resp)
}

/// Resolve a request against the route table and produce its response
fn route_response(state: &AppState, method: &Method, path: &str) -> Response<Full<Bytes>> {
    match state.routes.match_request(method, path) {
        RouteMatch::Matched { action, params } => match action {
            RouteAction::ListItems => response::json_response(StatusCode::OK, items::list()),
            RouteAction::FetchItem => {
                let name = params.get("name").unwrap_or_default();
                match items::fetch(name) {
                    Ok(envelope) => response::json_response(StatusCode::OK, &envelope),
                    Err(err) => response::error_response(&err),
                }
            }
        },
        RouteMatch::MethodNotAllowed { allow } => response::method_not_allowed(&allow),
        RouteMatch::NotFound => response::error_response(&ApiError::with_status(StatusCode::NOT_FOUND)),
    }
}

/// Validate the Content-Length header and answer 413 when exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Assemble an access log entry for a finished request
fn access_entry(
    req: &Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    resp: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.status = resp.status().as_u16();
    entry.body_bytes = resp
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_str(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_10 {
        "1.0"
    } else if version == hyper::Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn make_state() -> AppState {
        let cfg = Config::load_from("no-such-config").expect("defaults should load");
        AppState::new(&cfg, route_table())
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let collected = response
            .into_body()
            .collect()
            .await
            .expect("body collection is infallible");
        String::from_utf8(collected.to_bytes().to_vec()).expect("body is utf-8")
    }

    #[tokio::test]
    async fn test_list_items_route() {
        let state = make_state();
        let resp = route_response(&state, &Method::GET, "/items");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, r#"["item1","item2"]"#);
    }

    #[tokio::test]
    async fn test_get_known_item_route() {
        let state = make_state();
        for name in items::ITEM_NAMES {
            let resp = route_response(&state, &Method::GET, &format!("/items/{name}"));
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                body_string(resp).await,
                format!(r#"{{"item":{{"name":"{name}"}}}}"#)
            );
        }
    }

    #[tokio::test]
    async fn test_get_unknown_item_route() {
        let state = make_state();
        let resp = route_response(&state, &Method::GET, "/items/bogus");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(resp).await,
            r#"{"error":"Item [bogus] not found"}"#
        );
    }

    #[tokio::test]
    async fn test_non_get_method_is_rejected_without_handler() {
        let state = make_state();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let resp = route_response(&state, &method, "/items");
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert!(resp.headers().get("Allow").is_some());
        }
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404_with_no_message() {
        let state = make_state();
        let resp = route_response(&state, &Method::GET, "/nodes");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, r#"{"error":"(none)"}"#);
    }

    #[tokio::test]
    async fn test_trailing_slash_does_not_reach_handlers() {
        let state = make_state();
        let resp = route_response(&state, &Method::GET, "/items/");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, r#"{"error":"(none)"}"#);
    }
}
