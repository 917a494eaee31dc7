// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;
use crate::logger;

/// Build a JSON response from any serializable body
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"Internal server error"}"#.to_string(),
            );
        }
    };

    build_json(status, json)
}

/// Render a structured error as `{"error":"<message>"}` with its status
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": err.message_or_default() });
    build_json(err.status, body.to_string())
}

/// 405 Method Not Allowed response with the allowed method set
pub fn method_not_allowed(allow: &[Method]) -> Response<Full<Bytes>> {
    let mut allowed: Vec<&str> = allow.iter().map(Method::as_str).collect();
    allowed.push("OPTIONS");

    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Allow", allowed.join(", "))
        .body(Full::new(Bytes::from(r#"{"error":"Method Not Allowed"}"#)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("Method Not Allowed")))
        })
}

/// OPTIONS response (preflight request)
pub fn options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// 413 Payload Too Large response
pub fn payload_too_large() -> Response<Full<Bytes>> {
    error_response(&ApiError::new(
        StatusCode::PAYLOAD_TOO_LARGE,
        "Payload Too Large",
    ))
}

/// Assemble a JSON response with the given pre-serialized body
fn build_json(status: StatusCode, json: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let collected = response
            .into_body()
            .collect()
            .await
            .expect("body collection is infallible");
        String::from_utf8(collected.to_bytes().to_vec()).expect("body is utf-8")
    }

    #[tokio::test]
    async fn test_json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, &["item1", "item2"]);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").map(|v| v.as_bytes()),
            Some(b"application/json".as_ref())
        );
        assert_eq!(body_string(response).await, r#"["item1","item2"]"#);
    }

    #[tokio::test]
    async fn test_error_response_body_and_status() {
        let err = ApiError::not_found("Item [bogus] not found");
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Item [bogus] not found"}"#
        );
    }

    #[tokio::test]
    async fn test_error_response_substitutes_none() {
        let response = error_response(&ApiError::default());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"error":"(none)"}"#);
    }

    #[tokio::test]
    async fn test_method_not_allowed_lists_methods() {
        let response = method_not_allowed(&[Method::GET]);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("Allow").map(|v| v.as_bytes()),
            Some(b"GET, OPTIONS".as_ref())
        );
    }

    #[tokio::test]
    async fn test_options_response_cors_headers() {
        let plain = options_response(false);
        assert_eq!(plain.status(), StatusCode::NO_CONTENT);
        assert!(plain.headers().get("Access-Control-Allow-Origin").is_none());

        let cors = options_response(true);
        assert_eq!(
            cors.headers()
                .get("Access-Control-Allow-Origin")
                .map(|v| v.as_bytes()),
            Some(b"*".as_ref())
        );
    }
}
