//! Cross-origin headers middleware
//!
//! Browser clients call the API from another origin, so every response carries a
//! fixed, permissive set of CORS headers and pre-flight `OPTIONS` requests are
//! answered directly with an empty `200`.

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
pub const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";
pub const ALLOW_CREDENTIALS: &str = "true";

/// Middleware that answers pre-flight requests and decorates every other response.
pub async fn cors_headers(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight_response();
    }

    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut());
    response
}

/// Empty `200` with the CORS headers
pub fn preflight_response() -> Response {
    let mut response = (StatusCode::OK, Body::empty()).into_response();
    apply_cors_headers(response.headers_mut());
    response
}

pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static(ALLOW_CREDENTIALS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "ok"
    }

    fn test_app() -> Router {
        Router::new()
            .route("/test", get(dummy_handler))
            .layer(middleware::from_fn(cors_headers))
    }

    #[tokio::test]
    async fn test_preflight_short_circuits() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/anything/at/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get("access-control-allow-methods").unwrap(),
            ALLOW_METHODS
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .unwrap(),
            "true"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_headers_added_to_normal_response() {
        let response = test_app()
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-headers").unwrap(),
            ALLOW_HEADERS
        );
    }

    #[test]
    fn test_allow_headers_list() {
        let listed: Vec<&str> = ALLOW_HEADERS.split(", ").collect();
        assert_eq!(listed.len(), 9);
        assert!(listed.contains(&"Content-Type"));
        assert!(listed.contains(&"X-CSRF-Token"));
    }
}
