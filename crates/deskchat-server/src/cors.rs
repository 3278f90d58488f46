//! Cross-origin policy: an explicit allow-list with credentials.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Build a [`CorsLayer`] that admits exactly `allowed_origins`.
///
/// Credentials rule out wildcards, so `*` entries are dropped and an empty
/// list admits no origin at all.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
  let origins: Vec<HeaderValue> = allowed_origins
    .iter()
    .map(|o| o.trim().trim_end_matches('/'))
    .filter(|o| !o.is_empty())
    .filter(|o| {
      if *o == "*" {
        tracing::warn!("ignoring wildcard CORS origin; credentials require explicit origins");
        return false;
      }
      true
    })
    .filter_map(|o| match o.parse() {
      Ok(v) => Some(v),
      Err(_) => {
        tracing::warn!(origin = o, "ignoring unparseable CORS origin");
        None
      }
    })
    .collect();

  CorsLayer::new()
    .allow_origin(origins)
    .allow_credentials(true)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::post,
  };
  use tower::ServiceExt as _;

  use super::*;

  fn app() -> Router {
    Router::new()
      .route("/chat/message", post(|| async { "ok" }))
      .layer(cors_layer(&["http://localhost:5173/".to_owned()]))
  }

  fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
      .method("OPTIONS")
      .uri("/chat/message")
      .header(header::ORIGIN, origin)
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap()
  }

  #[tokio::test]
  async fn allowed_origin_is_echoed_with_credentials() {
    let resp = app().oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let h = resp.headers();
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
  }

  #[tokio::test]
  async fn other_origins_get_no_allow_header() {
    let resp = app().oneshot(preflight("https://evil.example")).await.unwrap();
    assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  #[tokio::test]
  async fn wildcard_entry_is_dropped_not_fatal() {
    let app = Router::new()
      .route("/chat/message", post(|| async { "ok" }))
      .layer(cors_layer(&["*".to_owned(), "http://localhost:5173".to_owned()]));

    let resp = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");

    let resp = app.oneshot(preflight("https://evil.example")).await.unwrap();
    assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  #[test]
  fn wildcard_only_list_builds() {
    let _ = cors_layer(&["*".to_owned(), " * ".to_owned()]);
  }

  #[tokio::test]
  async fn simple_request_from_allowed_origin() {
    let req = Request::builder()
      .method("POST")
      .uri("/chat/message")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
      "http://localhost:5173"
    );
  }
}
