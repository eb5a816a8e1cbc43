//! # CORS 미들웨어
//!
//! 허용 목록 기반 CORS 정책을 모든 응답에 적용합니다.
//!
//! - 허용된 출처: `Access-Control-Allow-Origin`에 요청 출처를 그대로 돌려줌
//! - 허용되지 않은 출처: 해당 헤더를 붙이지 않음 (브라우저가 응답을 차단)
//! - `OPTIONS` 프리플라이트: 핸들러까지 가지 않고 204로 바로 응답
//!
//! `tower_http::cors::CorsLayer`는 프리플라이트에 200으로 응답하기 때문에 쓰지 않습니다.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::ANY_ORIGIN;

const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_any: bool,
    origins: Arc<[String]>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: &[String]) -> Self {
        Self {
            allow_any: allowed_origins.iter().any(|o| o == ANY_ORIGIN),
            origins: allowed_origins.into(),
        }
    }

    /// 이 요청에 붙일 `Access-Control-Allow-Origin` 값. `None`이면 헤더를 붙이지 않습니다.
    pub fn allow_origin(&self, origin: Option<&HeaderValue>) -> Option<HeaderValue> {
        if self.allow_any {
            return Some(
                origin
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static(ANY_ORIGIN)),
            );
        }

        let origin = origin?;
        let text = origin.to_str().ok()?;
        self.origins
            .iter()
            .any(|allowed| allowed == text)
            .then(|| origin.clone())
    }

    fn apply(&self, origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        if let Some(value) = self.allow_origin(origin) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        headers.append(VARY, HeaderValue::from_static("Origin"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }
}

/// `axum::middleware::from_fn_with_state`로 등록하는 미들웨어 함수
pub async fn cors(State(policy): State<CorsPolicy>, request: Request, next: Next) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(origin.as_ref(), response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    fn app(origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(
                CorsPolicy::new(&origins),
                cors,
            ))
    }

    async fn send(app: Router, method: Method, origin: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().method(method).uri("/ping");
        if let Some(origin) = origin {
            builder = builder.header(ORIGIN, origin);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn wildcard_echoes_request_origin() {
        let res = send(app(&["*"]), Method::GET, Some("https://x.example")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://x.example");
        assert_eq!(res.headers()[VARY], "Origin");
    }

    #[tokio::test]
    async fn wildcard_without_origin_header_sends_star() {
        let res = send(app(&["*"]), Method::GET, None).await;
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn listed_origin_is_allowed() {
        let res = send(app(&["https://a.web.app"]), Method::GET, Some("https://a.web.app")).await;
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.web.app");
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_allow_origin_header() {
        let res = send(app(&["https://a.web.app"]), Method::GET, Some("https://evil.example")).await;
        // 응답 자체는 정상으로 나가고, 차단은 브라우저가 합니다.
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");
    }

    #[tokio::test]
    async fn preflight_short_circuits_with_204() {
        let res = send(app(&["*"]), Method::OPTIONS, Some("https://x.example")).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(res.headers()[ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");
    }
}
