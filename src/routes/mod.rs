//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 하나의 `Router`로 묶는 `router()`를 담고 있습니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (liveness / readiness)
//! - `jokes`: 농담 목록, 오늘의 농담, 농담 추가

pub mod health;
pub mod jokes;

pub use health::*;
pub use jokes::*;

use crate::{
    config::Config,
    error::panic_response,
    middleware::{cors, CorsPolicy},
    store::JokeStore,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderValue, Response, StatusCode,
    },
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, set_header::SetResponseHeader,
    trace::TraceLayer,
};

/// 요청 본문 최대 크기 (200 KiB). 넘으면 413 응답.
pub const BODY_LIMIT: usize = 200 * 1024;

/// HTML은 매번 재검증, 그 밖의 정적 파일(js, css 등)은 1시간 캐시
const HTML_CACHE_CONTROL: &str = "no-cache";
const ASSET_CACHE_CONTROL: &str = "public, max-age=3600";

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `Arc<JokeStore>`이므로 clone해도 저장소가 복제되지 않고 같은 인스턴스를 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JokeStore>,
}

/// 전체 애플리케이션 라우터를 만듭니다.
///
/// panic으로 만들어진 500 응답에도 CORS 헤더가 붙고, 요청 로그에도 남습니다.
pub fn router(state: AppState, config: &Config) -> Router {
    let api_routes = Router::new()
        // 같은 경로의 다른 메서드(DELETE 등)도 405가 아닌 404 `{detail}`로 응답합니다.
        .route(
            "/jokes",
            get(list_jokes).post(create_joke).fallback(api_not_found),
        )
        .route("/jotd", get(joke_of_the_day).fallback(api_not_found))
        .route("/categories", get(list_categories).fallback(api_not_found))
        .fallback(api_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        // nest는 `/api/`(빈 꼬리 경로)를 매칭하지 않으므로 따로 등록합니다.
        .route("/api/", any(api_not_found));

    // 프론트엔드 파일이 있으면 같은 서버에서 서빙합니다.
    // ServeDir은 디렉토리 요청(`/`)에 index.html을 붙여 응답합니다.
    let app = if config.static_dir.is_dir() {
        tracing::info!("Serving static files from {}", config.static_dir.display());
        let static_files = SetResponseHeader::overriding(
            ServeDir::new(&config.static_dir),
            CACHE_CONTROL,
            |res: &Response<_>| static_cache_control(res.status(), res.headers()),
        );
        app.fallback_service(static_files)
    } else {
        tracing::warn!(
            "Static directory {} not found, serving API only",
            config.static_dir.display()
        );
        app
    };

    with_layers(app, config)
}

/// 공통 미들웨어를 씌웁니다.
///
/// 레이어 순서 (바깥 → 안):
/// `TraceLayer` → CORS → `CatchPanicLayer` → 라우트.
fn with_layers(app: Router, config: &Config) -> Router {
    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn_with_state(
            CorsPolicy::new(&config.allowed_origins),
            cors,
        ))
        .layer(TraceLayer::new_for_http())
}

/// 정적 파일 응답에 붙일 `Cache-Control` 값. 성공 응답에만 붙입니다.
fn static_cache_control(status: StatusCode, headers: &HeaderMap) -> Option<HeaderValue> {
    if !status.is_success() {
        return None;
    }

    let is_html = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"));

    Some(HeaderValue::from_static(if is_html {
        HTML_CACHE_CONTROL
    } else {
        ASSET_CACHE_CONTROL
    }))
}
