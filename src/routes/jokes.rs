//! # 농담(Joke) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET  /api/jokes`       → 전체 농담 배열
//! - `POST /api/jokes`       → 새 농담 추가 (201)
//! - `GET  /api/jotd`        → 오늘의 농담 (무작위 하나), `?category=`로 필터 가능
//! - `GET  /api/categories`  → 중복 없는 카테고리 목록
//! - 그 밖의 `/api/*`        → 404 `{ "detail": "Not found" }`
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 앱 전역 상태 (농담 저장소)
//! - `Query(query)`: URL 쿼리 문자열을 구조체로 파싱
//! - `Bytes`: 요청 본문 원본. JSON 파싱 실패도 검증 실패(400)로 다루기 위해 직접 파싱합니다.
//!
//! 추출기는 `Result<추출기, 거부 타입>`으로 받습니다.
//! 거부(본문 크기 초과, 잘못된 쿼리)를 `AppError`로 바꿔 `{detail}` 응답을 유지하기 위해서입니다.

use crate::{
    error::AppError,
    models::{Joke, NewJokeRequest},
    routes::AppState,
    services,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// `GET /api/jotd`의 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct JotdQuery {
    /// 없거나, 비어 있거나, `"All"`이면 필터 없음
    pub category: Option<String>,
}

/// `GET /api/jokes` — 전체 농담을 저장 순서대로 반환합니다.
///
/// 다른 목록 API와 달리 `{ "jokes": [...] }`로 감싸지 않고 배열 그대로 내려갑니다.
pub async fn list_jokes(State(state): State<AppState>) -> Json<Vec<Joke>> {
    Json(state.store.with_jokes(services::list_all))
}

/// `GET /api/jotd` — 농담 하나를 무작위로 골라 반환합니다.
///
/// 컬렉션이 비어 있으면 404 `No jokes available.`,
/// 카테고리 필터에 맞는 농담이 없으면 404 `No jokes match this category.`
pub async fn joke_of_the_day(
    State(state): State<AppState>,
    query: Result<Query<JotdQuery>, QueryRejection>,
) -> Result<Json<Joke>, AppError> {
    let Query(query) = query?;
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    // thread_rng()는 Send가 아니므로 await 지점을 넘기지 않도록 클로저 안에서만 사용합니다.
    let joke = state.store.with_jokes(|jokes| {
        services::pick_random(jokes, category, &mut rand::thread_rng()).cloned()
    })?;

    Ok(Json(joke))
}

/// `POST /api/jokes` — 새 농담을 추가합니다.
///
/// 응답: 201 `{ "ok": true, "joke": {...}, "count": 추가 후 개수 }`
///
/// 파일 저장이 실패해도 클라이언트에는 성공으로 응답합니다.
/// 메모리에는 이미 추가되었고, 실패 원인은 에러 로그로만 남깁니다.
pub async fn create_joke(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let body = body?;

    // Content-Type이 JSON이 아니거나, 본문이 비었거나, JSON 객체가 아니면
    // 모든 필드가 없는 요청으로 취급합니다.
    let req = if !is_json_content_type(&headers) {
        tracing::debug!("Ignoring joke body without a JSON content type");
        NewJokeRequest::default()
    } else {
        match serde_json::from_slice::<NewJokeRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                tracing::debug!("Unparseable joke body: {}", e);
                NewJokeRequest::default()
            }
        }
    };

    let joke = services::validate_new_joke(&req)
        .inspect_err(|e| tracing::debug!("Rejected joke, invalid fields: {:?}", e.missing))?;
    let outcome = state.store.append(joke.clone()).await;

    if let Some(e) = outcome.persist_error {
        tracing::error!("Joke kept in memory only: {}", e);
    }
    tracing::info!(count = outcome.count, category = %joke.category, "Joke added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok": true,
            "joke": joke,
            "count": outcome.count
        })),
    ))
}

/// `application/json`(파라미터 무시, 대소문자 무관)인지 확인합니다.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// `GET /api/categories` — 필터 버튼을 그릴 수 있도록 카테고리 목록을 반환합니다.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.with_jokes(services::categories))
}

/// `/api` 아래에서 매칭되지 않은 모든 요청
pub async fn api_not_found() -> AppError {
    AppError::NotFound
}
