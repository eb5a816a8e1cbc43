//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /healthz` → `{ "status": "ok" }` (liveness: 프로세스가 살아 있는가)
//! - `GET /readyz`  → `{ "ready": true }`  (readiness: 요청을 받을 수 있는가)
//!
//! 저장소는 시작 시 실패해도 빈 컬렉션으로 뜨기 때문에 둘 다 항상 200입니다.
//! 컨테이너 오케스트레이터(Cloud Run, Kubernetes 등)의 프로브용입니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /readyz`
pub async fn readyz() -> Json<Value> {
    Json(json!({ "ready": true }))
}
