//! # 에러 처리 모듈
//!
//! HTTP 계층에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 핸들러가 돌려줄 수 있는 에러를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "detail": "..." }` 형태의 HTTP 응답으로 자동 변환
//! - `panic_response()`: 핸들러 panic을 500 응답으로 바꾸는 catch-all

use crate::services::{PickError, ValidationError};
use axum::{
    extract::rejection::{BytesRejection, QueryRejection}, // 추출기(Extractor) 실패 타입
    http::StatusCode,                   // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use std::any::Any;
use thiserror::Error;

/// 클라이언트에 내려가는 500 응답 메시지. 내부 원인은 로그에만 남깁니다.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// 핸들러에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400)
    /// #[from]: `?` 연산자로 ValidationError → AppError 자동 변환
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 조건에 맞는 농담이 없음 (HTTP 404)
    #[error(transparent)]
    NoJoke(#[from] PickError),

    /// `/api` 아래의 알 수 없는 경로 (HTTP 404)
    #[error("Not found")]
    NotFound,

    /// Axum 추출기가 요청을 거부함 (본문 크기 초과 413, 쿼리 파싱 실패 400 등)
    /// 상태 코드는 추출기가 정한 것을 그대로 쓰고, 본문만 `{detail}` 형태로 바꿉니다.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 결과 본문은 항상 `{ "detail": "..." }` 입니다.
    /// 내부 에러는 실제 내용을 로그에만 기록하고, 클라이언트에는 일반적인 메시지만 보냅니다.
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(ref e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NoJoke(ref e) => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Rejected { status, ref detail } => (status, detail.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// `CatchPanicLayer::custom`에 넘기는 panic 처리기
///
/// panic 메시지(`&str` 또는 `String`)를 꺼내 로그로 남기고,
/// 클라이언트에는 일반적인 500 응답만 돌려줍니다.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("Unhandled panic: {message}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn detail_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_maps_to_400() {
        let err = AppError::from(ValidationError {
            missing: vec!["setup"],
        });
        let (status, body) = detail_of(err.into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "detail": "setup, punchline, and category are all required." })
        );
    }

    #[tokio::test]
    async fn pick_errors_map_to_404() {
        let (status, body) = detail_of(AppError::from(PickError::Empty).into_response()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "No jokes available." }));
    }

    #[tokio::test]
    async fn rejection_keeps_status_and_uses_detail_envelope() {
        let err = AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            detail: "length limit exceeded".to_string(),
        };
        let (status, body) = detail_of(err.into_response()).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "detail": "length limit exceeded" }));
    }

    #[tokio::test]
    async fn internal_error_does_not_leak_cause() {
        let err = AppError::Internal("disk on fire".to_string());
        let (status, body) = detail_of(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn panic_payload_becomes_generic_500() {
        let (status, body) = detail_of(panic_response(Box::new("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Internal Server Error" }));
    }
}
