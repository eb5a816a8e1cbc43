//! # 농담 저장소 계층 (Storage Layer)
//!
//! 메모리에 올려둔 농담 컬렉션과, 그 컬렉션을 JSON 파일로 읽고 쓰는 일을 담당합니다.
//! 라우트 핸들러(routes/)는 `AppState`에 담긴 `JokeStore`를 통해서만 데이터에 접근합니다.
//!
//! 각 하위 모듈:
//! - `files`: 후보 경로 탐색, 원자적 파일 쓰기
//! - `jokes`: `JokeStore` 본체 (적재, 추가, 저장)

pub mod files;
pub mod jokes;

pub use jokes::*;

use std::path::PathBuf;
use thiserror::Error;

/// 저장소에서 발생할 수 있는 에러
///
/// 어느 것도 HTTP 클라이언트에게 전달되지 않습니다.
/// 적재 실패는 빈 컬렉션으로, 저장 실패는 로그로 처리됩니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 후보 파일을 하나도 읽을 수 없음
    #[error("no readable jokes file among {tried:?}")]
    Unavailable { tried: Vec<PathBuf> },

    /// 파일은 읽었지만 농담 배열 JSON이 아님
    #[error("{} is not a valid jokes array: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 컬렉션 직렬화 실패
    #[error("failed to encode jokes: {0}")]
    Encode(#[from] serde_json::Error),

    /// 파일 쓰기 실패
    #[error("failed to persist jokes to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
