//! # 농담(Joke) 모델 정의
//!
//! 서비스가 다루는 유일한 엔티티인 농담과, 생성 요청 본문 구조체를 정의합니다.
//!
//! ## 구조체 역할
//! - `Joke`: 저장되고 응답으로 나가는 농담 한 건
//! - `NewJokeRequest`: `POST /api/jokes`로 들어온 원본 요청 본문

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 농담 엔티티 — `jokes.json` 배열의 원소 하나에 대응합니다.
///
/// 식별자(id)는 없습니다. 같은 내용의 농담이 여러 번 저장될 수 있고,
/// 배열 순서는 화면 표시용일 뿐 의미를 갖지 않습니다.
///
/// `PartialEq`, `Eq`: 테스트와 필터링에서 `==` 비교를 하기 위해 derive합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    /// 도입부 (예: "Why did the chicken cross the road?")
    pub setup: String,
    /// 펀치라인 (예: "To get to the other side.")
    pub punchline: String,
    /// 분류 (예: "classic"). 대소문자를 구분합니다.
    pub category: String,
}

impl Joke {
    /// 세 필드를 받아 새 농담을 만듭니다. 검증은 하지 않습니다.
    ///
    /// `impl Into<String>`: `&str`과 `String` 모두 받을 수 있게 하는 제네릭 매개변수
    pub fn new(
        setup: impl Into<String>,
        punchline: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            setup: setup.into(),
            punchline: punchline.into(),
            category: category.into(),
        }
    }
}

/// 농담 생성 요청 — `POST /api/jokes`의 요청 본문(body)에 해당합니다.
///
/// 필드 타입이 `String`이 아니라 `Option<Value>`인 이유:
/// `{"setup": 42}`처럼 문자열이 아닌 값이 와도 역직렬화 단계에서 실패하지 않고,
/// 검증 단계(`services::validate_new_joke`)에서 400 응답으로 처리하기 위해서입니다.
///
/// `#[serde(default)]`: 필드가 아예 없으면 `None`으로 채웁니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewJokeRequest {
    pub setup: Option<Value>,
    pub punchline: Option<Value>,
    pub category: Option<Value>,
}
