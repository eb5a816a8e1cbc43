//! # 농담 비즈니스 로직 서비스
//!
//! 저장소(`store`)의 데이터 위에서 동작하는 **순수 함수**들입니다.
//! 파일 I/O나 HTTP를 전혀 모르기 때문에 단위 테스트가 쉽습니다.
//!
//! 이 모듈의 함수들:
//! - `validate_new_joke()`: 생성 요청 검증 및 공백 제거(trim)
//! - `pick_random()`: 카테고리 필터를 적용한 무작위 선택
//! - `list_all()`: 전체 목록 (필터 없음)
//! - `categories()`: 중복 없는 카테고리 목록

use crate::models::{Joke, NewJokeRequest};
use rand::Rng;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// "필터 없음"을 뜻하는 카테고리 이름. 브라우저 클라이언트의 기본 필터 버튼과 같습니다.
pub const ALL_CATEGORIES: &str = "All";

/// 생성 요청 검증 실패
///
/// `missing`에는 문제가 있는 필드 이름이 요청 필드 순서대로 들어갑니다.
/// 클라이언트에 보내는 메시지는 어떤 필드가 틀렸든 항상 같은 문장입니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("setup, punchline, and category are all required.")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// 무작위 선택 실패
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    /// 컬렉션 자체가 비어 있음
    #[error("No jokes available.")]
    Empty,
    /// 필터에 맞는 농담이 하나도 없음
    #[error("No jokes match this category.")]
    NoMatch,
}

/// JSON 값이 문자열이고, 앞뒤 공백을 제거한 뒤에도 비어 있지 않으면 그 값을 돌려줍니다.
///
/// `Option<&Value>` → `Option<String>`:
/// - 필드 없음, `null`, 숫자/배열 등 문자열이 아닌 값, 공백뿐인 문자열 → `None`
fn trimmed_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 농담 생성 요청을 검증하고, 공백이 제거된 `Joke`를 만듭니다.
///
/// # 반환값
/// - `Ok(Joke)`: 세 필드 모두 유효한 경우 (각 필드는 trim된 값)
/// - `Err(ValidationError)`: 하나라도 없거나, 문자열이 아니거나, 공백뿐인 경우
pub fn validate_new_joke(req: &NewJokeRequest) -> Result<Joke, ValidationError> {
    let setup = trimmed_text(req.setup.as_ref());
    let punchline = trimmed_text(req.punchline.as_ref());
    let category = trimmed_text(req.category.as_ref());

    // match로 세 Option을 한 번에 검사합니다.
    // 모두 Some이면 성공, 아니면 None인 필드 이름을 모아 에러로 돌려줍니다.
    match (setup, punchline, category) {
        (Some(setup), Some(punchline), Some(category)) => {
            Ok(Joke::new(setup, punchline, category))
        }
        (setup, punchline, category) => {
            let missing = [
                ("setup", setup.is_none()),
                ("punchline", punchline.is_none()),
                ("category", category.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, is_missing)| is_missing.then_some(field))
            .collect();
            Err(ValidationError { missing })
        }
    }
}

/// 필터에 맞는 농담 중 하나를 균등한 확률로 고릅니다.
///
/// # 매개변수
/// - `jokes`: 전체 컬렉션
/// - `category`: `None`이거나 `"All"`이면 필터 없음. 그 외에는 대소문자를 구분하는 완전 일치.
/// - `rng`: 난수 생성기. 핸들러는 `rand::thread_rng()`를, 테스트는 시드 고정 생성기를 넘깁니다.
///
/// 인덱스는 `[0, 후보 수)` 구간에서 균등하게 뽑습니다.
pub fn pick_random<'a, R>(
    jokes: &'a [Joke],
    category: Option<&str>,
    rng: &mut R,
) -> Result<&'a Joke, PickError>
where
    R: Rng + ?Sized,
{
    if jokes.is_empty() {
        return Err(PickError::Empty);
    }

    let filter = category.filter(|c| *c != ALL_CATEGORIES);
    let pool: Vec<&Joke> = match filter {
        Some(wanted) => jokes.iter().filter(|j| j.category == wanted).collect(),
        None => jokes.iter().collect(),
    };

    if pool.is_empty() {
        return Err(PickError::NoMatch);
    }

    let idx = rng.gen_range(0..pool.len());
    Ok(pool[idx])
}

/// 전체 농담 목록을 저장 순서 그대로 돌려줍니다.
///
/// 목록 조회 시에는 서버가 필터링하지 않습니다. 카테고리별 탐색은 클라이언트가 합니다.
pub fn list_all(jokes: &[Joke]) -> Vec<Joke> {
    jokes.to_vec()
}

/// 중복 없는 카테고리 목록을 처음 등장한 순서대로 돌려줍니다.
pub fn categories(jokes: &[Joke]) -> Vec<String> {
    // HashSet은 중복 검사만, Vec은 등장 순서를 담당합니다.
    let mut seen: HashSet<&str> = HashSet::new();
    jokes
        .iter()
        .filter(|joke| seen.insert(joke.category.as_str()))
        .map(|joke| joke.category.clone())
        .collect()
}
