//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목 (모두 선택, 기본값 있음):
//! - `HOST`: 서버 바인딩 주소 (기본값: "0.0.0.0")
//! - `PORT`: 서버 포트 번호 (기본값: 8080)
//! - `ALLOWED_ORIGINS`: 쉼표로 구분한 CORS 허용 출처 목록 (기본값: "*")
//! - `STATIC_DIR`: 프론트엔드 정적 파일 디렉토리 (기본값: "public")
//! - `BUNDLED_JOKES_PATH`: 읽기 전용 시드 파일 (기본값: "jokes.json")
//! - `RUNTIME_JOKES_PATH`: 쓰기 가능한 저장 파일 (기본값: 시스템 임시 디렉토리의 "jokes.json")

use std::env;
use std::path::PathBuf;

/// 모든 출처를 허용한다는 뜻의 허용 목록 항목
pub const ANY_ORIGIN: &str = "*";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버가 바인딩할 호스트 주소
    pub host: String,
    /// 서버 포트 번호
    /// u16: 0~65535 범위의 부호 없는 16비트 정수. 포트 번호에 딱 맞는 타입입니다.
    pub port: u16,
    /// CORS 허용 출처 목록. `"*"`가 들어 있으면 모든 출처를 허용합니다.
    pub allowed_origins: Vec<String>,
    /// `index.html`, `add.html` 등 정적 파일이 있는 디렉토리
    pub static_dir: PathBuf,
    /// 이미지에 함께 묶여 배포되는 읽기 전용 시드 파일
    pub bundled_jokes_path: PathBuf,
    /// 추가된 농담을 저장하는 쓰기 가능한 파일
    pub runtime_jokes_path: PathBuf,
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    ///
    /// 필수 항목이 없으므로 실패하지 않습니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 만듭니다.
    ///
    /// `lookup`: 키를 받아 값이 있으면 `Some`을 돌려주는 클로저.
    /// 테스트에서는 HashMap 조회를 넘겨 프로세스 환경변수를 건드리지 않습니다.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            // 파싱 실패 시(예: "abc") 기본값 8080을 사용합니다.
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(8080),

            allowed_origins: parse_origins(
                lookup("ALLOWED_ORIGINS").as_deref().unwrap_or(ANY_ORIGIN),
            ),

            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            bundled_jokes_path: lookup("BUNDLED_JOKES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("jokes.json")),
            runtime_jokes_path: lookup("RUNTIME_JOKES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("jokes.json")),
        }
    }
}

/// `"https://a.com, https://b.com,,"` → `["https://a.com", "https://b.com"]`
///
/// 각 항목의 앞뒤 공백을 제거하고 빈 항목은 버립니다.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_permissive() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins, vec!["*"]);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.bundled_jokes_path, PathBuf::from("jokes.json"));
        assert!(config.runtime_jokes_path.ends_with("jokes.json"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("ALLOWED_ORIGINS", "https://a.web.app, https://b.com"),
            ("RUNTIME_JOKES_PATH", "/data/jokes.json"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.web.app", "https://b.com"]
        );
        assert_eq!(config.runtime_jokes_path, PathBuf::from("/data/jokes.json"));
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        assert_eq!(config_from(&[("PORT", "eighty")]).port, 8080);
    }

    #[test]
    fn parse_origins_drops_blank_entries() {
        assert_eq!(parse_origins(" a , ,b,"), vec!["a", "b"]);
        assert!(parse_origins(" , ").is_empty());
    }
}
