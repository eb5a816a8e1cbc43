//! # 서비스(비즈니스 로직) 모듈
//!
//! - `jokes`: 농담 검증, 무작위 선택, 목록 조회

pub mod jokes;

pub use jokes::*;
