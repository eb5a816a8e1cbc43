//! # JSON 파일 I/O 헬퍼
//!
//! 저장소가 사용하는 저수준 파일 함수들입니다.
//! - `read_first()`: 후보 경로를 순서대로 시도해 처음 읽히는 파일을 반환
//! - `write_atomic()`: 임시 파일에 쓴 뒤 rename으로 교체

use super::StoreError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
// std::fs 대신 tokio::fs: 파일 I/O 중에도 다른 요청을 계속 처리할 수 있습니다.
use tokio::fs;

/// 후보 경로들을 순서대로 읽어, 처음 성공한 파일의 경로와 내용을 돌려줍니다.
///
/// # 반환값
/// - `Ok((경로, 내용))`: 읽기에 성공한 첫 번째 후보
/// - `Err(StoreError::Unavailable)`: 어떤 후보도 읽을 수 없는 경우
pub async fn read_first(candidates: &[PathBuf]) -> Result<(PathBuf, String), StoreError> {
    for path in candidates {
        match fs::read_to_string(path).await {
            Ok(raw) => return Ok((path.clone(), raw)),
            Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
        }
    }

    Err(StoreError::Unavailable {
        tried: candidates.to_vec(),
    })
}

/// `jokes.json` → `jokes.json.tmp`
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("jokes"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// 내용을 파일에 통째로 씁니다.
///
/// 옆에 임시 파일을 먼저 쓰고 `rename`으로 바꿔치기하므로,
/// 다른 프로세스가 읽는 도중에 반쯤 쓰인 파일을 보는 일이 없습니다.
/// 부모 디렉토리가 없으면 만듭니다.
pub async fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, content).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        // 남은 임시 파일은 지워 보되, 실패해도 원래 에러를 돌려줍니다.
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_first_skips_missing_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join("present.json");
        fs::write(&present, "[]").await.unwrap();

        let (path, raw) = read_first(&[missing, present.clone()]).await.unwrap();
        assert_eq!(path, present);
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn read_first_with_no_readable_candidate_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_first(&[dir.path().join("a.json"), dir.path().join("b.json")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { ref tried } if tried.len() == 2));
    }

    #[tokio::test]
    async fn write_atomic_creates_parents_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/jokes.json");

        write_atomic(&target, b"[1]").await.unwrap();
        write_atomic(&target, b"[2]").await.unwrap();

        assert_eq!(fs::read_to_string(&target).await.unwrap(), "[2]");
        assert!(!tmp_path(&target).exists());
    }

    #[test]
    fn tmp_path_is_a_sibling() {
        assert_eq!(
            tmp_path(Path::new("/tmp/jokes.json")),
            PathBuf::from("/tmp/jokes.json.tmp")
        );
    }
}
