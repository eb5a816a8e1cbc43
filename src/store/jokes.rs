//! # 농담 저장소 (`JokeStore`)
//!
//! 프로세스 전체에서 단 하나만 존재하는, 농담 컬렉션의 권위 있는(authoritative) 사본입니다.
//! `main`에서 만들어 `Arc`로 감싼 뒤 `AppState`를 통해 핸들러에 주입합니다.
//!
//! ## 동작 방식
//! - 시작 시: 쓰기 가능한 런타임 파일 → 번들된 시드 파일 순으로 읽습니다.
//!   둘 다 실패하면 빈 컬렉션으로 시작합니다 (서버는 계속 뜹니다).
//! - 추가 시: 메모리에 push한 뒤, 전체 컬렉션을 런타임 파일에 저장합니다.
//!   저장이 실패해도 메모리 상태는 되돌리지 않습니다.
//!
//! ## 한계
//! 인스턴스마다 자기 메모리 사본을 파일에 씁니다.
//! 여러 인스턴스로 배포하면 서로의 추가 내용을 덮어쓸 수 있습니다.

use super::{files, StoreError};
use crate::models::Joke;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;

/// 후보 경로들에서 농담 컬렉션을 읽어옵니다.
///
/// 처음으로 **읽히는** 파일 하나만 사용합니다.
/// 그 파일이 JSON 농담 배열이 아니면 다음 후보로 넘어가지 않고 `Corrupt` 에러를 돌려줍니다.
pub async fn load(candidates: &[PathBuf]) -> Result<Vec<Joke>, StoreError> {
    let (path, raw) = files::read_first(candidates).await?;
    let jokes = serde_json::from_str::<Vec<Joke>>(&raw)
        .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
    tracing::debug!("Read {} jokes from {}", jokes.len(), path.display());
    Ok(jokes)
}

/// `append()`의 결과
///
/// 저장 실패는 에러로 전파하지 않고 `persist_error`에 담아 돌려줍니다.
/// 호출한 쪽(핸들러)이 로그를 남기고 그대로 진행합니다.
#[derive(Debug)]
pub struct AppendOutcome {
    /// 추가 직후의 컬렉션 크기
    pub count: usize,
    /// 파일 저장에 실패했다면 그 원인
    pub persist_error: Option<StoreError>,
}

pub struct JokeStore {
    jokes: RwLock<Vec<Joke>>,
    runtime_path: PathBuf,
    // 파일 쓰기를 한 번에 하나씩만 하도록 막습니다. 메모리 컬렉션과는 별개의 잠금입니다.
    persist_lock: Mutex<()>,
}

impl JokeStore {
    /// 이미 가진 컬렉션으로 저장소를 만듭니다. 파일은 읽지 않습니다.
    pub fn new(jokes: Vec<Joke>, runtime_path: impl Into<PathBuf>) -> Self {
        Self {
            jokes: RwLock::new(jokes),
            runtime_path: runtime_path.into(),
            persist_lock: Mutex::new(()),
        }
    }

    /// 런타임 파일, 번들 파일 순으로 적재해 저장소를 엽니다.
    ///
    /// 적재에 실패하면 경고 로그를 남기고 빈 컬렉션으로 시작합니다.
    pub async fn open(runtime_path: impl Into<PathBuf>, bundled_path: impl Into<PathBuf>) -> Self {
        let runtime_path = runtime_path.into();
        let candidates = [runtime_path.clone(), bundled_path.into()];

        let jokes = match load(&candidates).await {
            Ok(jokes) => {
                tracing::info!("Loaded {} jokes", jokes.len());
                jokes
            }
            Err(e) => {
                tracing::warn!("Failed to load jokes, starting with an empty collection: {}", e);
                Vec::new()
            }
        };

        Self::new(jokes, runtime_path)
    }

    // 다른 스레드가 잠금을 쥔 채 panic해도(poisoning) 컬렉션 자체는 항상 온전하므로
    // 내부 값을 그대로 꺼내 씁니다.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Joke>> {
        self.jokes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Joke>> {
        self.jokes.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn runtime_path(&self) -> &Path {
        &self.runtime_path
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// 호출 시점의 컬렉션 사본을 돌려줍니다.
    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<Joke> {
        self.read().clone()
    }

    /// 읽기 잠금을 쥔 채로 클로저를 실행합니다. 컬렉션을 복사하지 않고 조회할 때 씁니다.
    ///
    /// 클로저 안에서 `.await`할 수 없으므로 잠금이 await 지점을 넘어가는 일은 없습니다.
    pub fn with_jokes<T>(&self, f: impl FnOnce(&[Joke]) -> T) -> T {
        f(&self.read())
    }

    /// 농담 하나를 추가하고 전체 컬렉션을 파일에 저장합니다.
    ///
    /// push는 쓰기 잠금 안에서 한 번에 일어나므로 동시에 들어온 추가 요청끼리 유실되지 않습니다.
    pub async fn append(&self, joke: Joke) -> AppendOutcome {
        // 블록 `{ ... }`이 끝나면 쓰기 잠금이 해제됩니다. 파일 저장(await) 전에 풀어야 합니다.
        let count = {
            let mut jokes = self.write();
            jokes.push(joke);
            jokes.len()
        };

        let persist_error = self.persist().await.err();
        AppendOutcome {
            count,
            persist_error,
        }
    }

    /// 현재 컬렉션 전체를 런타임 파일에 씁니다.
    ///
    /// 파일 잠금을 얻은 **뒤에** 스냅샷을 뜨므로, 마지막으로 끝난 저장이
    /// 항상 그 시점의 최신 메모리 상태를 담습니다.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let _guard = self.persist_lock.lock().await;

        // 원본 파일 형식과 같게 2칸 들여쓰기로 저장합니다.
        let body = serde_json::to_vec_pretty(&*self.read())?;

        files::write_atomic(&self.runtime_path, &body)
            .await
            .map_err(|source| StoreError::Persist {
                path: self.runtime_path.clone(),
                source,
            })
    }
}
