//! # jotd (Joke of the Day) 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 농담 저장소 적재 (런타임 파일 → 번들 시드 파일 → 빈 컬렉션)
//! 4. API 라우터 + 정적 파일 서빙 설정
//! 5. HTTP 서버 시작, SIGINT/SIGTERM 수신 시 정상 종료

// ── 모듈 선언 ──
mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod store;

use anyhow::Result;
use config::Config;
use routes::AppState;
use std::sync::Arc;
use store::JokeStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수가 없으면 jotd, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jotd=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting jotd server on {}:{}", config.host, config.port);
    tracing::info!("Allowed origins: {:?}", config.allowed_origins);

    // ── 4단계: 농담 저장소 적재 ──
    // 적재에 실패해도 빈 컬렉션으로 계속 진행합니다 (서버 기동을 막지 않음).
    let store = JokeStore::open(&config.runtime_jokes_path, &config.bundled_jokes_path).await;
    if store.is_empty() {
        tracing::warn!("No jokes loaded; /api/jotd returns 404 until one is added");
    } else {
        tracing::info!("{} jokes ready", store.len());
    }
    tracing::info!(
        "Jokes will be persisted to {}",
        store.runtime_path().display()
    );

    // ── 5단계: 상태와 라우터 ──
    // 전역 변수 없이, 저장소 하나를 Arc로 감싸 라우터에 주입합니다.
    let state = AppState {
        store: Arc::new(store),
    };
    let app = routes::router(state, &config);

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl+C(SIGINT) 또는 SIGTERM을 기다립니다.
///
/// 컨테이너 플랫폼은 인스턴스를 내릴 때 SIGTERM을 보냅니다.
/// 시그널 핸들러 설치에 실패하면 해당 시그널은 기다리지 않습니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
