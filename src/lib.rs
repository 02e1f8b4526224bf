//! Blasement 리그 레지스트리
//!
//! 시뮬레이션 스포츠 리그 데이터 백엔드를 하나의 HTTP 서비스로 묶는 프록시입니다.
//! 시작 시 레지스트리 설정 파일을 찾아 읽고, 리그 레지스트리를 한 번 생성한 뒤
//! 그 라우트를 Actix-web 라우팅 테이블에 마운트합니다.
//!
//! # Features
//!
//! - **설정 경로 해석**: `BLASEMENT_R2DBC` → `--r2dbc` → `blasement-r2dbc.json`
//! - **시작 정책**: 레지스트리 실패 시 degrade(라우트 없이 계속) 또는 fail-fast
//! - **업스트림 중계**: gzip/deflate, 30초 타임아웃, 고정 User-Agent의 공유 HTTP 클라이언트
//! - **스트림 중계**: 15초 ping/timeout 하트비트를 갖는 웹소켓 중계
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /health, /leagues/...
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 웹소켓 중계
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ League Registry │ ← 설정에서 생성된 리그 목록
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   HttpClient    │ ← 업스트림 리그 API
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use blasement::config::{R2dbcSources, StartupPolicy};
//! use blasement::registry::{PassthroughRegistry, bootstrap};
//!
//! let codec = JsonCodec::new();
//! let http = HttpClient::new(HttpClientConfig::default())?;
//! let registry = bootstrap::<PassthroughRegistry>(
//!     &R2dbcSources::from_env(None), &codec, &http, StartupPolicy::Degrade,
//! ).await?;
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod http;
pub mod registry;
pub mod handlers;
pub mod routes;
pub mod utils;
