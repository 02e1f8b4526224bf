//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수(프로필별 `.env` 파일 포함)와 커맨드라인 인자를 기반으로
//! 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`server_config`] - 서버 바인딩, 실행 환경, Rate Limiting, 시작 정책
//! - [`registry_config`] - 레지스트리 설정 파일 경로 해석 및 로딩
//! - [`cli`] - 커맨드라인 인자
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 레지스트리 설정 파일 (기본값: blasement-r2dbc.json)
//! export BLASEMENT_R2DBC="/etc/blasement/leagues.json"
//!
//! # 시작 정책: degrade (기본값) | fail-fast
//! export STARTUP_POLICY="fail-fast"
//!
//! # 요청 제한
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

pub mod server_config;
pub mod registry_config;
pub mod cli;

pub use server_config::*;
pub use registry_config::*;
pub use cli::Cli;
