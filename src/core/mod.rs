//! # Core Module
//!
//! 서비스 전반에서 공유하는 기반 타입을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **ConfigError**: 레지스트리 설정 파일 로딩 에러
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ### [`codec`] - JSON 코덱
//! - **JsonCodec**: 알 수 없는 필드를 허용하는 디코더/인코더
//!
//! ## 의존성 전달
//!
//! HTTP 클라이언트와 코덱은 전역 싱글톤이 아니라 `main`에서 한 번 생성되어
//! 레지스트리 생성자에 인자로 전달됩니다. 수명은 애플리케이션 시작/종료와 같습니다.
//!
//! ```rust,ignore
//! let codec = JsonCodec::new();
//! let http = HttpClient::new(HttpClientConfig::default())?;
//! let registry = PassthroughRegistry::from_config(codec, http, config).await?;
//! ```

pub mod errors;
pub mod codec;

pub use errors::{AppError, AppResult, ConfigError, ErrorContext};
pub use codec::JsonCodec;
