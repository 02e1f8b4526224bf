//! # Application Error Handling System
//!
//! 리그 레지스트리 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`로 에러 타입을 정의하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 하나로 일관된 JSON 에러 응답을 돌려줄 수 있습니다.
//!
//! ## 에러 분류
//!
//! ### 1. 시작 단계 에러
//! - **Config**: 레지스트리 설정 파일이 없거나, 읽을 수 없거나, JSON 객체가 아님
//!
//! ### 2. 업스트림 에러
//! - **UpstreamTimeout**: 연결 또는 소켓 읽기가 30초 제한을 넘김
//! - **ExternalServiceError**: 그 외 전송 계층 실패 (DNS, TLS, 연결 거부 등)
//!
//! 업스트림이 2xx가 아닌 상태 코드를 돌려준 것은 에러가 아닙니다.
//! 호출자가 상태 코드를 직접 확인합니다.
//!
//! ### 3. 요청 처리 에러
//! - **ValidationError**: 잘못된 리그 설정 또는 입력값
//! - **NotFound**: 등록되지 않은 리그, 스트림이 없는 리그
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `ExternalServiceError` | 502 Bad Gateway |
//! | `UpstreamTimeout` | 504 Gateway Timeout |
//! | `Config`, `InternalError` | 500 Internal Server Error |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn league_summary(name: &str) -> AppResult<LeagueSummary> {
//!     registry
//!         .league(name)
//!         .map(LeagueSummary::from)
//!         .ok_or_else(|| AppError::NotFound(format!("League {} not found", name)))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 레지스트리 설정 파일 로딩 에러
///
/// 설정 해석 순서(프레임워크 키 → 프로세스 속성 → 기본 파일명)로 결정된
/// 경로에서 파일을 읽고 파싱하는 과정의 실패를 나타냅니다.
/// 어느 경우든 레지스트리는 생성되지 않습니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 해석된 경로에 파일이 존재하지 않음
    #[error("registry config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// 파일은 있으나 읽기 실패
    #[error("failed to read registry config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 문법 오류
    #[error("registry config {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 올바른 JSON이지만 최상위 값이 객체가 아님
    #[error("registry config {} must contain a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
}

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 업스트림 연결/읽기 타임아웃 (504 Gateway Timeout)
    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),

    /// 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// reqwest 전송 에러를 분류합니다.
    ///
    /// 타임아웃은 `UpstreamTimeout`으로, 나머지는 `ExternalServiceError`로 변환합니다.
    /// 상태 코드 기반 에러(`error_for_status`)는 이 크레이트에서 만들지 않습니다.
    pub fn from_transport(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() || caused_by_io_timeout(&err) {
            AppError::UpstreamTimeout(format!("{}: {}", context, err))
        } else {
            AppError::ExternalServiceError(format!("{}: {}", context, err))
        }
    }
}

/// 소켓 읽기 타임아웃은 hyper 에러 안쪽의 `io::ErrorKind::TimedOut`으로만 드러날 수 있음
fn caused_by_io_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    /// 응답 형식은 `{"error": "..."}` 입니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::ErrorContext;
///
/// let server = HttpServer::new(factory)
///     .bind(&address)
///     .with_context(|| format!("failed to bind {}", address))?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
