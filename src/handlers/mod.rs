//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 리그 레지스트리가 자신의 라우트를 설치할 때 이 핸들러들을 등록합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Scoreboard, Bot)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP / WebSocket
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Registry - 리그 목록, 공유 클라이언트      ← Registry Layer
//! ├─────────────────────────────────────────────┤
//!   HttpClient - 업스트림 REST / 스트림        ← Transport Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`leagues`**: 리그 조회와 업스트림 REST 중계
//!   - 리그 목록 (`GET /leagues`)
//!   - 리그 요약 (`GET /leagues/{league}`)
//!   - 업스트림 중계 (`GET /leagues/{league}/{tail}`)
//!
//! - **`websocket`**: 업스트림 스트림 중계
//!   - 스트림 연결 (`GET /leagues/{league}/stream`)
//!   - 하트비트와 프레임 크기 설정 (`WebSocketSettings`)
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, `AppError`의
//! `ResponseError` 구현이 상태 코드와 `{"error": "..."}` 본문을 만듭니다.
//!
//! ```rust,ignore
//! #[get("/{league}")]
//! pub async fn get_league(
//!     league: web::Path<String>,
//!     registry: web::Data<PassthroughRegistry>,
//! ) -> Result<HttpResponse, AppError> {
//!     let summary = registry.summary(&league).ok_or_else(|| AppError::NotFound(...))?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
//! }
//! ```

pub mod leagues;
pub mod websocket;
