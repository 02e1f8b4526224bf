//! League HTTP Handlers
//!
//! 패스스루 레지스트리가 설치하는 REST 엔드포인트입니다.
//! 모든 핸들러는 `/leagues` 스코프 아래에 등록되며, 스코프의
//! `web::Data<PassthroughRegistry>`에서 리그 정보를 읽습니다.
//!
//! # Endpoints
//!
//! - `GET /leagues` - 리그 요약 목록
//! - `GET /leagues/{league}` - 리그 요약
//! - `GET /leagues/{league}/{tail}` - 업스트림 응답 중계
//!
//! 웹소켓 업그레이드가 아닌 `GET /leagues/{league}/stream`도 이 중계로 처리됩니다.
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::core::errors::{AppError, ErrorContext};
use crate::domain::ApiResponse;
use crate::registry::PassthroughRegistry;

fn league_not_found(name: &str) -> AppError {
    AppError::NotFound(format!("등록되지 않은 리그입니다: {}", name))
}

/// 레지스트리 코덱으로 직렬화한 JSON 응답
fn json_response<T: serde::Serialize>(
    registry: &PassthroughRegistry,
    body: &ApiResponse<T>,
) -> Result<HttpResponse, AppError> {
    let bytes = registry.codec().encode(body).context("응답 직렬화 실패")?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(bytes))
}

/// 리그 목록 조회 핸들러
///
/// # Endpoint
/// `GET /leagues`
#[get("")]
pub async fn list_leagues(
    registry: web::Data<PassthroughRegistry>,
) -> Result<HttpResponse, AppError> {
    json_response(&registry, &ApiResponse::success(registry.summaries()))
}

/// 리그 요약 조회 핸들러
///
/// # Endpoint
/// `GET /leagues/{league}`
#[get("/{league}")]
pub async fn get_league(
    league: web::Path<String>,
    registry: web::Data<PassthroughRegistry>,
) -> Result<HttpResponse, AppError> {
    let summary = registry
        .summary(&league)
        .ok_or_else(|| league_not_found(&league))?;

    json_response(&registry, &ApiResponse::success(summary))
}

/// 업스트림 중계 핸들러
///
/// 하위 경로와 쿼리 문자열을 업스트림 주소에 붙여 GET 요청을 보내고,
/// 상태 코드, `Content-Type`, 본문을 그대로 돌려줍니다.
/// 업스트림의 4xx/5xx 응답도 에러가 아닌 정상 응답으로 전달됩니다.
/// 기본 경로를 벗어나는 세그먼트(`..` 등)는 업스트림에 보내기 전에 400으로 거부됩니다.
///
/// # Endpoint
/// `GET /leagues/{league}/{tail:.*}`
#[get("/{league}/{tail:.*}")]
pub async fn proxy_league(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    registry: web::Data<PassthroughRegistry>,
) -> Result<HttpResponse, AppError> {
    let (league, tail) = path.into_inner();
    let source = registry
        .league(&league)
        .ok_or_else(|| league_not_found(&league))?;

    let url = source.upstream_url(&tail, req.query_string())?;
    let upstream = registry.http().get(url.as_str()).await?;

    if !upstream.is_success() {
        log::warn!("⚠️ 업스트림 {} 응답: {}", url, upstream.status);
    }

    let status = StatusCode::from_u16(upstream.status).map_err(|_| {
        AppError::ExternalServiceError(format!(
            "업스트림이 잘못된 상태 코드를 반환했습니다: {}",
            upstream.status
        ))
    })?;

    let mut response = HttpResponse::build(status);
    if let Some(content_type) = upstream.content_type {
        response.insert_header((CONTENT_TYPE, content_type));
    }
    Ok(response.body(upstream.body))
}
