//! API 라우트 설정 모듈
//!
//! 프레임워크 기본 라우트(헬스체크)와 레지스트리가 제공하는 리그 라우트를
//! 하나의 라우팅 테이블로 묶습니다.
//!
//! 레지스트리가 마운트되지 않은 경우(degraded)에는 기본 라우트만 등록되며,
//! 리그 경로는 404를 반환합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let ctx = RouteContext::new(registry, WebSocketSettings::default());
//! let app = App::new().configure(|cfg| configure_all_routes(cfg, &ctx));
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::handlers::websocket::WebSocketSettings;
use crate::registry::LeagueRegistry;

/// 워커마다 라우팅 테이블을 만들 때 필요한 공유 상태
#[derive(Clone)]
pub struct RouteContext {
    registry: Option<Arc<dyn LeagueRegistry>>,
    websocket: WebSocketSettings,
}

impl RouteContext {
    pub fn new(registry: Option<Arc<dyn LeagueRegistry>>, websocket: WebSocketSettings) -> Self {
        Self {
            registry,
            websocket,
        }
    }

    pub fn registry(&self) -> Option<&Arc<dyn LeagueRegistry>> {
        self.registry.as_ref()
    }

    fn status(&self) -> RegistryStatus {
        RegistryStatus {
            mounted: self
                .registry
                .as_ref()
                .map(|r| (r.name().to_string(), r.league_count())),
        }
    }
}

/// 헬스체크가 보고하는 레지스트리 상태
#[derive(Debug, Clone)]
struct RegistryStatus {
    mounted: Option<(String, usize)>,
}

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
/// * `ctx` - 마운트할 레지스트리와 웹소켓 설정
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, ctx: &RouteContext) {
    cfg.app_data(web::Data::new(ctx.status()));
    cfg.app_data(web::Data::new(ctx.websocket.clone()));

    // Health check endpoint
    cfg.service(health_check);

    // League routes
    if let Some(registry) = &ctx.registry {
        registry.setup_routes(cfg);
    }
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 레지스트리가 마운트되지 않았으면 `status`가 `"degraded"`가 됩니다.
/// 두 경우 모두 200을 반환합니다.
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "blasement",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "registry": { "name": "passthrough", "leagues": 2 }
/// }
/// ```
#[get("/health")]
async fn health_check(status: web::Data<RegistryStatus>) -> HttpResponse {
    let (state, registry) = match &status.mounted {
        Some((name, leagues)) => ("healthy", json!({ "name": name, "leagues": leagues })),
        None => ("degraded", serde_json::Value::Null),
    };

    HttpResponse::Ok().json(json!({
        "status": state,
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "registry": registry,
    }))
}
