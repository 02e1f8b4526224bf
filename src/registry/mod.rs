//! # League Registry
//!
//! 하나 이상의 리그 데이터 소스를 관리하고 라우트로 노출하는 컴포넌트의 추상화입니다.
//!
//! 레지스트리는 (코덱, HTTP 클라이언트, 설정 객체)로부터 생성되며,
//! 생성된 뒤에는 Actix-Web 라우팅 테이블에 자신의 라우트를 설치할 수 있습니다.
//!
//! ## 모듈 구성
//!
//! - [`bootstrap`] - 설정 해석 → 로딩 → 생성까지의 시작 절차와 시작 정책 적용
//! - [`passthrough`] - 업스트림 리그 API로 요청을 그대로 중계하는 기본 레지스트리
//!
//! ## 생명주기
//!
//! ```text
//! main
//!  ├─ HttpClient::new / JsonCodec::new      (프로세스당 한 번)
//!  ├─ bootstrap::<PassthroughRegistry>()    (서버 바인딩 전, 한 번)
//!  │    ├─ R2dbcSources::resolve()
//!  │    ├─ load_registry_config()
//!  │    └─ LeagueRegistry::from_config()
//!  └─ HttpServer::new(|| App::new().configure(|cfg| configure_all_routes(cfg, &ctx)))
//!       └─ registry.setup_routes(cfg)        (워커마다)
//! ```

pub mod bootstrap;
pub mod passthrough;

use actix_web::web;
use async_trait::async_trait;

use crate::config::RegistryConfig;
use crate::core::codec::JsonCodec;
use crate::core::errors::AppResult;
use crate::http::HttpClient;

pub use bootstrap::bootstrap;
pub use passthrough::PassthroughRegistry;

/// 리그 레지스트리 공통 인터페이스
///
/// `setup_routes`는 워커 스레드마다 호출되므로 가볍게 복제 가능한 상태를
/// 등록해야 합니다 (`Arc` 기반 공유 상태 권장).
#[async_trait]
pub trait LeagueRegistry: Send + Sync + 'static {
    /// 코덱, 공유 HTTP 클라이언트, 설정 객체로부터 레지스트리를 생성합니다.
    async fn from_config(
        codec: JsonCodec,
        http: HttpClient,
        config: RegistryConfig,
    ) -> AppResult<Self>
    where
        Self: Sized;

    /// 로그와 헬스 체크에 표시되는 이름
    fn name(&self) -> &str;

    /// 관리 중인 리그 수
    fn league_count(&self) -> usize;

    /// 라우팅 테이블에 레지스트리의 라우트를 설치합니다.
    fn setup_routes(&self, cfg: &mut web::ServiceConfig);
}
