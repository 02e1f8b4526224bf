//! 레지스트리 부트스트랩
//!
//! 서버가 요청을 받기 전에 레지스트리를 정확히 한 번 생성합니다.
//! 실패 처리 방식은 [`StartupPolicy`]로 명시적으로 선택합니다.
//!
//! | 정책 | 실패 시 |
//! |------|---------|
//! | `Degrade` | 에러를 로그로 남기고 `Ok(None)` → 리그 라우트 없이 서버 실행 |
//! | `FailFast` | 에러를 로그로 남기고 `Err` 반환 → 서버를 띄우지 않음 |

use std::sync::Arc;

use crate::config::{R2dbcSources, StartupPolicy, load_registry_config};
use crate::core::codec::JsonCodec;
use crate::core::errors::AppResult;
use crate::http::HttpClient;
use crate::utils::display_terminal::{
    print_boxed_title, print_registry_summary, print_step_complete, print_step_failed,
    print_step_start, print_sub_task,
};

use super::LeagueRegistry;

/// 설정 경로 해석 → 파일 로딩 → 레지스트리 생성을 수행합니다.
///
/// # Returns
///
/// * `Ok(Some(registry))` - 생성 성공
/// * `Ok(None)` - 실패했지만 `Degrade` 정책이라 라우트 없이 계속 진행
/// * `Err(e)` - 실패했고 `FailFast` 정책
pub async fn bootstrap<R: LeagueRegistry>(
    sources: &R2dbcSources,
    codec: &JsonCodec,
    http: &HttpClient,
    policy: StartupPolicy,
) -> AppResult<Option<Arc<dyn LeagueRegistry>>> {
    print_boxed_title("Blasement League Registry");
    log::info!("🏗️ 리그 레지스트리 부트스트랩 시작 (정책: {})", policy);

    match build_registry::<R>(sources, codec, http).await {
        Ok(registry) => {
            log::info!(
                "✅ 리그 레지스트리 '{}' 준비 완료 ({}개 리그)",
                registry.name(),
                registry.league_count()
            );
            print_registry_summary(Some((registry.name(), registry.league_count())));
            Ok(Some(registry))
        }
        Err(e) => {
            log::error!("❌ 리그 레지스트리 시작 실패: {}", e);
            match policy {
                StartupPolicy::Degrade => {
                    log::warn!("⚠️ degrade 정책: 리그 라우트 없이 서버를 계속 실행합니다");
                    print_registry_summary(None);
                    Ok(None)
                }
                StartupPolicy::FailFast => Err(e),
            }
        }
    }
}

async fn build_registry<R: LeagueRegistry>(
    sources: &R2dbcSources,
    codec: &JsonCodec,
    http: &HttpClient,
) -> AppResult<Arc<dyn LeagueRegistry>> {
    print_step_start(1, "Resolving registry config path");
    let (origin, path) = sources.resolve_with_origin();
    print_sub_task(&origin.to_string(), &path.display().to_string());
    print_step_complete(1, "Registry config path resolved", 1);

    print_step_start(2, "Loading registry config");
    let config = load_registry_config(&path, codec).inspect_err(|e| {
        print_step_failed(2, "Loading registry config", &e.to_string());
    })?;
    print_step_complete(2, "Registry config loaded", config.values().len());

    print_step_start(3, "Constructing league registry");
    let registry = R::from_config(codec.clone(), http.clone(), config)
        .await
        .inspect_err(|e| {
            print_step_failed(3, "Constructing league registry", &e.to_string());
        })?;
    print_step_complete(3, "League registry constructed", registry.league_count());

    Ok(Arc::new(registry))
}
