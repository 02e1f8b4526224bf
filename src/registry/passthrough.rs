//! 패스스루 리그 레지스트리
//!
//! 설정 파일의 `leagues` 항목에 선언된 업스트림 리그 API를 그대로 중계합니다.
//!
//! ```json
//! {
//!   "leagues": {
//!     "ilb": {
//!       "upstream": "https://api.example.com/ilb",
//!       "stream": "wss://api.example.com/ilb/stream",
//!       "description": "Internet League Blaseball"
//!     }
//!   }
//! }
//! ```
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/leagues` | 리그 요약 목록 |
//! | `GET` | `/leagues/{league}` | 리그 요약 |
//! | `GET` | `/leagues/{league}/stream` | 업스트림 스트림 웹소켓 중계 (`Upgrade: websocket` 요청만) |
//! | `GET` | `/leagues/{league}/{tail}` | 업스트림 REST 응답 중계 (상태 코드 유지, 일반 `GET .../stream` 포함) |

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use serde_json::Value;
use validator::Validate;

use crate::config::RegistryConfig;
use crate::core::codec::{JsonCodec, json_kind};
use crate::core::errors::{AppError, AppResult};
use crate::domain::{LeagueSource, LeagueSummary};
use crate::handlers;
use crate::http::HttpClient;
use crate::utils::string_utils::normalize_league_name;

use super::LeagueRegistry;

/// 설정에서 리그 목록을 읽는 키
pub const LEAGUES_KEY: &str = "leagues";

/// 업스트림 리그 API를 중계하는 레지스트리
///
/// 워커마다 `setup_routes`가 호출되므로 상태는 `Arc`로 공유합니다.
#[derive(Clone)]
pub struct PassthroughRegistry {
    inner: Arc<PassthroughState>,
}

struct PassthroughState {
    leagues: BTreeMap<String, LeagueSource>,
    http: HttpClient,
    codec: JsonCodec,
}

impl PassthroughRegistry {
    /// 이미 검증된 리그 목록으로 레지스트리를 만듭니다.
    pub fn new(codec: JsonCodec, http: HttpClient, leagues: BTreeMap<String, LeagueSource>) -> Self {
        Self {
            inner: Arc::new(PassthroughState {
                leagues,
                http,
                codec,
            }),
        }
    }

    /// 리그 이름(대소문자 무시)으로 데이터 소스를 찾습니다.
    pub fn league(&self, name: &str) -> Option<&LeagueSource> {
        self.inner.leagues.get(&name.trim().to_lowercase())
    }

    pub fn summary(&self, name: &str) -> Option<LeagueSummary> {
        let key = name.trim().to_lowercase();
        self.inner
            .leagues
            .get(&key)
            .map(|source| LeagueSummary::from_source(&key, source))
    }

    /// 이름순으로 정렬된 리그 요약 목록
    pub fn summaries(&self) -> Vec<LeagueSummary> {
        self.inner
            .leagues
            .iter()
            .map(|(name, source)| LeagueSummary::from_source(name, source))
            .collect()
    }

    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.inner.codec
    }
}

/// 설정 객체의 `leagues` 항목을 검증된 리그 목록으로 변환합니다.
///
/// 항목이 없으면 빈 목록을 돌려주고, 형식이 잘못된 리그가 하나라도 있으면
/// 전체를 `ValidationError`로 거부합니다.
fn parse_leagues(
    codec: &JsonCodec,
    config: &RegistryConfig,
) -> AppResult<BTreeMap<String, LeagueSource>> {
    let entries = match config.get(LEAGUES_KEY) {
        None | Some(Value::Null) => {
            log::warn!(
                "⚠️ {} 에 '{}' 항목이 없습니다. 빈 레지스트리로 시작합니다",
                config.path().display(),
                LEAGUES_KEY
            );
            return Ok(BTreeMap::new());
        }
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(AppError::ValidationError(format!(
                "'{}' 항목은 객체여야 합니다 (현재: {})",
                LEAGUES_KEY,
                json_kind(other)
            )));
        }
    };

    let mut leagues = BTreeMap::new();
    for (raw_name, value) in entries {
        let name = normalize_league_name(raw_name)?;

        let source: LeagueSource = codec.from_value(value.clone()).map_err(|e| {
            AppError::ValidationError(format!("리그 '{}' 설정 형식 오류: {}", name, e))
        })?;
        source.validate().map_err(|e| {
            AppError::ValidationError(format!("리그 '{}' 설정 검증 실패: {}", name, e))
        })?;

        if leagues.insert(name.clone(), source).is_some() {
            return Err(AppError::ValidationError(format!(
                "리그 이름 '{}'이(가) 중복됩니다 (대소문자 구분 없음)",
                name
            )));
        }
        log::debug!("📋 리그 등록: {}", name);
    }

    Ok(leagues)
}

#[async_trait]
impl LeagueRegistry for PassthroughRegistry {
    async fn from_config(
        codec: JsonCodec,
        http: HttpClient,
        config: RegistryConfig,
    ) -> AppResult<Self> {
        let leagues = parse_leagues(&codec, &config)?;
        log::info!(
            "📚 {} 에서 {}개 리그를 읽었습니다",
            config.path().display(),
            leagues.len()
        );
        Ok(Self::new(codec, http, leagues))
    }

    fn name(&self) -> &str {
        "passthrough"
    }

    fn league_count(&self) -> usize {
        self.inner.leagues.len()
    }

    fn setup_routes(&self, cfg: &mut web::ServiceConfig) {
        // 스트림 라우트는 꼬리 경로 라우트보다 먼저 등록해야 함.
        // 업그레이드가 아닌 요청은 가드에서 걸러져 꼬리 경로 라우트로 넘어감
        cfg.service(
            web::scope("/leagues")
                .app_data(web::Data::new(self.clone()))
                .service(handlers::leagues::list_leagues)
                .service(handlers::leagues::get_league)
                .service(handlers::websocket::stream_league)
                .service(handlers::leagues::proxy_league),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpClientConfig;
    use serde_json::json;

    fn config(values: Value) -> RegistryConfig {
        let Value::Object(map) = values else {
            panic!("test config must be an object");
        };
        RegistryConfig::new("blasement-r2dbc.json", map)
    }

    async fn registry(values: Value) -> AppResult<PassthroughRegistry> {
        PassthroughRegistry::from_config(
            JsonCodec::new(),
            HttpClient::new(HttpClientConfig::default()).unwrap(),
            config(values),
        )
        .await
    }

    #[actix_web::test]
    async fn test_missing_leagues_key_gives_empty_registry() {
        let registry = registry(json!({"driver": "postgres"})).await.unwrap();

        assert_eq!(registry.league_count(), 0);
        assert!(registry.summaries().is_empty());
    }

    #[actix_web::test]
    async fn test_leagues_are_normalized_and_sorted() {
        let registry = registry(json!({
            "leagues": {
                "ILB": {"upstream": "https://api.example.com/ilb", "stream": "wss://api.example.com/ilb/stream"},
                "gamma": {"upstream": "http://localhost:9000", "description": "Gamma"}
            }
        }))
        .await
        .unwrap();

        let names: Vec<_> = registry.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["gamma", "ilb"]);
        assert!(registry.league(" Ilb ").is_some());
        assert!(registry.summary("ilb").unwrap().streaming);
        assert_eq!(
            registry.summary("gamma").unwrap().description.as_deref(),
            Some("Gamma")
        );
    }

    #[actix_web::test]
    async fn test_malformed_entries_are_rejected() {
        let not_object = registry(json!({"leagues": ["ilb"]})).await;
        assert!(matches!(not_object, Err(AppError::ValidationError(_))));

        let bad_scheme = registry(json!({"leagues": {"ilb": {"upstream": "ftp://x"}}})).await;
        assert!(matches!(bad_scheme, Err(AppError::ValidationError(_))));

        let missing_upstream = registry(json!({"leagues": {"ilb": {"stream": "wss://x"}}})).await;
        assert!(matches!(missing_upstream, Err(AppError::ValidationError(_))));

        let bad_name = registry(json!({"leagues": {"i/lb": {"upstream": "https://x.example"}}})).await;
        assert!(matches!(bad_name, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_case_insensitive_duplicates_are_rejected() {
        let result = registry(json!({
            "leagues": {
                "ilb": {"upstream": "https://a.example"},
                "ILB": {"upstream": "https://b.example"}
            }
        }))
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
