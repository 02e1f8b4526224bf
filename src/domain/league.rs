//! 리그 데이터 소스 모델
//!
//! 레지스트리 설정 파일의 `leagues` 항목과 API 응답용 요약 DTO를 정의합니다.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::errors::{AppError, AppResult};
use crate::utils::string_utils::deserialize_optional_string;

/// 설정 파일에 기술된 리그 하나의 데이터 소스
///
/// ```json
/// {
///   "upstream": "https://api.example.com/ilb",
///   "stream": "wss://api.example.com/ilb/stream",
///   "description": "Internet League Blaseball"
/// }
/// ```
///
/// 정의되지 않은 필드는 무시됩니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct LeagueSource {
    /// REST 데이터를 가져올 기본 주소 (http/https)
    #[validate(url(message = "upstream은 올바른 URL이어야 합니다"))]
    #[validate(custom(function = "validate_http_scheme"))]
    pub upstream: String,

    /// 실시간 스트림 주소 (ws/wss, 선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "stream은 올바른 URL이어야 합니다"))]
    #[validate(custom(function = "validate_ws_scheme"))]
    pub stream: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 200, message = "description은 200자 이하여야 합니다"))]
    pub description: Option<String>,
}

impl LeagueSource {
    /// 업스트림 기준으로 하위 경로와 쿼리 문자열을 붙인 주소를 만듭니다.
    ///
    /// `tail`은 이미 퍼센트 디코딩된 경로입니다. 각 세그먼트를 다시 인코딩해서
    /// 붙이므로 결과 주소는 항상 업스트림 기본 경로 아래에 머뭅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - `.`/`..` 세그먼트, 또는 `?`, `#`, `\`가 들어간 세그먼트
    pub fn upstream_url(&self, tail: &str, query: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.upstream).map_err(|e| {
            AppError::ValidationError(format!("잘못된 업스트림 주소 {}: {}", self.upstream, e))
        })?;

        let segments = tail
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(check_tail_segment)
            .collect::<AppResult<Vec<_>>>()?;

        url.path_segments_mut()
            .map_err(|_| {
                AppError::ValidationError(format!("업스트림 주소에 경로를 붙일 수 없습니다: {}", self.upstream))
            })?
            .pop_if_empty()
            .extend(segments);

        url.set_query(if query.is_empty() { None } else { Some(query) });
        Ok(url)
    }
}

fn check_tail_segment(segment: &str) -> AppResult<&str> {
    if segment == "." || segment == ".." || segment.contains(['?', '#', '\\']) {
        return Err(AppError::ValidationError(format!(
            "허용되지 않는 경로 세그먼트입니다: {}",
            segment
        )));
    }
    Ok(segment)
}

fn validate_http_scheme(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }
    Err(ValidationError::new("invalid_scheme")
        .with_message("upstream은 http:// 또는 https:// 로 시작해야 합니다".into()))
}

fn validate_ws_scheme(url: &str) -> Result<(), ValidationError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        return Ok(());
    }
    Err(ValidationError::new("invalid_scheme")
        .with_message("stream은 ws:// 또는 wss:// 로 시작해야 합니다".into()))
}

/// API 응답용 리그 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 실시간 스트림 중계 가능 여부
    pub streaming: bool,
}

impl LeagueSummary {
    pub fn from_source(name: &str, source: &LeagueSource) -> Self {
        Self {
            name: name.to_string(),
            description: source.description.clone(),
            streaming: source.stream.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(json: &str) -> LeagueSource {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_source_with_unknown_fields() {
        let league = source(
            r#"{"upstream":"https://api.example.com/ilb","stream":"wss://api.example.com/ilb/stream","mirror":true}"#,
        );

        assert!(league.validate().is_ok());
        assert!(LeagueSummary::from_source("ilb", &league).streaming);
    }

    #[test]
    fn test_rejects_wrong_schemes() {
        assert!(source(r#"{"upstream":"ftp://api.example.com"}"#).validate().is_err());
        assert!(source(r#"{"upstream":"not a url"}"#).validate().is_err());
        assert!(
            source(r#"{"upstream":"https://api.example.com","stream":"https://api.example.com/s"}"#)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let league = source(r#"{"upstream":"https://api.example.com","stream":"  ","description":""}"#);

        assert!(league.validate().is_ok());
        assert_eq!(league.stream, None);
        assert_eq!(league.description, None);
    }

    #[test]
    fn test_upstream_url_joins_tail_and_query() {
        let league = source(r#"{"upstream":"https://api.example.com/ilb/"}"#);

        assert_eq!(league.upstream_url("", "").unwrap().as_str(), "https://api.example.com/ilb");
        assert_eq!(
            league.upstream_url("/teams/crabs", "season=11").unwrap().as_str(),
            "https://api.example.com/ilb/teams/crabs?season=11"
        );
        assert_eq!(
            league.upstream_url("games", "").unwrap().as_str(),
            "https://api.example.com/ilb/games"
        );
    }

    #[test]
    fn test_upstream_url_stays_under_base_path() {
        let league = source(r#"{"upstream":"https://api.example.com/v1/ilb"}"#);

        for tail in ["..", "../../admin", "teams/./crabs", "teams?secret=1", "teams#frag", "a\\b"] {
            assert!(
                matches!(league.upstream_url(tail, ""), Err(AppError::ValidationError(_))),
                "{} should be rejected",
                tail
            );
        }

        assert_eq!(
            league.upstream_url("players/Jaylen Hotdogfingers", "").unwrap().as_str(),
            "https://api.example.com/v1/ilb/players/Jaylen%20Hotdogfingers"
        );
    }
}
