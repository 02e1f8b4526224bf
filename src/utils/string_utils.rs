//! # 문자열 유틸리티
//!
//! 설정값과 경로 세그먼트 정리에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  ilb  ", "league").unwrap(), "ilb");
/// assert!(validate_required_string("   ", "league").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 리그 이름을 라우트 세그먼트로 쓸 수 있게 정규화합니다
///
/// 앞뒤 공백 제거 후 소문자로 바꾸며, 영문 소문자/숫자/`-`/`_`만 허용합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(normalize_league_name(" ILB ").unwrap(), "ilb");
/// assert!(normalize_league_name("in/valid").is_err());
/// ```
pub fn normalize_league_name(value: &str) -> Result<String, AppError> {
    let name = validate_required_string(value, "리그 이름")?.to_lowercase();

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::ValidationError(format!(
            "리그 이름 '{}'에는 영문 소문자, 숫자, '-', '_'만 사용할 수 있습니다",
            value.trim()
        )));
    }

    Ok(name)
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// JSON 역직렬화 시 빈 문자열이나 공백만 있는 문자열을 자동으로 None으로 변환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 후 Some으로 반환합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct LeagueSource {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     description: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
