//! 레지스트리 설정 파일 해석 및 로딩
//!
//! 리그 레지스트리의 데이터 소스 기술 파일(이른바 "r2dbc 파일")의 경로를 결정하고,
//! 파일을 읽어 JSON 객체로 파싱합니다.
//!
//! ## 경로 해석 순서
//!
//! 1. 호스트 환경 설정 키 `BLASEMENT_R2DBC` (프로필 `.env` 파일 로딩 후의 환경 변수)
//! 2. 프로세스 속성 `--r2dbc <PATH>` (커맨드라인)
//! 3. 기본 파일명 `blasement-r2dbc.json`
//!
//! 빈 문자열이나 공백만 있는 값은 지정되지 않은 것으로 취급합니다.
//!
//! ```bash
//! # .env.dev
//! BLASEMENT_R2DBC=config/leagues.dev.json
//!
//! # 또는 커맨드라인
//! blasement --r2dbc /etc/blasement/leagues.json
//! ```

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::codec::{JsonCodec, into_object};
use crate::core::errors::ConfigError;
use crate::utils::string_utils::clean_optional_string;

/// 호스트 환경 설정 키
pub const R2DBC_ENV_KEY: &str = "BLASEMENT_R2DBC";

/// 프로세스 수준 속성 (커맨드라인 플래그)
pub const R2DBC_PROPERTY: &str = "--r2dbc";

/// 아무것도 지정되지 않았을 때 사용하는 파일명
pub const DEFAULT_R2DBC_FILE: &str = "blasement-r2dbc.json";

/// 설정 파일 경로 후보들
///
/// 우선순위가 높은 순서대로 `framework`, `process`, 기본 파일명입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct R2dbcSources {
    /// 호스트 환경 설정 키에서 읽은 값
    pub framework: Option<String>,
    /// 프로세스 속성에서 읽은 값
    pub process: Option<String>,
}

impl R2dbcSources {
    pub fn new(framework: Option<String>, process: Option<String>) -> Self {
        Self {
            framework: clean_optional_string(framework),
            process: clean_optional_string(process),
        }
    }

    /// 현재 프로세스 환경에서 프레임워크 키를 읽고, 프로세스 속성은 인자로 받습니다.
    pub fn from_env(process: Option<String>) -> Self {
        Self::new(std::env::var(R2DBC_ENV_KEY).ok(), process)
    }

    /// 가장 우선순위가 높은 경로를 결정합니다.
    pub fn resolve(&self) -> PathBuf {
        let (origin, path) = self.resolve_with_origin();
        log::debug!("레지스트리 설정 경로 결정: {} ({})", path.display(), origin);
        path
    }

    /// 결정된 경로와 그 출처를 함께 돌려줍니다.
    pub fn resolve_with_origin(&self) -> (SourceOrigin, PathBuf) {
        if let Some(path) = clean_ref(self.framework.as_deref()) {
            return (SourceOrigin::Framework, PathBuf::from(path));
        }
        if let Some(path) = clean_ref(self.process.as_deref()) {
            return (SourceOrigin::Process, PathBuf::from(path));
        }
        (SourceOrigin::Default, PathBuf::from(DEFAULT_R2DBC_FILE))
    }
}

fn clean_ref(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 결정된 경로의 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Framework,
    Process,
    Default,
}

impl std::fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceOrigin::Framework => write!(f, "{}", R2DBC_ENV_KEY),
            SourceOrigin::Process => write!(f, "{}", R2DBC_PROPERTY),
            SourceOrigin::Default => write!(f, "default"),
        }
    }
}

/// 시작 시 한 번 읽어 레지스트리 생성자에 넘기는 설정 객체
///
/// 스키마는 레지스트리 구현이 정합니다. 여기서는 최상위가 JSON 객체라는 것만 보장합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    path: PathBuf,
    values: Map<String, Value>,
}

impl RegistryConfig {
    pub fn new(path: impl Into<PathBuf>, values: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// 설정 파일을 읽고 JSON 객체로 파싱합니다.
///
/// # Errors
///
/// * `ConfigError::NotFound` - 파일이 없음
/// * `ConfigError::Io` - 읽기 실패
/// * `ConfigError::Malformed` - JSON 문법 오류
/// * `ConfigError::NotAnObject` - 최상위 값이 객체가 아님
pub fn load_registry_config(path: &Path, codec: &JsonCodec) -> Result<RegistryConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = codec.decode_value(&bytes).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let values = into_object(value).map_err(|found| ConfigError::NotAnObject {
        path: path.to_path_buf(),
        found,
    })?;

    log::info!(
        "📄 레지스트리 설정 로드됨: {} ({}개 키)",
        path.display(),
        values.len()
    );

    Ok(RegistryConfig::new(path, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sources(framework: Option<&str>, process: Option<&str>) -> R2dbcSources {
        R2dbcSources::new(framework.map(String::from), process.map(String::from))
    }

    #[test]
    fn test_resolution_priority_for_every_combination() {
        let cases = [
            (Some("fw.json"), Some("proc.json"), "fw.json", SourceOrigin::Framework),
            (Some("fw.json"), None, "fw.json", SourceOrigin::Framework),
            (None, Some("proc.json"), "proc.json", SourceOrigin::Process),
            (None, None, DEFAULT_R2DBC_FILE, SourceOrigin::Default),
        ];

        for (framework, process, expected, origin) in cases {
            let (actual_origin, path) = sources(framework, process).resolve_with_origin();
            assert_eq!(path, PathBuf::from(expected), "{:?}/{:?}", framework, process);
            assert_eq!(actual_origin, origin);
        }
    }

    #[test]
    fn test_blank_values_are_treated_as_absent() {
        assert_eq!(
            sources(Some("   "), Some("proc.json")).resolve(),
            PathBuf::from("proc.json")
        );
        assert_eq!(sources(Some(""), Some("")).resolve(), PathBuf::from(DEFAULT_R2DBC_FILE));

        // 직접 구성한 경우에도 공백 값은 무시됨
        let raw = R2dbcSources {
            framework: Some(" ".to_string()),
            process: None,
        };
        assert_eq!(raw.resolve(), PathBuf::from(DEFAULT_R2DBC_FILE));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_R2DBC_FILE);

        let result = load_registry_config(&path, &JsonCodec::new());
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"leagues\": ").unwrap();

        let result = load_registry_config(file.path(), &JsonCodec::new());
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_non_object_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\"ilb\"]").unwrap();

        let result = load_registry_config(file.path(), &JsonCodec::new());
        assert!(matches!(result, Err(ConfigError::NotAnObject { found: "array", .. })));
    }

    #[test]
    fn test_load_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"leagues": {{}}, "extra": 1}}"#).unwrap();

        let config = load_registry_config(file.path(), &JsonCodec::new()).unwrap();
        assert_eq!(config.path(), file.path());
        assert_eq!(config.values().len(), 2);
        assert!(config.get("leagues").unwrap().is_object());
    }
}
