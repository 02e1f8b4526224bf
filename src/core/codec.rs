//! JSON 코덱
//!
//! 설정 파일과 업스트림 응답 본문을 디코딩하고, 응답 본문을 인코딩합니다.
//! 전역 인스턴스 없이 시작 시점에 한 번 만들어 필요한 컴포넌트에 넘겨줍니다.
//!
//! 디코딩은 알 수 없는 필드를 무시합니다. 이 크레이트의 와이어 타입에는
//! `#[serde(deny_unknown_fields)]`를 붙이지 않습니다.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// 명시적으로 생성해서 전달하는 JSON 코덱
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    /// 인코딩 시 들여쓰기 여부 (개발 환경에서 사용)
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// 들여쓰기된 JSON을 출력하는 코덱을 만듭니다.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// 바이트 슬라이스를 `T`로 디코딩합니다.
    ///
    /// `T`에 정의되지 않은 필드는 조용히 무시됩니다.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// 임의의 JSON 값으로 디코딩합니다.
    pub fn decode_value(&self, bytes: &[u8]) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// 이미 파싱된 값을 `T`로 변환합니다.
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
    }
}

/// JSON 값의 종류 이름 (에러 메시지용)
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 값이 객체이면 내부 맵을 꺼내고, 아니면 종류 이름과 함께 돌려줍니다.
pub fn into_object(value: Value) -> Result<Map<String, Value>, &'static str> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(json_kind(&other)),
    }
}
