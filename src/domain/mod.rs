//! # Domain Layer Module
//!
//! 리그 레지스트리가 다루는 데이터 구조를 정의합니다.
//!
//! ## 모듈 구성
//!
//! - [`league`] - 설정 파일의 리그 데이터 소스(`LeagueSource`)와 응답용 요약(`LeagueSummary`)
//! - [`response`] - 공통 API 응답 래퍼(`ApiResponse`)
//!
//! 업스트림이 돌려주는 리그 데이터 자체(팀, 경기, 선수 등)는 해석하지 않고
//! 바이트 그대로 중계하므로 여기서 모델링하지 않습니다.

pub mod league;
pub mod response;

pub use league::{LeagueSource, LeagueSummary};
pub use response::ApiResponse;
