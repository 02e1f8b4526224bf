//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 리그 이름 정규화
//! - [`display_terminal`] - 부트스트랩 터미널 출력 함수들

pub mod string_utils;
pub mod display_terminal;
