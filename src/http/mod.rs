//! 아웃바운드 HTTP / 웹소켓 전송 계층
//!
//! - [`client`] - 압축, 타임아웃, 고정 User-Agent가 설정된 공유 클라이언트

pub mod client;

pub use client::{
    DEFAULT_TIMEOUT, HttpClient, HttpClientConfig, USER_AGENT, UpstreamResponse,
    UpstreamSocket,
};
