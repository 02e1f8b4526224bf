//! # 업스트림 HTTP 클라이언트
//!
//! 모든 리그 데이터 요청에 공유되는 단일 HTTP 클라이언트입니다.
//!
//! ## 동작 규칙
//!
//! - **압축**: gzip / deflate / identity 인코딩을 투명하게 협상하고 해제합니다.
//! - **타임아웃**: 연결, 소켓 읽기, 전체 요청 모두 기본 30,000ms.
//!   초과 시 `AppError::UpstreamTimeout`으로 즉시 반환됩니다.
//! - **상태 코드**: 2xx가 아닌 응답도 정상적으로 반환합니다.
//!   호출자가 `status`를 직접 확인해야 합니다.
//! - **식별**: 모든 요청에 고정된 `User-Agent`를 붙입니다.
//! - **웹소켓**: 같은 클라이언트 설정(식별자, 연결 타임아웃)으로 업스트림 웹소켓을 엽니다.
//!
//! `reqwest::Client`는 내부적으로 `Arc`로 연결 풀을 공유하므로
//! `HttpClient::clone()`은 가볍고, 여러 워커에서 동시에 사용해도 안전합니다.
//!
//! ```rust,ignore
//! let http = HttpClient::new(HttpClientConfig::default())?;
//! let response = http.get("https://api.example.com/ilb/teams").await?;
//! if !response.is_success() {
//!     log::warn!("upstream answered {}", response.status);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use actix_web::web::Bytes;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::core::errors::{AppError, AppResult};

/// 모든 업스트림 요청에 붙는 식별 문자열 (제품/버전/연락처)
pub const USER_AGENT: &str = concat!(
    "Blasement/",
    env!("CARGO_PKG_VERSION"),
    " (league-registry; +mailto:ops@blasement.local)"
);

/// 연결/소켓/요청 타임아웃 기본값
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// 업스트림 웹소켓 스트림
pub type UpstreamSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// HTTP 클라이언트 설정
#[derive(Debug, Clone, PartialEq)]
pub struct HttpClientConfig {
    /// 요청 전체(헤더 + 본문)에 대한 제한
    pub request_timeout: Duration,
    /// TCP/TLS 연결 수립 제한
    pub connect_timeout: Duration,
    /// 개별 소켓 읽기 제한 (읽기가 성공할 때마다 초기화)
    pub socket_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            socket_timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// 업스트림 응답 (상태 코드와 본문을 그대로 보존)
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 프로세스 전체에서 공유되는 업스트림 클라이언트
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// 설정에 따라 클라이언트를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - TLS 백엔드 초기화 실패 등으로 클라이언트를 만들 수 없음
    pub fn new(config: HttpClientConfig) -> AppResult<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .gzip(true)
            .deflate(true)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.socket_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        log::info!(
            "🌐 HTTP 클라이언트 생성: connect={}ms, socket={}ms, request={}ms",
            config.connect_timeout.as_millis(),
            config.socket_timeout.as_millis(),
            config.request_timeout.as_millis()
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET 요청을 보내고 상태 코드와 본문을 그대로 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::UpstreamTimeout` - 연결 또는 읽기 타임아웃
    /// * `AppError::ExternalServiceError` - 그 외 전송 실패
    pub async fn get(&self, url: &str) -> AppResult<UpstreamResponse> {
        log::debug!("➡️ GET {}", url);

        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::from_transport(&format!("GET {} 실패", url), e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::from_transport(&format!("GET {} 본문 읽기 실패", url), e))?;

        log::debug!("⬅️ {} {} ({} bytes)", status, url, body.len());

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    /// 업스트림 웹소켓에 연결합니다.
    ///
    /// 같은 `User-Agent`를 보내며, 핸드셰이크는 `connect_timeout` 안에 끝나야 합니다.
    pub async fn connect_websocket(&self, url: &str) -> AppResult<UpstreamSocket> {
        let mut request = url
            .into_client_request()
            .map_err(|e| AppError::ValidationError(format!("잘못된 웹소켓 주소 {}: {}", url, e)))?;

        let user_agent = HeaderValue::from_str(&self.config.user_agent)
            .map_err(|e| AppError::InternalError(format!("잘못된 User-Agent: {}", e)))?;
        request.headers_mut().insert(header::USER_AGENT, user_agent);

        let (socket, response) = tokio::time::timeout(self.config.connect_timeout, connect_async(request))
            .await
            .map_err(|_| {
                AppError::UpstreamTimeout(format!(
                    "웹소켓 연결 {} 이(가) {}ms 안에 끝나지 않음",
                    url,
                    self.config.connect_timeout.as_millis()
                ))
            })?
            .map_err(|e| AppError::ExternalServiceError(format!("웹소켓 연결 {} 실패: {}", url, e)))?;

        log::info!("🔌 업스트림 웹소켓 연결됨: {} ({})", url, response.status());
        Ok(socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::JsonCodec;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpSocket};
    use tokio::sync::oneshot;

    async fn read_request_head(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// 한 번의 요청에 고정된 응답을 돌려주고, 받은 요청 헤더를 전달하는 서버
    async fn one_shot_server(response: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let head = read_request_head(&mut stream).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            let _ = tx.send(head);
        });

        (format!("http://{}", addr), rx)
    }

    #[test]
    fn test_default_config_uses_thirty_second_timeouts() {
        let config = HttpClientConfig::default();

        assert_eq!(config.connect_timeout, Duration::from_millis(30_000));
        assert_eq!(config.socket_timeout, Duration::from_millis(30_000));
        assert_eq!(config.request_timeout, Duration::from_millis(30_000));
        assert!(config.user_agent.starts_with("Blasement/"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_returned_normally() {
        let (base, _head) = one_shot_server(
            "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: 16\r\nConnection: close\r\n\r\n{\"error\":\"nope\"}",
        )
        .await;

        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let response = client.get(&format!("{}/teams", base)).await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
        assert_eq!(&response.body[..], b"{\"error\":\"nope\"}");
    }

    #[tokio::test]
    async fn test_sends_user_agent_and_accepts_compression() {
        let (base, head) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 29\r\nConnection: close\r\n\r\n{\"name\":\"Crabs\",\"extra\":true}",
        )
        .await;

        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let response = client.get(&format!("{}/team", base)).await.unwrap();

        assert!(response.is_success());
        let team: serde_json::Value = JsonCodec::new().decode(&response.body).unwrap();
        assert_eq!(team["name"], "Crabs");

        let head = head.await.unwrap().to_lowercase();
        assert!(head.contains("user-agent: blasement/"));
        assert!(head.contains("accept-encoding: gzip, deflate"));
    }

    /// accept 큐가 가득 차서 새 연결의 SYN이 버려지는 리스너
    ///
    /// 반환된 스트림들을 살려 두는 동안 이 주소로의 연결은 끝나지 않습니다.
    async fn saturated_listener() -> (TcpListener, std::net::SocketAddr, Vec<TcpStream>) {
        let socket = TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(1).unwrap();
        let addr = listener.local_addr().unwrap();

        let mut fillers = Vec::new();
        for _ in 0..64 {
            match tokio::time::timeout(Duration::from_millis(100), TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => fillers.push(stream),
                _ => break,
            }
        }

        (listener, addr, fillers)
    }

    #[tokio::test]
    async fn test_read_timeout_fires_before_request_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 연결은 받지만 응답을 보내지 않음
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let _ = read_request_head(&mut stream).await;
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(stream);
        });

        // 전체 요청 타임아웃은 기본값(30초)이므로 소켓 읽기 타임아웃만 발동할 수 있음
        let client = HttpClient::new(HttpClientConfig {
            socket_timeout: Duration::from_millis(200),
            ..HttpClientConfig::default()
        })
        .unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.get(&format!("http://{}/slow", addr)),
        )
        .await
        .expect("client must return before the guard elapses");

        assert!(matches!(result, Err(AppError::UpstreamTimeout(_))));
    }

    #[tokio::test]
    async fn test_connect_timeout_fires_before_request_timeout() {
        let (_listener, addr, _fillers) = saturated_listener().await;

        let client = HttpClient::new(HttpClientConfig {
            connect_timeout: Duration::from_millis(200),
            ..HttpClientConfig::default()
        })
        .unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.get(&format!("http://{}/teams", addr)),
        )
        .await
        .expect("client must return before the guard elapses");

        assert!(matches!(result, Err(AppError::UpstreamTimeout(_))));
    }

    #[tokio::test]
    async fn test_websocket_connect_timeout() {
        let (_listener, addr, _fillers) = saturated_listener().await;

        let client = HttpClient::new(HttpClientConfig {
            connect_timeout: Duration::from_millis(200),
            ..HttpClientConfig::default()
        })
        .unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.connect_websocket(&format!("ws://{}/stream", addr)),
        )
        .await
        .expect("client must return before the guard elapses");

        assert!(matches!(result, Err(AppError::UpstreamTimeout(_))));
    }

    #[tokio::test]
    async fn test_invalid_websocket_url_is_rejected() {
        let client = HttpClient::new(HttpClientConfig::default()).unwrap();
        let result = client.connect_websocket("not a url").await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
