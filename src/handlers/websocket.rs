//! WebSocket Stream Relay
//!
//! 클라이언트 웹소켓을 리그의 업스트림 스트림(ws/wss)에 연결해 양방향으로 중계합니다.
//!
//! # Endpoint
//!
//! `GET /leagues/{league}/stream`
//!
//! `Upgrade: websocket` 헤더가 있는 요청만 이 라우트에 매칭됩니다. 일반 GET은
//! REST 중계(`/{league}/{tail}`)로 넘어가므로 업스트림의 `stream` 경로도 조회할 수 있습니다.
//!
//! 클라이언트 핸드셰이크를 먼저 검증하고, 그 다음 업스트림에 연결합니다.
//! 잘못된 핸드셰이크는 업스트림 연결 없이 400으로, 업스트림 연결 실패는
//! 101 대신 일반 HTTP 에러 응답(502/504)으로 돌아갑니다.
//!
//! # Heartbeat
//!
//! 서버는 `ping_interval`마다 클라이언트에 ping을 보내고, 응답(또는 다른 프레임)이
//! `timeout` 안에 오지 않으면 연결을 닫습니다. 서버가 보내는 프레임은 마스킹하지 않습니다.

use std::time::{Duration, Instant};

use actix_web::guard::GuardContext;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};
use actix_ws::{Message, MessageStream, Session};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use uuid::Uuid;

use crate::core::errors::AppError;
use crate::http::UpstreamSocket;
use crate::registry::PassthroughRegistry;

/// 서버 웹소켓 설정
///
/// 앱 데이터로 설치되며 모든 스트림 연결에 적용됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketSettings {
    pub ping_interval: Duration,
    pub timeout: Duration,
    pub max_frame_size: usize,
}

impl Default for WebSocketSettings {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(15),
            timeout: Duration::from_secs(15),
            max_frame_size: usize::MAX,
        }
    }
}

/// 하트비트 틱마다 수행할 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatAction {
    /// 새 ping 전송
    Ping,
    /// 이전 ping의 응답을 아직 기다리는 중
    Wait,
    /// 응답 시간 초과, 연결 종료
    Close,
}

/// 클라이언트 생존 여부 판단
///
/// I/O 없이 시각만 받아 결정하므로 단독으로 테스트할 수 있습니다.
/// 클라이언트가 보낸 프레임은 종류와 관계없이 생존 신호로 취급합니다.
#[derive(Debug)]
pub struct Heartbeat {
    timeout: Duration,
    ping_sent_at: Option<Instant>,
}

impl Heartbeat {
    pub fn new(settings: &WebSocketSettings) -> Self {
        Self {
            timeout: settings.timeout,
            ping_sent_at: None,
        }
    }

    /// 클라이언트 프레임 수신
    pub fn on_activity(&mut self) {
        self.ping_sent_at = None;
    }

    /// 주기 틱 처리
    pub fn on_tick(&mut self, now: Instant) -> HeartbeatAction {
        match self.ping_sent_at {
            Some(sent) if now.saturating_duration_since(sent) >= self.timeout => {
                HeartbeatAction::Close
            }
            Some(_) => HeartbeatAction::Wait,
            None => {
                self.ping_sent_at = Some(now);
                HeartbeatAction::Ping
            }
        }
    }
}

/// 웹소켓 업그레이드 요청만 통과시키는 라우트 가드
fn is_websocket_upgrade(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("websocket"))
}

/// 리그 스트림 중계 핸들러
///
/// # Endpoint
/// `GET /leagues/{league}/stream` (`Upgrade: websocket`)
///
/// # Errors
///
/// * `400 Bad Request` - 잘못된 웹소켓 핸드셰이크
/// * `404 Not Found` - 등록되지 않은 리그, 또는 스트림 주소가 없는 리그
/// * `502 Bad Gateway` / `504 Gateway Timeout` - 업스트림 연결 실패
#[get("/{league}/stream", guard = "is_websocket_upgrade")]
pub async fn stream_league(
    req: HttpRequest,
    body: web::Payload,
    league: web::Path<String>,
    registry: web::Data<PassthroughRegistry>,
    settings: web::Data<WebSocketSettings>,
) -> Result<HttpResponse, actix_web::Error> {
    let source = registry
        .league(&league)
        .ok_or_else(|| AppError::NotFound(format!("등록되지 않은 리그입니다: {}", league)))?;
    let stream_url = source
        .stream
        .as_deref()
        .ok_or_else(|| AppError::NotFound(format!("리그 {}에는 스트림이 없습니다", league)))?;

    let (response, session, messages) = actix_ws::handle(&req, body)?;
    let upstream = registry.http().connect_websocket(stream_url).await?;

    let messages = messages.max_frame_size(settings.max_frame_size);

    let connection_id = Uuid::new_v4();
    log::info!("🔗 [{}] 스트림 연결 시작: {}", connection_id, league);

    let settings = settings.get_ref().clone();
    actix_web::rt::spawn(relay(connection_id, session, messages, upstream, settings));

    Ok(response)
}

/// 연결이 끝날 때까지 클라이언트와 업스트림 사이에서 프레임을 주고받습니다.
async fn relay(
    connection_id: Uuid,
    mut session: Session,
    mut client: MessageStream,
    upstream: UpstreamSocket,
    settings: WebSocketSettings,
) {
    let (mut upstream_tx, mut upstream_rx) = upstream.split();
    let mut heartbeat = Heartbeat::new(&settings);
    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + settings.ping_interval,
        settings.ping_interval,
    );

    let reason = loop {
        tokio::select! {
            _ = ticker.tick() => {
                match heartbeat.on_tick(Instant::now()) {
                    HeartbeatAction::Ping => {
                        if session.ping(b"").await.is_err() {
                            break "client session closed";
                        }
                    }
                    HeartbeatAction::Wait => {}
                    HeartbeatAction::Close => break "client heartbeat timeout",
                }
            }

            msg = client.next() => {
                let Some(msg) = msg else {
                    break "client disconnected";
                };
                heartbeat.on_activity();

                let forwarded = match msg {
                    Ok(Message::Text(text)) => {
                        upstream_tx.send(UpstreamMessage::Text(text.to_string().into())).await
                    }
                    Ok(Message::Binary(bytes)) => {
                        upstream_tx.send(UpstreamMessage::Binary(bytes)).await
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break "client session closed";
                        }
                        Ok(())
                    }
                    Ok(Message::Close(close)) => {
                        log::debug!("[{}] 클라이언트 종료 프레임: {:?}", connection_id, close);
                        break "client closed";
                    }
                    Ok(_) => Ok(()),
                    Err(e) => {
                        log::warn!("⚠️ [{}] 클라이언트 프로토콜 오류: {}", connection_id, e);
                        break "client protocol error";
                    }
                };

                if let Err(e) = forwarded {
                    log::warn!("⚠️ [{}] 업스트림 전송 실패: {}", connection_id, e);
                    break "upstream send failed";
                }
            }

            msg = upstream_rx.next() => {
                let delivered = match msg {
                    Some(Ok(UpstreamMessage::Text(text))) => session.text(text.as_str().to_owned()).await,
                    Some(Ok(UpstreamMessage::Binary(bytes))) => session.binary(bytes).await,
                    Some(Ok(UpstreamMessage::Close(_))) | None => break "upstream closed",
                    // ping/pong은 tungstenite가 처리
                    Some(Ok(_)) => Ok(()),
                    Some(Err(e)) => {
                        log::warn!("⚠️ [{}] 업스트림 수신 오류: {}", connection_id, e);
                        break "upstream error";
                    }
                };

                if delivered.is_err() {
                    break "client session closed";
                }
            }
        }
    };

    let _ = upstream_tx.close().await;
    let _ = session.close(None).await;
    log::info!("🔌 [{}] 스트림 연결 종료: {}", connection_id, reason);
}
