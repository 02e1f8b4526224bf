//! Blasement 리그 레지스트리 메인 애플리케이션
//!
//! 레지스트리 설정 파일을 찾아 리그 레지스트리를 부트스트랩하고,
//! Actix-web HTTP 서버에 리그 라우트를 마운트해 실행합니다.

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware};
use clap::Parser;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use blasement::config::{Cli, Environment, R2dbcSources, RateLimitConfig, ServerConfig};
use blasement::core::codec::JsonCodec;
use blasement::handlers::websocket::WebSocketSettings;
use blasement::http::{HttpClient, HttpClientConfig};
use blasement::registry::{PassthroughRegistry, bootstrap};
use blasement::routes::{RouteContext, configure_all_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let cli = Cli::parse();
    let environment = Environment::current();

    info!("🚀 Blasement 리그 레지스트리 시작중... ({:?})", environment);

    // 프로세스 공유 의존성
    let codec = if environment.is_development() {
        JsonCodec::pretty()
    } else {
        JsonCodec::new()
    };
    let http = HttpClient::new(HttpClientConfig::default()).map_err(|e| {
        error!("❌ HTTP 클라이언트 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // 레지스트리 부트스트랩 (서버 바인딩 전 한 번)
    let sources = R2dbcSources::from_env(cli.r2dbc);
    let registry = bootstrap::<PassthroughRegistry>(&sources, &codec, &http, cli.startup_policy)
        .await
        .map_err(|e| {
            error!("❌ fail-fast 정책으로 서버를 시작하지 않습니다: {}", e);
            std::io::Error::other(e.to_string())
        })?;

    let ctx = RouteContext::new(registry, WebSocketSettings::default());

    // HTTP 서버 시작
    start_http_server(ctx).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(ctx: RouteContext) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    if ctx.registry().is_some() {
        info!("📍 Leagues: http://{}/leagues", bind_address);
    }

    // Rate Limiting 설정
    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("잘못된 Rate Limiting 설정: {:?}", rate_limit),
            )
        })?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();
        let ctx = ctx.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 라우트 설정
            .configure(move |cfg| configure_all_routes(cfg, &ctx))
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// `BLASEMENT_R2DBC`와 `STARTUP_POLICY`도 여기서 로드된 값을 사용합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=blasement::registry=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 리그 데이터는 읽기 전용이므로 GET/OPTIONS만 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .max_age(3600)
}
