//! 커맨드라인 인자
//!
//! 프로세스 수준 속성(`--r2dbc`)과 시작 정책을 받습니다.

use clap::Parser;

use super::server_config::StartupPolicy;

/// 리그 레지스트리 프록시 서비스
#[derive(Debug, Parser)]
#[command(name = "blasement", version, about)]
pub struct Cli {
    /// 레지스트리 설정 파일 경로 (`BLASEMENT_R2DBC`가 설정되어 있으면 그쪽이 우선)
    #[arg(long = "r2dbc", value_name = "PATH")]
    pub r2dbc: Option<String>,

    /// 레지스트리 시작 실패 시 동작: degrade | fail-fast
    #[arg(
        long,
        env = "STARTUP_POLICY",
        value_parser = parse_startup_policy,
        default_value = "degrade"
    )]
    pub startup_policy: StartupPolicy,
}

fn parse_startup_policy(raw: &str) -> Result<StartupPolicy, String> {
    StartupPolicy::parse(raw)
        .ok_or_else(|| format!("unknown startup policy '{}' (expected degrade or fail-fast)", raw))
}
