//! CLI/환경변수 인자와 설정 병합.
//!
//! 우선순위: 기본값 < JSON 설정 파일 (`--config`) < 환경변수/CLI.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::Parser;
use pingpg_core::config::AppConfig;
use pingpg_core::error::CoreError;

/// pingpg 네트워크 상태 텔레메트리 에이전트
///
/// 1.1.1.1 까지의 RTT/손실을 주기적으로 측정해 remote-write 로 전송한다.
#[derive(Parser, Debug, Default)]
#[command(name = "pingpg")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON 설정 파일 경로
    #[arg(long, short = 'c', env = "PINGPG_CONFIG")]
    pub config: Option<PathBuf>,

    /// 클라이언트 식별자 (client_id 레이블)
    #[arg(long, env = "PINGPG_CLIENTID")]
    pub client_id: Option<String>,

    /// remote-write Basic 인증 비밀번호
    #[arg(long, env = "PINGPG_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// remote-write 엔드포인트 URL
    #[arg(long, env = "PINGPG_ENDPOINT")]
    pub endpoint: Option<String>,

    /// 프로브 대상 (IP 또는 호스트명)
    #[arg(long, env = "PINGPG_TARGET")]
    pub target: Option<String>,

    /// 요청/응답 덤프 로깅 ("true" 일 때 활성화)
    #[arg(
        long,
        env = "PINGPG_DEBUG",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub debug: Option<bool>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// `RUST_LOG` 미설정 시 사용할 필터
    pub fn log_filter(&self) -> String {
        ["pingpg", "pingpg_app", "pingpg_core", "pingpg_monitor", "pingpg_network"]
            .iter()
            .map(|target| format!("{target}={}", self.log_level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// 설정 결정 및 검증
pub fn resolve_config(args: &Args) -> Result<AppConfig, CoreError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default_config(),
    };

    if let Some(client_id) = &args.client_id {
        config.labels.client_id = client_id.clone();
    }
    if let Some(password) = &args.password {
        config.server.password = password.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.server.endpoint = endpoint.clone();
    }
    if let Some(target) = &args.target {
        config.probe.target = target.clone();
    }
    if let Some(debug) = args.debug {
        config.debug = debug;
    }

    config.validate()?;
    Ok(config)
}
