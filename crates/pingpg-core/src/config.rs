//! 애플리케이션 설정 구조체.
//!
//! 수집 서버, 프로브, 레이블 갱신, 전송 큐 설정을 정의한다.
//! 기본값 → JSON 설정 파일 → 환경변수/CLI 순으로 덮어쓴다 (병합은 `pingpg-app`).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// 기본 remote-write 엔드포인트
pub const DEFAULT_ENDPOINT: &str = "http://pingpg.keeys.io/api/v1/write";

/// 기본 Basic 인증 사용자명
pub const DEFAULT_USERNAME: &str = "pingpg";

/// 기본 User-Agent
pub const DEFAULT_USER_AGENT: &str = "pingpg-v0.0.1";

/// 기본 프로브 대상
pub const DEFAULT_TARGET: &str = "1.1.1.1";

/// ip-api 조회 URL (전체 필드 마스크)
pub const DEFAULT_GEO_URL: &str = "http://ip-api.com/json/?fields=66846719";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 수집 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 프로브 설정
    #[serde(default)]
    pub probe: ProbeConfig,
    /// 레이블 설정
    #[serde(default)]
    pub labels: LabelConfig,
    /// 전송 큐 용량 (배치 수)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// 요청/응답 덤프 로깅
    #[serde(default)]
    pub debug: bool,
}

/// 수집 서버 (remote-write) 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// remote-write 엔드포인트 URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Basic 인증 사용자명
    #[serde(default = "default_username")]
    pub username: String,
    /// Basic 인증 비밀번호
    #[serde(default)]
    pub password: String,
    /// User-Agent 헤더
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 전송 실패 시 재시도 간격 (밀리초)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// ICMP 프로브 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// 대상 (IP 또는 호스트명)
    #[serde(default = "default_target")]
    pub target: String,
    /// 사이클당 echo 수
    #[serde(default = "default_probe_count")]
    pub count: u32,
    /// 1회 실행 타임아웃 (밀리초)
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
    /// echo 간격 (밀리초)
    #[serde(default = "default_probe_interval_ms")]
    pub interval_ms: u64,
    /// 수집 주기 (초)
    #[serde(default = "default_cycle_interval_secs")]
    pub cycle_interval_secs: u64,
}

/// 레이블 조회/갱신 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// 정적 클라이언트 식별자
    #[serde(default)]
    pub client_id: String,
    /// 지오로케이션 조회 URL
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    /// 갱신 주기 (초)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// 시작 시 최초 조회 시도 횟수
    #[serde(default = "default_startup_attempts")]
    pub startup_attempts: u32,
    /// 시작 시 재시도 간격 (밀리초)
    #[serde(default = "default_startup_retry_delay_ms")]
    pub startup_retry_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: default_username(),
            password: String::new(),
            user_agent: default_user_agent(),
            request_timeout_ms: default_request_timeout_ms(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            count: default_probe_count(),
            timeout_ms: default_probe_timeout_ms(),
            interval_ms: default_probe_interval_ms(),
            cycle_interval_secs: default_cycle_interval_secs(),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            geo_url: default_geo_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            startup_attempts: default_startup_attempts(),
            startup_retry_delay_ms: default_startup_retry_delay_ms(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }
}

impl LabelConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn startup_retry_delay(&self) -> Duration {
        Duration::from_millis(self.startup_retry_delay_ms)
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            probe: ProbeConfig::default(),
            labels: LabelConfig::default(),
            queue_capacity: default_queue_capacity(),
            debug: false,
        }
    }

    /// JSON 설정 파일 로드 (누락 필드는 기본값)
    pub fn load_from_file(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", path.display(), e))
        })?;

        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
        })?;

        debug!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.server.endpoint.trim().is_empty() {
            return Err(invalid("server.endpoint", "비어 있을 수 없음"));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(invalid("server.request_timeout_ms", "0보다 커야 함"));
        }
        if self.probe.target.trim().is_empty() {
            return Err(invalid("probe.target", "비어 있을 수 없음"));
        }
        if self.probe.count == 0 {
            return Err(invalid("probe.count", "0보다 커야 함"));
        }
        if self.probe.timeout_ms == 0 {
            return Err(invalid("probe.timeout_ms", "0보다 커야 함"));
        }
        if self.probe.cycle_interval_secs == 0 {
            return Err(invalid("probe.cycle_interval_secs", "0보다 커야 함"));
        }
        if self.labels.refresh_interval_secs == 0 {
            return Err(invalid("labels.refresh_interval_secs", "0보다 커야 함"));
        }
        if self.labels.startup_attempts == 0 {
            return Err(invalid("labels.startup_attempts", "0보다 커야 함"));
        }
        if self.queue_capacity == 0 {
            return Err(invalid("queue_capacity", "0보다 커야 함"));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn invalid(field: &str, message: &str) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_request_timeout_ms() -> u64 {
    3_000
}
fn default_retry_delay_ms() -> u64 {
    2_000
}
fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}
fn default_probe_count() -> u32 {
    10
}
fn default_probe_timeout_ms() -> u64 {
    3_000
}
fn default_probe_interval_ms() -> u64 {
    100
}
fn default_cycle_interval_secs() -> u64 {
    10
}
fn default_geo_url() -> String {
    DEFAULT_GEO_URL.to_string()
}
fn default_refresh_interval_secs() -> u64 {
    60
}
fn default_startup_attempts() -> u32 {
    3
}
fn default_startup_retry_delay_ms() -> u64 {
    5_000
}
fn default_queue_capacity() -> usize {
    100
}
