//! pingpg 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 에러를 그대로 반환하거나 `#[from] CoreError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 프로브, 디스커버리, 전송, 설정 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 인증 실패 (401/403)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 2xx 외 HTTP 응답
    #[error("HTTP 에러 ({status}): {body}")]
    Http {
        /// 응답 상태 코드
        status: u16,
        /// 응답 본문 (진단용)
        body: String,
    },

    /// 네트워크 에러 (연결 실패, 전송 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// ICMP 프로브 실패 (권한, 소켓 생성, 대상 해석)
    #[error("프로브 에러: {0}")]
    Probe(String),

    /// 실행 타임아웃
    #[error("실행 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 호스트/게이트웨이/지오로케이션 조회 실패
    #[error("디스커버리 에러: {0}")]
    Discovery(String),

    /// 전송 큐가 닫힘 (소비자 종료)
    #[error("전송 큐 닫힘")]
    QueueClosed,

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}
