//! 프로버 포트.
//!
//! 구현: `pingpg-monitor` crate (surge-ping)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::probe::ProbeStatistics;

/// 고정 대상에 echo 버스트를 보내고 RTT 통계를 집계한다
#[async_trait]
pub trait Prober: Send + Sync {
    /// 프로브 1회 실행
    ///
    /// 소켓 생성 실패, 대상 해석 실패, 응답 없음 등은 에러로 반환한다.
    /// 호출자는 에러 시 [`ProbeStatistics::total_loss`]를 대신 사용한다.
    async fn probe(&self) -> Result<ProbeStatistics, CoreError>;

    /// 프로브 대상 (IP 또는 호스트명)
    fn target(&self) -> &str;
}
