//! 메트릭 전송 포트.
//!
//! 구현: `pingpg-network` crate (remote-write HTTP 클라이언트)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::series::WriteBatch;

/// 시계열 배치 전송 대상
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// 배치 1건 전송 (1회 시도). 2xx 외 응답과 전송 실패는 에러
    async fn write(&self, batch: &WriteBatch) -> Result<(), CoreError>;
}
