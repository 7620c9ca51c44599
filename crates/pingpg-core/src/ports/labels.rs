//! 레이블 소스 포트.
//!
//! [`crate::label_cache::LabelCache`]가 갱신 시 호출한다.
//! 구현: `pingpg-app` (디스커버리 조합)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::label::LabelSet;

/// 완성된 레이블 목록을 만들어 내는 소스
#[async_trait]
pub trait LabelSource: Send + Sync {
    /// 전체 레이블 조회. 일부라도 실패하면 에러 (부분 결과 없음)
    async fn fetch_labels(&self) -> Result<LabelSet, CoreError>;
}
