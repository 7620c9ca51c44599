//! 공유 레이블 캐시.
//!
//! 갱신 태스크 1개가 쓰고 수집 루프가 읽는 단일 writer / 다중 reader 구조.
//! 조회는 락 밖에서 수행하고, 성공한 결과만 배타 락 아래에서 통째로 교체한다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::models::label::LabelSet;
use crate::ports::labels::LabelSource;

#[derive(Debug)]
struct CacheState {
    labels: LabelSet,
    generation: u64,
    refreshed_at: DateTime<Utc>,
}

/// 레이블 캐시
///
/// `Clone`은 같은 상태를 공유하는 핸들을 만든다.
#[derive(Debug, Clone)]
pub struct LabelCache {
    state: Arc<RwLock<CacheState>>,
}

impl LabelCache {
    /// 초기 레이블로 생성 (generation 0)
    pub fn new(initial: LabelSet) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState {
                labels: initial,
                generation: 0,
                refreshed_at: Utc::now(),
            })),
        }
    }

    /// 시작 시 최초 조회
    ///
    /// `attempts`회까지 `delay` 간격으로 재시도하고, 모두 실패하면 마지막 에러를 반환한다.
    pub async fn bootstrap(
        source: &dyn LabelSource,
        attempts: u32,
        delay: Duration,
    ) -> Result<Self, CoreError> {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match source.fetch_labels().await {
                Ok(labels) => {
                    info!("초기 레이블 조회 완료: {}개 (시도 {attempt})", labels.len());
                    return Ok(Self::new(labels));
                }
                Err(e) if attempt < attempts => {
                    warn!("초기 레이블 조회 실패 ({attempt}/{attempts}): {e}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("초기 레이블 조회 최종 실패 ({attempt}/{attempts}): {e}");
                    return Err(e);
                }
            }
        }
    }

    /// 현재 레이블의 독립 복사본
    pub fn snapshot(&self) -> LabelSet {
        self.state.read().labels.clone()
    }

    /// 레이블 교체. 새 generation 반환
    pub fn replace(&self, labels: LabelSet) -> u64 {
        let mut state = self.state.write();
        state.labels = labels;
        state.generation += 1;
        state.refreshed_at = Utc::now();
        state.generation
    }

    /// 소스에서 다시 조회해 교체
    ///
    /// 실패 시 기존 레이블을 그대로 두고 에러를 반환한다.
    pub async fn refresh(&self, source: &dyn LabelSource) -> Result<u64, CoreError> {
        let labels = source.fetch_labels().await?;
        let count = labels.len();
        let generation = self.replace(labels);
        debug!("레이블 갱신: {count}개 (generation {generation})");
        Ok(generation)
    }

    /// 성공한 교체 횟수
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// 마지막 교체 시각 (교체 전에는 생성 시각)
    pub fn last_refreshed(&self) -> DateTime<Utc> {
        self.state.read().refreshed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn labels_for(marker: &str) -> LabelSet {
        let mut labels = LabelSet::new();
        for name in ["client_id", "hostname", "public_ip", "gateway", "isp", "city"] {
            labels.push(name, marker);
        }
        labels
    }

    /// `fail_first`회 실패 후 성공하는 소스
    struct FlakySource {
        calls: AtomicU32,
        fail_first: u32,
    }

    impl FlakySource {
        fn new(fail_first: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first,
            }
        }
    }

    #[async_trait]
    impl LabelSource for FlakySource {
        async fn fetch_labels(&self) -> Result<LabelSet, CoreError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                Err(CoreError::Discovery(format!("실패 {n}")))
            } else {
                Ok(labels_for(&format!("v{n}")))
            }
        }
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let cache = LabelCache::new(labels_for("a"));
        let mut snap = cache.snapshot();
        snap.set("city", "changed");
        assert_eq!(cache.snapshot().get("city"), Some("a"));
    }

    #[test]
    fn replace_bumps_generation() {
        let cache = LabelCache::new(LabelSet::new());
        assert_eq!(cache.generation(), 0);
        let before = cache.last_refreshed();
        assert_eq!(cache.replace(labels_for("b")), 1);
        assert_eq!(cache.generation(), 1);
        assert!(cache.last_refreshed() >= before);
        assert_eq!(cache.snapshot().get("isp"), Some("b"));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous() {
        let cache = LabelCache::new(labels_for("old"));
        let source = FlakySource::new(1);

        assert!(cache.refresh(&source).await.is_err());
        assert_eq!(cache.generation(), 0);
        assert_eq!(cache.snapshot().get("hostname"), Some("old"));

        assert_eq!(cache.refresh(&source).await.unwrap(), 1);
        assert_eq!(cache.snapshot().get("hostname"), Some("v2"));
    }

    #[tokio::test]
    async fn bootstrap_retries_until_success() {
        let source = FlakySource::new(2);
        let cache = LabelCache::bootstrap(&source, 3, Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.snapshot().get("client_id"), Some("v3"));
        assert_eq!(cache.generation(), 0);
    }

    #[tokio::test]
    async fn bootstrap_gives_up_after_attempts() {
        let source = FlakySource::new(10);
        let result = LabelCache::bootstrap(&source, 2, Duration::from_millis(1)).await;
        assert!(matches!(result, Err(CoreError::Discovery(_))));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_snapshots_never_mix_generations() {
        let cache = LabelCache::new(labels_for("0"));

        let writer = {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for i in 1..=2_000 {
                    cache.replace(labels_for(&i.to_string()));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..2_000 {
                        let snap = cache.snapshot();
                        let first = snap.iter().next().map(|l| l.value.clone());
                        assert!(snap.iter().all(|l| Some(&l.value) == first.as_ref()));
                        assert_eq!(snap.len(), 6);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cache.generation(), 2_000);
    }
}
