//! 스케줄러.
//!
//! 세 개의 태스크를 띄우고 종료 신호까지 관리한다.
//!
//! 1. 레이블 갱신 루프 (기본 60초): 성공 시 캐시 교체, 실패 시 이전 레이블 유지
//! 2. 수집 루프 (기본 10초): 프로브 → 레이블 스냅샷 → 인코딩 → 전송 큐 (가득 차면 대기)
//! 3. 퍼블리셔: 전송 큐를 직렬로 비우며 무한 재시도

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pingpg_core::config::AppConfig;
use pingpg_core::encoder::encode;
use pingpg_core::error::CoreError;
use pingpg_core::label_cache::LabelCache;
use pingpg_core::models::probe::ProbeStatistics;
use pingpg_core::ports::labels::LabelSource;
use pingpg_core::ports::prober::Prober;
use pingpg_network::publish_queue::{PublishReceiver, PublishSender};
use pingpg_network::publisher::RemoteWritePublisher;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// 스케줄러 주기 설정
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// 수집 주기
    pub cycle_interval: Duration,
    /// 레이블 갱신 주기
    pub refresh_interval: Duration,
}

impl SchedulerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            cycle_interval: config.probe.cycle_interval(),
            refresh_interval: config.labels.refresh_interval(),
        }
    }
}

/// 수집 사이클 1회
///
/// 프로브 실패 시 100% 손실 센티넬로 대체하므로 사이클을 건너뛰지 않는다.
/// 전송 큐가 가득 차면 자리가 날 때까지 대기한다.
pub async fn run_cycle(
    prober: &dyn Prober,
    cache: &LabelCache,
    sender: &PublishSender,
) -> Result<ProbeStatistics, CoreError> {
    let stats = match prober.probe().await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("프로브 실패 ({}), 100% 손실로 기록: {e}", prober.target());
            ProbeStatistics::total_loss()
        }
    };

    let labels = cache.snapshot();
    let batch = encode(&stats, &labels, Utc::now());
    sender.enqueue(batch).await?;

    debug!(
        "사이클 완료: 손실={:.1}% 평균={:?} 큐={}/{}",
        stats.packet_loss,
        stats.avg_rtt,
        sender.len(),
        sender.capacity()
    );
    Ok(stats)
}

/// 태스크 오케스트레이터
pub struct Scheduler {
    config: SchedulerConfig,
    prober: Arc<dyn Prober>,
    label_source: Arc<dyn LabelSource>,
    cache: LabelCache,
    sender: PublishSender,
    publisher: RemoteWritePublisher,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        prober: Arc<dyn Prober>,
        label_source: Arc<dyn LabelSource>,
        cache: LabelCache,
        sender: PublishSender,
        publisher: RemoteWritePublisher,
    ) -> Self {
        Self {
            config,
            prober,
            label_source,
            cache,
            sender,
            publisher,
        }
    }

    /// 모든 루프 시작. 종료 신호를 받으면 각 루프가 멈출 때까지 기다린다
    pub async fn run(self, receiver: PublishReceiver, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "스케줄러 시작: 수집={}s, 레이블 갱신={}s, 큐 용량={}",
            self.config.cycle_interval.as_secs_f64(),
            self.config.refresh_interval.as_secs_f64(),
            self.sender.capacity()
        );

        // ============================================================
        // 1. 레이블 갱신 루프
        // ============================================================
        let cache1 = self.cache.clone();
        let source1 = self.label_source.clone();
        let refresh_interval = self.config.refresh_interval;
        let mut shutdown1 = shutdown_rx.clone();

        let refresh_task = tokio::spawn(async move {
            // 시작 시 이미 조회했으므로 첫 갱신은 한 주기 뒤
            let mut interval =
                tokio::time::interval_at(Instant::now() + refresh_interval, refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match cache1.refresh(source1.as_ref()).await {
                            Ok(generation) => info!("레이블 갱신 완료 (generation {generation})"),
                            Err(e) => warn!("레이블 갱신 실패, 이전 레이블 유지: {e}"),
                        }
                    }
                    _ = shutdown1.changed() => {
                        info!("레이블 갱신 루프 종료");
                        break;
                    }
                }
            }
        });

        // ============================================================
        // 2. 수집 루프
        // ============================================================
        let prober2 = self.prober.clone();
        let cache2 = self.cache.clone();
        let sender2 = self.sender.clone();
        let cycle_interval = self.config.cycle_interval;
        let mut shutdown2 = shutdown_rx.clone();

        let collect_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cycle_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        tokio::select! {
                            result = run_cycle(prober2.as_ref(), &cache2, &sender2) => {
                                if let Err(e) = result {
                                    warn!("수집 사이클 중단: {e}");
                                    break;
                                }
                            }
                            _ = shutdown2.changed() => {
                                info!("수집 루프 종료 (사이클 진행 중)");
                                break;
                            }
                        }
                    }
                    _ = shutdown2.changed() => {
                        info!("수집 루프 종료");
                        break;
                    }
                }
            }
        });

        // ============================================================
        // 3. 퍼블리셔
        // ============================================================
        let publisher3 = self.publisher.clone();
        let shutdown3 = shutdown_rx.clone();

        let publish_task = tokio::spawn(async move {
            publisher3.run(receiver, shutdown3).await;
        });

        // ============================================================
        // 종료 대기
        // ============================================================
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
        info!("스케줄러 종료 신호 수신");

        // 생산자 핸들을 닫아 퍼블리셔가 큐 종료를 볼 수 있게 한다
        drop(self.sender);

        let (refresh, collect, publish) = tokio::join!(refresh_task, collect_task, publish_task);
        for (name, result) in [
            ("레이블 갱신", refresh),
            ("수집", collect),
            ("퍼블리셔", publish),
        ] {
            if let Err(e) = result {
                warn!("{name} 태스크 비정상 종료: {e}");
            }
        }

        let stats = self.publisher.stats();
        info!(
            "스케줄러 종료: 전송 {} / 시도 {} / 실패 {}",
            stats.published, stats.attempts, stats.failures
        );
    }
}
