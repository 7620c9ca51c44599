//! Remote-write 퍼블리셔.
//!
//! 전송 큐를 비우며 배치를 하나씩 직렬로 전송한다.
//! 실패한 배치는 고정 간격으로 성공할 때까지 재시도하고, 그동안 다음 배치로 넘어가지 않는다.
//! 종료 신호를 받으면 진행 중인 시도나 재시도 대기를 즉시 중단한다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pingpg_core::models::series::WriteBatch;
use pingpg_core::ports::metrics_sink::MetricsSink;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::publish_queue::PublishReceiver;

/// 배치 1건 전송 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// 전송 성공 (시도 횟수)
    Delivered { attempts: u32 },
    /// 종료 신호로 중단
    Cancelled,
}

/// 퍼블리셔 누적 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublisherStats {
    /// 전송 성공한 배치 수
    pub published: u64,
    /// 전체 전송 시도 수
    pub attempts: u64,
    /// 실패한 시도 수
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    published: AtomicU64,
    attempts: AtomicU64,
    failures: AtomicU64,
}

/// 큐 소비자. `MetricsSink`로 배치를 전송
#[derive(Clone)]
pub struct RemoteWritePublisher {
    sink: Arc<dyn MetricsSink>,
    retry_delay: Duration,
    counters: Arc<Counters>,
}

impl RemoteWritePublisher {
    /// 새 퍼블리셔 생성
    pub fn new(sink: Arc<dyn MetricsSink>, retry_delay: Duration) -> Self {
        Self {
            sink,
            retry_delay,
            counters: Arc::new(Counters::default()),
        }
    }

    /// 누적 통계
    pub fn stats(&self) -> PublisherStats {
        PublisherStats {
            published: self.counters.published.load(Ordering::Relaxed),
            attempts: self.counters.attempts.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// 큐가 닫히거나 종료 신호를 받을 때까지 전송
    ///
    /// 종료 시 큐에 남은 배치는 버리고 개수를 로그로 남긴다.
    pub async fn run(&self, mut receiver: PublishReceiver, mut shutdown: watch::Receiver<bool>) {
        info!("퍼블리셔 시작: 재시도 간격 {:?}", self.retry_delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            let batch = tokio::select! {
                next = receiver.dequeue() => match next {
                    Some(batch) => batch,
                    None => {
                        info!("전송 큐 닫힘, 퍼블리셔 종료");
                        break;
                    }
                },
                _ = wait_for_shutdown(&mut shutdown) => break,
            };

            let outcome = self.publish_with_retry(&batch, &mut shutdown).await;
            if outcome == PublishOutcome::Cancelled {
                let dropped = receiver.close_and_discard() + 1;
                warn!("종료로 미전송 배치 {dropped}개 폐기");
                return;
            }
        }

        let dropped = receiver.close_and_discard();
        if dropped > 0 {
            warn!("종료로 미전송 배치 {dropped}개 폐기");
        }
        let stats = self.stats();
        info!(
            "퍼블리셔 종료: 전송 {} / 시도 {} / 실패 {}",
            stats.published, stats.attempts, stats.failures
        );
    }

    /// 배치 1건을 성공할 때까지 전송
    pub async fn publish_with_retry(
        &self,
        batch: &WriteBatch,
        shutdown: &mut watch::Receiver<bool>,
    ) -> PublishOutcome {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.counters.attempts.fetch_add(1, Ordering::Relaxed);

            let result = tokio::select! {
                result = self.sink.write(batch) => result,
                _ = wait_for_shutdown(shutdown) => return PublishOutcome::Cancelled,
            };

            match result {
                Ok(()) => {
                    self.counters.published.fetch_add(1, Ordering::Relaxed);
                    debug!("배치 전송 완료 (시도 {attempt})");
                    return PublishOutcome::Delivered { attempts: attempt };
                }
                Err(e) => {
                    self.counters.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        "배치 전송 실패 (시도 {attempt}): {e}, {:?} 후 재시도",
                        self.retry_delay
                    );
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_delay) => {}
                _ = wait_for_shutdown(shutdown) => return PublishOutcome::Cancelled,
            }
        }
    }
}

/// 종료 신호가 true가 될 때까지 대기
///
/// 송신자가 사라지면 더 이상 신호가 오지 않으므로 영원히 대기한다.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    let sender_gone = shutdown.wait_for(|stop| *stop).await.is_err();
    if sender_gone {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish_queue::publish_queue;
    use async_trait::async_trait;
    use pingpg_core::error::CoreError;
    use pingpg_core::models::label::LabelSet;
    use pingpg_core::models::series::{Sample, TimeSeries};
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn batch(ts: i64) -> WriteBatch {
        WriteBatch {
            timeseries: vec![TimeSeries {
                labels: LabelSet::new(),
                samples: vec![Sample {
                    value: 1.0,
                    timestamp_ms: ts,
                }],
            }],
        }
    }

    /// `fail_first`회 실패 후 성공, 시도 시각과 전송된 타임스탬프를 기록
    struct FlakySink {
        calls: AtomicU32,
        fail_first: u32,
        attempt_times: Mutex<Vec<Instant>>,
        delivered: Mutex<Vec<i64>>,
    }

    impl FlakySink {
        fn new(fail_first: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first,
                attempt_times: Mutex::new(Vec::new()),
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetricsSink for FlakySink {
        async fn write(&self, batch: &WriteBatch) -> Result<(), CoreError> {
            self.attempt_times.lock().unwrap().push(Instant::now());
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                return Err(CoreError::Http {
                    status: 500,
                    body: "down".to_string(),
                });
            }
            self.delivered
                .lock()
                .unwrap()
                .push(batch.timestamp_ms().unwrap_or_default());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_same_batch_with_fixed_delay() {
        let sink = Arc::new(FlakySink::new(3));
        let delay = Duration::from_secs(2);
        let publisher = RemoteWritePublisher::new(sink.clone(), delay);
        let (_tx, mut shutdown) = watch::channel(false);

        let outcome = publisher.publish_with_retry(&batch(42), &mut shutdown).await;

        assert_eq!(outcome, PublishOutcome::Delivered { attempts: 4 });
        let times = sink.attempt_times.lock().unwrap().clone();
        assert_eq!(times.len(), 4);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
        assert_eq!(*sink.delivered.lock().unwrap(), vec![42]);
        assert_eq!(
            publisher.stats(),
            PublisherStats {
                published: 1,
                attempts: 4,
                failures: 3
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_retry_wait() {
        let sink = Arc::new(FlakySink::new(u32::MAX));
        let publisher = RemoteWritePublisher::new(sink.clone(), Duration::from_secs(3600));
        let (tx, mut shutdown) = watch::channel(false);

        let handle = tokio::spawn(async move {
            publisher.publish_with_retry(&batch(1), &mut shutdown).await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(true).unwrap();

        assert_eq!(handle.await.unwrap(), PublishOutcome::Cancelled);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_delivers_in_order_until_queue_closed() {
        let sink = Arc::new(FlakySink::new(0));
        let publisher = RemoteWritePublisher::new(sink.clone(), Duration::from_millis(1));
        let (tx, rx) = publish_queue(10);
        let (_stop, shutdown) = watch::channel(false);

        for ts in 0..5 {
            tx.enqueue(batch(ts)).await.unwrap();
        }
        drop(tx);

        publisher.run(rx, shutdown).await;

        assert_eq!(*sink.delivered.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(publisher.stats().published, 5);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_and_drops_pending() {
        let sink = Arc::new(FlakySink::new(u32::MAX));
        let publisher = RemoteWritePublisher::new(sink.clone(), Duration::from_secs(3600));
        let (tx, rx) = publish_queue(10);
        let (stop, shutdown) = watch::channel(false);

        for ts in 0..3 {
            tx.enqueue(batch(ts)).await.unwrap();
        }

        let runner = {
            let publisher = publisher.clone();
            tokio::spawn(async move { publisher.run(rx, shutdown).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        stop.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), runner)
            .await
            .unwrap()
            .unwrap();

        assert!(tx.is_closed());
        assert!(sink.delivered.lock().unwrap().is_empty());
    }
}
