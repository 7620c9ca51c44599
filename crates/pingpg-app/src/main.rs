//! # pingpg
//!
//! pingpg 에이전트 바이너리 진입점.
//! 어댑터 와이어링(DI), 초기 레이블 조회, 스케줄러/라이프사이클 구동.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use pingpg_app::discovery::DiscoveryLabelSource;
use pingpg_app::lifecycle::LifecycleManager;
use pingpg_app::scheduler::{Scheduler, SchedulerConfig};
use pingpg_app::settings::{resolve_config, Args};
use pingpg_core::label_cache::LabelCache;
use pingpg_core::ports::compressor::Compressor;
use pingpg_core::ports::discovery::{GeoLocator, HostDiscovery};
use pingpg_core::ports::labels::LabelSource;
use pingpg_core::ports::metrics_sink::MetricsSink;
use pingpg_core::ports::prober::Prober;
use pingpg_monitor::host::SystemHostDiscovery;
use pingpg_monitor::prober::IcmpProber;
use pingpg_network::compression::SnappyCompressor;
use pingpg_network::geolocation::IpApiClient;
use pingpg_network::publish_queue::publish_queue;
use pingpg_network::publisher::RemoteWritePublisher;
use pingpg_network::remote_write_client::RemoteWriteClient;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter())),
        )
        .init();

    let config = resolve_config(&args).map_err(|e| anyhow!("설정 로드 실패: {e}"))?;

    if config.labels.client_id.is_empty() {
        warn!("클라이언트 ID 미설정 (PINGPG_CLIENTID)");
    }
    if config.server.password.is_empty() {
        warn!("전송 비밀번호 미설정 (PINGPG_PASS)");
    }
    info!(
        "pingpg 시작: 대상={} 엔드포인트={} 디버그={}",
        config.probe.target, config.server.endpoint, config.debug
    );

    // ── 어댑터 생성 ──
    let prober: Arc<dyn Prober> = Arc::new(IcmpProber::from_config(&config.probe));
    let host: Arc<dyn HostDiscovery> = Arc::new(SystemHostDiscovery::new());
    let geo: Arc<dyn GeoLocator> = Arc::new(IpApiClient::new(
        &config.labels.geo_url,
        config.server.request_timeout(),
    )?);
    let label_source: Arc<dyn LabelSource> = Arc::new(DiscoveryLabelSource::new(
        config.labels.client_id.clone(),
        host,
        geo,
    ));
    let compressor: Arc<dyn Compressor> = Arc::new(SnappyCompressor::new());
    let sink: Arc<dyn MetricsSink> =
        Arc::new(RemoteWriteClient::new(&config.server, compressor)?.with_debug(config.debug));

    // ── 초기 레이블 ──
    let cache = match LabelCache::bootstrap(
        label_source.as_ref(),
        config.labels.startup_attempts,
        config.labels.startup_retry_delay(),
    )
    .await
    {
        Ok(cache) => cache,
        Err(e) => {
            error!("초기 레이블 조회 실패, 종료: {e}");
            return Err(anyhow!("초기 레이블 조회 실패: {e}"));
        }
    };

    // ── 파이프라인 ──
    let (sender, receiver) = publish_queue(config.queue_capacity);
    let publisher = RemoteWritePublisher::new(sink, config.server.retry_delay());
    let scheduler = Scheduler::new(
        SchedulerConfig::from_app_config(&config),
        prober,
        label_source,
        cache,
        sender,
        publisher,
    );

    let lifecycle = LifecycleManager::new();
    let shutdown_rx = lifecycle.subscribe();
    let scheduler_task = tokio::spawn(scheduler.run(receiver, shutdown_rx));

    lifecycle.wait_for_signal().await;
    scheduler_task.await?;

    info!("pingpg 종료");
    Ok(())
}
