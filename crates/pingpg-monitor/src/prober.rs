//! ICMP echo 프로버.
//!
//! `Prober` 포트 구현. 설정된 간격마다 echo를 하나씩 보내고,
//! 모든 응답은 실행 데드라인까지 기다린다. 데드라인이 지나면 더 보내지 않는다.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use pingpg_core::config::ProbeConfig;
use pingpg_core::error::CoreError;
use pingpg_core::models::probe::ProbeStatistics;
use pingpg_core::ports::prober::Prober;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError, ICMP};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

/// surge-ping 기반 ICMP 프로버
pub struct IcmpProber {
    target: String,
    count: u32,
    run_timeout: Duration,
    interval: Duration,
}

impl IcmpProber {
    /// 새 프로버 생성
    pub fn new(
        target: impl Into<String>,
        count: u32,
        run_timeout: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            target: target.into(),
            count,
            run_timeout,
            interval,
        }
    }

    /// 설정에서 생성
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            config.target.clone(),
            config.count,
            config.timeout(),
            config.interval(),
        )
    }

    fn client_for(ip: IpAddr) -> Result<Client, CoreError> {
        let config = match ip {
            IpAddr::V4(_) => Config::default(),
            IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
        };
        Client::new(&config).map_err(|e| CoreError::Probe(format!("ICMP 소켓 생성 실패: {e}")))
    }
}

/// IP 리터럴이면 그대로, 아니면 DNS 조회
pub async fn resolve_target(host: &str) -> Result<IpAddr, CoreError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host(format!("{host}:0"))
        .await
        .map_err(|e| CoreError::Probe(format!("대상 해석 실패: {host}: {e}")))?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| CoreError::Probe(format!("대상 주소 없음: {host}")))
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self) -> Result<ProbeStatistics, CoreError> {
        let ip = resolve_target(&self.target).await?;
        let client = Self::client_for(ip)?;
        let identifier = PingIdentifier(std::process::id() as u16);
        let deadline = Instant::now() + self.run_timeout;

        let mut in_flight = JoinSet::new();
        let mut sent: u32 = 0;

        for seq in 0..self.count {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            let client = client.clone();
            let wait = deadline - now;
            in_flight.spawn(async move {
                let mut pinger = client.pinger(ip, identifier).await;
                pinger.timeout(wait);
                pinger.ping(PingSequence(seq as u16), &[]).await
            });
            sent += 1;

            if seq + 1 < self.count {
                tokio::time::sleep_until((now + self.interval).min(deadline)).await;
            }
        }

        let mut rtts = Vec::with_capacity(sent as usize);
        let mut last_error: Option<SurgeError> = None;
        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok(Ok((_, rtt))) => rtts.push(rtt),
                Ok(Err(e)) => {
                    debug!("echo 실패: {}: {e}", self.target);
                    last_error = Some(e);
                }
                Err(e) => warn!("echo 태스크 종료 실패: {e}"),
            }
        }

        if rtts.is_empty() {
            return Err(match last_error {
                Some(SurgeError::Timeout { .. }) | None => CoreError::Timeout {
                    timeout_ms: self.run_timeout.as_millis() as u64,
                },
                Some(e) => CoreError::Probe(format!("{}: {e}", self.target)),
            });
        }

        let stats = ProbeStatistics::from_round_trips(sent, &rtts);
        debug!(
            "프로브 완료: {} 전송={} 수신={} 손실={:.1}% 평균={:?}",
            self.target,
            stats.packets_sent,
            stats.packets_received,
            stats.packet_loss,
            stats.avg_rtt
        );
        Ok(stats)
    }

    fn target(&self) -> &str {
        &self.target
    }
}
