//! 프로브 통계 모델.
//!
//! 한 번의 프로브 사이클(echo 버스트)에서 얻은 RTT/손실 집계.

use std::time::Duration;

/// 전체 손실을 나타내는 손실률 (%)
pub const TOTAL_LOSS_PERCENT: f64 = 100.0;

/// 프로브 사이클 통계
///
/// 생성 후 변경하지 않는다. 프로브 실패 시에는 [`ProbeStatistics::total_loss`]
/// 센티넬이 대신 사용되어 메트릭 스트림이 끊기지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStatistics {
    /// 최소 RTT
    pub min_rtt: Duration,
    /// 최대 RTT
    pub max_rtt: Duration,
    /// 평균 RTT
    pub avg_rtt: Duration,
    /// RTT 표준편차 (모표준편차)
    pub std_dev_rtt: Duration,
    /// 손실률 (0~100)
    pub packet_loss: f64,
    /// 전송한 echo 수
    pub packets_sent: u32,
    /// 응답 받은 echo 수
    pub packets_received: u32,
}

impl ProbeStatistics {
    /// 100% 손실 센티넬 (모든 RTT 0)
    pub fn total_loss() -> Self {
        Self {
            min_rtt: Duration::ZERO,
            max_rtt: Duration::ZERO,
            avg_rtt: Duration::ZERO,
            std_dev_rtt: Duration::ZERO,
            packet_loss: TOTAL_LOSS_PERCENT,
            packets_sent: 0,
            packets_received: 0,
        }
    }

    /// 전송 수와 수신한 RTT 목록으로 통계 계산
    ///
    /// 손실률은 실제로 전송한 echo 기준이다. 전송이 0이면 센티넬을 반환한다.
    pub fn from_round_trips(sent: u32, rtts: &[Duration]) -> Self {
        if sent == 0 {
            return Self::total_loss();
        }

        let received = (rtts.len() as u32).min(sent);
        let packet_loss = f64::from(sent - received) * 100.0 / f64::from(sent);

        if rtts.is_empty() {
            return Self {
                packets_sent: sent,
                ..Self::total_loss()
            };
        }

        let min_rtt = rtts.iter().copied().min().unwrap_or_default();
        let max_rtt = rtts.iter().copied().max().unwrap_or_default();

        let n = rtts.len() as f64;
        let mean_ns = rtts.iter().map(|d| d.as_nanos() as f64).sum::<f64>() / n;
        let variance = rtts
            .iter()
            .map(|d| {
                let diff = d.as_nanos() as f64 - mean_ns;
                diff * diff
            })
            .sum::<f64>()
            / n;

        Self {
            min_rtt,
            max_rtt,
            avg_rtt: Duration::from_nanos(mean_ns.round() as u64),
            std_dev_rtt: Duration::from_nanos(variance.sqrt().round() as u64),
            packet_loss,
            packets_sent: sent,
            packets_received: received,
        }
    }

    /// 응답이 하나도 없었는지
    pub fn is_total_loss(&self) -> bool {
        self.packet_loss >= TOTAL_LOSS_PERCENT
    }
}
