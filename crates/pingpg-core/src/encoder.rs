//! 통계 → remote-write 배치 변환.
//!
//! 부수 효과 없는 순수 함수. 사이클마다 5개 시계열을 고정 순서로 만든다.

use chrono::{DateTime, Utc};

use crate::models::label::LabelSet;
use crate::models::probe::ProbeStatistics;
use crate::models::series::{Sample, TimeSeries, WriteBatch, METRIC_NAME_LABEL};

pub const MIN_RTT_NS: &str = "min_rtt_ns";
pub const MAX_RTT_NS: &str = "max_rtt_ns";
pub const AVG_RTT_NS: &str = "avg_rtt_ns";
pub const STD_DEV_RTT_NS: &str = "std_dev_rtt_ns";
pub const PACKET_LOSS: &str = "packet_loss";

/// 배치 내 시계열 순서
pub const METRIC_NAMES: [&str; 5] = [
    MIN_RTT_NS,
    MAX_RTT_NS,
    AVG_RTT_NS,
    STD_DEV_RTT_NS,
    PACKET_LOSS,
];

/// 통계와 레이블로 배치 생성
///
/// 각 시계열은 `__name__`을 첫 레이블로 갖고 그 뒤에 `labels`의 복사본이 붙는다.
/// RTT는 나노초, 손실률은 0~100 그대로. 모든 샘플은 `now`의 밀리초 타임스탬프를 공유한다.
pub fn encode(stats: &ProbeStatistics, labels: &LabelSet, now: DateTime<Utc>) -> WriteBatch {
    let timestamp_ms = now.timestamp_millis();
    let values = [
        stats.min_rtt.as_nanos() as f64,
        stats.max_rtt.as_nanos() as f64,
        stats.avg_rtt.as_nanos() as f64,
        stats.std_dev_rtt.as_nanos() as f64,
        stats.packet_loss,
    ];

    let timeseries = METRIC_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| {
            let mut series_labels = LabelSet::with_capacity(labels.len() + 1);
            series_labels.push(METRIC_NAME_LABEL, *name);
            series_labels.extend_from(labels);
            TimeSeries {
                labels: series_labels,
                samples: vec![Sample {
                    value,
                    timestamp_ms,
                }],
            }
        })
        .collect();

    WriteBatch { timeseries }
}
