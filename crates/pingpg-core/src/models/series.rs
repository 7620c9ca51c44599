//! 시계열 배치 모델.
//!
//! remote-write `WriteRequest`에 대응하는 도메인 구조체.
//! 와이어 포맷(protobuf) 변환은 `pingpg-network` crate가 담당한다.

use serde::{Deserialize, Serialize};

use crate::models::label::LabelSet;

/// 메트릭 이름을 담는 예약 레이블
pub const METRIC_NAME_LABEL: &str = "__name__";

/// 단일 샘플
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 측정값
    pub value: f64,
    /// 캡처 시각 (Unix epoch 밀리초)
    pub timestamp_ms: i64,
}

/// 단일 시계열 (`__name__` 레이블 필수)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// 레이블 목록 (시계열마다 독립된 복사본)
    pub labels: LabelSet,
    /// 샘플 목록 (사이클당 1개)
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    /// `__name__` 레이블 값
    pub fn metric_name(&self) -> Option<&str> {
        self.labels.get(METRIC_NAME_LABEL)
    }
}

/// 한 번의 캡처에 해당하는 시계열 묶음 (write request)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch {
    pub timeseries: Vec<TimeSeries>,
}

impl WriteBatch {
    pub fn len(&self) -> usize {
        self.timeseries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeseries.is_empty()
    }

    /// 메트릭 이름으로 시계열 조회
    pub fn find(&self, metric_name: &str) -> Option<&TimeSeries> {
        self.timeseries
            .iter()
            .find(|ts| ts.metric_name() == Some(metric_name))
    }

    /// 배치 캡처 시각 (첫 샘플 기준)
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.timeseries
            .first()
            .and_then(|ts| ts.samples.first())
            .map(|s| s.timestamp_ms)
    }

    /// 전체 샘플 수
    pub fn sample_count(&self) -> usize {
        self.timeseries.iter().map(|ts| ts.samples.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, value: f64) -> TimeSeries {
        let mut labels = LabelSet::new();
        labels.push(METRIC_NAME_LABEL, name);
        TimeSeries {
            labels,
            samples: vec![Sample {
                value,
                timestamp_ms: 1_700_000_000_000,
            }],
        }
    }

    #[test]
    fn find_by_metric_name() {
        let batch = WriteBatch {
            timeseries: vec![series("a", 1.0), series("b", 2.0)],
        };
        assert_eq!(batch.find("b").unwrap().samples[0].value, 2.0);
        assert!(batch.find("c").is_none());
        assert_eq!(batch.sample_count(), 2);
        assert_eq!(batch.timestamp_ms(), Some(1_700_000_000_000));
    }

    #[test]
    fn empty_batch_has_no_timestamp() {
        let batch = WriteBatch::default();
        assert!(batch.is_empty());
        assert_eq!(batch.timestamp_ms(), None);
    }
}
