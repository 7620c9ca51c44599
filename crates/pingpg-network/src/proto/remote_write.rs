//! 도메인 배치 → `prometheus.WriteRequest` 변환 및 직렬화.

use pingpg_core::models::label::LabelSet;
use pingpg_core::models::series::{Sample, TimeSeries, WriteBatch};
use prost::Message;

use super::prometheus;

fn proto_labels(labels: &LabelSet) -> Vec<prometheus::Label> {
    labels
        .iter()
        .map(|l| prometheus::Label {
            name: l.name.clone(),
            value: l.value.clone(),
        })
        .collect()
}

impl From<&Sample> for prometheus::Sample {
    fn from(sample: &Sample) -> Self {
        Self {
            value: sample.value,
            timestamp: sample.timestamp_ms,
        }
    }
}

impl From<&TimeSeries> for prometheus::TimeSeries {
    fn from(series: &TimeSeries) -> Self {
        Self {
            labels: proto_labels(&series.labels),
            samples: series.samples.iter().map(Into::into).collect(),
        }
    }
}

impl From<&WriteBatch> for prometheus::WriteRequest {
    fn from(batch: &WriteBatch) -> Self {
        Self {
            timeseries: batch.timeseries.iter().map(Into::into).collect(),
        }
    }
}

/// 배치를 protobuf 바이트로 직렬화 (압축 전)
pub fn encode_write_request(batch: &WriteBatch) -> Vec<u8> {
    prometheus::WriteRequest::from(batch).encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingpg_core::models::series::METRIC_NAME_LABEL;

    fn batch() -> WriteBatch {
        let mut labels = LabelSet::new();
        labels.push(METRIC_NAME_LABEL, "min_rtt_ns");
        labels.push("client_id", "abc");
        WriteBatch {
            timeseries: vec![TimeSeries {
                labels,
                samples: vec![Sample {
                    value: 1_000_000.0,
                    timestamp_ms: 1_700_000_000_000,
                }],
            }],
        }
    }

    #[test]
    fn label_wire_layout() {
        let label = prometheus::Label {
            name: "a".to_string(),
            value: "b".to_string(),
        };
        assert_eq!(label.encode_to_vec(), vec![0x0a, 0x01, b'a', 0x12, 0x01, b'b']);
    }

    #[test]
    fn sample_wire_layout() {
        let sample = prometheus::Sample {
            value: 1.0,
            timestamp: 1,
        };
        let mut expected = vec![0x09];
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&[0x10, 0x01]);
        assert_eq!(sample.encode_to_vec(), expected);
    }

    #[test]
    fn decoded_request_keeps_order_and_values() {
        let bytes = encode_write_request(&batch());
        let decoded = prometheus::WriteRequest::decode(bytes.as_slice()).unwrap();

        assert_eq!(decoded.timeseries.len(), 1);
        let series = &decoded.timeseries[0];
        let names: Vec<_> = series.labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["__name__", "client_id"]);
        assert_eq!(series.labels[0].value, "min_rtt_ns");
        assert_eq!(series.samples[0].value, 1_000_000.0);
        assert_eq!(series.samples[0].timestamp, 1_700_000_000_000);
    }
}
