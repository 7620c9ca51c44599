//! Remote-write protobuf 메시지.
//!
//! `prometheus` 패키지의 `WriteRequest` 계열 메시지와 도메인 모델 변환을 포함한다.

/// prometheus remote-write 0.1.0 메시지 (WriteRequest, TimeSeries, Label, Sample)
pub mod prometheus {
    #![allow(clippy::all)]
    #![allow(warnings)]
    include!("generated/prometheus.rs");
}

pub mod remote_write;
