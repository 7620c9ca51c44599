//! # pingpg-core
//!
//! pingpg 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (통계, 레이블, 시계열)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`encoder`]: 통계 + 레이블 → remote-write 배치 변환 (순수 함수)
//! - [`label_cache`]: 주기적으로 갱신되는 공유 레이블 캐시

pub mod config;
pub mod encoder;
pub mod error;
pub mod label_cache;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::label::{Label, LabelSet};

    #[test]
    fn label_set_serde_roundtrip() {
        let labels: LabelSet = vec![
            Label::new("client_id", "abc"),
            Label::new("hostname", "edge-01"),
        ]
        .into();

        let json = serde_json::to_string(&labels).unwrap();
        assert!(json.starts_with('['));

        let deserialized: LabelSet = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, labels);
        assert_eq!(deserialized.get("hostname"), Some("edge-01"));
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.probe.count, 10);
        assert_eq!(config.probe.target, "1.1.1.1");
        assert_eq!(config.probe.cycle_interval_secs, 10);
        assert_eq!(config.labels.refresh_interval_secs, 60);
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.server.retry_delay_ms, 2_000);
        assert!(!config.debug);
    }
}
