//! 레이블 디스커버리.
//!
//! 클라이언트 ID, 호스트명, 게이트웨이, 지오로케이션을 모아 고정 순서의 레이블 목록을 만든다.
//! 하나라도 실패하면 전체가 실패한다 (부분 레이블로 캐시를 덮어쓰지 않는다).

use std::sync::Arc;

use async_trait::async_trait;
use pingpg_core::error::CoreError;
use pingpg_core::models::geo::GeoLocation;
use pingpg_core::models::label::LabelSet;
use pingpg_core::ports::discovery::{GeoLocator, HostDiscovery};
use pingpg_core::ports::labels::LabelSource;
use tracing::debug;

/// 레이블 이름 순서
pub const LABEL_NAMES: [&str; 11] = [
    "client_id",
    "hostname",
    "public_ip",
    "gateway",
    "isp",
    "country",
    "region",
    "city",
    "mobile",
    "proxy",
    "hosting",
];

/// 디스커버리 어댑터 조합 `LabelSource`
pub struct DiscoveryLabelSource {
    client_id: String,
    host: Arc<dyn HostDiscovery>,
    geo: Arc<dyn GeoLocator>,
}

impl DiscoveryLabelSource {
    pub fn new(
        client_id: impl Into<String>,
        host: Arc<dyn HostDiscovery>,
        geo: Arc<dyn GeoLocator>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            host,
            geo,
        }
    }
}

/// 조회 결과로 레이블 목록 구성
pub fn build_labels(client_id: &str, hostname: &str, gateway: &str, geo: &GeoLocation) -> LabelSet {
    let values = [
        client_id,
        hostname,
        geo.public_ip.as_str(),
        gateway,
        geo.isp.as_str(),
        geo.country.as_str(),
        geo.region_name.as_str(),
        geo.city.as_str(),
        bool_label(geo.mobile),
        bool_label(geo.proxy),
        bool_label(geo.hosting),
    ];

    let mut labels = LabelSet::with_capacity(LABEL_NAMES.len());
    for (name, value) in LABEL_NAMES.iter().zip(values) {
        labels.push(*name, value);
    }
    labels
}

fn bool_label(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

#[async_trait]
impl LabelSource for DiscoveryLabelSource {
    async fn fetch_labels(&self) -> Result<LabelSet, CoreError> {
        let (hostname, gateway, geo) = tokio::join!(
            self.host.hostname(),
            self.host.default_gateway(),
            self.geo.locate()
        );
        let (hostname, gateway, geo) = (hostname?, gateway?, geo?);

        debug!(
            "디스커버리 완료: host={hostname} gw={gateway} ip={}",
            geo.public_ip
        );
        Ok(build_labels(
            &self.client_id,
            &hostname,
            &gateway.to_string(),
            &geo,
        ))
    }
}
