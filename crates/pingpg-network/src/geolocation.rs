//! ip-api 지오로케이션 클라이언트.
//!
//! `GeoLocator` 포트 구현. 공인 IP, ISP, 국가/지역/도시, 회선 유형 플래그를 조회한다.

use std::time::Duration;

use async_trait::async_trait;
use pingpg_core::error::CoreError;
use pingpg_core::models::geo::GeoLocation;
use pingpg_core::ports::discovery::GeoLocator;
use tracing::debug;

use crate::remote_write_client::{check_response, transport_error};

/// ip-api.com 클라이언트
pub struct IpApiClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl IpApiClient {
    /// 새 클라이언트 생성
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl GeoLocator for IpApiClient {
    async fn locate(&self) -> Result<GeoLocation, CoreError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        let resp = check_response(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("지오로케이션 응답 읽기 실패: {e}")))?;
        let geo: GeoLocation = serde_json::from_str(&text)?;

        if !geo.is_success() {
            let reason = geo.message.as_deref().unwrap_or("알 수 없음");
            return Err(CoreError::Discovery(format!(
                "지오로케이션 조회 실패: {reason}"
            )));
        }

        debug!(
            "지오로케이션: {} ({}, {}, {})",
            geo.public_ip, geo.isp, geo.country, geo.city
        );
        Ok(geo)
    }
}
