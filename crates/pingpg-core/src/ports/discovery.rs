//! 디스커버리 포트.
//!
//! 구현: `pingpg-monitor` (호스트명, 게이트웨이), `pingpg-network` (지오로케이션)

use std::net::Ipv4Addr;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::geo::GeoLocation;

/// 로컬 호스트 정보 조회
#[async_trait]
pub trait HostDiscovery: Send + Sync {
    /// OS 호스트명
    async fn hostname(&self) -> Result<String, CoreError>;

    /// 기본 게이트웨이 IPv4 주소
    async fn default_gateway(&self) -> Result<Ipv4Addr, CoreError>;
}

/// 공인 IP 기반 지오로케이션 조회
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn locate(&self) -> Result<GeoLocation, CoreError>;
}
