//! # pingpg-monitor
//!
//! 로컬 측정/조회 어댑터.
//!
//! - [`prober`]: `Prober` 포트 구현 (surge-ping ICMP echo)
//! - [`host`]: `HostDiscovery` 포트 구현 (sysinfo 호스트명, 기본 게이트웨이)

pub mod host;
pub mod prober;
