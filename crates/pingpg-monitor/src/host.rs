//! 호스트 정보 디스커버리.
//!
//! `HostDiscovery` 포트 구현. 호스트명은 sysinfo, 기본 게이트웨이는 OS별 라우팅 테이블에서 읽는다.
//!
//! - Linux: `/proc/net/route` (게이트웨이 컬럼은 little-endian hex)
//! - macOS: `route -n get default` 의 `gateway:` 라인
//! - Windows: `route print -4 0.0.0.0` 의 `0.0.0.0 0.0.0.0 <gw>` 행

use std::net::Ipv4Addr;

use async_trait::async_trait;
use pingpg_core::error::CoreError;
use pingpg_core::ports::discovery::HostDiscovery;
use sysinfo::System;
use tracing::debug;

/// OS 기반 호스트 디스커버리
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostDiscovery;

impl SystemHostDiscovery {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostDiscovery for SystemHostDiscovery {
    async fn hostname(&self) -> Result<String, CoreError> {
        System::host_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CoreError::Discovery("호스트명 조회 실패".to_string()))
    }

    async fn default_gateway(&self) -> Result<Ipv4Addr, CoreError> {
        let gateway = read_default_gateway().await?;
        debug!("기본 게이트웨이: {gateway}");
        Ok(gateway)
    }
}

#[cfg(target_os = "linux")]
async fn read_default_gateway() -> Result<Ipv4Addr, CoreError> {
    let content = tokio::fs::read_to_string("/proc/net/route")
        .await
        .map_err(|e| CoreError::Discovery(format!("/proc/net/route 읽기 실패: {e}")))?;
    parse_proc_net_route(&content)
        .ok_or_else(|| CoreError::Discovery("기본 경로 없음".to_string()))
}

#[cfg(target_os = "macos")]
async fn read_default_gateway() -> Result<Ipv4Addr, CoreError> {
    let stdout = run_route(&["-n", "get", "default"]).await?;
    parse_route_get_default(&stdout)
        .ok_or_else(|| CoreError::Discovery("route 출력에 gateway 없음".to_string()))
}

#[cfg(target_os = "windows")]
async fn read_default_gateway() -> Result<Ipv4Addr, CoreError> {
    let stdout = run_route(&["print", "-4", "0.0.0.0"]).await?;
    parse_route_print(&stdout)
        .ok_or_else(|| CoreError::Discovery("route print 출력에 기본 경로 없음".to_string()))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
async fn read_default_gateway() -> Result<Ipv4Addr, CoreError> {
    Err(CoreError::Discovery(
        "지원하지 않는 플랫폼의 게이트웨이 조회".to_string(),
    ))
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
async fn run_route(args: &[&str]) -> Result<String, CoreError> {
    let output = tokio::process::Command::new("route")
        .args(args)
        .output()
        .await
        .map_err(|e| CoreError::Discovery(format!("route 실행 실패: {e}")))?;

    if !output.status.success() {
        return Err(CoreError::Discovery(format!(
            "route 종료 코드 {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `/proc/net/route` 에서 기본 경로의 게이트웨이 추출
pub fn parse_proc_net_route(content: &str) -> Option<Ipv4Addr> {
    content.lines().skip(1).find_map(|line| {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 || parts[1] != "00000000" {
            return None;
        }
        let raw = u32::from_str_radix(parts[2], 16).ok()?;
        if raw == 0 {
            return None;
        }
        Some(Ipv4Addr::from(raw.to_le_bytes()))
    })
}

/// `route -n get default` 출력에서 게이트웨이 추출
pub fn parse_route_get_default(stdout: &str) -> Option<Ipv4Addr> {
    stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix("gateway:"))
        .find_map(|gw| gw.trim().parse().ok())
}

/// `route print -4` 출력에서 `0.0.0.0 0.0.0.0 <gw>` 행의 게이트웨이 추출
pub fn parse_route_print(stdout: &str) -> Option<Ipv4Addr> {
    stdout.lines().find_map(|line| {
        let mut cols = line.split_whitespace();
        match (cols.next(), cols.next(), cols.next()) {
            (Some("0.0.0.0"), Some("0.0.0.0"), Some(gw)) => gw.parse().ok(),
            _ => None,
        }
    })
}
