//! 지오로케이션 조회 결과 모델.
//!
//! ip-api.com JSON 응답 레코드. 필드 마스크(66846719)로 요청되는 전체 필드를 담는다.

use serde::{Deserialize, Serialize};

/// ip-api 성공 상태 문자열
pub const GEO_STATUS_SUCCESS: &str = "success";

/// 공인 IP 기반 위치/ISP 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoLocation {
    /// "success" 또는 "fail"
    pub status: String,
    /// 실패 사유 (status = "fail" 일 때만)
    pub message: Option<String>,
    pub continent: String,
    pub continent_code: String,
    pub country: String,
    pub country_code: String,
    /// 지역 코드 (예: "11")
    pub region: String,
    /// 지역 이름 (예: "Seoul")
    pub region_name: String,
    pub city: String,
    pub district: String,
    pub zip: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub offset: i64,
    pub currency: String,
    pub isp: String,
    pub org: String,
    #[serde(rename = "as")]
    pub as_name: String,
    pub asname: String,
    pub reverse: String,
    /// 모바일 회선 여부
    pub mobile: bool,
    /// 프록시/VPN/Tor 여부
    pub proxy: bool,
    /// 호스팅/데이터센터 여부
    pub hosting: bool,
    /// 조회된 공인 IP
    #[serde(rename = "query")]
    pub public_ip: String,
}

impl GeoLocation {
    /// 조회 성공 여부
    pub fn is_success(&self) -> bool {
        self.status == GEO_STATUS_SUCCESS
    }
}
