//! pingpg 도메인 모델.
//!
//! 프로브 통계, 레이블, 시계열 배치, 지오로케이션 결과를 정의한다.

pub mod geo;
pub mod label;
pub mod probe;
pub mod series;
