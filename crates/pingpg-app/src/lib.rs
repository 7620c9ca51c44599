//! # pingpg-app
//!
//! pingpg 에이전트 오케스트레이션.
//! 바이너리(`pingpg`)와 통합 테스트가 함께 사용한다.
//!
//! - [`settings`]: CLI/환경변수 인자와 설정 병합
//! - [`discovery`]: 호스트/게이트웨이/지오로케이션 → 레이블 조합 (`LabelSource` 구현)
//! - [`scheduler`]: 레이블 갱신, 수집, 전송 태스크
//! - [`lifecycle`]: 종료 신호 관리

pub mod discovery;
pub mod lifecycle;
pub mod scheduler;
pub mod settings;
