//! # pingpg-network
//!
//! 원격 전송 어댑터.
//! 프로브 배치를 Prometheus remote-write(0.1.0)로 직렬화/압축해 전송하고,
//! 공인 IP 지오로케이션을 조회한다.
//!
//! - [`proto`]: `prometheus.WriteRequest` protobuf 메시지 (prost)
//! - [`compression`]: snappy block 압축 (`Compressor` 포트 구현)
//! - [`remote_write_client`]: remote-write HTTP 클라이언트 (`MetricsSink` 포트 구현)
//! - [`publish_queue`]: 수집 루프 → 퍼블리셔 사이의 bounded FIFO
//! - [`publisher`]: 큐를 비우며 배치를 무한 재시도로 전송
//! - [`geolocation`]: ip-api 클라이언트 (`GeoLocator` 포트 구현)
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use pingpg_network::publish_queue::publish_queue;
//! use pingpg_network::publisher::RemoteWritePublisher;
//!
//! let (sender, receiver) = publish_queue(100);
//! let publisher = RemoteWritePublisher::new(sink, retry_delay);
//! tokio::spawn(async move { publisher.run(receiver, shutdown_rx).await });
//! ```

pub mod compression;
pub mod geolocation;
pub mod proto;
pub mod publish_queue;
pub mod publisher;
pub mod remote_write_client;
