//! 전송 큐.
//!
//! 수집 루프(생산자 1)와 퍼블리셔(소비자 1) 사이의 bounded FIFO.
//! 가득 차면 `enqueue`가 대기하여 수집 루프에 backpressure를 건다.

use pingpg_core::error::CoreError;
use pingpg_core::models::series::WriteBatch;
use thiserror::Error;
use tokio::sync::mpsc;

/// `try_enqueue` 실패. 넣지 못한 배치를 돌려준다
#[derive(Debug, Error)]
pub enum TryEnqueueError {
    #[error("전송 큐 가득 참")]
    Full(WriteBatch),
    #[error("전송 큐 닫힘")]
    Closed(WriteBatch),
}

impl TryEnqueueError {
    pub fn into_batch(self) -> WriteBatch {
        match self {
            Self::Full(batch) | Self::Closed(batch) => batch,
        }
    }
}

/// 용량 `capacity`의 전송 큐 생성
///
/// `capacity`가 0이면 1로 취급한다.
pub fn publish_queue(capacity: usize) -> (PublishSender, PublishReceiver) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    (
        PublishSender { tx, capacity },
        PublishReceiver { rx, capacity },
    )
}

/// 생산자 측 핸들
#[derive(Debug, Clone)]
pub struct PublishSender {
    tx: mpsc::Sender<WriteBatch>,
    capacity: usize,
}

impl PublishSender {
    /// 배치 추가. 큐가 가득 차면 자리가 날 때까지 대기
    pub async fn enqueue(&self, batch: WriteBatch) -> Result<(), CoreError> {
        self.tx.send(batch).await.map_err(|_| CoreError::QueueClosed)
    }

    /// 대기 없이 배치 추가
    pub fn try_enqueue(&self, batch: WriteBatch) -> Result<(), TryEnqueueError> {
        self.tx.try_send(batch).map_err(|e| match e {
            mpsc::error::TrySendError::Full(batch) => TryEnqueueError::Full(batch),
            mpsc::error::TrySendError::Closed(batch) => TryEnqueueError::Closed(batch),
        })
    }

    /// 대기 중인 배치 수
    pub fn len(&self) -> usize {
        self.capacity - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 소비자가 종료되었는지
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// 소비자 측 핸들
#[derive(Debug)]
pub struct PublishReceiver {
    rx: mpsc::Receiver<WriteBatch>,
    capacity: usize,
}

impl PublishReceiver {
    /// 배치 꺼내기. 비어 있으면 대기하고, 생산자가 모두 닫히고 비면 `None`
    pub async fn dequeue(&mut self) -> Option<WriteBatch> {
        self.rx.recv().await
    }

    /// 대기 중인 배치 수
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 큐를 닫고 남은 배치를 버린다. 버린 개수 반환
    pub fn close_and_discard(&mut self) -> usize {
        self.rx.close();
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}
