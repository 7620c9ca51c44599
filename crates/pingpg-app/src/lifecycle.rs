//! 라이프사이클 관리.
//!
//! 시그널 핸들링, 종료 신호 브로드캐스트.

use tokio::sync::watch;
use tracing::{error, info};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// 종료 신호 발송 여부
    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM) 후 종료 신호 발송
    ///
    /// 핸들러 등록에 실패하면 시그널로는 종료되지 않는다.
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    error!("시그널 핸들러 등록 실패: {e}");
                    std::future::pending::<()>().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Ctrl+C 핸들러 등록 실패: {e}");
                std::future::pending::<()>().await;
            }
            info!("Ctrl+C 수신");
        }

        self.shutdown();
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_creation() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        assert!(!*rx.borrow());
        assert!(!lm.is_shutting_down());
    }

    #[tokio::test]
    async fn shutdown_reaches_all_subscribers() {
        let lm = LifecycleManager::new();
        let mut a = lm.subscribe();
        let mut b = lm.subscribe();

        lm.shutdown();

        a.changed().await.unwrap();
        b.changed().await.unwrap();
        assert!(*a.borrow());
        assert!(*b.borrow());
        assert!(lm.is_shutting_down());
    }
}
