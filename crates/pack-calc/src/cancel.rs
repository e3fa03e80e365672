//! 取消信號

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 計算取消信號
///
/// 複製出的 token 共用同一個旗標，可從其他執行緒呼叫 `cancel`。
/// 可另外附帶截止時間，超過即視為已取消。
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// 創建新的取消信號
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置截止時間
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// 建構器模式：從現在起算的逾時
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// 發出取消
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// 檢查是否已取消（含截止時間）
    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }

        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// 截止時間
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
