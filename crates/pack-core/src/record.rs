//! 包裝規格記錄模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 包裝規格記錄（某產品可用的一種包裝）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSizeRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 產品ID
    pub product_id: i64,

    /// 每包件數
    pub size: u64,

    /// 是否啟用（停用的規格不參與計算）
    pub active: bool,

    /// 建立時間
    pub created_at: DateTime<Utc>,

    /// 最後更新時間
    pub updated_at: DateTime<Utc>,
}

impl PackSizeRecord {
    /// 創建新的包裝規格記錄（預設啟用）
    pub fn new(product_id: i64, size: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id,
            size,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 建構器模式：設置啟用狀態
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// 更新規格
    pub fn set_size(&mut self, size: u64) {
        self.size = size;
        self.touch();
    }

    /// 更新啟用狀態
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
