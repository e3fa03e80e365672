//! # Pack Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod dto;
pub mod pack;
pub mod record;
pub mod solution;

// Re-export 主要類型
pub use config::OptimizerConfig;
pub use dto::{
    CalculatePackSizesRequest, CreatePackSizeRequest, OptimalPackSizesResponse, PackDetail,
    PackSizeResponse, UpdatePackSizeRequest,
};
pub use pack::PackSizes;
pub use record::PackSizeRecord;
pub use solution::{PackCombination, Solution};

/// 包裝計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("包裝規格不可為空")]
    EmptyPackSizes,

    #[error("無效的包裝規格: {0}（必須為正整數）")]
    InvalidPackSize(i64),

    #[error("無效的訂單數量: {0}（必須為正整數）")]
    InvalidQuantity(i64),

    #[error("數量溢出：訂單數量 {quantity} 加上最大包裝 {max_size} 超出範圍")]
    QuantityOverflow { quantity: u64, max_size: u64 },

    #[error("訂單數量 {quantity} 超過上限 {max}")]
    OrderTooLarge { quantity: u64, max: u64 },

    #[error("計算已取消")]
    Cancelled,

    #[error("產品 {0} 沒有啟用中的包裝規格")]
    NoActivePackSizes(i64),

    #[error("找不到資源: {0}")]
    NotFound(String),

    #[error("儲存層錯誤: {0}")]
    Repository(String),

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("計算錯誤: {0}")]
    Calculation(String),
}

impl PackError {
    /// 是否屬於呼叫端輸入錯誤
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PackError::EmptyPackSizes
                | PackError::InvalidPackSize(_)
                | PackError::InvalidQuantity(_)
                | PackError::QuantityOverflow { .. }
                | PackError::OrderTooLarge { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
