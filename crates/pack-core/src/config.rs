//! 優化器配置模型

use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// 優化器參數配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 每處理多少個總件數檢查一次取消信號
    pub cancel_check_interval: usize,

    /// 訂單數量上限（None 表示不限制）
    ///
    /// 動態規劃表大小與訂單數量成正比，服務端可藉此擋下異常大的訂單。
    pub max_order_quantity: Option<u64>,
}

impl OptimizerConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            cancel_check_interval: 1024,
            max_order_quantity: None,
        }
    }

    /// 建構器模式：設置取消檢查間隔（最小為 1）
    pub fn with_cancel_check_interval(mut self, interval: usize) -> Self {
        self.cancel_check_interval = interval.max(1);
        self
    }

    /// 建構器模式：設置訂單數量上限
    pub fn with_max_order_quantity(mut self, max: u64) -> Self {
        self.max_order_quantity = Some(max);
        self
    }

    /// 從 JSON 載入配置，缺少的欄位使用預設值
    ///
    /// # 範例
    /// ```
    /// use pack_core::OptimizerConfig;
    ///
    /// let config = OptimizerConfig::from_json(r#"{ "max_order_quantity": 1000000 }"#).unwrap();
    /// assert_eq!(config.max_order_quantity, Some(1_000_000));
    /// assert_eq!(config.cancel_check_interval, 1024);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PackError::Config(e.to_string()))?;

        if config.cancel_check_interval == 0 {
            return Err(PackError::Config(
                "cancel_check_interval 必須大於 0".to_string(),
            ));
        }

        Ok(config)
    }

    /// 檢查訂單數量是否在上限內
    pub fn check_quantity(&self, quantity: u64) -> Result<()> {
        match self.max_order_quantity {
            Some(max) if quantity > max => Err(PackError::OrderTooLarge { quantity, max }),
            _ => Ok(()),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new()
    }
}
