//! 對外資料傳輸物件
//!
//! 外部介面使用有號整數，進入領域層前由 `validate` 轉換並檢查。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PackError, PackSizeRecord, Result, Solution};

/// 新增包裝規格請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePackSizeRequest {
    pub product_id: i64,
    pub size: i64,
}

impl CreatePackSizeRequest {
    /// 驗證並回傳 (產品ID, 規格)
    pub fn validate(&self) -> Result<(i64, u64)> {
        Ok((self.product_id, positive_size(self.size)?))
    }
}

/// 更新包裝規格請求（未提供的欄位不變）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePackSizeRequest {
    pub id: Uuid,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl UpdatePackSizeRequest {
    /// 驗證規格（若有提供）
    pub fn validated_size(&self) -> Result<Option<u64>> {
        self.size.map(positive_size).transpose()
    }
}

/// 計算最佳包裝請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatePackSizesRequest {
    pub product_id: i64,
    pub order_quantity: i64,
}

impl CalculatePackSizesRequest {
    /// 驗證訂單數量，回傳正整數數量
    pub fn validate(&self) -> Result<u64> {
        match u64::try_from(self.order_quantity) {
            Ok(quantity) if quantity > 0 => Ok(quantity),
            _ => Err(PackError::InvalidQuantity(self.order_quantity)),
        }
    }
}

/// 包裝規格回應
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSizeResponse {
    pub id: Uuid,
    pub product_id: i64,
    pub size: u64,
    pub active: bool,
}

impl From<&PackSizeRecord> for PackSizeResponse {
    fn from(record: &PackSizeRecord) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            size: record.size,
            active: record.active,
        }
    }
}

/// 單一規格的包數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDetail {
    pub size: u64,
    pub count: u64,
}

/// 最佳包裝組合回應
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalPackSizesResponse {
    pub pack_combination: Vec<PackDetail>,
    pub total_items: u64,
    pub total_packs: u64,
}

impl From<&Solution> for OptimalPackSizesResponse {
    fn from(solution: &Solution) -> Self {
        Self {
            pack_combination: solution
                .combination
                .iter()
                .map(|(size, count)| PackDetail { size, count })
                .collect(),
            total_items: solution.total_items,
            total_packs: solution.total_packs,
        }
    }
}

fn positive_size(size: i64) -> Result<u64> {
    match u64::try_from(size) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(PackError::InvalidPackSize(size)),
    }
}
