//! 包裝組合與計算結果模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 包裝組合（規格 → 數量）
///
/// 只保存數量大於 0 的規格；建立後不可修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackCombination {
    counts: BTreeMap<u64, u64>,
}

impl PackCombination {
    /// 創建空組合
    pub fn empty() -> Self {
        Self::default()
    }

    /// 從 (規格, 數量) 列表建立組合，相同規格會合併，數量為 0 的項目會被略過
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut merged = BTreeMap::new();
        for (size, count) in counts {
            if count > 0 {
                *merged.entry(size).or_insert(0) += count;
            }
        }
        Self { counts: merged }
    }

    /// 某規格的包裝數量
    pub fn count_of(&self, size: u64) -> u64 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// 依規格由小到大迭代
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&size, &count)| (size, count))
    }

    /// 不同規格數
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 總件數（Σ 規格 × 數量）
    pub fn total_items(&self) -> u64 {
        self.iter().map(|(size, count)| size * count).sum()
    }

    /// 總包數（Σ 數量）
    pub fn total_packs(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// 優化結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// 包裝組合
    pub combination: PackCombination,

    /// 總出貨件數
    pub total_items: u64,

    /// 總包數
    pub total_packs: u64,
}

impl Solution {
    /// 由組合建立結果，總計由組合推導
    pub fn from_combination(combination: PackCombination) -> Self {
        let total_items = combination.total_items();
        let total_packs = combination.total_packs();
        Self {
            combination,
            total_items,
            total_packs,
        }
    }

    /// 超出訂單的件數
    pub fn overshoot(&self, order_quantity: u64) -> u64 {
        self.total_items.saturating_sub(order_quantity)
    }

    /// 是否完全符合訂單數量
    pub fn is_exact(&self, order_quantity: u64) -> bool {
        self.total_items == order_quantity
    }
}
