//! 包裝規格集合

use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// 已驗證的包裝規格集合
///
/// 不變量：非空、每個規格皆為正整數、已去重並依規格由小到大排序。
/// 優化器依此順序迭代，因此同分時的結果可重現。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct PackSizes {
    sizes: Vec<u64>,
}

impl PackSizes {
    /// 從任意規格列表建立集合（自動去重、排序）
    pub fn new<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut sizes: Vec<u64> = sizes.into_iter().collect();

        if sizes.is_empty() {
            return Err(PackError::EmptyPackSizes);
        }

        if sizes.contains(&0) {
            return Err(PackError::InvalidPackSize(0));
        }

        sizes.sort_unstable();
        sizes.dedup();

        Ok(Self { sizes })
    }

    /// 從有號整數建立集合（來自外部介面，可能包含負值）
    pub fn from_signed<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let converted = sizes
            .into_iter()
            .map(|size| match u64::try_from(size) {
                Ok(value) if value > 0 => Ok(value),
                _ => Err(PackError::InvalidPackSize(size)),
            })
            .collect::<Result<Vec<u64>>>()?;

        Self::new(converted)
    }

    /// 由小到大的規格
    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sizes.iter().copied()
    }

    /// 最大規格
    pub fn max(&self) -> u64 {
        // 非空由建構子保證
        self.sizes[self.sizes.len() - 1]
    }

    /// 最小規格
    pub fn min(&self) -> u64 {
        self.sizes[0]
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn contains(&self, size: u64) -> bool {
        self.sizes.binary_search(&size).is_ok()
    }
}

impl TryFrom<Vec<u64>> for PackSizes {
    type Error = PackError;

    fn try_from(sizes: Vec<u64>) -> Result<Self> {
        Self::new(sizes)
    }
}

impl From<PackSizes> for Vec<u64> {
    fn from(sizes: PackSizes) -> Self {
        sizes.sizes
    }
}
