//! 包裝規格來源介面與記憶體實作

use pack_core::{PackError, PackSizeRecord, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// 包裝規格來源
///
/// 實際儲存方式由呼叫端決定，計算只依賴 `get_sizes_by_product_id`。
pub trait PackSizeRepository: Send + Sync {
    /// 新增記錄，回傳儲存後的記錄
    fn create(&self, record: PackSizeRecord) -> Result<PackSizeRecord>;

    /// 覆寫既有記錄
    fn update(&self, record: PackSizeRecord) -> Result<()>;

    fn get_by_id(&self, id: Uuid) -> Result<PackSizeRecord>;

    fn get_all(&self) -> Result<Vec<PackSizeRecord>>;

    /// 某產品啟用中的規格
    fn get_sizes_by_product_id(&self, product_id: i64) -> Result<Vec<u64>>;
}

/// 記憶體內的包裝規格儲存
#[derive(Debug, Default)]
pub struct InMemoryPackSizeRepository {
    records: RwLock<HashMap<Uuid, PackSizeRecord>>,
}

impl InMemoryPackSizeRepository {
    /// 創建空的儲存
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：預先載入記錄
    pub fn with_records(records: Vec<PackSizeRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.id, r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PackSizeRepository for InMemoryPackSizeRepository {
    fn create(&self, record: PackSizeRecord) -> Result<PackSizeRecord> {
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(PackError::Repository(format!("記錄已存在: {}", record.id)));
        }
        records.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: PackSizeRecord) -> Result<()> {
        let mut records = self.records.write();
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(PackError::NotFound(format!("包裝規格 {}", record.id))),
        }
    }

    fn get_by_id(&self, id: Uuid) -> Result<PackSizeRecord> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| PackError::NotFound(format!("包裝規格 {}", id)))
    }

    fn get_all(&self) -> Result<Vec<PackSizeRecord>> {
        let mut all: Vec<PackSizeRecord> = self.records.read().values().cloned().collect();
        all.sort_by(|a, b| {
            (a.product_id, a.size, a.created_at).cmp(&(b.product_id, b.size, b.created_at))
        });
        Ok(all)
    }

    fn get_sizes_by_product_id(&self, product_id: i64) -> Result<Vec<u64>> {
        let mut sizes: Vec<u64> = self
            .records
            .read()
            .values()
            .filter(|r| r.product_id == product_id && r.active)
            .map(|r| r.size)
            .collect();
        sizes.sort_unstable();
        Ok(sizes)
    }
}
