//! 包裝規格服務

use pack_calc::{CancellationToken, PackOptimizer};
use pack_core::{
    CalculatePackSizesRequest, CreatePackSizeRequest, OptimalPackSizesResponse, PackError,
    PackSizeRecord, PackSizeResponse, PackSizes, Result, UpdatePackSizeRequest,
};

use crate::repository::PackSizeRepository;

/// 包裝規格服務：維護規格並計算最佳出貨組合
pub struct PackSizeService<R> {
    repository: R,
    optimizer: PackOptimizer,
}

impl<R: PackSizeRepository> PackSizeService<R> {
    /// 創建新的服務（使用預設優化器配置）
    pub fn new(repository: R) -> Self {
        Self::with_optimizer(repository, PackOptimizer::default())
    }

    /// 創建新的服務並指定優化器
    pub fn with_optimizer(repository: R, optimizer: PackOptimizer) -> Self {
        Self {
            repository,
            optimizer,
        }
    }

    /// 新增包裝規格
    pub fn create(&self, request: &CreatePackSizeRequest) -> Result<PackSizeResponse> {
        let (product_id, size) = request.validate()?;

        let saved = self
            .repository
            .create(PackSizeRecord::new(product_id, size))?;

        tracing::info!("新增包裝規格：產品 {}，規格 {}", product_id, size);
        Ok(PackSizeResponse::from(&saved))
    }

    /// 更新包裝規格（規格或啟用狀態）
    pub fn update(&self, request: &UpdatePackSizeRequest) -> Result<()> {
        let size = request.validated_size()?;
        let mut record = self.repository.get_by_id(request.id)?;

        if let Some(size) = size {
            record.set_size(size);
        }
        if let Some(active) = request.active {
            record.set_active(active);
        }

        tracing::debug!(
            "更新包裝規格 {}：規格 {}，啟用 {}",
            record.id,
            record.size,
            record.active
        );
        self.repository.update(record)
    }

    /// 列出所有包裝規格
    pub fn get_all(&self) -> Result<Vec<PackSizeResponse>> {
        let records = self.repository.get_all()?;
        Ok(records.iter().map(PackSizeResponse::from).collect())
    }

    /// 計算訂單的最佳包裝組合
    pub fn calc_optimal_packs(
        &self,
        request: &CalculatePackSizesRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<OptimalPackSizesResponse> {
        let quantity = request.validate()?;

        let sizes = self.repository.get_sizes_by_product_id(request.product_id)?;
        if sizes.is_empty() {
            tracing::warn!("產品 {} 沒有啟用中的包裝規格", request.product_id);
            return Err(PackError::NoActivePackSizes(request.product_id));
        }
        let pack_sizes = PackSizes::new(sizes)?;

        let solution = self
            .optimizer
            .optimize_with_cancel(quantity, &pack_sizes, cancel)?;

        Ok(OptimalPackSizesResponse::from(&solution))
    }

    /// 獲取儲存引用
    pub fn repository(&self) -> &R {
        &self.repository
    }
}
