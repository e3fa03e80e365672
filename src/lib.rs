//! # Pack Calculator
//!
//! 訂單包裝計算：根據產品可用的包裝規格，選出出貨件數最少、包數最少的組合。

pub use pack_calc::{optimize, CancellationToken, PackOptimizer};
pub use pack_core::*;
pub use pack_service::{InMemoryPackSizeRepository, PackSizeRepository, PackSizeService};
