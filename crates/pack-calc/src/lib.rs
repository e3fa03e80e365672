//! # Pack Calculation Engine
//!
//! 最佳包裝組合計算引擎

pub mod cancel;
pub mod optimizer;

// Re-export 主要類型
pub use cancel::CancellationToken;
pub use optimizer::{optimize, PackOptimizer};
