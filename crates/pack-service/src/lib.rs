//! # Pack Service
//!
//! 包裝規格來源與計算服務

pub mod repository;
pub mod service;

// Re-export 主要類型
pub use repository::{InMemoryPackSizeRepository, PackSizeRepository};
pub use service::PackSizeService;
