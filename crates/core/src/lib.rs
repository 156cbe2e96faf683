#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod store;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, PropmatrixError, ScanError, StoreError};

// 설정
pub use config::PropmatrixConfig;

// 저장소
pub use store::{MatrixStore, PriorMatrix, PriorState, PropertyOverride, StoreLock};

// 도메인 타입
pub use types::{
    ComponentInfo, PropertySupport, RecordSource, ScanMetadata, StatusCounts, SupportMatrix,
    SupportStatus,
};
