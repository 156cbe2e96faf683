//! 스캐너 에러 타입
//!
//! [`ScannerError`]는 스캐너 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ScannerError> for PropmatrixError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **설정**: `Config`
//! - **휴리스틱 규칙 컴파일**: `Rule`
//! - **입력 읽기**: `ReadFailure`, `FileTooBig` (스캔 중에는 로그 후 계속 진행)
//! - **결과 저장**: `Store`, `Persist` (치명적)

use propmatrix_core::error::{PropmatrixError, ScanError, StoreError};

/// 스캐너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 패턴 컴파일 실패
    #[error("invalid pattern '{rule_id}': {reason}")]
    Rule {
        /// 규칙 ID
        rule_id: String,
        /// 컴파일 실패 사유
        reason: String,
    },

    /// 입력 파일 읽기 실패
    #[error("read failure: {path}: {source}")]
    ReadFailure {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 결과 저장소 에러 (잠금 획득 실패 등)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 결과 파일 저장 실패
    #[error("failed to persist matrix to {path}: {source}")]
    Persist {
        /// 결과 파일 경로
        path: String,
        /// 저장소 에러
        source: StoreError,
    },
}

impl From<ScannerError> for PropmatrixError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::Store(e) => PropmatrixError::Store(e),
            ScannerError::Persist { .. } => {
                PropmatrixError::Scan(ScanError::PersistFailed(err.to_string()))
            }
            ScannerError::ReadFailure { .. } | ScannerError::FileTooBig { .. } => {
                PropmatrixError::Scan(ScanError::ReadFailed(err.to_string()))
            }
            ScannerError::Config { .. } | ScannerError::Rule { .. } => {
                PropmatrixError::Scan(ScanError::Setup(err.to_string()))
            }
        }
    }
}
