//! 에러 타입: 도메인별 에러 정의

/// propmatrix 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PropmatrixError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 결과 저장소 에러
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// 스캔 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 결과 저장소 에러
///
/// 결과 파일 읽기/쓰기와 수동 편집 연산(경계 연산)에서 발생합니다.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 매트릭스에 없는 컴포넌트
    #[error("component not found: {component}")]
    ComponentNotFound { component: String },

    /// 컴포넌트에 없는 속성
    #[error("property not found: {component}.{property}")]
    PropertyNotFound { component: String, property: String },

    /// 일괄 쓰기 문서가 스키마를 만족하지 않음
    #[error("invalid matrix document: {reason}")]
    InvalidDocument { reason: String },

    /// 기존 결과 파일 파싱 실패
    #[error("malformed matrix file {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// 다른 writer가 잠금을 보유 중
    #[error("matrix file is locked by another writer: {path} (remove the lock file if no writer is running)")]
    Locked { path: String },

    /// 결과 파일 읽기 실패
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// 결과 파일 쓰기 실패
    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    /// JSON 직렬화 실패
    #[error("failed to encode matrix: {reason}")]
    Encode { reason: String },
}

/// 스캔 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 입력 파일 읽기 실패
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// 결과 저장 실패
    #[error("persist failed: {0}")]
    PersistFailed(String),

    /// 스캐너 구성 실패
    #[error("scanner setup failed: {0}")]
    Setup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: PropmatrixError = ConfigError::FileNotFound {
            path: "propmatrix.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, PropmatrixError::Config(_)));
        assert!(err.to_string().contains("propmatrix.toml"));
    }

    #[test]
    fn property_not_found_display() {
        let err = StoreError::PropertyNotFound {
            component: "Button".to_owned(),
            property: "opacity".to_owned(),
        };
        assert_eq!(err.to_string(), "property not found: Button.opacity");
    }

    #[test]
    fn locked_display_mentions_lock_file() {
        let err = StoreError::Locked {
            path: "data/matrix.json.lock".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/matrix.json.lock"));
        assert!(msg.contains("lock file"));
    }

    #[test]
    fn store_error_converts_to_top_level() {
        let err: PropmatrixError = StoreError::ComponentNotFound {
            component: "Nope".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            PropmatrixError::Store(StoreError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn scan_error_display() {
        let err = ScanError::PersistFailed("disk full".to_owned());
        assert_eq!(err.to_string(), "persist failed: disk full");
    }
}
