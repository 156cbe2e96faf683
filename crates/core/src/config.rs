//! 설정 관리: propmatrix.toml 파싱 및 런타임 설정
//!
//! [`PropmatrixConfig`]는 로깅, 입력/출력 경로, 스캐너 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`PROPMATRIX_SDK_PATH=/opt/sdk` 형식)
//! 3. 설정 파일 (`propmatrix.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), propmatrix_core::error::PropmatrixError> {
//! use propmatrix_core::config::PropmatrixConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = PropmatrixConfig::load("propmatrix.toml")?;
//!
//! // 파일이 없어도 기본값 + 환경변수로 진행
//! let config = PropmatrixConfig::load_or_default("propmatrix.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PropmatrixConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, PropmatrixError};

/// 기본 설정 파일명
pub const DEFAULT_CONFIG_FILE: &str = "propmatrix.toml";

/// 파일 크기 상한 (바이트)
const MAX_FILE_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// propmatrix 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropmatrixConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 입력/출력 경로
    #[serde(default)]
    pub paths: PathsConfig,
    /// 스캐너 설정
    #[serde(default)]
    pub scanner: ScanConfig,
}

impl PropmatrixConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PropmatrixError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에 환경변수를 적용해 사용합니다.
    ///
    /// 파일이 존재하지만 파싱에 실패하면 에러를 반환합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PropmatrixError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path) {
            Ok(config) => config,
            Err(PropmatrixError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PropmatrixError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PropmatrixError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PropmatrixError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PropmatrixError> {
        toml::from_str(toml_str).map_err(|e| {
            PropmatrixError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 경로는 `PROPMATRIX_{FIELD}`, 그 외는 `PROPMATRIX_{SECTION}_{FIELD}` 형식입니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "PROPMATRIX_LOG_LEVEL");
        override_string(&mut self.general.log_format, "PROPMATRIX_LOG_FORMAT");

        // Paths
        override_string(&mut self.paths.sdk_path, "PROPMATRIX_SDK_PATH");
        override_string(&mut self.paths.docs_path, "PROPMATRIX_DOCS_PATH");
        override_string(&mut self.paths.samples_path, "PROPMATRIX_SAMPLES_PATH");
        override_string(&mut self.paths.engine_path, "PROPMATRIX_ENGINE_PATH");
        override_string(&mut self.paths.output_path, "PROPMATRIX_OUTPUT_PATH");

        // Scanner
        override_usize(
            &mut self.scanner.max_file_size,
            "PROPMATRIX_SCANNER_MAX_FILE_SIZE",
        );
        override_bool(&mut self.scanner.mine_docs, "PROPMATRIX_SCANNER_MINE_DOCS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PropmatrixError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        let required_paths = [
            ("paths.sdk_path", &self.paths.sdk_path),
            ("paths.docs_path", &self.paths.docs_path),
            ("paths.output_path", &self.paths.output_path),
        ];
        for (field, value) in required_paths {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "path must not be empty".to_owned(),
                }
                .into());
            }
        }

        if self.scanner.max_file_size == 0 || self.scanner.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "scanner.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 입력/출력 경로 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// SDK 루트 (컴포넌트 정의 파일은 `component/ets` 아래)
    pub sdk_path: String,
    /// 문서 루트 (`zh-cn/application-dev/ui` 아래를 탐색)
    pub docs_path: String,
    /// 샘플 코드 루트 (현재 판정 규칙에서는 사용하지 않음)
    pub samples_path: String,
    /// 엔진 루트 (메타데이터에만 기록)
    pub engine_path: String,
    /// 결과 파일 경로
    pub output_path: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sdk_path: "api/@internal".to_owned(),
            docs_path: "api_reference/docs".to_owned(),
            samples_path: "sample".to_owned(),
            engine_path: "arkui_ace_engine".to_owned(),
            output_path: "data/component_support_matrix.json".to_owned(),
        }
    }
}

impl PathsConfig {
    /// 결과 파일 경로
    pub fn output(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }
}

/// 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 읽을 입력 파일의 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 문서 기반 부정 근거 수집 여부
    pub mine_docs: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MiB
            mine_docs: true,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
