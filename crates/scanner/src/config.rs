//! 스캐너 설정
//!
//! [`ScannerConfig`]는 core의 [`PropmatrixConfig`]에서 경로와 스캐너 섹션을 가져와
//! 스캔에 필요한 값만 담습니다.
//!
//! # 사용 예시
//!
//! ```
//! use propmatrix_scanner::ScannerConfigBuilder;
//!
//! let config = ScannerConfigBuilder::new()
//!     .sdk_path("/opt/sdk")
//!     .output_path("out/matrix.json")
//!     .build()
//!     .unwrap();
//! assert!(config.definition_dir().ends_with("component/ets"));
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use propmatrix_core::config::{PathsConfig, PropmatrixConfig, ScanConfig};

use crate::error::ScannerError;

/// SDK 루트 아래 컴포넌트 정의 디렉토리
pub const DEFINITION_SUBDIR: &str = "component/ets";

/// 문서 루트 아래 탐색 대상 디렉토리
pub const DOCS_UI_SUBDIR: &str = "zh-cn/application-dev/ui";

/// 파일 크기 상한값
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MiB

/// 스캐너 설정
#[derive(Debug, Clone, Serialize)]
pub struct ScannerConfig {
    /// SDK 루트
    pub sdk_path: PathBuf,
    /// 문서 루트
    pub docs_path: PathBuf,
    /// 샘플 코드 루트 (판정에 사용하지 않음)
    pub samples_path: PathBuf,
    /// 엔진 루트 (메타데이터 전용)
    pub engine_path: PathBuf,
    /// 결과 파일 경로
    pub output_path: PathBuf,
    /// 입력 파일 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 문서 부정 근거 수집 여부
    pub mine_docs: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_sections(&PathsConfig::default(), &ScanConfig::default())
    }
}

impl ScannerConfig {
    /// core 설정에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &PropmatrixConfig) -> Self {
        Self::from_sections(&core.paths, &core.scanner)
    }

    fn from_sections(paths: &PathsConfig, scanner: &ScanConfig) -> Self {
        Self {
            sdk_path: PathBuf::from(&paths.sdk_path),
            docs_path: PathBuf::from(&paths.docs_path),
            samples_path: PathBuf::from(&paths.samples_path),
            engine_path: PathBuf::from(&paths.engine_path),
            output_path: PathBuf::from(&paths.output_path),
            max_file_size: scanner.max_file_size,
            mine_docs: scanner.mine_docs,
        }
    }

    /// 컴포넌트 정의 디렉토리 (`<sdk>/component/ets`)
    pub fn definition_dir(&self) -> PathBuf {
        self.sdk_path.join(DEFINITION_SUBDIR)
    }

    /// 문서 탐색 디렉토리 (`<docs>/zh-cn/application-dev/ui`)
    pub fn docs_ui_dir(&self) -> PathBuf {
        self.docs_path.join(DOCS_UI_SUBDIR)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_file_size`: 1-104857600 (100MiB)
    /// - `sdk_path`, `output_path`: 비어있으면 안 됨
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(ScannerError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }

        for (field, path) in [("sdk_path", &self.sdk_path), ("output_path", &self.output_path)] {
            if is_blank(path) {
                return Err(ScannerError::Config {
                    field: field.to_owned(),
                    reason: "path must not be empty".to_owned(),
                });
            }
        }

        Ok(())
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// [`ScannerConfig`] 빌더
#[derive(Default)]
pub struct ScannerConfigBuilder {
    config: ScannerConfig,
}

impl ScannerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// core 설정을 시작값으로 사용합니다.
    pub fn from_core(core: &PropmatrixConfig) -> Self {
        Self {
            config: ScannerConfig::from_core(core),
        }
    }

    pub fn sdk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.sdk_path = path.into();
        self
    }

    pub fn docs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.docs_path = path.into();
        self
    }

    pub fn samples_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.samples_path = path.into();
        self
    }

    pub fn engine_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.engine_path = path.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 문서 부정 근거 수집 여부를 설정합니다.
    pub fn mine_docs(mut self, enabled: bool) -> Self {
        self.config.mine_docs = enabled;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ScannerError::Config` 반환
    pub fn build(self) -> Result<ScannerConfig, ScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
