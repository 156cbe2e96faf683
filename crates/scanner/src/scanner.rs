//! 스캔 오케스트레이터 -- 전체 스캔 흐름 관리
//!
//! ```text
//! 결과 파일 --> PriorMatrix ------------------------------+
//!                                                         |
//! <sdk>/component/ets --> ComponentCatalog --+            |
//!                     --> PropertyCatalog  --+--> StatusResolver --> SupportMatrix --> 결과 파일
//! <docs>/zh-cn/...    --> EvidenceMiner ------+
//! ```
//!
//! [`MatrixScanner::run`]은 결과 파일 잠금을 잡은 상태에서 스캔과 저장을
//! 수행합니다. [`MatrixScanner::scan_once`]는 저장하지 않습니다.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use propmatrix_core::store::{MatrixStore, PriorState};
use propmatrix_core::types::{
    ComponentInfo, MATRIX_VERSION, ScanMetadata, StatusCounts, SupportMatrix, now_timestamp,
};

use crate::catalog::ComponentCatalog;
use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::evidence::{EvidenceIndex, EvidenceMiner};
use crate::property::{PropertyCatalog, PropertySource};
use crate::resolver::StatusResolver;

/// 스캔 결과 요약
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// 새로 만든 매트릭스
    #[serde(skip)]
    pub matrix: SupportMatrix,
    pub output_path: String,
    pub prior_state: PriorState,
    pub property_source: PropertySource,
    pub components: usize,
    pub properties: usize,
    pub counts: StatusCounts,
    pub evidence_components: usize,
    pub evidence_entries: usize,
    pub docs_scanned: usize,
    /// 결과 파일에 기록했는지 여부
    pub persisted: bool,
    /// 덮어쓰기 전에 남긴 이전 결과 사본 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
    pub elapsed_ms: u64,
}

/// 지원 매트릭스 스캐너
///
/// [`MatrixScannerBuilder`]로 생성합니다.
#[derive(Debug)]
pub struct MatrixScanner {
    config: ScannerConfig,
    store: MatrixStore,
    miner: EvidenceMiner,
}

impl MatrixScanner {
    pub fn builder() -> MatrixScannerBuilder {
        MatrixScannerBuilder::new()
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn store(&self) -> &MatrixStore {
        &self.store
    }

    /// 스캔만 수행하고 결과 파일은 건드리지 않습니다.
    pub fn scan_once(&self) -> Result<ScanReport, ScannerError> {
        let started = Instant::now();

        let prior = self.store.load_prior();
        let prior_matrix = prior.matrix();

        let definition_dir = self.config.definition_dir();
        let mut catalog =
            ComponentCatalog::new(&definition_dir).with_max_file_size(self.config.max_file_size);
        let components = catalog.extract_components();

        let extraction = PropertyCatalog::new(&definition_dir)?
            .with_max_file_size(self.config.max_file_size)
            .extract_common_properties();
        let properties = extraction.properties;

        let evidence = self.mine_evidence();

        let mut resolver = StatusResolver::new(&catalog)?.with_evidence(&evidence);
        resolver.prepare(&properties)?;

        let mut resolved = BTreeMap::new();
        for component in &components {
            // 정의 파일은 컴포넌트당 한 번만 읽는다
            let definition = match catalog.component_content(component) {
                Ok(content) => content,
                Err(e) => {
                    warn!(component = %component, error = %e, "component definition unreadable");
                    None
                }
            };
            let prior_component = prior_matrix.and_then(|m| m.components.get(component));

            let mut info = ComponentInfo::new(component.clone());
            for property in &properties {
                let existing = prior_component.and_then(|c| c.properties.get(property));
                let record = resolver.resolve_with_definition(
                    component,
                    property,
                    existing,
                    definition.as_deref(),
                );
                info.properties.insert(property.clone(), record);
            }
            debug!(component = %component, "component resolved");
            resolved.insert(component.clone(), info);
        }

        let matrix = SupportMatrix {
            components: resolved,
            common_properties: properties,
            last_scanned: Some(now_timestamp()),
            metadata: Some(ScanMetadata {
                version: MATRIX_VERSION.to_owned(),
                sdk_path: self.config.sdk_path.display().to_string(),
                engine_path: self.config.engine_path.display().to_string(),
            }),
        };

        let counts = matrix.status_counts();
        let report = ScanReport {
            output_path: self.store.path().display().to_string(),
            prior_state: prior.state(),
            property_source: extraction.source,
            components: matrix.components.len(),
            properties: matrix.common_properties.len(),
            counts,
            evidence_components: evidence.component_count(),
            evidence_entries: evidence.entry_count(),
            docs_scanned: evidence.files_scanned(),
            persisted: false,
            backup_path: None,
            elapsed_ms: elapsed_ms(started),
            matrix,
        };

        info!(
            components = report.components,
            properties = report.properties,
            supported = counts.supported,
            unknown = counts.unknown,
            manual = counts.manual,
            "scan completed"
        );
        Ok(report)
    }

    /// 잠금을 잡고 스캔한 뒤 결과 파일에 저장합니다.
    ///
    /// 다른 writer가 잠금을 잡고 있으면 [`ScannerError::Store`]로 즉시
    /// 실패합니다. 저장 실패는 [`ScannerError::Persist`]입니다.
    /// 이전 결과가 스키마와 어긋났다면 덮어쓰기 전에 `<output>.bak`으로 복사합니다.
    pub fn run(&self) -> Result<ScanReport, ScannerError> {
        let started = Instant::now();
        let _lock = self.store.lock()?;

        let mut report = self.scan_once()?;
        if matches!(
            report.prior_state,
            PriorState::Recovered | PriorState::Malformed
        ) {
            let backup = self
                .store
                .backup()
                .map_err(|source| ScannerError::Persist {
                    path: self.store.path().display().to_string(),
                    source,
                })?;
            report.backup_path = backup.map(|path| path.display().to_string());
        }
        self.store
            .save(&report.matrix)
            .map_err(|source| ScannerError::Persist {
                path: self.store.path().display().to_string(),
                source,
            })?;

        report.persisted = true;
        report.elapsed_ms = elapsed_ms(started);
        info!(path = %self.store.path().display(), "matrix persisted");
        Ok(report)
    }

    /// 문서 부정 근거를 수집합니다. 비활성화되어 있으면 빈 인덱스입니다.
    pub fn mine_evidence(&self) -> EvidenceIndex {
        if !self.config.mine_docs {
            debug!("documentation mining disabled");
            return EvidenceIndex::new();
        }
        self.miner.mine_dir(&self.config.docs_path)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// [`MatrixScanner`] 빌더
#[derive(Debug, Default)]
pub struct MatrixScannerBuilder {
    config: ScannerConfig,
}

impl MatrixScannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// 설정을 검증하고 휴리스틱 규칙을 컴파일합니다.
    pub fn build(self) -> Result<MatrixScanner, ScannerError> {
        self.config.validate()?;

        let miner = EvidenceMiner::new()?.with_max_file_size(self.config.max_file_size);
        let store = MatrixStore::new(&self.config.output_path);

        Ok(MatrixScanner {
            config: self.config,
            store,
            miner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfigBuilder;

    #[test]
    fn build_rejects_invalid_config() {
        let config = ScannerConfig {
            max_file_size: 0,
            ..ScannerConfig::default()
        };
        let err = MatrixScanner::builder().config(config).build().unwrap_err();
        assert!(matches!(err, ScannerError::Config { .. }));
    }

    #[test]
    fn disabled_mining_yields_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScannerConfigBuilder::new()
            .sdk_path(dir.path())
            .docs_path(dir.path())
            .output_path(dir.path().join("m.json"))
            .mine_docs(false)
            .build()
            .unwrap();
        let scanner = MatrixScanner::builder().config(config).build().unwrap();
        assert!(scanner.mine_evidence().is_empty());
    }

    #[test]
    fn empty_sdk_scan_uses_fallback_properties() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScannerConfigBuilder::new()
            .sdk_path(dir.path().join("sdk"))
            .docs_path(dir.path().join("docs"))
            .output_path(dir.path().join("m.json"))
            .build()
            .unwrap();
        let scanner = MatrixScanner::builder().config(config).build().unwrap();

        let report = scanner.scan_once().unwrap();
        assert_eq!(report.components, 0);
        assert_eq!(report.property_source, PropertySource::Fallback);
        assert!(report.properties > 150);
        assert_eq!(report.prior_state, PriorState::Absent);
        assert!(!report.persisted);
        assert!(!dir.path().join("m.json").exists());
    }
}
