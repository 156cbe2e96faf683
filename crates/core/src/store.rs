//! 결과 저장소: 매트릭스 파일 읽기/쓰기와 수동 편집 연산
//!
//! [`MatrixStore`]는 결과 파일 하나를 소유합니다.
//!
//! - 쓰기는 같은 디렉토리의 임시 파일에 기록한 뒤 rename 하므로
//!   읽는 쪽이 쓰다 만 파일을 보지 않습니다.
//! - read-modify-write 연산(스캔, 속성 오버라이드, 담당자 변경, 일괄 쓰기)은
//!   [`StoreLock`]을 잡은 상태에서만 수행합니다. 잠금 파일은
//!   `<output>.lock`이며 `create_new`로 생성되어 두 번째 writer는 즉시
//!   [`StoreError::Locked`]로 실패합니다.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::types::{
    ComponentInfo, PropertySupport, RecordSource, ScanMetadata, SupportMatrix, SupportStatus,
    now_timestamp,
};

/// 이전 스캔 결과 로딩 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorState {
    /// 결과 파일 없음 (콜드 스타트)
    Absent,
    /// 정상 로드
    Loaded,
    /// JSON이지만 스키마와 어긋난 레코드가 있어 해석 가능한 레코드만 로드
    Recovered,
    /// 읽기 실패 또는 JSON 아님 (콜드 스타트로 취급)
    Malformed,
}

/// 스캔 시작 시 읽은 이전 결과
#[derive(Debug, Clone)]
pub enum PriorMatrix {
    Absent,
    Loaded(SupportMatrix),
    /// 레코드 단위로 복구한 매트릭스. `skipped`는 버린 레코드 수
    Recovered {
        matrix: SupportMatrix,
        skipped: usize,
    },
    Malformed {
        reason: String,
    },
}

impl PriorMatrix {
    /// 사용할 수 있는 레코드가 있으면 매트릭스를 반환합니다.
    pub fn matrix(&self) -> Option<&SupportMatrix> {
        match self {
            Self::Loaded(matrix) | Self::Recovered { matrix, .. } => Some(matrix),
            Self::Absent | Self::Malformed { .. } => None,
        }
    }

    pub fn state(&self) -> PriorState {
        match self {
            Self::Absent => PriorState::Absent,
            Self::Loaded(_) => PriorState::Loaded,
            Self::Recovered { .. } => PriorState::Recovered,
            Self::Malformed { .. } => PriorState::Malformed,
        }
    }
}

/// 속성 단위 수동 오버라이드 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyOverride {
    /// 새 지원 상태
    pub status: SupportStatus,
    /// 담당자. `None` 또는 빈 문자열이면 기존 값 유지
    pub owner: Option<String>,
    /// 메모. `None` 또는 빈 문자열이면 기존 값 유지
    pub notes: Option<String>,
}

impl PropertyOverride {
    pub fn new(status: SupportStatus) -> Self {
        Self {
            status,
            owner: None,
            notes: None,
        }
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// 매트릭스 결과 파일 저장소
#[derive(Debug, Clone)]
pub struct MatrixStore {
    path: PathBuf,
}

impl MatrixStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 결과 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 쓰기 잠금을 획득합니다.
    ///
    /// 반환된 guard가 drop 될 때 잠금 파일이 삭제됩니다.
    pub fn lock(&self) -> Result<StoreLock, StoreError> {
        StoreLock::acquire(&self.path)
    }

    /// 결과 파일을 엄격하게 로드합니다.
    ///
    /// 파일이 없으면 `Ok(None)`, 파싱에 실패하면 [`StoreError::Malformed`]를 반환합니다.
    pub fn load(&self) -> Result<Option<SupportMatrix>, StoreError> {
        let Some(content) = self.read_content()? else {
            return Ok(None);
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| self.malformed(e))
    }

    /// 스캔용으로 이전 결과를 관대하게 로드합니다.
    ///
    /// 스키마와 맞지 않는 레코드는 하나씩 건너뛰고 나머지는 유지하므로
    /// 레코드 하나 때문에 수동 레코드가 사라지지 않습니다. 읽기 실패나
    /// JSON이 아닌 파일만 콜드 스타트로 처리합니다.
    pub fn load_prior(&self) -> PriorMatrix {
        let content = match self.read_content() {
            Ok(Some(content)) => content,
            Ok(None) => {
                info!(path = %self.path.display(), "no prior matrix, starting cold");
                return PriorMatrix::Absent;
            }
            Err(e) => return self.cold_start(e),
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => return self.cold_start(self.malformed(e)),
        };

        let strict_error = match SupportMatrix::deserialize(&value) {
            Ok(matrix) => {
                debug!(
                    path = %self.path.display(),
                    components = matrix.components.len(),
                    "prior matrix loaded"
                );
                return PriorMatrix::Loaded(matrix);
            }
            Err(e) => e,
        };

        match recover_matrix(&value) {
            Some((matrix, skipped)) => {
                warn!(
                    path = %self.path.display(),
                    error = %strict_error,
                    skipped,
                    components = matrix.components.len(),
                    "prior matrix does not match the schema, keeping readable records"
                );
                PriorMatrix::Recovered { matrix, skipped }
            }
            None => self.cold_start(self.malformed(strict_error)),
        }
    }

    /// 결과 파일을 `<output>.bak`으로 복사합니다.
    ///
    /// 스키마와 어긋난 파일을 덮어쓰기 전에 호출합니다. 파일이 없으면 `Ok(None)`.
    pub fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = sibling_path(&self.path, ".bak");
        fs::copy(&self.path, &backup).map_err(|e| StoreError::Write {
            path: backup.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(path = %backup.display(), "previous matrix backed up");
        Ok(Some(backup))
    }

    /// 결과 파일 원문을 반환합니다.
    ///
    /// 파일이 없으면 빈 매트릭스 문서를 반환합니다.
    pub fn read_raw(&self) -> Result<String, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => encode(&SupportMatrix::empty()),
            Err(e) => Err(StoreError::Read {
                path: self.display(),
                source: e,
            }),
        }
    }

    /// 매트릭스를 파일에 기록합니다 (잠금 없음).
    ///
    /// 호출자가 [`MatrixStore::lock`]으로 잠금을 보유하고 있어야 합니다.
    pub fn save(&self, matrix: &SupportMatrix) -> Result<(), StoreError> {
        let json = encode(matrix)?;
        self.write_atomic(json.as_bytes())?;
        debug!(path = %self.path.display(), bytes = json.len(), "matrix written");
        Ok(())
    }

    /// 문서 전체를 교체합니다 (일괄 쓰기).
    ///
    /// `components`와 `commonProperties` 키가 모두 있어야 하며,
    /// 매트릭스 스키마로 해석 가능해야 합니다. 검증을 통과한 문서는
    /// 받은 원문 그대로 기록되므로 스키마 밖의 필드도 [`MatrixStore::read_raw`]로
    /// 다시 읽힙니다.
    pub fn replace_raw(&self, document: &str) -> Result<SupportMatrix, StoreError> {
        let value: serde_json::Value =
            serde_json::from_str(document).map_err(|e| StoreError::InvalidDocument {
                reason: format!("not valid JSON: {e}"),
            })?;

        let object = value.as_object().ok_or_else(|| StoreError::InvalidDocument {
            reason: "document must be a JSON object".to_owned(),
        })?;
        for key in ["components", "commonProperties"] {
            if !object.contains_key(key) {
                return Err(StoreError::InvalidDocument {
                    reason: format!("missing required key '{key}'"),
                });
            }
        }

        let matrix =
            SupportMatrix::deserialize(&value).map_err(|e| StoreError::InvalidDocument {
                reason: e.to_string(),
            })?;

        let _lock = self.lock()?;
        self.write_atomic(document.as_bytes())?;
        info!(
            path = %self.path.display(),
            components = matrix.components.len(),
            "matrix replaced"
        );
        Ok(matrix)
    }

    /// (컴포넌트, 속성) 레코드를 수동으로 덮어씁니다.
    ///
    /// 상태는 항상 교체되고, 담당자/메모는 값이 주어진 경우에만 교체됩니다.
    /// 결과 레코드는 `source = manual`이 되어 이후 스캔에서 유지됩니다.
    pub fn set_property(
        &self,
        component: &str,
        property: &str,
        update: PropertyOverride,
    ) -> Result<PropertySupport, StoreError> {
        let _lock = self.lock()?;
        let mut matrix = self.load()?.unwrap_or_else(SupportMatrix::empty);

        let info =
            matrix
                .components
                .get_mut(component)
                .ok_or_else(|| StoreError::ComponentNotFound {
                    component: component.to_owned(),
                })?;
        let record =
            info.properties
                .get_mut(property)
                .ok_or_else(|| StoreError::PropertyNotFound {
                    component: component.to_owned(),
                    property: property.to_owned(),
                })?;

        record.is_supported = update.status;
        if let Some(owner) = non_empty(update.owner) {
            record.owner = Some(owner);
        }
        if let Some(notes) = non_empty(update.notes) {
            record.notes = Some(notes);
        }
        record.source = Some(RecordSource::Manual);
        record.last_updated = Some(now_timestamp());
        let updated = record.clone();

        self.save(&matrix)?;
        info!(
            component,
            property,
            status = %updated.is_supported,
            "manual override recorded"
        );
        Ok(updated)
    }

    /// 컴포넌트의 모든 속성 담당자를 변경합니다.
    ///
    /// 상태와 기록 주체는 바꾸지 않습니다. 변경된 레코드 수를 반환합니다.
    pub fn set_owner(&self, component: &str, owner: &str) -> Result<usize, StoreError> {
        let _lock = self.lock()?;
        let mut matrix = self.load()?.unwrap_or_else(SupportMatrix::empty);

        let info =
            matrix
                .components
                .get_mut(component)
                .ok_or_else(|| StoreError::ComponentNotFound {
                    component: component.to_owned(),
                })?;
        for record in info.properties.values_mut() {
            record.owner = Some(owner.to_owned());
        }
        let updated = info.properties.len();

        self.save(&matrix)?;
        info!(component, owner, updated, "component owner updated");
        Ok(updated)
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir).map_err(|e| self.write_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(bytes).map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;
        Ok(())
    }

    fn read_content(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                path: self.display(),
                source: e,
            }),
        }
    }

    fn malformed(&self, e: serde_json::Error) -> StoreError {
        StoreError::Malformed {
            path: self.display(),
            reason: e.to_string(),
        }
    }

    fn cold_start(&self, e: StoreError) -> PriorMatrix {
        warn!(
            path = %self.path.display(),
            error = %e,
            "prior matrix unusable, starting cold"
        );
        PriorMatrix::Malformed {
            reason: e.to_string(),
        }
    }

    fn write_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.display(),
            reason: e.to_string(),
        }
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

/// 결과 파일 쓰기 잠금 guard
///
/// drop 시 잠금 파일을 삭제합니다. 프로세스가 비정상 종료되면 잠금 파일이
/// 남으므로 실행 중인 writer가 없음을 확인한 뒤 수동으로 지워야 합니다.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    fn acquire(target: &Path) -> Result<Self, StoreError> {
        let path = lock_path(target);
        let dir = parent_dir(&path);
        fs::create_dir_all(dir).map_err(|e| StoreError::Write {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", std::process::id()) {
                    debug!(path = %path.display(), error = %e, "failed to record lock owner");
                }
                debug!(path = %path.display(), "store lock acquired");
                Ok(Self { path })
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(StoreError::Locked {
                path: path.display().to_string(),
            }),
            Err(e) => Err(StoreError::Write {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// 잠금 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to release store lock");
        } else {
            debug!(path = %self.path.display(), "store lock released");
        }
    }
}

fn lock_path(target: &Path) -> PathBuf {
    sibling_path(target, ".lock")
}

fn sibling_path(target: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// 스키마와 어긋난 문서에서 해석 가능한 레코드만 골라냅니다.
///
/// `components`가 객체가 아니면 `None`. 반환값의 두 번째 요소는 버린 레코드 수.
fn recover_matrix(value: &serde_json::Value) -> Option<(SupportMatrix, usize)> {
    let object = value.as_object()?;
    let components = object.get("components")?.as_object()?;

    let mut matrix = SupportMatrix::empty();
    let mut skipped = 0;
    for (key, component) in components {
        let name = component
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(key.as_str());
        let mut info = ComponentInfo::new(name);

        let properties = component
            .get("properties")
            .and_then(serde_json::Value::as_object);
        for (property, record) in properties.into_iter().flatten() {
            match PropertySupport::deserialize(record) {
                Ok(record) => {
                    info.properties.insert(property.clone(), record);
                }
                Err(e) => {
                    warn!(
                        component = %key,
                        property = %property,
                        error = %e,
                        "skipping unreadable prior record"
                    );
                    skipped += 1;
                }
            }
        }
        matrix.components.insert(key.clone(), info);
    }

    if let Some(common) = object.get("commonProperties") {
        matrix.common_properties = Vec::<String>::deserialize(common).unwrap_or_default();
    }
    matrix.last_scanned = object
        .get("lastScanned")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    matrix.metadata = object
        .get("metadata")
        .and_then(|metadata| ScanMetadata::deserialize(metadata).ok());
    Some((matrix, skipped))
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn encode(matrix: &SupportMatrix) -> Result<String, StoreError> {
    serde_json::to_string_pretty(matrix).map_err(|e| StoreError::Encode {
        reason: e.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
