//! 도메인 타입: 지원 매트릭스 데이터 모델
//!
//! 결과 파일(`component_support_matrix.json`)의 JSON 스키마와 1:1로 대응합니다.
//! 필드명은 camelCase로 직렬화됩니다.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 결과 문서 스키마 버전
pub const MATRIX_VERSION: &str = "1.0.0";

/// (컴포넌트, 속성) 쌍의 지원 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    /// 지원
    Supported,
    /// 미지원
    Unsupported,
    /// 판단 불가
    Unknown,
}

impl SupportStatus {
    /// 대소문자 구분 없이 문자열에서 상태를 파싱합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "supported" | "yes" => Some(Self::Supported),
            "unsupported" | "no" => Some(Self::Unsupported),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// 직렬화 형식과 같은 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 레코드를 마지막으로 기록한 주체
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// 자동 판정 (스캔마다 교체됨)
    Auto,
    /// 사람이 직접 입력 (재스캔에도 유지됨)
    Manual,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// 속성 지원 레코드
///
/// `source`가 `Manual`인 레코드는 자동 판정이 절대 변경하지 않습니다.
/// `source`가 없는 레코드(손으로 편집한 파일)는 자동 레코드로 취급합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySupport {
    /// 지원 상태
    pub is_supported: SupportStatus,
    /// 담당자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// 마지막 갱신 시각 (RFC 3339, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// 기록 주체
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RecordSource>,
    /// 판정 근거 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PropertySupport {
    /// 현재 시각으로 자동 레코드를 생성합니다.
    pub fn auto(status: SupportStatus, note: impl Into<String>) -> Self {
        Self {
            is_supported: status,
            owner: None,
            last_updated: Some(now_timestamp()),
            source: Some(RecordSource::Auto),
            notes: Some(note.into()),
        }
    }

    /// 수동 입력 레코드인지 확인합니다.
    pub fn is_manual(&self) -> bool {
        self.source == Some(RecordSource::Manual)
    }
}

/// 컴포넌트별 속성 지원 현황
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// 정규화된 컴포넌트명 (PascalCase)
    pub name: String,
    /// 속성명 -> 지원 레코드
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySupport>,
}

impl ComponentInfo {
    /// 속성이 비어 있는 컴포넌트를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// 이 컴포넌트의 상태별 레코드 수
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for record in self.properties.values() {
            counts.add(record);
        }
        counts
    }
}

/// 스캔 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub version: String,
    pub sdk_path: String,
    pub engine_path: String,
}

/// 컴포넌트 × 공통 속성 지원 매트릭스
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMatrix {
    pub components: BTreeMap<String, ComponentInfo>,
    pub common_properties: Vec<String>,
    /// 마지막 스캔 시각. 스캔 이력이 없으면 `null`
    #[serde(default)]
    pub last_scanned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ScanMetadata>,
}

impl SupportMatrix {
    /// 결과 파일이 없을 때 제공되는 빈 문서를 생성합니다.
    pub fn empty() -> Self {
        Self {
            components: BTreeMap::new(),
            common_properties: Vec::new(),
            last_scanned: None,
            metadata: Some(ScanMetadata {
                version: MATRIX_VERSION.to_owned(),
                sdk_path: String::new(),
                engine_path: String::new(),
            }),
        }
    }

    /// (컴포넌트, 속성) 레코드를 조회합니다.
    pub fn record(&self, component: &str, property: &str) -> Option<&PropertySupport> {
        self.components
            .get(component)
            .and_then(|c| c.properties.get(property))
    }

    /// 상태별 레코드 수를 집계합니다.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for record in self.components.values().flat_map(|c| c.properties.values()) {
            counts.add(record);
        }
        counts
    }
}

/// 상태별 레코드 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub supported: usize,
    pub unsupported: usize,
    pub unknown: usize,
    /// 수동 레코드 수 (상태와 무관)
    pub manual: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.supported + self.unsupported + self.unknown
    }

    fn add(&mut self, record: &PropertySupport) {
        match record.is_supported {
            SupportStatus::Supported => self.supported += 1,
            SupportStatus::Unsupported => self.unsupported += 1,
            SupportStatus::Unknown => self.unknown += 1,
        }
        if record.is_manual() {
            self.manual += 1;
        }
    }
}

/// 현재 UTC 시각을 밀리초 정밀도의 RFC 3339 문자열로 반환합니다.
///
/// 예: `2024-01-15T12:00:00.000Z`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
