//! 컴포넌트 카탈로그: 정의 파일명에서 정규화된 컴포넌트명 집합을 만듭니다.
//!
//! 정의 디렉토리의 `*.d.ts` 파일 하나가 컴포넌트 하나에 대응합니다.
//! 공통 기반 정의(`common.d.ts`), `_`로 시작하는 파일, 비컴포넌트 목록에 있는
//! 파일은 제외합니다.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ScannerError;
use crate::source::read_limited;

/// 공통 기반 정의 파일명
pub const BASE_DEFINITION_FILE: &str = "common.d.ts";

const DEFINITION_EXT: &str = ".d.ts";

/// 컴포넌트가 아닌 정의 파일 (정규화 후 비교)
const EXCLUDED_NAMES: &[&str] = &[
    "common",
    "enums",
    "units",
    "index-full",
    "common_ts_ets_api",
    "animator",
    "gesture",
    "focus",
    "lifecycle",
    "state_management",
    "image_common",
    "text_common",
    "component3d",
];

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// 컴포넌트 카탈로그
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    dir: PathBuf,
    max_file_size: usize,
    /// 정규화된 이름 -> 정의 파일 경로
    files: BTreeMap<String, PathBuf>,
}

impl ComponentCatalog {
    pub fn new(definition_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: definition_dir.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            files: BTreeMap::new(),
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn definition_dir(&self) -> &Path {
        &self.dir
    }

    /// 정의 디렉토리를 읽어 정렬된 컴포넌트명 목록을 반환합니다.
    ///
    /// 디렉토리가 없으면 경고 후 빈 목록을 반환합니다.
    pub fn extract_components(&mut self) -> Vec<String> {
        self.files.clear();

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    dir = %self.dir.display(),
                    error = %e,
                    "component definition directory unavailable"
                );
                return Vec::new();
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "failed to read directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(DEFINITION_EXT) else {
                continue;
            };
            if file_name == BASE_DEFINITION_FILE || stem.starts_with('_') {
                continue;
            }

            let name = to_pascal_case(stem);
            if name.is_empty() {
                continue;
            }
            if is_excluded(&name) {
                debug!(file = file_name, "non-component definition, skipping");
                continue;
            }

            // 같은 이름으로 정규화되는 파일이 둘 이상이면 경로가 앞서는 쪽을 사용
            self.files
                .entry(name)
                .and_modify(|existing| {
                    if path < *existing {
                        *existing = path.clone();
                    }
                })
                .or_insert(path);
        }

        info!(
            dir = %self.dir.display(),
            components = self.files.len(),
            "component catalog built"
        );
        self.components()
    }

    /// 마지막 추출 결과 (정렬됨)
    pub fn components(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// 컴포넌트 정의 파일 경로
    ///
    /// 추출 중에 본 이름이면 해당 파일, 아니면 `<소문자 이름>.d.ts`입니다.
    pub fn definition_path(&self, name: &str) -> PathBuf {
        self.files
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{}{DEFINITION_EXT}", name.to_lowercase())))
    }

    pub fn component_exists(&self, name: &str) -> bool {
        self.definition_path(name).is_file()
    }

    /// 컴포넌트 정의 파일 내용
    ///
    /// 파일이 없으면 `Ok(None)`.
    pub fn component_content(&self, name: &str) -> Result<Option<String>, ScannerError> {
        read_limited(&self.definition_path(name), self.max_file_size)
    }
}

/// 파일명 stem을 PascalCase로 변환합니다.
///
/// `_` 또는 공백으로 나눈 각 조각의 첫 글자는 대문자, 나머지는 소문자로 만듭니다.
pub fn to_pascal_case(stem: &str) -> String {
    stem.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_excluded(name: &str) -> bool {
    let normalized = normalize(name);
    EXCLUDED_NAMES
        .iter()
        .any(|excluded| normalize(excluded) == normalized)
}
