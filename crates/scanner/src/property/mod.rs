//! 공통 속성 카탈로그
//!
//! 공통 기반 정의 파일(`common.d.ts`)에서 `declare class CommonMethod` 블록을 찾아
//! 메서드 형태의 선언 이름을 수집합니다. 블록 경계는 중괄호 깊이를 직접 세어
//! 결정합니다(메서드 시그니처 안의 중첩 중괄호 때문에 단순 문자열 검색은 불가).
//!
//! 기반 파일이 없거나, 블록을 찾지 못했거나, 결과가 비어 있으면
//! [`FALLBACK_PROPERTIES`]를 사용합니다.

pub mod fallback;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::BASE_DEFINITION_FILE;
use crate::error::ScannerError;
use crate::source::read_limited;

pub use fallback::FALLBACK_PROPERTIES;

/// 공통 기반 계약 선언
pub const BASE_CLASS_DECLARATION: &str = "declare class CommonMethod";

/// 속성이 아닌 메서드
const EXCLUDED_METHODS: &[&str] = &[
    "constructor",
    "onChildTouchTest",
    "gesture",
    "parallelGesture",
    "priorityGesture",
];

/// 정확히 두 칸 들여쓴 `identifier(` 형태의 줄
const METHOD_LINE_PATTERN: &str = r"(?m)^[^\S\r\n]{2}([A-Za-z_][A-Za-z0-9_]*)\s*\(";

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// 속성 목록의 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertySource {
    /// 기반 정의에서 추출
    Extracted,
    /// 내장 목록 사용
    Fallback,
}

impl fmt::Display for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extracted => f.write_str("extracted"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// 공통 속성 추출 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyExtraction {
    /// 중복 제거 후 사전순 정렬된 속성명
    pub properties: Vec<String>,
    pub source: PropertySource,
}

/// 공통 속성 카탈로그
#[derive(Debug, Clone)]
pub struct PropertyCatalog {
    base_file: PathBuf,
    max_file_size: usize,
    method_line: Regex,
}

impl PropertyCatalog {
    /// 정의 디렉토리의 `common.d.ts`를 대상으로 카탈로그를 생성합니다.
    pub fn new(definition_dir: impl AsRef<Path>) -> Result<Self, ScannerError> {
        let method_line = Regex::new(METHOD_LINE_PATTERN).map_err(|e| ScannerError::Rule {
            rule_id: "method-line".to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_file: definition_dir.as_ref().join(BASE_DEFINITION_FILE),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            method_line,
        })
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn base_file(&self) -> &Path {
        &self.base_file
    }

    /// 공통 속성 목록을 추출합니다.
    pub fn extract_common_properties(&self) -> PropertyExtraction {
        match self.extract_from_base() {
            Some(properties) if !properties.is_empty() => {
                info!(
                    path = %self.base_file.display(),
                    properties = properties.len(),
                    "common properties extracted"
                );
                PropertyExtraction {
                    properties: properties.into_iter().collect(),
                    source: PropertySource::Extracted,
                }
            }
            _ => {
                let properties = fallback_properties();
                warn!(
                    path = %self.base_file.display(),
                    properties = properties.len(),
                    "no common properties extracted, using built-in list"
                );
                PropertyExtraction {
                    properties,
                    source: PropertySource::Fallback,
                }
            }
        }
    }

    /// 블록 본문에서 메서드 형태 선언의 이름을 수집합니다.
    pub fn collect_method_names(&self, body: &str) -> BTreeSet<String> {
        self.method_line
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|name| !name.starts_with('_') && !EXCLUDED_METHODS.contains(name))
            .map(str::to_owned)
            .collect()
    }

    fn extract_from_base(&self) -> Option<BTreeSet<String>> {
        let content = match read_limited(&self.base_file, self.max_file_size) {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!(path = %self.base_file.display(), "base definition file not found");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "failed to read base definition file");
                return None;
            }
        };

        let Some(body) = find_block_body(&content, BASE_CLASS_DECLARATION) else {
            warn!(
                path = %self.base_file.display(),
                declaration = BASE_CLASS_DECLARATION,
                "base class block not found"
            );
            return None;
        };

        Some(self.collect_method_names(body))
    }
}

/// `declaration` 뒤 첫 `{`부터 짝이 맞는 `}`까지의 본문(중괄호 제외)을 찾습니다.
///
/// 깊이는 여는 중괄호에서 1로 시작하며 0이 되는 위치에서 블록이 끝납니다.
/// 선언이 없거나, 여는 중괄호가 없거나, 블록이 닫히지 않으면 `None`입니다.
pub fn find_block_body<'a>(text: &'a str, declaration: &str) -> Option<&'a str> {
    let start = text.find(declaration)?;
    let open = start + text[start..].find('{')?;
    let body_start = open + 1;

    let mut depth = 1usize;
    for (offset, ch) in text[body_start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[body_start..body_start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// 내장 속성 목록 (중복 제거, 정렬)
pub fn fallback_properties() -> Vec<String> {
    FALLBACK_PROPERTIES
        .iter()
        .map(|p| (*p).to_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
