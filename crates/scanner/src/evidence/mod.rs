//! 문서 기반 부정 근거 수집
//!
//! 문서 트리의 Markdown 파일마다 대상 컴포넌트를 식별하고, 휴리스틱 규칙
//! 테이블로 "이 속성은 지원되지 않는다"는 문장을 찾아 [`EvidenceIndex`]에
//! 모읍니다. 결과는 근거 기록용이며 판정에는 사용되지 않습니다.

pub mod filter;
pub mod index;
pub mod rules;

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::DOCS_UI_SUBDIR;
use crate::error::ScannerError;
use crate::source::read_limited;

pub use filter::is_likely_property_name;
pub use index::EvidenceIndex;
pub use rules::{Extraction, HEURISTIC_RULES, HeuristicFamily, HeuristicRule};

/// 파일명에서 컴포넌트 추출 (`arkts-common-components-button` -> `button`)
const STEM_IDENTITY_PATTERN: &str = r"arkts[-A-Za-z0-9_]+-([A-Za-z0-9_]+)$";

/// 첫 번째 1단계 제목
const HEADING_IDENTITY_PATTERN: &str = r"(?m)^#\s+([A-Za-z0-9_]+)";

/// 목록 캡처 안의 단어
const LIST_WORD_PATTERN: &str = r"[A-Za-z0-9_]+";

const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: &'static HeuristicRule,
    regex: Regex,
}

/// 규칙 하나가 만들어 낸 토큰 (필터 통과분)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceMatch {
    pub rule_id: &'static str,
    pub family: HeuristicFamily,
    pub token: String,
}

/// 부정 근거 수집기
#[derive(Debug, Clone)]
pub struct EvidenceMiner {
    rules: Vec<CompiledRule>,
    stem_identity: Regex,
    heading_identity: Regex,
    list_word: Regex,
    max_file_size: usize,
}

impl EvidenceMiner {
    /// 기본 규칙 테이블로 수집기를 생성합니다.
    pub fn new() -> Result<Self, ScannerError> {
        Self::with_rules(HEURISTIC_RULES)
    }

    /// 주어진 규칙 테이블을 컴파일합니다.
    ///
    /// 하나라도 컴파일에 실패하면 [`ScannerError::Rule`]을 반환합니다.
    pub fn with_rules(rules: &'static [HeuristicRule]) -> Result<Self, ScannerError> {
        let compiled = rules
            .iter()
            .map(|rule| {
                compile(rule.id, rule.pattern).map(|regex| CompiledRule { rule, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rules = compiled.len(), "heuristic rules compiled");

        Ok(Self {
            rules: compiled,
            stem_identity: compile("stem-identity", STEM_IDENTITY_PATTERN)?,
            heading_identity: compile("heading-identity", HEADING_IDENTITY_PATTERN)?,
            list_word: compile("list-word", LIST_WORD_PATTERN)?,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        })
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// 문서 루트 아래 UI 문서 트리를 훑어 인덱스를 만듭니다.
    ///
    /// 트리가 없으면 경고 후 빈 인덱스를 반환합니다. 읽을 수 없거나 너무 큰
    /// 파일은 경고 후 건너뜁니다.
    pub fn mine_dir(&self, docs_root: &Path) -> EvidenceIndex {
        let ui_dir = docs_root.join(DOCS_UI_SUBDIR);
        let mut index = EvidenceIndex::new();

        if !ui_dir.is_dir() {
            warn!(dir = %ui_dir.display(), "documentation tree not found, no evidence collected");
            return index;
        }

        let walker = WalkDir::new(&ui_dir).sort_by_file_name().into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "failed to walk documentation entry");
                    continue;
                }
            };
            if !entry.file_type().is_file()
                || entry.path().extension().is_none_or(|ext| ext != "md")
            {
                continue;
            }

            let path = entry.path();
            let content = match read_limited(path, self.max_file_size) {
                Ok(Some(content)) => content,
                Ok(None) => continue,
                Err(e) => {
                    warn!(error = %e, "skipping documentation file");
                    continue;
                }
            };
            index.record_file();

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let Some(component) = self.derive_identity(stem, &content) else {
                debug!(path = %path.display(), "no component identity, skipping");
                continue;
            };

            let tokens = self.mine_text(&content);
            if !tokens.is_empty() {
                debug!(
                    path = %path.display(),
                    component = %component,
                    tokens = tokens.len(),
                    "negative evidence found"
                );
            }
            index.insert(component, tokens);
        }

        info!(
            dir = %ui_dir.display(),
            files = index.files_scanned(),
            components = index.component_count(),
            entries = index.entry_count(),
            "documentation evidence collected"
        );
        index
    }

    /// 문서가 다루는 컴포넌트명을 결정합니다.
    ///
    /// 파일명 규칙이 맞으면 마지막 조각의 첫 글자를 대문자로 바꿔 사용하고,
    /// 아니면 첫 `# 제목`의 식별자를 그대로 사용합니다.
    pub fn derive_identity(&self, file_stem: &str, content: &str) -> Option<String> {
        if let Some(token) = self
            .stem_identity
            .captures(file_stem)
            .and_then(|caps| caps.get(1))
        {
            return Some(capitalize_first(token.as_str()));
        }

        self.heading_identity
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
    }

    /// 본문에서 필터를 통과한 토큰 집합을 추출합니다.
    pub fn mine_text(&self, content: &str) -> BTreeSet<String> {
        self.matches(content).into_iter().map(|m| m.token).collect()
    }

    /// 규칙별 매칭 결과 (필터 통과분, 규칙 순서)
    pub fn matches(&self, content: &str) -> Vec<EvidenceMatch> {
        let mut found = Vec::new();

        for compiled in &self.rules {
            for caps in compiled.regex.captures_iter(content) {
                let Some(capture) = caps.get(1) else {
                    continue;
                };
                let candidates: Vec<&str> = match compiled.rule.extraction {
                    Extraction::Token => vec![capture.as_str()],
                    Extraction::List => self
                        .list_word
                        .find_iter(capture.as_str())
                        .map(|m| m.as_str())
                        .collect(),
                };

                found.extend(
                    candidates
                        .into_iter()
                        .filter(|token| is_likely_property_name(token))
                        .map(|token| EvidenceMatch {
                            rule_id: compiled.rule.id,
                            family: compiled.rule.family,
                            token: token.to_owned(),
                        }),
                );
            }
        }

        found
    }
}

fn compile(rule_id: &str, pattern: &str) -> Result<Regex, ScannerError> {
    Regex::new(pattern).map_err(|e| ScannerError::Rule {
        rule_id: rule_id.to_owned(),
        reason: e.to_string(),
    })
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
