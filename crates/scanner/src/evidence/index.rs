//! 부정 근거 인덱스

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// 컴포넌트명 -> 문서가 미지원이라고 주장한 속성명 집합
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
    files_scanned: usize,
}

impl EvidenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 토큰들을 컴포넌트 항목에 추가합니다. 빈 토큰 집합이면 항목을 만들지 않습니다.
    pub fn insert<I, S>(&mut self, component: impl Into<String>, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into).peekable();
        if tokens.peek().is_none() {
            return;
        }
        self.entries
            .entry(component.into())
            .or_default()
            .extend(tokens);
    }

    pub(crate) fn record_file(&mut self) {
        self.files_scanned += 1;
    }

    /// 컴포넌트 키를 찾습니다. 정확히 일치하는 키를 먼저, 없으면 대소문자 무시 비교.
    pub fn find_component_key(&self, component: &str) -> Option<&str> {
        if let Some((key, _)) = self.entries.get_key_value(component) {
            return Some(key);
        }
        self.entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(component))
            .map(String::as_str)
    }

    /// 문서가 해당 컴포넌트의 속성을 미지원이라고 주장했는지 여부
    ///
    /// 속성명은 정확히 일치해야 합니다.
    pub fn is_property_unsupported(&self, component: &str, property: &str) -> bool {
        self.unsupported_properties(component)
            .is_some_and(|props| props.contains(property))
    }

    pub fn unsupported_properties(&self, component: &str) -> Option<&BTreeSet<String>> {
        let key = self.find_component_key(component)?;
        self.entries.get(key)
    }

    pub fn component_count(&self) -> usize {
        self.entries.len()
    }

    /// 전체 (컴포넌트, 속성) 항목 수
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
