//! 지원 상태 판정기
//!
//! (컴포넌트, 속성) 쌍마다 아래 규칙을 순서대로 적용하고 처음 일치한 결과를
//! 사용합니다.
//!
//! 1. 기존 레코드가 수동 입력이면 그대로 유지
//! 2. 컴포넌트 정의가 공통 기반 계약을 상속/구현하면 `supported`
//! 3. 정의에 `property(` 형태의 호출이 있고 같은 파일에 해당 속성의 부정
//!    문구가 없으면 `supported`
//! 4. 그 밖에는 `unknown`
//!
//! 판정기는 스스로 `unsupported`를 만들지 않습니다. 문서 부정 근거는
//! 의존성으로 보관하지만 판정에는 반영하지 않습니다.

use std::collections::HashMap;

use regex::Regex;
use tracing::warn;

use propmatrix_core::types::{PropertySupport, SupportStatus};

use crate::catalog::ComponentCatalog;
use crate::error::ScannerError;
use crate::evidence::EvidenceIndex;

/// 상속 규칙 메모
pub const NOTE_INHERITED: &str = "inherited from common base";
/// 호출 언급 규칙 메모
pub const NOTE_FOUND_IN_DEFINITION: &str = "found in component definition";
/// 기본값 메모
pub const NOTE_NOT_DECLARED: &str = "not explicitly declared; may still be supported";

const EXTENDS_LITERAL: &str = "extends CommonMethod";
const EXTENDS_GENERIC_PATTERN: &str = r"extends\s+CommonMethod\s*<";
const IMPLEMENTS_PATTERN: &str = r"implements\s+.*CommonMethod";

/// 속성 하나에 대한 호출/부정 패턴
#[derive(Debug, Clone)]
struct PropertyProbe {
    call: Regex,
    negation: Regex,
}

impl PropertyProbe {
    fn new(property: &str) -> Result<Self, ScannerError> {
        let escaped = regex::escape(property);
        Ok(Self {
            call: compile(property, &format!(r"(?i)\b{escaped}\s*\("))?,
            negation: compile(
                property,
                &format!(r"(?i)不支持.*{escaped}|{escaped}.*不支持|does not support.*{escaped}"),
            )?,
        })
    }

    fn mentioned(&self, definition: &str) -> bool {
        self.call.is_match(definition) && !self.negation.is_match(definition)
    }
}

fn compile(property: &str, pattern: &str) -> Result<Regex, ScannerError> {
    Regex::new(pattern).map_err(|e| ScannerError::Rule {
        rule_id: format!("property-probe:{property}"),
        reason: e.to_string(),
    })
}

/// 지원 상태 판정기
#[derive(Debug)]
pub struct StatusResolver<'a> {
    catalog: &'a ComponentCatalog,
    evidence: Option<&'a EvidenceIndex>,
    extends_generic: Regex,
    implements: Regex,
    probes: HashMap<String, PropertyProbe>,
}

impl<'a> StatusResolver<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Result<Self, ScannerError> {
        Ok(Self {
            catalog,
            evidence: None,
            extends_generic: Regex::new(EXTENDS_GENERIC_PATTERN).map_err(|e| {
                ScannerError::Rule {
                    rule_id: "extends-generic".to_owned(),
                    reason: e.to_string(),
                }
            })?,
            implements: Regex::new(IMPLEMENTS_PATTERN).map_err(|e| ScannerError::Rule {
                rule_id: "implements".to_owned(),
                reason: e.to_string(),
            })?,
            probes: HashMap::new(),
        })
    }

    pub fn with_evidence(mut self, evidence: &'a EvidenceIndex) -> Self {
        self.evidence = Some(evidence);
        self
    }

    pub fn evidence(&self) -> Option<&'a EvidenceIndex> {
        self.evidence
    }

    /// 속성별 패턴을 미리 컴파일합니다.
    ///
    /// 준비하지 않은 속성도 판정할 수 있지만 호출마다 패턴을 새로 만듭니다.
    pub fn prepare(&mut self, properties: &[String]) -> Result<(), ScannerError> {
        for property in properties {
            if !self.probes.contains_key(property) {
                let probe = PropertyProbe::new(property)?;
                self.probes.insert(property.clone(), probe);
            }
        }
        Ok(())
    }

    /// 컴포넌트 정의 파일을 직접 읽어 판정합니다.
    ///
    /// 읽기 실패는 경고 후 "정의 없음"으로 취급합니다.
    pub fn resolve(
        &self,
        component: &str,
        property: &str,
        existing: Option<&PropertySupport>,
    ) -> PropertySupport {
        if let Some(record) = existing.filter(|r| r.is_manual()) {
            return record.clone();
        }

        let definition = match self.catalog.component_content(component) {
            Ok(content) => content,
            Err(e) => {
                warn!(component, property, error = %e, "component definition unreadable");
                None
            }
        };
        self.resolve_with_definition(component, property, existing, definition.as_deref())
    }

    /// 호출자가 이미 읽은 정의 텍스트로 판정합니다.
    pub fn resolve_with_definition(
        &self,
        component: &str,
        property: &str,
        existing: Option<&PropertySupport>,
        definition: Option<&str>,
    ) -> PropertySupport {
        if let Some(record) = existing.filter(|r| r.is_manual()) {
            return record.clone();
        }

        let Some(definition) = definition else {
            return PropertySupport::auto(SupportStatus::Unknown, NOTE_NOT_DECLARED);
        };

        if self.declares_inheritance(definition) {
            return PropertySupport::auto(SupportStatus::Supported, NOTE_INHERITED);
        }

        if self.is_mentioned(component, property, definition) {
            return PropertySupport::auto(SupportStatus::Supported, NOTE_FOUND_IN_DEFINITION);
        }

        PropertySupport::auto(SupportStatus::Unknown, NOTE_NOT_DECLARED)
    }

    /// 정의가 공통 기반 계약을 상속하거나 구현하는지 확인합니다.
    pub fn declares_inheritance(&self, definition: &str) -> bool {
        definition.contains(EXTENDS_LITERAL)
            || self.extends_generic.is_match(definition)
            || self.implements.is_match(definition)
    }

    fn is_mentioned(&self, component: &str, property: &str, definition: &str) -> bool {
        if let Some(probe) = self.probes.get(property) {
            return probe.mentioned(definition);
        }
        match PropertyProbe::new(property) {
            Ok(probe) => probe.mentioned(definition),
            Err(e) => {
                warn!(component, property, error = %e, "property probe unavailable");
                false
            }
        }
    }
}
