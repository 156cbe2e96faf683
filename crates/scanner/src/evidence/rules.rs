//! 부정 근거 휴리스틱 규칙 테이블
//!
//! 각 규칙은 문서 문장에서 "이 속성은 지원되지 않는다/효과가 없다"는 주장을
//! 찾는 정규식 하나입니다. 캡처 그룹 1이 토큰(또는 토큰 목록)입니다.
//! 중국어와 영어 표현을 모두 다룹니다.

use std::fmt;

use serde::Serialize;

/// 규칙 계열
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicFamily {
    /// 지원하지 않음
    NotSupported,
    /// 효과 없음
    NoEffect,
    /// 설정 무효
    Invalid,
    /// 이벤트 미응답
    NoResponse,
    /// 설정 실패
    Failure,
    /// 설정 불가
    CannotSet,
    /// 조건부 무효
    Contextual,
    /// 목록형 미지원
    List,
}

impl fmt::Display for HeuristicFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotSupported => "not_supported",
            Self::NoEffect => "no_effect",
            Self::Invalid => "invalid",
            Self::NoResponse => "no_response",
            Self::Failure => "failure",
            Self::CannotSet => "cannot_set",
            Self::Contextual => "contextual",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// 캡처 해석 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// 캡처 전체가 토큰 하나
    Token,
    /// 캡처 안의 식별자 단어 각각이 토큰
    List,
}

/// 휴리스틱 규칙 하나
#[derive(Debug, Clone, Copy)]
pub struct HeuristicRule {
    pub id: &'static str,
    pub family: HeuristicFamily,
    pub pattern: &'static str,
    pub extraction: Extraction,
}

const fn token(id: &'static str, family: HeuristicFamily, pattern: &'static str) -> HeuristicRule {
    HeuristicRule {
        id,
        family,
        pattern,
        extraction: Extraction::Token,
    }
}

const fn list(id: &'static str, pattern: &'static str) -> HeuristicRule {
    HeuristicRule {
        id,
        family: HeuristicFamily::List,
        pattern,
        extraction: Extraction::List,
    }
}

use HeuristicFamily::*;

/// 기본 규칙 테이블
pub const HEURISTIC_RULES: &[HeuristicRule] = &[
    // --- 지원하지 않음 ---
    token(
        "zh-unsupported-via-attribute",
        NotSupported,
        r"不支持\s*通过\s*([A-Za-z0-9_]+)\s*属性",
    ),
    token(
        "zh-unsupported-attribute",
        NotSupported,
        r"不支持\s*([A-Za-z0-9_]+)\s*属性",
    ),
    token(
        "zh-attribute-unsupported",
        NotSupported,
        r"([A-Za-z0-9_]+)\s*属性\s*不支持",
    ),
    token(
        "zh-unsupported-token",
        NotSupported,
        r"不支持\s*([A-Za-z0-9_]+)",
    ),
    token(
        "zh-table-unsupported",
        NotSupported,
        r"\|\s*([A-Za-z0-9_]+)\s*\|\s*不支持",
    ),
    token(
        "en-attribute-not-supported",
        NotSupported,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute|property|method|event)\s+is\s+not\s+supported",
    ),
    token(
        "en-does-not-support",
        NotSupported,
        r"(?i)\bdoes\s+not\s+support\s+(?:the\s+)?([A-Za-z0-9_]+)",
    ),
    // --- 효과 없음 ---
    token(
        "zh-attribute-no-effect",
        NoEffect,
        r"([A-Za-z0-9_]+)\s*属性\s*(?:设置)?\s*(?:不生效|无效果|没有效果)",
    ),
    token(
        "zh-set-no-effect",
        NoEffect,
        r"设置\s*([A-Za-z0-9_]+)\s*(?:属性)?\s*(?:不生效|无效果|没有效果)",
    ),
    token(
        "en-has-no-effect",
        NoEffect,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute\s+|property\s+)?(?:has|takes)\s+no\s+effect",
    ),
    token(
        "en-does-not-take-effect",
        NoEffect,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute\s+|property\s+)?does\s+not\s+take\s+effect",
    ),
    // --- 설정 무효 ---
    token(
        "zh-attribute-invalid",
        Invalid,
        r"([A-Za-z0-9_]+)\s*属性\s*(?:设置)?\s*无效",
    ),
    token(
        "zh-set-invalid",
        Invalid,
        r"设置\s*([A-Za-z0-9_]+)\s*(?:属性)?\s*无效",
    ),
    token(
        "en-is-invalid",
        Invalid,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute|property|setting)\s+is\s+invalid",
    ),
    // --- 이벤트 미응답 ---
    token(
        "zh-no-response",
        NoResponse,
        r"([A-Za-z0-9_]+)\s*(?:事件|属性)?\s*不(?:响应|触发|会触发)",
    ),
    token(
        "en-not-triggered",
        NoResponse,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:event\s+|callback\s+)?(?:is\s+not\s+triggered|does\s+not\s+respond|is\s+never\s+called)",
    ),
    // --- 설정 실패 ---
    token(
        "zh-set-failed",
        Failure,
        r"([A-Za-z0-9_]+)\s*(?:属性)?\s*设置失败",
    ),
    token(
        "en-setting-fails",
        Failure,
        r"(?i)\b(?:setting|applying)\s+(?:the\s+)?([A-Za-z0-9_]+)\s+(?:attribute\s+|property\s+)?fails",
    ),
    // --- 설정 불가 ---
    token(
        "zh-cannot-set",
        CannotSet,
        r"(?:不能|无法|不可)\s*(?:设置|使用)\s*([A-Za-z0-9_]+)",
    ),
    token(
        "en-cannot-be-set",
        CannotSet,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute\s+|property\s+)?cannot\s+be\s+(?:set|used|applied)",
    ),
    // --- 조건부 무효 ---
    token(
        "zh-when-no-effect",
        Contextual,
        r"当[^。\n]{0,40}?时\s*[，,]?\s*([A-Za-z0-9_]+)\s*(?:属性)?\s*(?:不生效|无效|失效)",
    ),
    token(
        "en-is-ignored",
        Contextual,
        r"(?i)\b([A-Za-z0-9_]+)\s+(?:attribute|property)\s+is\s+ignored",
    ),
    // --- 목록형 ---
    list("zh-colon-list", r"不支持\s*[:：]\s*([^\n]+)"),
    list(
        "zh-attribute-list",
        r"([A-Za-z0-9_]+(?:\s*[、,，]\s*[A-Za-z0-9_]+)+)\s*等?\s*属性\s*(?:不支持|不生效)",
    ),
    list(
        "en-list-not-supported",
        r"(?i)\b((?:[A-Za-z0-9_]+\s*,\s*)*[A-Za-z0-9_]+\s*,?\s+(?:and|or)\s+[A-Za-z0-9_]+)\s+(?:attributes\s+|properties\s+)?are\s+not\s+supported",
    ),
    list("en-colon-list", r"(?i)not\s+supported\s*:\s*([^\n]+)"),
];
