//! 토큰 필터 -- 속성명처럼 보이는 토큰만 남깁니다.
//!
//! 허용 조건: ASCII 영문자로 시작, 이후 ASCII 영숫자, 길이 2-30, 불용어 아님.
//! 비ASCII(한자 등) 토큰은 구조적으로 거부되므로 불용어 목록은 영어만 담습니다.

const MIN_TOKEN_LEN: usize = 2;
const MAX_TOKEN_LEN: usize = 30;

/// 문장 구성어, 문서 상투어, 접미사 조각 (소문자)
#[rustfmt::skip]
const STOP_WORDS: &[&str] = &[
    // 관사, 지시어, 대명사
    "a", "an", "the", "this", "that", "these", "those", "it", "its", "they", "them",
    "their", "we", "us", "our", "you", "your", "he", "she", "him", "her", "his", "me",
    "my", "there", "here",
    // 접속사, 관계사
    "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "else", "when",
    "while", "where", "which", "what", "who", "whom", "whose", "why", "how",
    "because", "although", "unless", "whether",
    // 전치사
    "of", "to", "in", "on", "at", "by", "for", "with", "from", "as", "into", "onto",
    "over", "under", "about", "after", "before", "between", "through", "during",
    "without", "within", "above", "below", "up", "down", "out", "off", "via", "per",
    // 조동사, be/have/do
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did",
    "done", "have", "has", "had", "can", "could", "will", "would", "shall", "should",
    "may", "might", "must",
    // 부정, 리터럴
    "not", "no", "yes", "true", "false", "null", "undefined", "none",
    // 수량, 부사
    "all", "any", "some", "each", "every", "both", "either", "neither", "other",
    "such", "only", "also", "just", "more", "most", "less", "least", "very", "too",
    "currently", "now", "still", "even", "again",
    // 문서 상투어
    "supported", "support", "supports", "unsupported", "attribute", "attributes",
    "property", "properties", "method", "methods", "event", "events", "api", "apis",
    "interface", "interfaces", "parameter", "parameters", "param", "params",
    "component", "components", "value", "values", "default", "example", "note",
    "see", "following", "setting", "settings", "effect", "effects", "invalid",
    "ignored", "used", "using", "use", "set", "etc", "eg", "ie", "version", "since",
    "deprecated", "type", "types", "mode", "modes",
    // 접미사 조각
    "able", "ible", "ful", "ous", "ive", "al", "ic", "ly", "wise", "ward",
    "wards", "ways",
];

/// 토큰이 속성명 후보인지 판단합니다.
pub fn is_likely_property_name(token: &str) -> bool {
    let len = token.len();
    if !(MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&len) {
        return false;
    }

    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() || !chars.all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    let lower = token.to_ascii_lowercase();
    !STOP_WORDS.contains(&lower.as_str())
}
