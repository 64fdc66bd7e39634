//! # 문자열 유틸리티
//!
//! 이메일 정규화와 선택 입력값 정리 함수입니다.

/// 공백만 있는 값은 `None`으로, 나머지는 앞뒤 공백을 제거합니다
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일을 정규화합니다
///
/// 앞뒤 공백을 제거하고 마지막 `@` 뒤의 도메인 부분만 소문자로 바꿉니다.
/// 로컬 부분의 대소문자는 유지됩니다. `@`가 없으면 공백만 제거합니다.
pub fn normalize_email(email: &str) -> String {
    let trimmed = email.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}
