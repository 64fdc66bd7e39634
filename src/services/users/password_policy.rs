//! 비밀번호 정책
//!
//! 회원가입, 비밀번호 재설정, 비밀번호 변경, 관리자 생성 CLI에서 사용합니다.
//! 모든 위반 사항을 한 번에 모아 필드 에러로 반환합니다.

use crate::errors::AppError;

/// 너무 흔해서 허용하지 않는 비밀번호
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890",
    "qwerty123", "qwertyuiop", "11111111", "00000000", "iloveyou", "admin123",
    "welcome1", "sunshine", "princess", "football", "baseball", "letmein1",
    "abc12345", "passw0rd",
];

#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// 위반 메시지 목록. 비어 있으면 통과입니다.
    pub fn problems(&self, password: &str, email: Option<&str>) -> Vec<String> {
        let mut problems = Vec::new();
        let lowered = password.to_lowercase();

        if password.chars().count() < self.min_length {
            problems.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if COMMON_PASSWORDS.contains(&lowered.as_str()) {
            problems.push("This password is too common.".to_string());
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            problems.push("This password is entirely numeric.".to_string());
        }

        if let Some(email) = email {
            if Self::too_similar(&lowered, &email.to_lowercase()) {
                problems.push("The password is too similar to the email.".to_string());
            }
        }

        problems
    }

    /// 위반이 있으면 `field` 이름으로 `InvalidFields`를 반환합니다
    pub fn validate(&self, field: &str, password: &str, email: Option<&str>) -> Result<(), AppError> {
        let problems = self.problems(password, email);
        if problems.is_empty() {
            return Ok(());
        }

        let mut fields = std::collections::BTreeMap::new();
        fields.insert(field.to_string(), problems);
        Err(AppError::InvalidFields(fields))
    }

    fn too_similar(password: &str, email: &str) -> bool {
        if password.is_empty() {
            return false;
        }

        let local = email.split('@').next().unwrap_or(email);
        let mut parts = vec![email.to_string(), local.to_string()];
        parts.extend(email.split(|c: char| !c.is_alphanumeric()).map(str::to_string));

        parts.iter().filter(|part| !part.is_empty()).any(|part| {
            password == part.as_str()
                || (part.chars().count() >= 4 && (password.contains(part.as_str()) || part.contains(password)))
        })
    }
}
