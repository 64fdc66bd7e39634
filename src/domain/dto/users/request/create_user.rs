//! # 회원가입 요청 DTO
//!
//! ```json
//! { "email": "user@example.com", "password": "correct horse" }
//! ```
//!
//! 비밀번호는 쓰기 전용입니다. 응답에는 정규화된 이메일만 반환됩니다.
//! 비밀번호 정책(길이, 숫자 전용 여부, 이메일 유사도)은 설정값에 의존하므로
//! 서비스 계층의 `PasswordPolicy`가 검사합니다.

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub email: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// 이메일/비밀번호 로그인 요청 (`jwt/create`, `token/login`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}
