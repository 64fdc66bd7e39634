//! 토큰 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// `POST /auth/jwt/refresh`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// `POST /auth/jwt/verify`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: String,
}

/// `POST /auth/google`
///
/// `token`은 Google이 발급한 ID 토큰이며, `email`은 토큰 안의 이메일과 일치해야 합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoogleAuthRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_auth_request_validation() {
        let ok = GoogleAuthRequest {
            email: "g@x.com".to_string(),
            token: "id-token".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = GoogleAuthRequest {
            email: "g-at-x".to_string(),
            token: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("token"));
    }
}
