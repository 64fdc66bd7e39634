//! 계정 이메일 플로우 및 관리자 요청 DTO
//!
//! | 엔드포인트 | DTO |
//! |-----------|-----|
//! | `users/activation` | [`ActivationRequest`] |
//! | `users/resend_activation`, `users/reset_password`, `users/reset_email` | [`EmailRequest`] |
//! | `users/reset_password_confirm` | [`PasswordResetConfirmRequest`] |
//! | `users/reset_email_confirm` | [`EmailResetConfirmRequest`] |
//! | `users/set_password` | [`SetPasswordRequest`] |
//! | `users/{id}/flags` | [`UserFlagsRequest`] |

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivationRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub uid: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub uid: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmailResetConfirmRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub uid: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub token: String,
    #[validate(email(message = "Enter a valid email address."))]
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub new_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub current_password: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub new_password: String,
}

/// 관리자용 계정 플래그 변경. 지정한 플래그만 변경됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFlagsRequest {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}
