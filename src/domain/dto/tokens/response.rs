//! 토큰 관련 응답 DTO

use serde::{Deserialize, Serialize};

/// `jwt/create` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// `jwt/refresh` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

/// `token/login` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    pub auth_token: String,
}

/// `google` 응답. `Authorization: Token <access_token>` 으로 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalTokenResponse {
    pub user_id: String,
    pub access_token: String,
    pub token_type: String,
}
