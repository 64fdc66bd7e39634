//! # Google 로그인 서비스
//!
//! 클라이언트가 Google에서 받은 ID 토큰을 tokeninfo 엔드포인트로 검증한 뒤,
//! 이메일로 사용자를 찾거나 새로 만들고 내부 토큰(`Token <jwt>`)을 발급합니다.
//!
//! ```text
//! POST /api/v1/auth/google {email, token}
//!   └─ IdTokenVerifier::verify (aud == client_id, email_verified, email 일치)
//!        └─ get-or-create User (provider = google, 비밀번호 없음, 활성)
//!             └─ {user_id, access_token, token_type: "Token"}
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{AuthProvider, GoogleOAuthConfig};
use crate::domain::dto::tokens::{GoogleAuthRequest, InternalTokenResponse};
use crate::errors::AppError;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

/// 검증을 통과한 ID 토큰의 주체
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub email: String,
}

#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    /// 토큰이 `expected_email`에 대해 발급된 유효한 토큰인지 확인합니다
    async fn verify(&self, id_token: &str, expected_email: &str) -> Result<VerifiedIdentity, AppError>;
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: Option<String>,
    email: Option<String>,
    /// tokeninfo는 `"true"` 문자열로 반환합니다
    email_verified: Option<serde_json::Value>,
}

impl TokenInfo {
    fn is_email_verified(&self) -> bool {
        match &self.email_verified {
            Some(serde_json::Value::Bool(value)) => *value,
            Some(serde_json::Value::String(value)) => value.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Google tokeninfo 엔드포인트를 사용하는 검증기
pub struct GoogleTokenInfoVerifier {
    client: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleTokenInfoVerifier {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenInfoVerifier {
    async fn verify(&self, id_token: &str, expected_email: &str) -> Result<VerifiedIdentity, AppError> {
        let client_id = self
            .config
            .client_id
            .as_deref()
            .ok_or_else(|| AppError::InternalError("GOOGLE_CLIENT_ID가 설정되지 않았습니다".to_string()))?;

        let response = self
            .client
            .get(&self.config.tokeninfo_uri)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 검증 요청 실패: {}", e)))?;

        if response.status().is_client_error() {
            log::warn!("Google ID 토큰 거부: {}", response.status());
            return Err(AppError::AuthenticationError("Bad token Google".to_string()));
        }
        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 검증 실패: {}",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 응답 파싱 실패: {}", e)))?;

        if info.aud.as_deref() != Some(client_id) {
            log::warn!("Google ID 토큰 audience 불일치: {:?}", info.aud);
            return Err(AppError::AuthenticationError("Bad token Google".to_string()));
        }

        let email = info
            .email
            .clone()
            .filter(|email| email.eq_ignore_ascii_case(expected_email.trim()))
            .ok_or_else(|| AppError::AuthenticationError("Bad token Google".to_string()))?;

        if !info.is_email_verified() {
            return Err(AppError::AuthenticationError("Google email is not verified".to_string()));
        }

        Ok(VerifiedIdentity { email })
    }
}

#[derive(Clone)]
pub struct GoogleAuthService {
    verifier: Arc<dyn IdTokenVerifier>,
    user_service: UserService,
    token_service: TokenService,
}

impl GoogleAuthService {
    pub fn new(verifier: Arc<dyn IdTokenVerifier>, user_service: UserService, token_service: TokenService) -> Self {
        Self {
            verifier,
            user_service,
            token_service,
        }
    }

    pub async fn authenticate(&self, request: &GoogleAuthRequest) -> Result<InternalTokenResponse, AppError> {
        let identity = self.verifier.verify(&request.token, &request.email).await?;

        let user = match self.user_service.find_by_email(&identity.email).await? {
            Some(existing) => {
                log::info!("Google 로그인: {}", existing.email);
                existing
            }
            None => {
                log::info!("새 Google 사용자 등록: {}", identity.email);
                self.user_service
                    .create_external_user(&identity.email, AuthProvider::Google)
                    .await?
            }
        };

        if !user.is_active {
            return Err(AppError::AuthenticationError("User inactive or deleted.".to_string()));
        }

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.token_service.create_internal_token(&user_id)
    }
}
