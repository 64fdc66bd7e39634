//! # 요청 인증기
//!
//! `Authorization` 헤더를 해석해 호출자를 결정합니다. 검사 순서는 고정입니다.
//!
//! | 순서 | 헤더 | 백엔드 |
//! |------|------|--------|
//! | 1 | `Token <jwt>` | 내부 토큰 (`user_id`, `sub = "access"`) |
//! | 2 | `Token <40자 16진수>` | 레거시 토큰 저장소 |
//! | 3 | `Bearer <jwt>` | access 토큰 |
//!
//! 헤더가 없거나 알 수 없는 스킴이면 익명(`None`)입니다. 인증 정보가 제시되었지만
//! 유효하지 않으면 라우트의 공개 여부와 관계없이 `AuthenticationError`입니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::models::auth::{AuthScheme, AuthenticatedUser};
use crate::errors::AppError;
use crate::repositories::{is_token_key, AuthTokenStore, UserStore};
use crate::services::auth::TokenService;

#[derive(Clone)]
pub struct Authenticator {
    token_service: TokenService,
    users: Arc<dyn UserStore>,
    auth_tokens: Arc<dyn AuthTokenStore>,
}

impl Authenticator {
    pub fn new(token_service: TokenService, users: Arc<dyn UserStore>, auth_tokens: Arc<dyn AuthTokenStore>) -> Self {
        Self {
            token_service,
            users,
            auth_tokens,
        }
    }

    pub async fn authenticate(&self, header: Option<&str>) -> Result<Option<AuthenticatedUser>, AppError> {
        let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(None);
        };

        let (scheme, credential) = match header.split_once(' ') {
            Some((scheme, credential)) => (scheme, credential.trim()),
            None => (header, ""),
        };

        if scheme.eq_ignore_ascii_case("Token") {
            if credential.is_empty() {
                return Err(invalid_header("No credentials provided."));
            }
            if credential.contains(' ') {
                return Err(invalid_header("Token string should not contain spaces."));
            }

            if credential.matches('.').count() == 2 {
                let claims = self.token_service.verify_internal_token(credential)?;
                let user_id = parse_claim_id(&claims.user_id)?;
                return self.load_user(&user_id, AuthScheme::InternalToken).await.map(Some);
            }

            if is_token_key(credential) {
                let user_id = self
                    .auth_tokens
                    .find_user_id(credential)
                    .await?
                    .ok_or_else(|| AppError::AuthenticationError("Invalid token.".to_string()))?;
                return self.load_user(&user_id, AuthScheme::LegacyToken).await.map(Some);
            }

            return Err(AppError::AuthenticationError("Invalid token.".to_string()));
        }

        if scheme.eq_ignore_ascii_case("Bearer") {
            if credential.is_empty() || credential.contains(' ') {
                return Err(invalid_header("Authorization header must contain two space-delimited values"));
            }

            let claims = self.token_service.verify_access_token(credential)?;
            let user_id = parse_claim_id(&claims.user_id)?;
            return self.load_user(&user_id, AuthScheme::Bearer).await.map(Some);
        }

        log::debug!("알 수 없는 인증 스킴: {}", scheme);
        Ok(None)
    }

    async fn load_user(&self, user_id: &ObjectId, scheme: AuthScheme) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

        if !user.is_active {
            log::warn!("비활성 계정 인증 시도: {}", user_id);
            return Err(AppError::AuthenticationError("User inactive or deleted.".to_string()));
        }

        Ok(AuthenticatedUser::from_user(&user, *user_id, scheme))
    }
}

fn invalid_header(message: &str) -> AppError {
    AppError::AuthenticationError(format!("Invalid token header. {}", message))
}

fn parse_claim_id(user_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(user_id)
        .map_err(|_| AppError::AuthenticationError("Token contained no recognizable user identification".to_string()))
}
