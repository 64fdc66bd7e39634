//! # JWT 토큰 서비스
//!
//! 하나의 HS256 비밀키로 세 종류의 토큰을 발급하고 검증합니다.
//!
//! - `Bearer` access/refresh 토큰 (`jwt/create`, `jwt/refresh`, `jwt/verify`)
//! - 내부 토큰 (`Authorization: Token <jwt>`, Google 로그인 결과)
//! - 계정 토큰 (활성화, 비밀번호/이메일 재설정 링크)
//!
//! 계정 토큰에는 사용자 상태의 지문(`fp`)이 들어갑니다. 비밀번호, 이메일,
//! 활성 상태 중 하나라도 바뀌면 지문이 달라지므로 링크는 한 번만 쓸 수 있습니다.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

use crate::config::JwtConfig;
use crate::domain::dto::tokens::InternalTokenResponse;
use crate::domain::entities::users::User;
use crate::domain::models::token::{
    AccountTokenClaims, AccountTokenPurpose, InternalTokenClaims, TokenClaims, TokenPair, TokenType,
};
use crate::errors::AppError;

const INTERNAL_TOKEN_SUBJECT: &str = "access";

#[derive(Clone)]
pub struct TokenService {
    jwt: JwtConfig,
    account_token_lifetime_secs: i64,
}

impl TokenService {
    pub fn new(jwt: JwtConfig, account_token_lifetime_secs: i64) -> Self {
        Self {
            jwt,
            account_token_lifetime_secs,
        }
    }

    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        self.generate_token(user, TokenType::Access, self.jwt.access_lifetime_secs)
    }

    pub fn generate_refresh_token(&self, user: &User) -> Result<String, AppError> {
        self.generate_token(user, TokenType::Refresh, self.jwt.refresh_lifetime_secs)
    }

    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(user)?,
        })
    }

    /// 리프레시 토큰으로 새 access 토큰을 발급합니다. 리프레시 토큰은 교체하지 않습니다.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.verify_token(refresh_token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::AuthenticationError("Token has wrong type".to_string()));
        }

        let now = Utc::now();
        let access = TokenClaims {
            token_type: TokenType::Access,
            user_id: claims.user_id,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.jwt.access_lifetime_secs)).timestamp(),
        };
        self.sign(&access)
    }

    /// 종류와 관계없이 서명과 만료를 검증합니다
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.decode_claims(token)
    }

    /// `Bearer` 인증용. 리프레시 토큰은 거부됩니다.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::AuthenticationError("Token has wrong type".to_string()));
        }
        Ok(claims)
    }

    pub fn create_internal_token(&self, user_id: &ObjectId) -> Result<InternalTokenResponse, AppError> {
        let claims = InternalTokenClaims {
            user_id: user_id.to_hex(),
            sub: INTERNAL_TOKEN_SUBJECT.to_string(),
            exp: (Utc::now() + Duration::seconds(self.jwt.internal_lifetime_secs)).timestamp(),
        };

        Ok(InternalTokenResponse {
            user_id: user_id.to_hex(),
            access_token: self.sign(&claims)?,
            token_type: "Token".to_string(),
        })
    }

    pub fn verify_internal_token(&self, token: &str) -> Result<InternalTokenClaims, AppError> {
        let claims: InternalTokenClaims = self.decode_claims(token)?;
        if claims.sub != INTERNAL_TOKEN_SUBJECT {
            return Err(AppError::AuthenticationError("Invalid token.".to_string()));
        }
        Ok(claims)
    }

    /// 계정 플로우 링크용 토큰
    pub fn issue_account_token(&self, user: &User, purpose: AccountTokenPurpose) -> Result<String, AppError> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let now = Utc::now();
        let claims = AccountTokenClaims {
            uid: id.to_hex(),
            purpose,
            fp: Self::fingerprint(user),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.account_token_lifetime_secs)).timestamp(),
        };
        self.sign(&claims)
    }

    /// 토큰이 이 사용자의 현재 상태와 용도에 대해 발급된 것인지 확인합니다
    pub fn verify_account_token(&self, user: &User, purpose: AccountTokenPurpose, token: &str) -> bool {
        let Ok(claims) = self.decode_claims::<AccountTokenClaims>(token) else {
            return false;
        };

        claims.purpose == purpose
            && user.id.map(|id| id.to_hex()).as_deref() == Some(claims.uid.as_str())
            && claims.fp == Self::fingerprint(user)
    }

    /// 링크에 들어가는 사용자 식별자 (URL-safe base64, 패딩 없음)
    pub fn encode_uid(id: &ObjectId) -> String {
        URL_SAFE_NO_PAD.encode(id.to_hex())
    }

    pub fn decode_uid(uid: &str) -> Option<ObjectId> {
        let bytes = URL_SAFE_NO_PAD.decode(uid.trim()).ok()?;
        let hex = String::from_utf8(bytes).ok()?;
        ObjectId::parse_str(hex).ok()
    }

    fn generate_token(&self, user: &User, token_type: TokenType, lifetime_secs: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            token_type,
            user_id: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
        };
        self.sign(&claims)
    }

    fn fingerprint(user: &User) -> String {
        let mut hasher = Sha256::new();
        hasher.update(user.id.map(|id| id.to_hex()).unwrap_or_default());
        hasher.update(b":");
        hasher.update(user.password_hash.as_deref().unwrap_or(""));
        hasher.update(b":");
        hasher.update(if user.is_active { "1" } else { "0" });
        hasher.update(b":");
        hasher.update(&user.email);
        format!("{:x}", hasher.finalize())
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        encode(&Header::default(), claims, &EncodingKey::from_secret(self.jwt.secret.as_bytes()))
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    fn decode_claims<T: DeserializeOwned>(&self, token: &str) -> Result<T, AppError> {
        let decoding_key = DecodingKey::from_secret(self.jwt.secret.as_bytes());

        decode::<T>(token, &decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::AuthenticationError("Token is expired".to_string()),
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("Token is invalid or expired".to_string())
                }
            })
    }
}
