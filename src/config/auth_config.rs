//! # Authentication Configuration Module
//!
//! JWT 토큰, Google ID 토큰 검증, 계정 이메일 플로우(활성화/재설정) 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 토큰 종류
//!
//! | 헤더 | 발급처 | 수명 |
//! |------|--------|------|
//! | `Bearer <jwt>` | `/auth/jwt/create` | access 7일, refresh 7일 |
//! | `Token <jwt>` | `/auth/google` | 24시간 |
//! | `Token <key>` | `/auth/token/login` | 로그아웃 전까지 |
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"      # 없으면 SECRET_KEY 사용
//! export JWT_ACCESS_LIFETIME_DAYS="7"
//! export JWT_REFRESH_LIFETIME_DAYS="7"
//! export ACCESS_TOKEN_EXPIRE_MINUTES="1440"
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export DOMAIN="localhost:3000"
//! export SITE_NAME="Profile Service"
//! export SEND_ACTIVATION_EMAIL="true"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use super::{env_flag, env_or, env_parse};

/// JWT 서명 및 수명 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 서명 비밀키
    pub secret: String,
    /// Bearer access 토큰 수명 (초)
    pub access_lifetime_secs: i64,
    /// Bearer refresh 토큰 수명 (초)
    pub refresh_lifetime_secs: i64,
    /// `Token <jwt>` 내부 토큰 수명 (초)
    pub internal_lifetime_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let access_days: i64 = env_parse("JWT_ACCESS_LIFETIME_DAYS", 7);
        let refresh_days: i64 = env_parse("JWT_REFRESH_LIFETIME_DAYS", 7);
        let internal_minutes: i64 = env_parse("ACCESS_TOKEN_EXPIRE_MINUTES", 1440);

        Self {
            secret: Self::secret(),
            access_lifetime_secs: access_days * 24 * 3600,
            refresh_lifetime_secs: refresh_days * 24 * 3600,
            internal_lifetime_secs: internal_minutes * 60,
        }
    }

    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .or_else(|_| env::var("SECRET_KEY"))
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }
}

/// Google ID 토큰 검증 설정
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    /// 기대하는 `aud` 값. 비어 있으면 audience 검사를 건너뜁니다.
    pub client_id: Option<String>,
    pub tokeninfo_uri: String,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: env::var("GOOGLE_CLIENT_ID").ok().filter(|id| !id.trim().is_empty()),
            tokeninfo_uri: env_or("GOOGLE_TOKENINFO_URI", "https://oauth2.googleapis.com/tokeninfo"),
        }
    }
}

/// 활성화 / 비밀번호 재설정 / 이메일 재설정 메일 설정
#[derive(Debug, Clone)]
pub struct AccountFlowConfig {
    pub protocol: String,
    pub domain: String,
    pub site_name: String,
    /// 회원가입 직후 활성화 메일 발송 여부
    pub send_activation_email: bool,
    /// 활성화 완료 안내 메일 발송 여부
    pub send_confirmation_email: bool,
    /// 비밀번호 변경 안내 메일 발송 여부
    pub password_changed_email_confirmation: bool,
    pub activation_url: String,
    pub password_reset_confirm_url: String,
    pub username_reset_confirm_url: String,
    /// 계정 토큰 유효 기간 (초)
    pub token_timeout_secs: i64,
}

impl AccountFlowConfig {
    pub fn from_env() -> Self {
        Self {
            protocol: env_or("PROTOCOL", "http"),
            domain: env_or("DOMAIN", "localhost:3000"),
            site_name: env_or("SITE_NAME", "Profile Service"),
            send_activation_email: env_flag("SEND_ACTIVATION_EMAIL", true),
            send_confirmation_email: env_flag("SEND_CONFIRMATION_EMAIL", false),
            password_changed_email_confirmation: env_flag("PASSWORD_CHANGED_EMAIL_CONFIRMATION", false),
            activation_url: env_or("ACTIVATION_URL", "#/activate/{uid}/{token}"),
            password_reset_confirm_url: env_or(
                "PASSWORD_RESET_CONFIRM_URL",
                "#/password/reset/confirm/{uid}/{token}",
            ),
            username_reset_confirm_url: env_or(
                "USERNAME_RESET_CONFIRM_URL",
                "#/username/reset/confirm/{uid}/{token}",
            ),
            token_timeout_secs: env_parse("PASSWORD_RESET_TIMEOUT", 259_200),
        }
    }

    /// URL 템플릿의 `{uid}`, `{token}` 자리를 채워 절대 URL을 만듭니다
    pub fn build_url(&self, template: &str, uid: &str, token: &str) -> String {
        let path = template.replace("{uid}", uid).replace("{token}", token);
        format!("{}://{}/{}", self.protocol, self.domain, path)
    }
}

/// 계정이 만들어진 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호 가입
    Local,
    /// Google ID 토큰 로그인으로 자동 생성
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);

        // 대소문자 무관 테스트
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Local").unwrap(), AuthProvider::Local);

        assert!(AuthProvider::from_str("twitter").is_err());
    }

    #[test]
    fn test_auth_provider_serde_lowercase() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");
        assert_eq!(AuthProvider::Google.as_str(), "google");
    }

    #[test]
    fn test_account_url_building() {
        let config = AccountFlowConfig {
            protocol: "https".to_string(),
            domain: "example.com".to_string(),
            site_name: "Example".to_string(),
            send_activation_email: true,
            send_confirmation_email: false,
            password_changed_email_confirmation: false,
            activation_url: "#/activate/{uid}/{token}".to_string(),
            password_reset_confirm_url: "#/password/reset/confirm/{uid}/{token}".to_string(),
            username_reset_confirm_url: "#/username/reset/confirm/{uid}/{token}".to_string(),
            token_timeout_secs: 60,
        };

        let url = config.build_url(&config.activation_url, "abc", "t0k");
        assert_eq!(url, "https://example.com/#/activate/abc/t0k");
    }

    #[test]
    fn test_jwt_lifetimes_default() {
        if env::var("JWT_ACCESS_LIFETIME_DAYS").is_err()
            && env::var("ACCESS_TOKEN_EXPIRE_MINUTES").is_err()
        {
            let config = JwtConfig::from_env();
            assert_eq!(config.access_lifetime_secs, 7 * 24 * 3600);
            assert_eq!(config.internal_lifetime_secs, 24 * 3600);
        }
    }
}
