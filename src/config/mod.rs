//! 애플리케이션 설정
//!
//! 모든 설정은 시작 시점에 [`AppConfig::from_env`]로 한 번 읽어 들이고,
//! 이후에는 `AppState`를 통해 명시적으로 전달됩니다.

pub mod auth_config;
pub mod data_config;
pub mod email_config;

pub use auth_config::*;
pub use data_config::*;
pub use email_config::*;

use std::env;
use std::str::FromStr;

/// 전체 애플리케이션 설정 묶음
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub password: PasswordConfig,
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
    pub account: AccountFlowConfig,
    pub email: EmailConfig,
    pub media: MediaConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::current();

        Self {
            server: ServerConfig::from_env(),
            storage: StorageConfig::from_env(),
            password: PasswordConfig::from_env(&environment),
            jwt: JwtConfig::from_env(),
            google: GoogleOAuthConfig::from_env(),
            account: AccountFlowConfig::from_env(),
            email: EmailConfig::from_env(),
            media: MediaConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            environment,
        }
    }

    /// 외부 환경변수에 의존하지 않는 테스트용 설정
    #[cfg(test)]
    pub fn for_tests(media_root: std::path::PathBuf) -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: 1,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                mongodb_uri: String::new(),
                database_name: "profile_service_test".to_string(),
                redis_url: String::new(),
                cache_ttl_seconds: 0,
            },
            password: PasswordConfig {
                bcrypt_cost: 4,
                min_length: 8,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                access_lifetime_secs: 7 * 24 * 3600,
                refresh_lifetime_secs: 7 * 24 * 3600,
                internal_lifetime_secs: 24 * 3600,
            },
            google: GoogleOAuthConfig {
                client_id: Some("test-client-id".to_string()),
                tokeninfo_uri: "http://127.0.0.1:9/tokeninfo".to_string(),
            },
            account: AccountFlowConfig {
                protocol: "http".to_string(),
                domain: "testserver".to_string(),
                site_name: "Profile Service".to_string(),
                send_activation_email: true,
                send_confirmation_email: true,
                password_changed_email_confirmation: true,
                activation_url: "#/activate/{uid}/{token}".to_string(),
                password_reset_confirm_url: "#/password/reset/confirm/{uid}/{token}".to_string(),
                username_reset_confirm_url: "#/username/reset/confirm/{uid}/{token}".to_string(),
                token_timeout_secs: 3600,
            },
            email: EmailConfig {
                backend: EmailBackend::Memory,
                host: String::new(),
                port: 0,
                use_tls: false,
                username: None,
                password: None,
                from_address: "noreply@testserver".to_string(),
            },
            media: MediaConfig {
                root: media_root,
                url: "/media/".to_string(),
                avatar_max_bytes: 2 * 1024 * 1024,
            },
            rate_limit: RateLimitConfig {
                per_second: 100,
                burst_size: 200,
            },
        }
    }
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
