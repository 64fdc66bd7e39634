//! 메일 발송 설정

use super::{env_flag, env_or, env_parse};

/// 메일 전송 방식
#[derive(Debug, Clone, PartialEq)]
pub enum EmailBackend {
    /// SMTP 서버로 실제 발송
    Smtp,
    /// 로그로만 출력
    Console,
    /// 메모리에 보관 (테스트용)
    Memory,
}

impl EmailBackend {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "console" => EmailBackend::Console,
            "memory" | "locmem" => EmailBackend::Memory,
            _ => EmailBackend::Smtp,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub backend: EmailBackend,
    pub host: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let username = std::env::var("EMAIL_LOGIN").ok().filter(|v| !v.is_empty());
        let from_address = std::env::var("DEFAULT_FROM_EMAIL")
            .ok()
            .or_else(|| username.clone())
            .unwrap_or_else(|| "webmaster@localhost".to_string());

        Self {
            backend: EmailBackend::from_str(&env_or("EMAIL_BACKEND", "smtp")),
            host: env_or("EMAIL_HOST", "smtp.gmail.com"),
            port: env_parse("EMAIL_PORT", 587),
            use_tls: env_flag("EMAIL_USE_TLS", true),
            username,
            password: std::env::var("EMAIL_PASSWORD").ok().filter(|v| !v.is_empty()),
            from_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_backend_from_string() {
        assert_eq!(EmailBackend::from_str("console"), EmailBackend::Console);
        assert_eq!(EmailBackend::from_str("locmem"), EmailBackend::Memory);
        assert_eq!(EmailBackend::from_str("smtp"), EmailBackend::Smtp);
        assert_eq!(EmailBackend::from_str("anything"), EmailBackend::Smtp);
    }
}
