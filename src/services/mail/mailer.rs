//! # 메일 발송기
//!
//! | 백엔드 | 구현 | 용도 |
//! |--------|------|------|
//! | `smtp` | [`SmtpMailer`] | 운영 (STARTTLS) |
//! | `console` | [`LogMailer`] | 개발, 본문을 로그로 출력 |
//! | `memory` | [`MemoryMailer`] | 테스트, 발송 내역 보관 |

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::Mutex;

use crate::config::{EmailBackend, EmailConfig};
use crate::errors::AppError;

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}

/// 설정에 맞는 발송기를 만듭니다
pub fn build_mailer(config: &EmailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    let mailer: Arc<dyn Mailer> = match config.backend {
        EmailBackend::Smtp => Arc::new(SmtpMailer::new(config)?),
        EmailBackend::Console => Arc::new(LogMailer),
        EmailBackend::Memory => Arc::new(MemoryMailer::new()),
    };
    log::info!("메일 백엔드: {:?}", config.backend);
    Ok(mailer)
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, AppError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| AppError::InternalError(format!("발신 주소 형식 오류 ({}): {}", config.from_address, e)))?;

        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| AppError::InternalError(format!("SMTP 설정 실패: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::ValidationError(format!("수신 주소 형식 오류: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| AppError::InternalError(format!("메일 생성 실패: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("메일 발송: {}", email.to);
        Ok(())
    }
}

/// 본문을 로그로만 출력합니다
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        log::info!("📧 To: {}\nSubject: {}\n\n{}", email.to, email.subject, email.body);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<OutgoingEmail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 발송된 메일
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        self.outbox.lock().await.push(email);
        Ok(())
    }
}
