//! 메일 발송 모듈
//!
//! `EMAIL_BACKEND`에 따라 SMTP, 로그 출력, 메모리 보관 중 하나로 발송합니다.

pub mod mailer;
pub mod messages;

pub use mailer::*;
pub use messages::*;
