//! 인증 및 계정 서비스 모듈
//!
//! - [`TokenService`]: Bearer access/refresh, 내부 토큰, 계정 토큰 발급/검증
//! - [`Authenticator`]: `Authorization` 헤더 해석
//! - [`GoogleAuthService`]: Google ID 토큰 로그인
//! - [`AccountService`]: 회원가입, 활성화, 재설정 메일 플로우
//!
//! # Examples
//!
//! ```rust,ignore
//! let tokens = state.token_service.generate_token_pair(&user)?;
//! let caller = state.authenticator.authenticate(Some("Bearer eyJ...")).await?;
//! ```

pub mod account_service;
pub mod authenticator;
pub mod google_auth_service;
pub mod token_service;

pub use account_service::*;
pub use authenticator::*;
pub use google_auth_service::*;
pub use token_service::*;
