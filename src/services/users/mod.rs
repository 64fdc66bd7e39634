//! 사용자 관리 서비스 모듈
//!
//! 계정 생명주기, 비밀번호 정책, 아바타 파일 저장을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::{ExtraFields, UserService};
//!
//! let user = user_service
//!     .create_user("john@example.com", "SecurePass123!", ExtraFields::default())
//!     .await?;
//! ```

pub mod avatar_storage;
pub mod password_policy;
pub mod user_service;

pub use avatar_storage::*;
pub use password_policy::*;
pub use user_service::*;
