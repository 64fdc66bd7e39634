//! Users Entity Module
//!
//! 계정 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_local("user@example.com".to_string(), hashed_password);
//! ```

pub mod user;

pub use user::*;
