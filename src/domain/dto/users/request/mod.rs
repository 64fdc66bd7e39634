//! # 사용자 관련 요청 DTO 모듈

pub mod account_request;
pub mod create_user;
pub mod update_profile;

pub use account_request::*;
pub use create_user::*;
pub use update_profile::*;
