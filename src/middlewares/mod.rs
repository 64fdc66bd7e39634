//! # HTTP 미들웨어 모듈
//!
//! - [`AuthMiddleware`]: `Authorization` 헤더 인증 (필수/선택 모드)

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
