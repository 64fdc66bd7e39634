//! 소셜 링크 서비스 모듈

pub mod social_link_service;

pub use social_link_service::*;
