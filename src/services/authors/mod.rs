//! 작성자 조회 서비스 모듈 (읽기 전용)

pub mod author_service;

pub use author_service::*;
