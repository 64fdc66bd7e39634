//! 팔로우 관계 서비스 모듈

pub mod follower_service;

pub use follower_service::*;
