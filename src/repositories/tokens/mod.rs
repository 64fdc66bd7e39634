//! 레거시 인증 토큰 저장소
//!
//! `Authorization: Token <key>` 형식의 불투명 토큰을 Redis에 보관합니다.
//! 사용자당 하나의 키만 존재하며, 로그아웃이나 계정 삭제 시 제거됩니다.
//!
//! # Redis 키
//!
//! - `authtoken:key:{key}` → 사용자 ID
//! - `authtoken:user:{user_id}` → 키

pub mod token_repository;

pub use token_repository::*;
