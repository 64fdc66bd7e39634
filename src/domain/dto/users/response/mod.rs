//! # 사용자 관련 응답 DTO 모듈
//!
//! 비밀번호 해시, 이메일, 관리자 플래그는 공개 응답에서 제외됩니다.

pub mod user_response;

pub use user_response::*;
