//! 프로필 서비스 백엔드
//!
//! 이메일 기반 계정, 작성자 프로필, 소셜 링크, 팔로워 관계를 제공하는 REST 서비스입니다.
//!
//! # Features
//!
//! - **계정**: 회원가입, 이메일 활성화, 비밀번호/이메일 재설정, 관리자 플래그
//! - **인증**: JWT access/refresh, 40자 레거시 토큰, Google ID 토큰 로그인
//! - **프로필**: 현재 사용자 조회/수정(아바타 업로드 포함), 작성자 공개 목록
//! - **소셜 링크 / 팔로워**: 작성자 본인만 수정 가능한 리소스
//! - **MongoDB + Redis**: 영구 저장과 조회 캐시, 또는 `STORAGE_BACKEND=memory`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 권한 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use profile_service_backend::config::AppConfig;
//! use profile_service_backend::core::{AppState, Stores};
//! use profile_service_backend::services::mail::build_mailer;
//!
//! let config = AppConfig::from_env();
//! let stores = Stores::from_config(&config).await?;
//! let mailer = build_mailer(&config.email)?;
//! let state = AppState::new(config, stores, mailer);
//!
//! let user = state.user_service.create_user("a@example.com", "secret", Default::default()).await?;
//! let tokens = state.token_service.generate_token_pair(&user)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
pub mod permissions;
