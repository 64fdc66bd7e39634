//! # Domain Layer Module
//!
//! 저장소에 보관되는 엔티티, HTTP 경계의 DTO, 인증/토큰 모델을 정의합니다.
//!
//! ```text
//! domain/
//! ├── entities/   # User, SocialLink, Follower (MongoDB 문서)
//! ├── dto/        # 요청/응답 구조와 validator 규칙
//! └── models/     # AuthenticatedUser, 토큰 클레임
//! ```
//!
//! ## 계층 간 규칙
//!
//! - 엔티티는 핸들러 응답으로 직접 직렬화하지 않습니다. 항상 응답 DTO로 변환합니다.
//! - 요청 DTO는 형식 검증만 담당합니다. 설정에 의존하는 규칙(비밀번호 정책,
//!   아바타 크기)은 서비스 계층에서 검사합니다.
//! - ID는 `ObjectId`로 보관하고 응답에서는 24자리 16진수 문자열로 노출합니다.
//!
//! ## 예제
//!
//! ```rust,ignore
//! use crate::domain::dto::users::UserResponse;
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_local("user@example.com".to_string(), hash);
//! let body = UserResponse::new(&user, "/media/");
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
