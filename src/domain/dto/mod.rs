//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계에서 주고받는 요청/응답 구조를 정의합니다.
//! 엔티티를 그대로 노출하지 않고, 필요한 필드만 선택하여 직렬화합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── users/           # 회원가입, 프로필 수정, 계정 이메일 플로우, 사용자/작성자 응답
//! ├── social_links/    # 소셜 링크 생성/수정/응답
//! └── tokens/          # JWT, 레거시 토큰, Google 로그인 요청/응답
//! ```
//!
//! ## 검증
//!
//! 요청 DTO는 `validator::Validate`를 구현합니다. 핸들러는 `payload.validate()?`로
//! 검증하며, 실패는 `AppError::InvalidFields`(400)로 변환되어 필드별 메시지와 함께 반환됩니다.
//!
//! | 규칙 | 속성 |
//! |------|------|
//! | 이메일 형식 | `#[validate(email)]` |
//! | 최대 길이 | `#[validate(length(max = N))]` |
//! | URL 형식 | `#[validate(url)]` |
//! | 도메인 규칙 | `#[validate(custom(function = ...))]` |

pub mod social_links;
pub mod tokens;
pub mod users;

pub use social_links::*;
pub use tokens::*;
pub use users::*;
