//! # User Data Transfer Objects Module
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user.rs      # 회원가입 {email, password}
//! │   ├── update_profile.rs   # 프로필 부분 수정 (multipart 필드)
//! │   └── account_request.rs  # 활성화, 비밀번호/이메일 재설정, 관리자 플래그
//! └── response/
//!     └── user_response.rs    # UserResponse, AuthorResponse, CreateUserResponse
//! ```
//!
//! ## 응답 예제
//!
//! ```json
//! {
//!   "id": "507f1f77bcf86cd799439011",
//!   "avatar": "/media/avatar/user_507f1f77bcf86cd799439011/me.jpg",
//!   "country": "Korea",
//!   "city": "Seoul",
//!   "bio": null,
//!   "display_name": "Jang"
//! }
//! ```
//!
//! 이메일과 비밀번호는 프로필 응답에 포함되지 않습니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
