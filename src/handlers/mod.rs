//! # HTTP 핸들러 모듈
//!
//! 리소스별로 핸들러 함수를 둡니다. 라우트 등록은 [`crate::routes`]에서 합니다.
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | [`users`] | `/api/v1/users` |
//! | [`authors`] | `/api/v1/authors` |
//! | [`social_links`] | `/api/v1/social-links` |
//! | [`followers`] | `/api/v1/followers` |
//! | [`accounts`] | `/api/v1/auth/users/...` |
//! | [`auth`] | `/api/v1/auth/{jwt,token,google}/...` |

pub mod accounts;
pub mod auth;
pub mod authors;
pub mod followers;
pub mod social_links;
pub mod users;

use mongodb::bson::oid::ObjectId;

use crate::errors::AppError;

/// 경로의 ID가 형식에 맞지 않으면 존재하지 않는 리소스로 취급합니다
pub(crate) fn path_object_id(raw: &str, not_found: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::NotFound(not_found.to_string()))
}
