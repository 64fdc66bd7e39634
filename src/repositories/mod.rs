//! # 데이터 액세스 계층
//!
//! 서비스는 구체 저장소가 아닌 저장소 트레이트(`UserStore`, `SocialLinkStore`,
//! `FollowerStore`, `AuthTokenStore`)에만 의존합니다.
//!
//! | 트레이트 | 운영 구현 | 메모리 구현 |
//! |----------|-----------|-------------|
//! | `UserStore` | `UserRepository` (MongoDB + Redis 캐시) | `MemoryStore` |
//! | `SocialLinkStore` | `SocialLinkRepository` (MongoDB) | `MemoryStore` |
//! | `FollowerStore` | `FollowerRepository` (MongoDB) | `MemoryStore` |
//! | `AuthTokenStore` | `RedisAuthTokenRepository` (Redis) | `MemoryStore` |

pub mod followers;
pub mod memory;
pub mod social_links;
pub mod tokens;
pub mod users;

pub use followers::*;
pub use memory::MemoryStore;
pub use social_links::*;
pub use tokens::*;
pub use users::*;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::errors::AppError;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 드라이버 에러를 `AppError`로 변환합니다. 유니크 인덱스 위반은 `ConflictError`가 됩니다.
pub(crate) fn map_mongo_error(error: mongodb::error::Error, conflict_message: &str) -> AppError {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE => {
            AppError::ConflictError(conflict_message.to_string())
        }
        _ => AppError::DatabaseError(error.to_string()),
    }
}
