//! 캐싱 계층 모듈
//!
//! Redis 클라이언트와 JSON 기반 값 직렬화를 제공합니다.
//!
//! | 용도 | 키 | 만료 |
//! |------|----|------|
//! | 사용자 조회 캐시 | `user:<id>` | `CACHE_TTL_SECONDS` |
//! | 레거시 토큰 (사용자 → 키) | `authtoken:user:<id>` | 없음 |
//! | 레거시 토큰 (키 → 사용자) | `authtoken:key:<key>` | 없음 |
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::connect("redis://localhost:6379").await?;
//! cache.set_with_expiry("user:123", &user, 600).await?;
//!
//! let cached: Option<User> = cache.get("user:123").await?;
//! cache.del("user:123").await?;
//! ```

pub mod redis;
