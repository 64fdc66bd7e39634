//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션을 주 저장소로 사용하고, ID 기준 조회는 Redis에
//! 캐시합니다. 인증 미들웨어가 매 요청마다 ID로 사용자를 조회하므로
//! 캐시 적중률이 가장 높은 경로입니다.
//!
//! ## 캐시 키
//!
//! - `user:{id}`: 사용자 문서 (TTL은 `USER_CACHE_TTL_SECONDS`, 기본 10분)
//!
//! 저장/삭제 시 해당 키를 즉시 무효화합니다. Redis 장애는 조회 실패로
//! 전파하지 않고 MongoDB로 폴백합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::repositories::map_mongo_error;

const DUPLICATE_EMAIL: &str = "user with this email already exists.";

/// 사용자 저장소 계약
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 새 사용자를 저장하고 ID가 채워진 엔티티를 반환합니다. 이메일 중복 시 `ConflictError`.
    async fn create(&self, user: User) -> Result<User, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 생성 순서대로 모든 사용자를 반환합니다
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError>;

    /// 기존 사용자를 통째로 교체합니다. 없으면 `NotFound`, 이메일 중복 시 `ConflictError`.
    async fn save(&self, user: &User) -> Result<(), AppError>;

    /// 삭제되었으면 `true`
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}

pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
    cache_ttl_seconds: u64,
}

impl UserRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>, cache_ttl_seconds: u64) -> Self {
        Self {
            db,
            redis,
            cache_ttl_seconds,
        }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>("users")
    }

    fn cache_key(id: &ObjectId) -> String {
        format!("user:{}", id.to_hex())
    }

    async fn invalidate(&self, id: &ObjectId) {
        if let Err(e) = self.redis.del(&Self::cache_key(id)).await {
            log::warn!("사용자 캐시 무효화 실패 ({}): {}", id, e);
        }
    }

    /// 이메일 유니크 인덱스와 정렬용 인덱스를 생성합니다
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "join_date": 1 })
                .build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError(DUPLICATE_EMAIL.to_string()));
        }

        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| map_mongo_error(e, DUPLICATE_EMAIL))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = Self::cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self
            .collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            if let Err(e) = self
                .redis
                .set_with_expiry(&cache_key, user, self.cache_ttl_seconds)
                .await
            {
                log::debug!("사용자 캐시 저장 실패 ({}): {}", id, e);
            }
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "join_date": 1, "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "join_date": 1, "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, user: &User) -> Result<(), AppError> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 사용자는 교체할 수 없습니다".to_string()))?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": id }, user)
            .await
            .map_err(|e| map_mongo_error(e, DUPLICATE_EMAIL))?;

        self.invalidate(&id).await;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.invalidate(id).await;

        Ok(result.deleted_count > 0)
    }
}
