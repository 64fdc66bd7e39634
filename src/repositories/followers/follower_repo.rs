//! # 팔로워 리포지토리
//!
//! MongoDB `followers` 컬렉션. `(user_id, subscriber_id)` 유니크 인덱스로
//! 같은 관계가 두 번 저장되지 않도록 합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::db::Database;
use crate::domain::entities::followers::Follower;
use crate::errors::AppError;
use crate::repositories::map_mongo_error;

const DUPLICATE_FOLLOW: &str = "You are already following this user.";

#[async_trait]
pub trait FollowerStore: Send + Sync {
    /// 관계를 저장합니다. 이미 있으면 `ConflictError`.
    async fn create(&self, follower: Follower) -> Result<Follower, AppError>;

    async fn find(&self, user_id: &ObjectId, subscriber_id: &ObjectId) -> Result<Option<Follower>, AppError>;

    /// `user_id`를 팔로우하는 관계 목록
    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<Follower>, AppError>;

    /// `subscriber_id`가 팔로우하는 관계 목록
    async fn find_by_subscriber(&self, subscriber_id: &ObjectId) -> Result<Vec<Follower>, AppError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;

    /// 사용자가 어느 쪽으로든 참여한 관계를 모두 삭제합니다
    async fn delete_involving(&self, user_id: &ObjectId) -> Result<u64, AppError>;
}

pub struct FollowerRepository {
    db: Arc<Database>,
}

impl FollowerRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Follower> {
        self.db.collection::<Follower>("followers")
    }

    async fn find_where(&self, filter: Document) -> Result<Vec<Follower>, AppError> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "subscriber_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "subscriber_id": 1 })
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
impl FollowerStore for FollowerRepository {
    async fn create(&self, mut follower: Follower) -> Result<Follower, AppError> {
        let result = self
            .collection()
            .insert_one(&follower)
            .await
            .map_err(|e| map_mongo_error(e, DUPLICATE_FOLLOW))?;

        follower.id = result.inserted_id.as_object_id();
        Ok(follower)
    }

    async fn find(&self, user_id: &ObjectId, subscriber_id: &ObjectId) -> Result<Option<Follower>, AppError> {
        self.collection()
            .find_one(doc! { "user_id": *user_id, "subscriber_id": *subscriber_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<Follower>, AppError> {
        self.find_where(doc! { "user_id": *user_id }).await
    }

    async fn find_by_subscriber(&self, subscriber_id: &ObjectId) -> Result<Vec<Follower>, AppError> {
        self.find_where(doc! { "subscriber_id": *subscriber_id }).await
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_involving(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection()
            .delete_many(doc! { "$or": [ { "user_id": *user_id }, { "subscriber_id": *user_id } ] })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
