//! # 소셜 링크 리포지토리
//!
//! MongoDB `social_links` 컬렉션. 작성자 목록 조회 시 여러 사용자의 링크를
//! 한 번의 `$in` 쿼리로 가져옵니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, IndexModel,
};

use crate::db::Database;
use crate::domain::entities::social_links::SocialLink;
use crate::errors::AppError;

#[async_trait]
pub trait SocialLinkStore: Send + Sync {
    async fn create(&self, link: SocialLink) -> Result<SocialLink, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<SocialLink>, AppError>;

    /// 한 사용자의 링크 (생성 순)
    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<SocialLink>, AppError>;

    /// 여러 사용자의 링크를 한 번에 조회합니다
    async fn find_by_users(&self, user_ids: &[ObjectId]) -> Result<Vec<SocialLink>, AppError>;

    async fn save(&self, link: &SocialLink) -> Result<(), AppError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;

    /// 사용자의 모든 링크를 삭제하고 삭제 건수를 반환합니다
    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64, AppError>;
}

pub struct SocialLinkRepository {
    db: Arc<Database>,
}

impl SocialLinkRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<SocialLink> {
        self.db.collection::<SocialLink>("social_links")
    }

    async fn find_where(&self, filter: Document) -> Result<Vec<SocialLink>, AppError> {
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
        let index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();

        self.collection()
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SocialLinkStore for SocialLinkRepository {
    async fn create(&self, mut link: SocialLink) -> Result<SocialLink, AppError> {
        let result = self
            .collection()
            .insert_one(&link)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        link.id = result.inserted_id.as_object_id();
        Ok(link)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<SocialLink>, AppError> {
        self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<SocialLink>, AppError> {
        self.find_where(doc! { "user_id": *user_id }).await
    }

    async fn find_by_users(&self, user_ids: &[ObjectId]) -> Result<Vec<SocialLink>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_where(doc! { "user_id": { "$in": user_ids.to_vec() } }).await
    }

    async fn save(&self, link: &SocialLink) -> Result<(), AppError> {
        let id = link
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 링크는 교체할 수 없습니다".to_string()))?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": id }, link)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Social link not found".to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection()
            .delete_many(doc! { "user_id": *user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
