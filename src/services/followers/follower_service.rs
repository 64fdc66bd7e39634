//! # 팔로우 서비스
//!
//! `Follower { user_id, subscriber_id }`는 "subscriber가 user를 팔로우한다"를 뜻합니다.
//! 같은 쌍은 한 번만 존재할 수 있고, 자기 자신은 팔로우할 수 없습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::dto::users::UserResponse;
use crate::domain::entities::{followers::Follower, users::User};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::repositories::{FollowerStore, UserStore};

#[derive(Clone)]
pub struct FollowerService {
    followers: Arc<dyn FollowerStore>,
    users: Arc<dyn UserStore>,
    media_url: String,
}

impl FollowerService {
    pub fn new(followers: Arc<dyn FollowerStore>, users: Arc<dyn UserStore>, media_url: String) -> Self {
        Self {
            followers,
            users,
            media_url,
        }
    }

    pub async fn follow(&self, caller: &AuthenticatedUser, user_id: &ObjectId) -> Result<(), AppError> {
        if user_id == &caller.user_id {
            return Err(AppError::ValidationError("You cannot follow yourself.".to_string()));
        }

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        self.followers.create(Follower::new(*user_id, caller.user_id)).await?;
        log::info!("팔로우: {} -> {}", caller.user_id, user_id);
        Ok(())
    }

    /// 호출자 자신의 관계만 조회되므로 다른 사용자의 팔로우는 지울 수 없습니다
    pub async fn unfollow(&self, caller: &AuthenticatedUser, user_id: &ObjectId) -> Result<(), AppError> {
        let edge = self
            .followers
            .find(user_id, &caller.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("You are not following this user.".to_string()))?;

        if let Some(id) = edge.id {
            self.followers.delete(&id).await?;
        }
        log::info!("언팔로우: {} -> {}", caller.user_id, user_id);
        Ok(())
    }

    /// 호출자를 팔로우하는 사용자들
    pub async fn subscribers(&self, caller: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        let edges = self.followers.find_by_user(&caller.user_id).await?;
        let ids: Vec<ObjectId> = edges.iter().map(|e| e.subscriber_id).collect();
        self.render(&ids).await
    }

    /// 호출자가 팔로우하는 사용자들
    pub async fn following(&self, caller: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        let edges = self.followers.find_by_subscriber(&caller.user_id).await?;
        let ids: Vec<ObjectId> = edges.iter().map(|e| e.user_id).collect();
        self.render(&ids).await
    }

    async fn render(&self, ids: &[ObjectId]) -> Result<Vec<UserResponse>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users: Vec<User> = self.users.find_many(ids).await?;
        Ok(users.iter().map(|u| UserResponse::new(u, &self.media_url)).collect())
    }
}
