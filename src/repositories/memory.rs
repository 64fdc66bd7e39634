//! # 메모리 저장소
//!
//! 모든 저장소 트레이트를 프로세스 메모리로 구현합니다.
//! `STORAGE_BACKEND=memory`로 외부 의존성 없이 서버를 띄우거나, 테스트에서 사용합니다.
//! 데이터는 삽입 순서대로 유지되며 재시작 시 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::entities::{followers::Follower, social_links::SocialLink, users::User};
use crate::errors::AppError;
use crate::repositories::{generate_token_key, AuthTokenStore, FollowerStore, SocialLinkStore, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    social_links: RwLock<Vec<SocialLink>>,
    followers: RwLock<Vec<Follower>>,
    /// 사용자 ID → 토큰 키
    auth_tokens: RwLock<HashMap<ObjectId, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("user with this email already exists.".to_string()));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.id.as_ref().is_some_and(|id| ids.contains(id)))
            .cloned()
            .collect())
    }

    async fn save(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AppError::ConflictError("user with this email already exists.".to_string()));
        }

        match users.iter_mut().find(|u| u.id.is_some() && u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        Ok(users.len() < before)
    }
}

#[async_trait]
impl SocialLinkStore for MemoryStore {
    async fn create(&self, mut link: SocialLink) -> Result<SocialLink, AppError> {
        link.id = Some(ObjectId::new());
        self.social_links.write().await.push(link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<SocialLink>, AppError> {
        let links = self.social_links.read().await;
        Ok(links.iter().find(|l| l.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<SocialLink>, AppError> {
        let links = self.social_links.read().await;
        Ok(links.iter().filter(|l| &l.user_id == user_id).cloned().collect())
    }

    async fn find_by_users(&self, user_ids: &[ObjectId]) -> Result<Vec<SocialLink>, AppError> {
        let links = self.social_links.read().await;
        Ok(links
            .iter()
            .filter(|l| user_ids.contains(&l.user_id))
            .cloned()
            .collect())
    }

    async fn save(&self, link: &SocialLink) -> Result<(), AppError> {
        let mut links = self.social_links.write().await;

        match links.iter_mut().find(|l| l.id.is_some() && l.id == link.id) {
            Some(existing) => {
                *existing = link.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Social link not found".to_string())),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut links = self.social_links.write().await;
        let before = links.len();
        links.retain(|l| l.id.as_ref() != Some(id));
        Ok(links.len() < before)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let mut links = self.social_links.write().await;
        let before = links.len();
        links.retain(|l| &l.user_id != user_id);
        Ok((before - links.len()) as u64)
    }
}

#[async_trait]
impl FollowerStore for MemoryStore {
    async fn create(&self, mut follower: Follower) -> Result<Follower, AppError> {
        let mut followers = self.followers.write().await;

        if followers
            .iter()
            .any(|f| f.user_id == follower.user_id && f.subscriber_id == follower.subscriber_id)
        {
            return Err(AppError::ConflictError("You are already following this user.".to_string()));
        }

        follower.id = Some(ObjectId::new());
        followers.push(follower.clone());
        Ok(follower)
    }

    async fn find(&self, user_id: &ObjectId, subscriber_id: &ObjectId) -> Result<Option<Follower>, AppError> {
        let followers = self.followers.read().await;
        Ok(followers
            .iter()
            .find(|f| &f.user_id == user_id && &f.subscriber_id == subscriber_id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<Follower>, AppError> {
        let followers = self.followers.read().await;
        Ok(followers.iter().filter(|f| &f.user_id == user_id).cloned().collect())
    }

    async fn find_by_subscriber(&self, subscriber_id: &ObjectId) -> Result<Vec<Follower>, AppError> {
        let followers = self.followers.read().await;
        Ok(followers
            .iter()
            .filter(|f| &f.subscriber_id == subscriber_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut followers = self.followers.write().await;
        let before = followers.len();
        followers.retain(|f| f.id.as_ref() != Some(id));
        Ok(followers.len() < before)
    }

    async fn delete_involving(&self, user_id: &ObjectId) -> Result<u64, AppError> {
        let mut followers = self.followers.write().await;
        let before = followers.len();
        followers.retain(|f| &f.user_id != user_id && &f.subscriber_id != user_id);
        Ok((before - followers.len()) as u64)
    }
}

#[async_trait]
impl AuthTokenStore for MemoryStore {
    async fn get_or_create(&self, user_id: &ObjectId) -> Result<String, AppError> {
        let mut tokens = self.auth_tokens.write().await;
        let key = tokens.entry(*user_id).or_insert_with(generate_token_key);
        Ok(key.clone())
    }

    async fn find_user_id(&self, key: &str) -> Result<Option<ObjectId>, AppError> {
        let tokens = self.auth_tokens.read().await;
        Ok(tokens
            .iter()
            .find(|(_, stored)| stored.as_str() == key)
            .map(|(user_id, _)| *user_id))
    }

    async fn revoke_for_user(&self, user_id: &ObjectId) -> Result<(), AppError> {
        self.auth_tokens.write().await.remove(user_id);
        Ok(())
    }
}
