//! # 작성자 조회 서비스
//!
//! 공개 프로필과 소셜 링크를 함께 반환합니다. 목록 조회는 사용자 목록을
//! 한 번, 해당 사용자들의 링크를 한 번 조회하여 메모리에서 묶습니다.

use std::collections::HashMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::dto::social_links::SocialLinkResponse;
use crate::domain::dto::users::{AuthorResponse, UserResponse};
use crate::domain::entities::{social_links::SocialLink, users::User};
use crate::errors::AppError;
use crate::repositories::{SocialLinkStore, UserStore};

#[derive(Clone)]
pub struct AuthorService {
    users: Arc<dyn UserStore>,
    social_links: Arc<dyn SocialLinkStore>,
    media_url: String,
}

impl AuthorService {
    pub fn new(users: Arc<dyn UserStore>, social_links: Arc<dyn SocialLinkStore>, media_url: String) -> Self {
        Self {
            users,
            social_links,
            media_url,
        }
    }

    /// 모든 작성자를 가입 순서대로 반환합니다
    pub async fn list_authors(&self) -> Result<Vec<AuthorResponse>, AppError> {
        let users = self.users.find_all().await?;
        let ids: Vec<ObjectId> = users.iter().filter_map(|u| u.id).collect();

        let mut links_by_user: HashMap<ObjectId, Vec<SocialLink>> = HashMap::new();
        for link in self.social_links.find_by_users(&ids).await? {
            links_by_user.entry(link.user_id).or_default().push(link);
        }

        Ok(users
            .iter()
            .map(|user| {
                let links = user
                    .id
                    .and_then(|id| links_by_user.remove(&id))
                    .unwrap_or_default();
                self.to_response(user, &links)
            })
            .collect())
    }

    pub async fn get_author(&self, id: &ObjectId) -> Result<AuthorResponse, AppError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        let links = self.social_links.find_by_user(id).await?;
        Ok(self.to_response(&user, &links))
    }

    fn to_response(&self, user: &User, links: &[SocialLink]) -> AuthorResponse {
        AuthorResponse {
            profile: UserResponse::new(user, &self.media_url),
            social_links: links.iter().map(SocialLinkResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    async fn seed_user(store: &MemoryStore, email: &str) -> ObjectId {
        let user = UserStore::create(store, User::new_local(email.to_string(), "hash".to_string()))
            .await
            .unwrap();
        user.id.unwrap()
    }

    #[actix_web::test]
    async fn test_list_authors_attaches_links() {
        let store = Arc::new(MemoryStore::new());
        let a = seed_user(&store, "a@x.com").await;
        let b = seed_user(&store, "b@x.com").await;
        SocialLinkStore::create(store.as_ref(), SocialLink::new(a, "https://a.example".to_string()))
            .await
            .unwrap();

        let service = AuthorService::new(store.clone(), store, "/media/".to_string());
        let authors = service.list_authors().await.unwrap();

        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].profile.id, a.to_hex());
        assert_eq!(authors[0].social_links.len(), 1);
        assert_eq!(authors[0].social_links[0].link, "https://a.example");
        assert_eq!(authors[1].profile.id, b.to_hex());
        assert!(authors[1].social_links.is_empty());
    }

    #[actix_web::test]
    async fn test_get_missing_author() {
        let store = Arc::new(MemoryStore::new());
        let service = AuthorService::new(store.clone(), store, "/media/".to_string());

        let result = service.get_author(&ObjectId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
