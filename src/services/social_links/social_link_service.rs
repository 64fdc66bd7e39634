//! # 소셜 링크 서비스
//!
//! 링크는 항상 호출자 소유로 생성됩니다. 개별 링크에 대한 조회/수정/삭제는
//! 존재 여부(404)를 먼저 확인한 뒤 `IsAuthor` 권한(403)을 검사합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::domain::dto::social_links::{SocialLinkPatch, SocialLinkRequest, SocialLinkResponse};
use crate::domain::entities::social_links::SocialLink;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::permissions::{check_object_permission, IsAuthor};
use crate::repositories::SocialLinkStore;

#[derive(Clone)]
pub struct SocialLinkService {
    social_links: Arc<dyn SocialLinkStore>,
}

impl SocialLinkService {
    pub fn new(social_links: Arc<dyn SocialLinkStore>) -> Self {
        Self { social_links }
    }

    /// 호출자의 링크 목록
    pub async fn list(&self, caller: &AuthenticatedUser) -> Result<Vec<SocialLinkResponse>, AppError> {
        let links = self.social_links.find_by_user(&caller.user_id).await?;
        Ok(links.iter().map(SocialLinkResponse::from).collect())
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedUser,
        request: SocialLinkRequest,
    ) -> Result<SocialLinkResponse, AppError> {
        let link = self
            .social_links
            .create(SocialLink::new(caller.user_id, request.link))
            .await?;

        log::debug!("소셜 링크 생성: {} (user {})", link.link, caller.user_id);
        Ok(SocialLinkResponse::from(&link))
    }

    pub async fn get(&self, caller: &AuthenticatedUser, id: &ObjectId) -> Result<SocialLinkResponse, AppError> {
        let link = self.find_owned(caller, id).await?;
        Ok(SocialLinkResponse::from(&link))
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedUser,
        id: &ObjectId,
        request: SocialLinkRequest,
    ) -> Result<SocialLinkResponse, AppError> {
        let mut link = self.find_owned(caller, id).await?;
        link.link = request.link;
        self.social_links.save(&link).await?;
        Ok(SocialLinkResponse::from(&link))
    }

    pub async fn partial_update(
        &self,
        caller: &AuthenticatedUser,
        id: &ObjectId,
        patch: SocialLinkPatch,
    ) -> Result<SocialLinkResponse, AppError> {
        let mut link = self.find_owned(caller, id).await?;
        if let Some(value) = patch.link {
            link.link = value;
            self.social_links.save(&link).await?;
        }
        Ok(SocialLinkResponse::from(&link))
    }

    pub async fn delete(&self, caller: &AuthenticatedUser, id: &ObjectId) -> Result<(), AppError> {
        self.find_owned(caller, id).await?;

        if !self.social_links.delete(id).await? {
            return Err(AppError::NotFound("Social link not found".to_string()));
        }
        Ok(())
    }

    async fn find_owned(&self, caller: &AuthenticatedUser, id: &ObjectId) -> Result<SocialLink, AppError> {
        let link = self
            .social_links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Social link not found".to_string()))?;

        check_object_permission(&IsAuthor, caller, &link)?;
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::AuthScheme;
    use crate::permissions::PERMISSION_DENIED;
    use crate::repositories::MemoryStore;

    fn caller(user_id: ObjectId) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            email: "c@x.com".to_string(),
            is_staff: false,
            is_superuser: false,
            scheme: AuthScheme::Bearer,
        }
    }

    fn request(link: &str) -> SocialLinkRequest {
        SocialLinkRequest { link: link.to_string() }
    }

    #[actix_web::test]
    async fn test_owner_can_update_and_delete() {
        let service = SocialLinkService::new(Arc::new(MemoryStore::new()));
        let owner = caller(ObjectId::new());

        let created = service.create(&owner, request("https://a.example")).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        let updated = service.update(&owner, &id, request("https://b.example")).await.unwrap();
        assert_eq!(updated.link, "https://b.example");

        let untouched = service.partial_update(&owner, &id, SocialLinkPatch::default()).await.unwrap();
        assert_eq!(untouched.link, "https://b.example");

        service.delete(&owner, &id).await.unwrap();
        assert!(service.list(&owner).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_other_user_is_forbidden_and_link_unchanged() {
        let service = SocialLinkService::new(Arc::new(MemoryStore::new()));
        let owner = caller(ObjectId::new());
        let stranger = caller(ObjectId::new());

        let created = service.create(&owner, request("https://a.example")).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        match service.update(&stranger, &id, request("https://evil.example")).await {
            Err(AppError::AuthorizationError(message)) => assert_eq!(message, PERMISSION_DENIED),
            other => panic!("Expected AuthorizationError, got {:?}", other),
        }
        assert!(matches!(service.delete(&stranger, &id).await, Err(AppError::AuthorizationError(_))));

        assert_eq!(service.get(&owner, &id).await.unwrap().link, "https://a.example");
    }

    #[actix_web::test]
    async fn test_missing_link_is_not_found() {
        let service = SocialLinkService::new(Arc::new(MemoryStore::new()));
        let result = service.get(&caller(ObjectId::new()), &ObjectId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_list_only_returns_own_links() {
        let service = SocialLinkService::new(Arc::new(MemoryStore::new()));
        let a = caller(ObjectId::new());
        let b = caller(ObjectId::new());

        service.create(&a, request("https://a.example")).await.unwrap();
        service.create(&b, request("https://b.example")).await.unwrap();

        let links = service.list(&a).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link, "https://a.example");
    }
}
