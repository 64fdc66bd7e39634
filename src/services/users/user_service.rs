//! # 사용자 관리 서비스 구현
//!
//! 계정의 생성, 조회, 프로필 수정, 삭제, 자격 증명 확인을 담당합니다.
//! 저장소는 트레이트 객체로 주입되므로 MongoDB/Redis 구현과 메모리 구현을
//! 동일하게 사용할 수 있습니다.
//!
//! ## 삭제 순서
//!
//! ```text
//! delete_user(id)
//!   ├─ 소셜 링크 삭제
//!   ├─ 팔로우 관계 삭제 (양방향)
//!   ├─ 레거시 인증 토큰 폐기
//!   ├─ 아바타 파일 삭제 (실패 무시)
//!   └─ 사용자 문서 삭제
//! ```
//!
//! 자식 데이터를 먼저 지우므로 중간에 실패해도 고아 데이터가 남지 않습니다.

use std::sync::Arc;

use bcrypt::hash;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::config::AuthProvider;
use crate::domain::dto::users::{AvatarUpload, UpdateProfileRequest, UserFlagsRequest};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::repositories::{AuthTokenStore, FollowerStore, SocialLinkStore, UserStore};
use crate::services::users::AvatarStorage;
use crate::utils::string_utils::{clean_optional_string, normalize_email};

/// 로그인 실패 메시지. 실패 원인을 구분하지 않습니다.
pub const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// 계정 생성 시 함께 지정할 수 있는 선택 필드
#[derive(Debug, Clone, Default)]
pub struct ExtraFields {
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    social_links: Arc<dyn SocialLinkStore>,
    followers: Arc<dyn FollowerStore>,
    auth_tokens: Arc<dyn AuthTokenStore>,
    avatars: AvatarStorage,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        social_links: Arc<dyn SocialLinkStore>,
        followers: Arc<dyn FollowerStore>,
        auth_tokens: Arc<dyn AuthTokenStore>,
        avatars: AvatarStorage,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            social_links,
            followers,
            auth_tokens,
            avatars,
            bcrypt_cost,
        }
    }

    /// 새 계정을 생성합니다
    ///
    /// 이메일은 정규화되고 비밀번호는 bcrypt로 해싱된 뒤 저장됩니다.
    /// `extra`에 활성화 여부를 지정하지 않으면 비활성 계정으로 만들어집니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 이메일이 비어 있음
    /// * `ConflictError` - 이미 사용 중인 이메일
    pub async fn create_user(&self, email: &str, password: &str, extra: ExtraFields) -> Result<User, AppError> {
        let start_time = std::time::Instant::now();

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::ValidationError("The Email must be set".to_string()));
        }

        let password_hash = self.hash_password(password)?;

        let mut user = User::new_local(email, password_hash);
        user.display_name = clean_optional_string(extra.display_name);
        user.country = clean_optional_string(extra.country);
        user.city = clean_optional_string(extra.city);
        user.bio = clean_optional_string(extra.bio);
        user.is_active = extra.is_active.unwrap_or(false);
        user.is_staff = extra.is_staff.unwrap_or(false);
        user.is_superuser = extra.is_superuser.unwrap_or(false);

        let created = self.users.create(user).await?;

        log::info!("사용자 생성: {} ({:?})", created.email, start_time.elapsed());
        Ok(created)
    }

    /// 관리자 계정을 생성합니다. 스태프/슈퍼유저/활성 플래그는 기본적으로 켜집니다.
    pub async fn create_superuser(&self, email: &str, password: &str, mut extra: ExtraFields) -> Result<User, AppError> {
        if extra.is_staff == Some(false) {
            return Err(AppError::ValidationError("Superuser must have is_staff=True.".to_string()));
        }
        if extra.is_superuser == Some(false) {
            return Err(AppError::ValidationError("Superuser must have is_superuser=True.".to_string()));
        }

        extra.is_staff = Some(true);
        extra.is_superuser = Some(true);
        extra.is_active = Some(extra.is_active.unwrap_or(true));

        self.create_user(email, password, extra).await
    }

    /// 외부 프로바이더 계정을 생성합니다. 비밀번호 로그인은 불가능합니다.
    pub async fn create_external_user(&self, email: &str, provider: AuthProvider) -> Result<User, AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::ValidationError("The Email must be set".to_string()));
        }

        let created = self.users.create(User::new_external(email, provider)).await?;
        log::info!("외부 계정 생성: {} ({})", created.email, provider.as_str());
        Ok(created)
    }

    pub async fn get_by_id(&self, id: &ObjectId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(&normalize_email(email)).await
    }

    /// 호출자 본인의 계정
    pub async fn get_current_user(&self, caller: &AuthenticatedUser) -> Result<User, AppError> {
        self.get_by_id(&caller.user_id).await
    }

    /// 프로필을 부분 수정합니다
    ///
    /// 요청에 없는 필드는 유지되고, 빈 문자열은 값을 지웁니다.
    /// 새 아바타가 저장된 뒤에만 이전 아바타 파일을 삭제합니다.
    pub async fn update_profile(
        &self,
        caller: &AuthenticatedUser,
        request: UpdateProfileRequest,
        avatar: Option<AvatarUpload>,
    ) -> Result<User, AppError> {
        let mut user = self.get_current_user(caller).await?;
        let user_id = caller.user_id;

        if let Some(country) = request.country {
            user.country = clean_optional_string(Some(country));
        }
        if let Some(city) = request.city {
            user.city = clean_optional_string(Some(city));
        }
        if let Some(bio) = request.bio {
            user.bio = clean_optional_string(Some(bio));
        }
        if let Some(display_name) = request.display_name {
            user.display_name = clean_optional_string(Some(display_name));
        }

        let mut replaced_avatar = None;
        if let Some(upload) = avatar {
            let path = self.avatars.save(&user_id, &upload).await?;
            replaced_avatar = user.avatar.replace(path.clone()).filter(|old| old != &path);
        }

        self.users.save(&user).await?;

        if let Some(old) = replaced_avatar {
            self.avatars.remove(&old).await;
        }

        log::debug!("프로필 수정: {}", user_id);
        Ok(user)
    }

    /// 계정과 연관 데이터를 모두 삭제합니다
    pub async fn delete_user(&self, id: &ObjectId) -> Result<(), AppError> {
        let user = self.get_by_id(id).await?;

        let links = self.social_links.delete_by_user(id).await?;
        let edges = self.followers.delete_involving(id).await?;
        self.auth_tokens.revoke_for_user(id).await?;

        if let Some(avatar) = user.avatar.as_deref() {
            self.avatars.remove(avatar).await;
        }

        if !self.users.delete(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        log::info!("사용자 삭제: {} (소셜 링크 {}개, 팔로우 관계 {}개)", id, links, edges);
        Ok(())
    }

    /// 이메일/비밀번호를 확인하고 `last_login`을 갱신합니다
    ///
    /// 존재하지 않는 이메일, 비밀번호가 없는 외부 계정, 잘못된 비밀번호,
    /// 비활성 계정은 모두 같은 `AuthenticationError`로 거부됩니다.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let start_time = std::time::Instant::now();

        let invalid = || AppError::AuthenticationError(INVALID_CREDENTIALS.to_string());

        let mut user = self.find_by_email(email).await?.ok_or_else(invalid)?;

        let password_hash = match user.password_hash.as_deref() {
            Some(hash) if user.has_usable_password() => hash,
            _ => {
                log::warn!("비밀번호 로그인 불가 계정: {}", user.email);
                return Err(invalid());
            }
        };

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid || !user.is_active {
            log::warn!("로그인 실패: {}", user.email);
            return Err(invalid());
        }

        user.last_login = Some(DateTime::now());
        self.users.save(&user).await?;

        log::debug!("Total password verification took: {:?}", start_time.elapsed());
        Ok(user)
    }

    /// 레거시 토큰 로그인. 이미 발급된 토큰이 있으면 그대로 반환합니다.
    pub async fn obtain_auth_token(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.verify_password(email, password).await?;
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        self.auth_tokens.get_or_create(&user_id).await
    }

    pub async fn revoke_auth_token(&self, user_id: &ObjectId) -> Result<(), AppError> {
        self.auth_tokens.revoke_for_user(user_id).await?;
        log::debug!("레거시 토큰 폐기: {}", user_id);
        Ok(())
    }

    /// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다
    pub fn check_password(&self, user: &User, password: &str) -> Result<bool, AppError> {
        match user.password_hash.as_deref() {
            Some(hash) if user.has_usable_password() => bcrypt::verify(password, hash)
                .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e))),
            _ => Ok(false),
        }
    }

    pub async fn set_password(&self, user: &mut User, password: &str) -> Result<(), AppError> {
        user.password_hash = Some(self.hash_password(password)?);
        self.users.save(user).await
    }

    pub async fn set_email(&self, user: &mut User, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::ValidationError("The Email must be set".to_string()));
        }

        user.email = email;
        self.users.save(user).await
    }

    pub async fn set_active(&self, user: &mut User, is_active: bool) -> Result<(), AppError> {
        user.is_active = is_active;
        self.users.save(user).await
    }

    /// 관리자용 플래그 변경. `is_superuser`는 슈퍼유저만 바꿀 수 있습니다.
    pub async fn set_flags(
        &self,
        caller: &AuthenticatedUser,
        id: &ObjectId,
        flags: UserFlagsRequest,
    ) -> Result<User, AppError> {
        if flags.is_superuser.is_some() && !caller.is_superuser {
            return Err(AppError::AuthorizationError(
                "Only superusers can change the superuser flag.".to_string(),
            ));
        }

        let mut user = self.get_by_id(id).await?;

        if let Some(is_active) = flags.is_active {
            user.is_active = is_active;
        }
        if let Some(is_staff) = flags.is_staff {
            user.is_staff = is_staff;
        }
        if let Some(is_superuser) = flags.is_superuser {
            user.is_superuser = is_superuser;
        }

        self.users.save(&user).await?;
        log::info!(
            "플래그 변경: {} (active={}, staff={}, superuser={}) by {}",
            id,
            user.is_active,
            user.is_staff,
            user.is_superuser,
            caller.user_id
        );
        Ok(user)
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::info!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }
}
