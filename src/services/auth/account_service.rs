//! # 계정 메일 플로우 서비스
//!
//! 회원가입, 활성화, 비밀번호/이메일 재설정, 비밀번호 변경, 관리자 작업을 담당합니다.
//!
//! 재설정 요청(`resend_activation`, `reset_password`, `reset_email`)은 계정 존재
//! 여부와 관계없이 항상 성공합니다. 메일은 조건을 만족하는 계정에만 발송됩니다.
//!
//! 링크 형식: `{protocol}://{domain}/{template}`, 템플릿의 `{uid}`와 `{token}`이 채워집니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::config::AccountFlowConfig;
use crate::domain::dto::users::{
    ActivationRequest, CreateUserRequest, EmailResetConfirmRequest, PasswordResetConfirmRequest, SetPasswordRequest,
    UserFlagsRequest,
};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::AccountTokenPurpose;
use crate::errors::AppError;
use crate::permissions::{check_object_permission, CurrentUserOrAdmin, IsAdminUser};
use crate::services::auth::TokenService;
use crate::services::mail::{self, Mailer};
use crate::services::users::{ExtraFields, PasswordPolicy, UserService};

const INVALID_UID: &str = "Invalid user id or user doesn't exist.";
const INVALID_TOKEN: &str = "Invalid token for given user.";
const STALE_TOKEN: &str = "Stale token for given user.";

#[derive(Clone)]
pub struct AccountService {
    user_service: UserService,
    token_service: TokenService,
    mailer: Arc<dyn Mailer>,
    policy: PasswordPolicy,
    config: AccountFlowConfig,
}

impl AccountService {
    pub fn new(
        user_service: UserService,
        token_service: TokenService,
        mailer: Arc<dyn Mailer>,
        policy: PasswordPolicy,
        config: AccountFlowConfig,
    ) -> Self {
        Self {
            user_service,
            token_service,
            mailer,
            policy,
            config,
        }
    }

    /// 회원가입. 활성화 메일을 보내도록 설정된 경우 비활성 계정으로 생성됩니다.
    pub async fn register(&self, request: CreateUserRequest) -> Result<User, AppError> {
        self.policy.validate("password", &request.password, Some(&request.email))?;

        let extra = ExtraFields {
            is_active: Some(!self.config.send_activation_email),
            ..Default::default()
        };
        let user = self
            .user_service
            .create_user(&request.email, &request.password, extra)
            .await
            .map_err(|e| match e {
                AppError::ConflictError(message) => AppError::field("email", message),
                other => other,
            })?;

        if self.config.send_activation_email {
            self.send_activation(&user).await?;
        }

        Ok(user)
    }

    pub async fn activate(&self, request: ActivationRequest) -> Result<(), AppError> {
        let mut user = self.user_from_uid(&request.uid).await?;

        if user.is_active {
            return Err(AppError::AuthorizationError(STALE_TOKEN.to_string()));
        }
        self.check_token(&user, AccountTokenPurpose::Activation, &request.token)?;

        self.user_service.set_active(&mut user, true).await?;
        log::info!("계정 활성화: {}", user.email);

        if self.config.send_confirmation_email {
            self.mailer
                .send(mail::confirmation_email(&user.email, &self.config.site_name))
                .await?;
        }
        Ok(())
    }

    pub async fn resend_activation(&self, email: &str) -> Result<(), AppError> {
        if !self.config.send_activation_email {
            return Ok(());
        }

        match self.user_service.find_by_email(email).await? {
            Some(user) if !user.is_active && user.has_usable_password() => self.send_activation(&user).await,
            _ => Ok(()),
        }
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.find_resettable(email).await? else {
            return Ok(());
        };

        let url = self.account_url(&user, AccountTokenPurpose::PasswordReset, &self.config.password_reset_confirm_url)?;
        self.mailer
            .send(mail::password_reset_email(&user.email, &self.config.site_name, &url))
            .await
    }

    pub async fn reset_password_confirm(&self, request: PasswordResetConfirmRequest) -> Result<(), AppError> {
        let mut user = self.user_from_uid(&request.uid).await?;
        self.check_token(&user, AccountTokenPurpose::PasswordReset, &request.token)?;
        self.policy
            .validate("new_password", &request.new_password, Some(&user.email))?;

        self.user_service.set_password(&mut user, &request.new_password).await?;
        log::info!("비밀번호 재설정: {}", user.email);

        self.notify_password_changed(&user).await
    }

    pub async fn reset_email(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.find_resettable(email).await? else {
            return Ok(());
        };

        let url = self.account_url(&user, AccountTokenPurpose::EmailReset, &self.config.username_reset_confirm_url)?;
        self.mailer
            .send(mail::email_reset_email(&user.email, &self.config.site_name, &url))
            .await
    }

    pub async fn reset_email_confirm(&self, request: EmailResetConfirmRequest) -> Result<(), AppError> {
        let mut user = self.user_from_uid(&request.uid).await?;
        self.check_token(&user, AccountTokenPurpose::EmailReset, &request.token)?;

        let old_email = user.email.clone();
        self.user_service
            .set_email(&mut user, &request.new_email)
            .await
            .map_err(|e| match e {
                AppError::ConflictError(message) => AppError::field("new_email", message),
                other => other,
            })?;

        log::info!("이메일 변경: {} -> {}", old_email, user.email);
        Ok(())
    }

    pub async fn set_password(&self, caller: &AuthenticatedUser, request: SetPasswordRequest) -> Result<(), AppError> {
        let mut user = self.user_service.get_current_user(caller).await?;

        if !self.user_service.check_password(&user, &request.current_password)? {
            return Err(AppError::field("current_password", "Invalid password."));
        }
        self.policy
            .validate("new_password", &request.new_password, Some(&user.email))?;

        self.user_service.set_password(&mut user, &request.new_password).await?;
        log::info!("비밀번호 변경: {}", user.email);

        self.notify_password_changed(&user).await
    }

    /// 본인 또는 관리자만 계정을 삭제할 수 있습니다
    pub async fn delete_user(&self, caller: &AuthenticatedUser, id: &ObjectId) -> Result<(), AppError> {
        let target = self.user_service.get_by_id(id).await?;
        check_object_permission(&CurrentUserOrAdmin, caller, &target)?;
        self.user_service.delete_user(id).await
    }

    pub async fn update_flags(
        &self,
        caller: &AuthenticatedUser,
        id: &ObjectId,
        flags: UserFlagsRequest,
    ) -> Result<User, AppError> {
        check_object_permission(&IsAdminUser, caller, &())?;
        self.user_service.set_flags(caller, id, flags).await
    }

    async fn send_activation(&self, user: &User) -> Result<(), AppError> {
        let url = self.account_url(user, AccountTokenPurpose::Activation, &self.config.activation_url)?;
        self.mailer
            .send(mail::activation_email(&user.email, &self.config.site_name, &url))
            .await
    }

    async fn notify_password_changed(&self, user: &User) -> Result<(), AppError> {
        if !self.config.password_changed_email_confirmation {
            return Ok(());
        }
        self.mailer
            .send(mail::password_changed_email(&user.email, &self.config.site_name))
            .await
    }

    /// 활성 상태이고 비밀번호 로그인이 가능한 계정
    async fn find_resettable(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .user_service
            .find_by_email(email)
            .await?
            .filter(|user| user.is_active && user.has_usable_password()))
    }

    fn account_url(&self, user: &User, purpose: AccountTokenPurpose, template: &str) -> Result<String, AppError> {
        let id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let token = self.token_service.issue_account_token(user, purpose)?;
        Ok(self.config.build_url(template, &TokenService::encode_uid(&id), &token))
    }

    async fn user_from_uid(&self, uid: &str) -> Result<User, AppError> {
        let id = TokenService::decode_uid(uid).ok_or_else(|| AppError::field("uid", INVALID_UID))?;

        match self.user_service.get_by_id(&id).await {
            Ok(user) => Ok(user),
            Err(AppError::NotFound(_)) => Err(AppError::field("uid", INVALID_UID)),
            Err(e) => Err(e),
        }
    }

    fn check_token(&self, user: &User, purpose: AccountTokenPurpose, token: &str) -> Result<(), AppError> {
        if self.token_service.verify_account_token(user, purpose, token) {
            Ok(())
        } else {
            log::warn!("유효하지 않은 계정 토큰: {} ({:?})", user.email, purpose);
            Err(AppError::field("token", INVALID_TOKEN))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::repositories::MemoryStore;
    use crate::services::mail::MemoryMailer;
    use crate::services::users::AvatarStorage;

    struct Fixture {
        accounts: AccountService,
        users: UserService,
        mailer: Arc<MemoryMailer>,
    }

    fn fixture() -> Fixture {
        let config = AppConfig::for_tests(std::env::temp_dir());
        let store = Arc::new(MemoryStore::new());
        let users = UserService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            AvatarStorage::new(&config.media),
            4,
        );
        let tokens = TokenService::new(config.jwt.clone(), config.account.token_timeout_secs);
        let mailer = Arc::new(MemoryMailer::new());
        let accounts = AccountService::new(
            users.clone(),
            tokens,
            mailer.clone(),
            PasswordPolicy::new(8),
            config.account.clone(),
        );
        Fixture { accounts, users, mailer }
    }

    /// 링크 `.../{uid}/{token}`에서 uid와 token을 꺼냅니다
    fn uid_and_token(body: &str) -> (String, String) {
        let url = body
            .split_whitespace()
            .find(|word| word.starts_with("http://testserver/"))
            .unwrap();
        let mut parts = url.rsplit('/');
        let token = parts.next().unwrap().to_string();
        let uid = parts.next().unwrap().to_string();
        (uid, token)
    }

    fn register_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "new@x.com".to_string(),
            password: "long enough pass".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_and_activate_once() {
        let f = fixture();
        let user = f.accounts.register(register_request()).await.unwrap();
        assert!(!user.is_active);

        let sent = f.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("#/activate/"));

        let (uid, token) = uid_and_token(&sent[0].body);
        let request = ActivationRequest { uid, token };
        f.accounts.activate(request.clone()).await.unwrap();
        assert!(f.users.get_by_id(&user.id.unwrap()).await.unwrap().is_active);

        match f.accounts.activate(request).await {
            Err(AppError::AuthorizationError(message)) => assert_eq!(message, STALE_TOKEN),
            other => panic!("Expected stale token, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_register_rejects_weak_password_and_duplicate_email() {
        let f = fixture();
        let weak = CreateUserRequest {
            email: "w@x.com".to_string(),
            password: "123".to_string(),
        };
        assert!(matches!(f.accounts.register(weak).await, Err(AppError::InvalidFields(_))));

        f.accounts.register(register_request()).await.unwrap();
        match f.accounts.register(register_request()).await {
            Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("email")),
            other => panic!("Expected InvalidFields, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_activation_with_bad_uid_or_token() {
        let f = fixture();
        let user = f.accounts.register(register_request()).await.unwrap();

        let bad_uid = ActivationRequest {
            uid: "garbage".to_string(),
            token: "t".to_string(),
        };
        match f.accounts.activate(bad_uid).await {
            Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("uid")),
            other => panic!("Expected uid error, got {:?}", other),
        }

        let bad_token = ActivationRequest {
            uid: TokenService::encode_uid(&user.id.unwrap()),
            token: "t".to_string(),
        };
        match f.accounts.activate(bad_token).await {
            Err(AppError::InvalidFields(fields)) => assert!(fields.contains_key("token")),
            other => panic!("Expected token error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_password_reset_flow_token_single_use() {
        let f = fixture();
        let extra = ExtraFields {
            is_active: Some(true),
            ..Default::default()
        };
        f.users.create_user("r@x.com", "old password 1", extra).await.unwrap();

        f.accounts.reset_password("nobody@x.com").await.unwrap();
        assert!(f.mailer.sent().await.is_empty());

        f.accounts.reset_password("r@x.com").await.unwrap();
        let sent = f.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        let (uid, token) = uid_and_token(&sent[0].body);

        let request = PasswordResetConfirmRequest {
            uid,
            token,
            new_password: "brand new secret".to_string(),
        };
        f.accounts.reset_password_confirm(request.clone()).await.unwrap();
        assert!(f.users.verify_password("r@x.com", "brand new secret").await.is_ok());

        assert!(matches!(
            f.accounts.reset_password_confirm(request).await,
            Err(AppError::InvalidFields(fields)) if fields.contains_key("token")
        ));
    }

    #[actix_web::test]
    async fn test_reset_email_flow() {
        let f = fixture();
        let extra = ExtraFields {
            is_active: Some(true),
            ..Default::default()
        };
        f.users.create_user("old@x.com", "some password", extra).await.unwrap();

        f.accounts.reset_email("old@x.com").await.unwrap();
        let sent = f.mailer.sent().await;
        assert!(sent[0].body.contains("#/username/reset/confirm/"));
        let (uid, token) = uid_and_token(&sent[0].body);

        f.accounts
            .reset_email_confirm(EmailResetConfirmRequest {
                uid,
                token,
                new_email: "new@X.com".to_string(),
            })
            .await
            .unwrap();

        assert!(f.users.find_by_email("new@x.com").await.unwrap().is_some());
        assert!(f.users.find_by_email("old@x.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_set_password_checks_current_password() {
        let f = fixture();
        let extra = ExtraFields {
            is_active: Some(true),
            ..Default::default()
        };
        let user = f.users.create_user("s@x.com", "current pass 1", extra).await.unwrap();
        let caller = AuthenticatedUser::from_user(&user, user.id.unwrap(), crate::domain::models::auth::AuthScheme::Bearer);

        let wrong = SetPasswordRequest {
            current_password: "nope".to_string(),
            new_password: "another pass 2".to_string(),
        };
        assert!(matches!(
            f.accounts.set_password(&caller, wrong).await,
            Err(AppError::InvalidFields(fields)) if fields.contains_key("current_password")
        ));

        let right = SetPasswordRequest {
            current_password: "current pass 1".to_string(),
            new_password: "another pass 2".to_string(),
        };
        f.accounts.set_password(&caller, right).await.unwrap();
        assert!(f.users.verify_password("s@x.com", "another pass 2").await.is_ok());
        assert!(f.mailer.sent().await.iter().any(|m| m.subject.contains("password has been")));
    }
}
