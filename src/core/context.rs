//! # 애플리케이션 상태 구성
//!
//! 저장소를 연결하고 서비스를 한 번 생성해 [`AppState`]로 묶습니다.
//! `main`은 `web::Data<AppState>`로 모든 워커에 공유합니다.
//!
//! ```text
//! AppConfig ──► Stores::connect / Stores::in_memory
//!                   │
//!                   ▼
//!              AppState::new(config, stores, mailer)
//!                   ├─ UserService ◄── AvatarStorage
//!                   ├─ AuthorService
//!                   ├─ SocialLinkService
//!                   ├─ FollowerService
//!                   ├─ TokenService ──► Authenticator
//!                   ├─ AccountService ◄── Mailer, PasswordPolicy
//!                   └─ GoogleAuthService ◄── IdTokenVerifier
//! ```

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::config::{AppConfig, StorageBackend};
use crate::db::Database;
use crate::errors::AppError;
use crate::repositories::{
    AuthTokenStore, FollowerRepository, FollowerStore, MemoryStore, RedisAuthTokenRepository, SocialLinkRepository,
    SocialLinkStore, UserRepository, UserStore,
};
use crate::services::auth::{
    AccountService, Authenticator, GoogleAuthService, GoogleTokenInfoVerifier, IdTokenVerifier, TokenService,
};
use crate::services::authors::AuthorService;
use crate::services::followers::FollowerService;
use crate::services::mail::Mailer;
use crate::services::social_links::SocialLinkService;
use crate::services::users::{AvatarStorage, PasswordPolicy, UserService};

/// 서비스가 사용하는 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub social_links: Arc<dyn SocialLinkStore>,
    pub followers: Arc<dyn FollowerStore>,
    pub auth_tokens: Arc<dyn AuthTokenStore>,
}

impl Stores {
    /// 설정된 백엔드로 저장소를 준비합니다
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        match config.storage.backend {
            StorageBackend::MongoDb => Self::connect(config).await,
            StorageBackend::Memory => {
                log::warn!("메모리 저장소 사용: 재시작 시 데이터가 사라집니다");
                Ok(Self::in_memory())
            }
        }
    }

    /// MongoDB와 Redis에 연결하고 인덱스를 생성합니다
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let database = Database::connect(&config.storage)
            .await
            .map_err(|e| AppError::DatabaseError(format!("MongoDB 연결 실패: {}", e)))?;
        let database = Arc::new(database);

        let redis = RedisClient::connect(&config.storage.redis_url)
            .await
            .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?;
        let redis = Arc::new(redis);

        let users = UserRepository::new(database.clone(), redis.clone(), config.storage.cache_ttl_seconds);
        let social_links = SocialLinkRepository::new(database.clone());
        let followers = FollowerRepository::new(database);

        users.create_indexes().await?;
        social_links.create_indexes().await?;
        followers.create_indexes().await?;
        log::info!("✅ 인덱스 생성 완료");

        Ok(Self {
            users: Arc::new(users),
            social_links: Arc::new(social_links),
            followers: Arc::new(followers),
            auth_tokens: Arc::new(RedisAuthTokenRepository::new(redis)),
        })
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            social_links: store.clone(),
            followers: store.clone(),
            auth_tokens: store,
        }
    }
}

/// 핸들러와 미들웨어가 공유하는 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub user_service: UserService,
    pub author_service: AuthorService,
    pub social_link_service: SocialLinkService,
    pub follower_service: FollowerService,
    pub token_service: TokenService,
    pub account_service: AccountService,
    pub google_auth_service: GoogleAuthService,
    pub authenticator: Authenticator,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores, mailer: Arc<dyn Mailer>) -> Self {
        let verifier = Arc::new(GoogleTokenInfoVerifier::new(config.google.clone()));
        Self::with_verifier(config, stores, mailer, verifier)
    }

    /// Google ID 토큰 검증기를 직접 지정합니다
    pub fn with_verifier(
        config: AppConfig,
        stores: Stores,
        mailer: Arc<dyn Mailer>,
        verifier: Arc<dyn IdTokenVerifier>,
    ) -> Self {
        let avatars = AvatarStorage::new(&config.media);
        let user_service = UserService::new(
            stores.users.clone(),
            stores.social_links.clone(),
            stores.followers.clone(),
            stores.auth_tokens.clone(),
            avatars,
            config.password.bcrypt_cost,
        );

        let token_service = TokenService::new(config.jwt.clone(), config.account.token_timeout_secs);

        let account_service = AccountService::new(
            user_service.clone(),
            token_service.clone(),
            mailer,
            PasswordPolicy::new(config.password.min_length),
            config.account.clone(),
        );

        Self {
            author_service: AuthorService::new(
                stores.users.clone(),
                stores.social_links.clone(),
                config.media.url.clone(),
            ),
            social_link_service: SocialLinkService::new(stores.social_links.clone()),
            follower_service: FollowerService::new(stores.followers.clone(), stores.users.clone(), config.media.url.clone()),
            google_auth_service: GoogleAuthService::new(verifier, user_service.clone(), token_service.clone()),
            authenticator: Authenticator::new(token_service.clone(), stores.users.clone(), stores.auth_tokens.clone()),
            account_service,
            token_service,
            user_service,
            config: Arc::new(config),
        }
    }

    pub fn media_url(&self) -> &str {
        &self.config.media.url
    }
}
