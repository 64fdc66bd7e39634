use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use sha2::{Digest, Sha256};

use crate::caching::redis::RedisClient;
use crate::errors::AppError;

/// 레거시 토큰 키 길이 (16진수 문자 수)
pub const AUTH_TOKEN_KEY_LENGTH: usize = 40;

#[async_trait]
pub trait AuthTokenStore: Send + Sync {
    /// 사용자의 토큰 키를 반환합니다. 없으면 새로 발급합니다.
    async fn get_or_create(&self, user_id: &ObjectId) -> Result<String, AppError>;

    /// 키에 해당하는 사용자 ID
    async fn find_user_id(&self, key: &str) -> Result<Option<ObjectId>, AppError>;

    /// 사용자의 토큰을 폐기합니다. 토큰이 없어도 성공합니다.
    async fn revoke_for_user(&self, user_id: &ObjectId) -> Result<(), AppError>;
}

/// 무작위 40자 16진수 토큰 키를 생성합니다
pub fn generate_token_key() -> String {
    let mut hasher = Sha256::new();
    hasher.update(uuid::Uuid::new_v4().as_bytes());
    hasher.update(uuid::Uuid::new_v4().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..AUTH_TOKEN_KEY_LENGTH].to_string()
}

/// 레거시 토큰 키 형식(40자 16진수)인지 확인합니다
pub fn is_token_key(candidate: &str) -> bool {
    candidate.len() == AUTH_TOKEN_KEY_LENGTH && candidate.chars().all(|c| c.is_ascii_hexdigit())
}

/// 토큰 항목 저장에 필요한 키-값 연산
#[async_trait]
pub trait TokenEntries: Send + Sync {
    async fn read(&self, entry: &str) -> Result<Option<String>, AppError>;
    async fn write(&self, entry: &str, value: &str) -> Result<(), AppError>;
    /// 항목이 없을 때만 저장합니다
    async fn write_if_absent(&self, entry: &str, value: &str) -> Result<bool, AppError>;
    async fn remove(&self, entries: &[String]) -> Result<(), AppError>;
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}

#[async_trait]
impl TokenEntries for RedisClient {
    async fn read(&self, entry: &str) -> Result<Option<String>, AppError> {
        RedisClient::get::<String>(self, entry).await.map_err(redis_error)
    }

    async fn write(&self, entry: &str, value: &str) -> Result<(), AppError> {
        RedisClient::set(self, entry, &value).await.map_err(redis_error)
    }

    async fn write_if_absent(&self, entry: &str, value: &str) -> Result<bool, AppError> {
        self.set_nx(entry, &value).await.map_err(redis_error)
    }

    async fn remove(&self, entries: &[String]) -> Result<(), AppError> {
        self.del_multiple(entries).await.map_err(redis_error)
    }
}

/// 사용자 → 키, 키 → 사용자 두 방향 항목으로 레거시 토큰을 보관합니다
///
/// 사용자 항목을 `SET NX`로 먼저 선점하므로 동시 로그인에서도 사용자당 키는 하나입니다.
pub struct RedisAuthTokenRepository {
    entries: Arc<dyn TokenEntries>,
}

/// 선점 경합 중 토큰이 폐기되는 경우의 재시도 횟수
const CLAIM_ATTEMPTS: usize = 3;

impl RedisAuthTokenRepository {
    pub fn new(entries: Arc<dyn TokenEntries>) -> Self {
        Self { entries }
    }

    fn key_entry(key: &str) -> String {
        format!("authtoken:key:{}", key)
    }

    fn user_entry(user_id: &ObjectId) -> String {
        format!("authtoken:user:{}", user_id.to_hex())
    }
}

#[async_trait]
impl AuthTokenStore for RedisAuthTokenRepository {
    async fn get_or_create(&self, user_id: &ObjectId) -> Result<String, AppError> {
        let user_entry = Self::user_entry(user_id);

        for _ in 0..CLAIM_ATTEMPTS {
            if let Some(existing) = self.entries.read(&user_entry).await? {
                return Ok(existing);
            }

            let key = generate_token_key();
            if !self.entries.write_if_absent(&user_entry, &key).await? {
                // 다른 요청이 먼저 발급함
                continue;
            }

            if let Err(e) = self.entries.write(&Self::key_entry(&key), &user_id.to_hex()).await {
                if let Err(rollback) = self.entries.remove(&[user_entry.clone()]).await {
                    log::warn!("토큰 선점 해제 실패 ({}): {}", user_entry, rollback);
                }
                return Err(e);
            }

            return Ok(key);
        }

        Err(AppError::InternalError("토큰 발급 경합이 계속됩니다".to_string()))
    }

    async fn find_user_id(&self, key: &str) -> Result<Option<ObjectId>, AppError> {
        let user_id = self.entries.read(&Self::key_entry(key)).await?;
        Ok(user_id.and_then(|hex| ObjectId::parse_str(&hex).ok()))
    }

    async fn revoke_for_user(&self, user_id: &ObjectId) -> Result<(), AppError> {
        let user_entry = Self::user_entry(user_id);

        let mut entries = vec![user_entry.clone()];
        if let Some(key) = self.entries.read(&user_entry).await? {
            entries.push(Self::key_entry(&key));
        }

        self.entries.remove(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// 매 연산마다 양보해서 동시 요청이 서로 끼어들게 합니다
    #[derive(Default)]
    struct YieldingEntries {
        map: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl TokenEntries for YieldingEntries {
        async fn read(&self, entry: &str) -> Result<Option<String>, AppError> {
            let value = self.map.lock().await.get(entry).cloned();
            tokio::task::yield_now().await;
            Ok(value)
        }

        async fn write(&self, entry: &str, value: &str) -> Result<(), AppError> {
            tokio::task::yield_now().await;
            self.map.lock().await.insert(entry.to_string(), value.to_string());
            Ok(())
        }

        async fn write_if_absent(&self, entry: &str, value: &str) -> Result<bool, AppError> {
            tokio::task::yield_now().await;
            let mut map = self.map.lock().await;
            if map.contains_key(entry) {
                return Ok(false);
            }
            map.insert(entry.to_string(), value.to_string());
            Ok(true)
        }

        async fn remove(&self, entries: &[String]) -> Result<(), AppError> {
            let mut map = self.map.lock().await;
            for entry in entries {
                map.remove(entry);
            }
            Ok(())
        }
    }

    #[actix_web::test]
    async fn test_concurrent_logins_share_one_key() {
        let entries = Arc::new(YieldingEntries::default());
        let repo = RedisAuthTokenRepository::new(entries.clone());
        let user_id = ObjectId::new();

        let (a, b) = tokio::join!(repo.get_or_create(&user_id), repo.get_or_create(&user_id));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a, b);
        assert_eq!(repo.find_user_id(&a).await.unwrap(), Some(user_id));

        repo.revoke_for_user(&user_id).await.unwrap();
        assert_eq!(repo.find_user_id(&a).await.unwrap(), None);
        assert!(entries.map.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_existing_key_is_reused() {
        let repo = RedisAuthTokenRepository::new(Arc::new(YieldingEntries::default()));
        let user_id = ObjectId::new();

        let first = repo.get_or_create(&user_id).await.unwrap();
        assert_eq!(repo.get_or_create(&user_id).await.unwrap(), first);
    }

    #[test]
    fn test_generated_key_shape() {
        let key = generate_token_key();
        assert_eq!(key.len(), AUTH_TOKEN_KEY_LENGTH);
        assert!(is_token_key(&key));
        assert_ne!(key, generate_token_key());
    }

    #[test]
    fn test_jwt_is_not_a_token_key() {
        assert!(!is_token_key("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhIn0.sig"));
        assert!(!is_token_key("short"));
    }
}
