//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 저장소, 미디어, 비밀번호 해싱 및 요청 제한 설정을 관리합니다.
//! 모든 값은 환경변수에서 읽으며, 값이 없거나 잘못된 경우 환경별 기본값을 사용합니다.

use std::env;
use std::path::PathBuf;

use super::{env_or, env_parse};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 환경변수로부터 현재 실행 환경을 결정합니다
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 및 정책 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// bcrypt 비용 인자 (4~15)
    pub bcrypt_cost: u32,
    /// 허용되는 최소 비밀번호 길이
    pub min_length: usize,
}

impl PasswordConfig {
    pub fn from_env(environment: &Environment) -> Self {
        Self {
            bcrypt_cost: Self::bcrypt_cost(environment),
            min_length: env_parse("PASSWORD_MIN_LENGTH", 8),
        }
    }

    /// `BCRYPT_COST`가 유효 범위(4~15)면 그 값을, 아니면 환경별 기본값을 반환합니다
    pub fn bcrypt_cost(environment: &Environment) -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(environment)
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 8080),
            workers: env_parse("WORKERS", 4),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 영속 저장소 구현 선택
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// MongoDB + Redis
    MongoDb,
    /// 프로세스 메모리 (개발 및 테스트용, 재시작 시 소실)
    Memory,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            _ => StorageBackend::MongoDb,
        }
    }
}

/// 데이터 저장소 연결 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
    /// 사용자 조회 캐시 TTL (초)
    pub cache_ttl_seconds: u64,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            backend: StorageBackend::from_str(&env_or("STORAGE_BACKEND", "mongodb")),
            mongodb_uri: env_or("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: env_or("DATABASE_NAME", "profile_service"),
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            cache_ttl_seconds: env_parse("USER_CACHE_TTL_SECONDS", 600),
        }
    }
}

/// 업로드 파일(아바타) 저장 설정
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// 파일이 저장되는 로컬 디렉토리
    pub root: PathBuf,
    /// 응답에 노출되는 URL 접두사 (`/media/`)
    pub url: String,
    /// 아바타 최대 크기 (바이트)
    pub avatar_max_bytes: usize,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let mut url = env_or("MEDIA_URL", "/media/");
        if !url.ends_with('/') {
            url.push('/');
        }

        let max_mb: usize = env_parse("AVATAR_MAX_MB", 2);

        Self {
            root: PathBuf::from(env_or("MEDIA_ROOT", "media")),
            url,
            avatar_max_bytes: max_mb * 1024 * 1024,
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: env_parse("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_parse("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}
