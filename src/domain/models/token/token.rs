//! JWT 클레임 구조체
//!
//! 세 종류의 토큰이 같은 HS256 비밀키로 서명되지만 클레임 구조가 서로 달라
//! 한 종류의 토큰이 다른 용도로 디코딩되지 않습니다.
//!
//! | 구조체 | 용도 | 필수 클레임 |
//! |--------|------|-------------|
//! | [`TokenClaims`] | `Bearer` access / refresh | `token_type`, `user_id`, `jti`, `iat`, `exp` |
//! | [`InternalTokenClaims`] | `Token <jwt>` | `user_id`, `sub`, `exp` |
//! | [`AccountTokenClaims`] | 활성화/재설정 링크 | `uid`, `purpose`, `fp`, `iat`, `exp` |

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Bearer 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub token_type: TokenType,
    pub user_id: String,
    /// 토큰 고유 ID
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// `Authorization: Token <jwt>` 내부 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalTokenClaims {
    pub user_id: String,
    /// 항상 `"access"`
    pub sub: String,
    pub exp: i64,
}

/// 계정 토큰의 용도
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountTokenPurpose {
    Activation,
    PasswordReset,
    EmailReset,
}

/// 이메일 링크로 전달되는 일회성 계정 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTokenClaims {
    pub uid: String,
    pub purpose: AccountTokenPurpose,
    /// 발급 시점의 계정 상태 지문. 상태가 바뀌면 토큰이 무효화됩니다.
    pub fp: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
