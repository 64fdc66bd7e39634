//! User Entity Implementation
//!
//! 이메일을 로그인 식별자로 사용하는 계정 엔티티입니다.
//! 프로필 정보(국가, 도시, 소개, 표시 이름, 아바타)와 활성/관리자 플래그를 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// bcrypt 해시. `None`이면 비밀번호 로그인이 불가능한 계정입니다.
    #[serde(default)]
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    /// 가입 시각. 생성 이후 변경되지 않습니다.
    pub join_date: DateTime,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// 미디어 루트 기준 상대 경로 (`avatar/user_<id>/<file>`)
    #[serde(default)]
    pub avatar: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[serde(default)]
    pub last_login: Option<DateTime>,
}

impl User {
    /// 이메일/비밀번호로 가입하는 비활성 계정을 만듭니다
    pub fn new_local(email: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Local,
            join_date: DateTime::now(),
            country: None,
            city: None,
            bio: None,
            display_name: None,
            avatar: None,
            is_active: false,
            is_staff: false,
            is_superuser: false,
            last_login: None,
        }
    }

    /// 외부 인증 프로바이더로 생성되는 계정. 비밀번호 로그인은 불가능하고 즉시 활성화됩니다.
    pub fn new_external(email: String, auth_provider: AuthProvider) -> Self {
        Self {
            password_hash: None,
            auth_provider,
            is_active: true,
            ..Self::new_local(email, String::new())
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_usable_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|hash| !hash.is_empty())
    }
}
