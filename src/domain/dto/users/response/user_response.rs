use serde::{Deserialize, Serialize};

use crate::domain::dto::social_links::SocialLinkResponse;
use crate::domain::entities::users::User;

/// 프로필 응답
///
/// 아바타는 `MEDIA_URL` 접두사를 붙인 URL로 노출됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub avatar: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub display_name: Option<String>,
}

impl UserResponse {
    pub fn new(user: &User, media_url: &str) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            avatar: user.avatar.as_ref().map(|path| format!("{}{}", media_url, path)),
            country: user.country.clone(),
            city: user.city.clone(),
            bio: user.bio.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// 작성자 응답: 프로필 필드 + 소셜 링크 목록
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub profile: UserResponse,
    pub social_links: Vec<SocialLinkResponse>,
}

/// 회원가입 응답. 비밀번호는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub email: String,
}

impl From<&User> for CreateUserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn sample_user() -> User {
        let mut user = User::new_local("a@x.com".to_string(), "$2b$04$hash".to_string());
        user.id = Some(ObjectId::new());
        user.city = Some("Seoul".to_string());
        user
    }

    #[test]
    fn test_user_response_hides_credentials() {
        let user = sample_user();
        let json = serde_json::to_value(UserResponse::new(&user, "/media/")).unwrap();

        assert_eq!(json["city"], "Seoul");
        assert!(json.get("email").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json["avatar"].is_null());
    }

    #[test]
    fn test_avatar_rendered_with_media_url() {
        let mut user = sample_user();
        user.avatar = Some("avatar/user_1/me.jpg".to_string());

        let response = UserResponse::new(&user, "/media/");
        assert_eq!(response.avatar.as_deref(), Some("/media/avatar/user_1/me.jpg"));
    }

    #[test]
    fn test_author_response_flattens_profile() {
        let user = sample_user();
        let author = AuthorResponse {
            profile: UserResponse::new(&user, "/media/"),
            social_links: vec![SocialLinkResponse {
                id: "l1".to_string(),
                link: "https://a.example".to_string(),
            }],
        };

        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["id"], user.id_string().unwrap());
        assert_eq!(json["social_links"][0]["link"], "https://a.example");
    }

    #[test]
    fn test_create_user_response_only_has_email() {
        let user = sample_user();
        let json = serde_json::to_value(CreateUserResponse::from(&user)).unwrap();

        assert_eq!(json, serde_json::json!({ "email": "a@x.com" }));
    }
}
