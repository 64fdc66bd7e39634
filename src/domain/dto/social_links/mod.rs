//! 소셜 링크 요청/응답 DTO
//!
//! ```json
//! { "id": "65f0c1...", "link": "https://github.com/someone" }
//! ```
//!
//! `id`는 읽기 전용이며, 요청 본문에 포함되어도 무시됩니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::social_links::SocialLink;

/// 생성 및 전체 수정(`PUT`) 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SocialLinkRequest {
    #[validate(url(message = "Enter a valid URL."))]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub link: String,
}

/// 부분 수정(`PATCH`) 요청
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SocialLinkPatch {
    #[validate(url(message = "Enter a valid URL."))]
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLinkResponse {
    pub id: String,
    pub link: String,
}

impl From<&SocialLink> for SocialLinkResponse {
    fn from(link: &SocialLink) -> Self {
        Self {
            id: link.id.map(|id| id.to_hex()).unwrap_or_default(),
            link: link.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_link() {
        let request = SocialLinkRequest {
            link: "https://a.example".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let request = SocialLinkRequest {
            link: "not a url".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("link"));
    }

    #[test]
    fn test_overlong_link_rejected() {
        let request = SocialLinkRequest {
            link: format!("https://a.example/{}", "p".repeat(100)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_patch_without_link_is_valid() {
        assert!(SocialLinkPatch::default().validate().is_ok());
    }

    #[test]
    fn test_read_only_id_ignored_on_input() {
        let request: SocialLinkRequest =
            serde_json::from_str(r#"{"id": "forged", "link": "https://a.example"}"#).unwrap();
        assert_eq!(request.link, "https://a.example");
    }
}
