//! # 프로필 수정 요청 DTO
//!
//! `PUT`/`PATCH /api/v1/users` 의 multipart 본문에서 만들어집니다.
//! 본문에 없는 필드는 유지되고, 빈 문자열로 전달된 필드는 비워집니다.

use validator::Validate;

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub country: Option<String>,

    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub city: Option<String>,

    #[validate(length(max = 2000, message = "Ensure this field has no more than 2000 characters."))]
    pub bio: Option<String>,

    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub display_name: Option<String>,
}

impl UpdateProfileRequest {
    /// multipart 텍스트 필드 하나를 반영합니다. 알 수 없는 필드는 무시하고 `false`를 반환합니다.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "country" => &mut self.country,
            "city" => &mut self.city,
            "bio" => &mut self.bio,
            "display_name" => &mut self.display_name,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// 업로드된 아바타 파일
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// 클라이언트가 보낸 원본 파일 이름
    pub filename: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_and_unknown_fields() {
        let mut request = UpdateProfileRequest::default();

        assert!(request.set_field("city", "Seoul".to_string()));
        assert!(!request.set_field("email", "x@y.z".to_string()));

        assert_eq!(request.city.as_deref(), Some("Seoul"));
    }

    #[test]
    fn test_length_limits() {
        let request = UpdateProfileRequest {
            country: Some("k".repeat(31)),
            bio: Some("b".repeat(2000)),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("country"));
        assert!(!fields.contains_key("bio"));
    }
}
