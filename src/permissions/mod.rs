//! # 객체 수준 접근 제어
//!
//! 권한 검사는 부수 효과가 없는 술어(predicate)이며, 서비스는 변경 작업 전에
//! [`check_object_permission`]으로 검사합니다.
//!
//! | 권한 | 허용 조건 |
//! |------|-----------|
//! | [`IsAuthor`] | 리소스 소유자 == 호출자 |
//! | [`CurrentUserOrAdmin`] | 대상 사용자 == 호출자, 또는 호출자가 스태프 |
//! | [`IsAdminUser`] | 호출자가 스태프 |

use mongodb::bson::oid::ObjectId;

use crate::domain::entities::{social_links::SocialLink, users::User};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// 소유자가 있는 리소스
pub trait Owned {
    fn owner_id(&self) -> &ObjectId;
}

impl Owned for SocialLink {
    fn owner_id(&self) -> &ObjectId {
        &self.user_id
    }
}

pub trait ObjectPermission<R: ?Sized> {
    fn has_object_permission(&self, caller: &AuthenticatedUser, resource: &R) -> bool;
}

/// 리소스 작성자만 허용
pub struct IsAuthor;

impl<R: Owned> ObjectPermission<R> for IsAuthor {
    fn has_object_permission(&self, caller: &AuthenticatedUser, resource: &R) -> bool {
        resource.owner_id() == &caller.user_id
    }
}

/// 본인 또는 관리자만 허용
pub struct CurrentUserOrAdmin;

impl ObjectPermission<User> for CurrentUserOrAdmin {
    fn has_object_permission(&self, caller: &AuthenticatedUser, user: &User) -> bool {
        caller.is_admin() || user.id.as_ref() == Some(&caller.user_id)
    }
}

/// 관리자만 허용
pub struct IsAdminUser;

impl<R> ObjectPermission<R> for IsAdminUser {
    fn has_object_permission(&self, caller: &AuthenticatedUser, _resource: &R) -> bool {
        caller.is_admin()
    }
}

/// 권한이 없으면 `AuthorizationError`(403)를 반환합니다
pub fn check_object_permission<P, R>(permission: &P, caller: &AuthenticatedUser, resource: &R) -> Result<(), AppError>
where
    P: ObjectPermission<R>,
{
    if permission.has_object_permission(caller, resource) {
        Ok(())
    } else {
        log::warn!("권한 거부: 사용자 {}", caller.user_id);
        Err(AppError::AuthorizationError(PERMISSION_DENIED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::AuthScheme;

    fn caller(user_id: ObjectId, is_staff: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            email: "caller@x.com".to_string(),
            is_staff,
            is_superuser: false,
            scheme: AuthScheme::Bearer,
        }
    }

    #[test]
    fn test_is_author_matches_owner() {
        let owner = ObjectId::new();
        let link = SocialLink::new(owner, "https://a.example".to_string());

        assert!(IsAuthor.has_object_permission(&caller(owner, false), &link));
        assert!(!IsAuthor.has_object_permission(&caller(ObjectId::new(), false), &link));
    }

    #[test]
    fn test_is_author_ignores_staff_flag() {
        let link = SocialLink::new(ObjectId::new(), "https://a.example".to_string());
        assert!(!IsAuthor.has_object_permission(&caller(ObjectId::new(), true), &link));
    }

    #[test]
    fn test_current_user_or_admin() {
        let mut user = User::new_local("u@x.com".to_string(), "h".to_string());
        let id = ObjectId::new();
        user.id = Some(id);

        assert!(CurrentUserOrAdmin.has_object_permission(&caller(id, false), &user));
        assert!(CurrentUserOrAdmin.has_object_permission(&caller(ObjectId::new(), true), &user));
        assert!(!CurrentUserOrAdmin.has_object_permission(&caller(ObjectId::new(), false), &user));
    }

    #[test]
    fn test_check_object_permission_returns_forbidden() {
        let link = SocialLink::new(ObjectId::new(), "https://a.example".to_string());
        let result = check_object_permission(&IsAuthor, &caller(ObjectId::new(), false), &link);

        match result {
            Err(AppError::AuthorizationError(message)) => assert_eq!(message, PERMISSION_DENIED),
            other => panic!("Expected AuthorizationError, got {:?}", other),
        }
    }
}
