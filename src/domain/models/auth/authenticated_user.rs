use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::User;
use crate::errors::AppError;

/// 요청을 인증한 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthScheme {
    /// `Authorization: Token <jwt>`
    InternalToken,
    /// `Authorization: Token <40자 키>`
    LegacyToken,
    /// `Authorization: Bearer <jwt>`
    Bearer,
}

/// 인증 미들웨어가 Request Extensions에 넣어 두는 호출자 정보
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: ObjectId,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub scheme: AuthScheme,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User, user_id: ObjectId, scheme: AuthScheme) -> Self {
        Self {
            user_id,
            email: user.email.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            scheme,
        }
    }

    /// 관리자(스태프) 권한 보유 여부
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Authentication credentials were not provided.".to_string(),
            ))),
        }
    }
}
