//! # 인증 미들웨어
//!
//! 스코프 단위로 `wrap`하여 `Authorization` 헤더를 검사합니다. 인증된 호출자는
//! Request Extensions에 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)로
//! 저장되며, 핸들러는 추출자로 꺼내 씁니다.
//!
//! | 모드 | 헤더 없음 | 유효한 헤더 | 잘못된 헤더 |
//! |------|-----------|-------------|-------------|
//! | `required()` | 401 | 통과 | 401 |
//! | `optional()` | 익명 통과 | 통과 | 401 |
//!
//! ```rust,ignore
//! web::scope("/api/v1/users").wrap(AuthMiddleware::required())
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}
