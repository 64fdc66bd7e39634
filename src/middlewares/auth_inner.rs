//! 인증 미들웨어의 요청 처리 본체

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::AppState;
use crate::domain::models::auth::AuthMode;
use crate::errors::AppError;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                log::error!("AppState가 등록되지 않았습니다");
                let response = AppError::InternalError("application state missing".to_string()).error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            match (state.authenticator.authenticate(header.as_deref()).await, &mode) {
                (Ok(Some(user)), _) => {
                    log::debug!("인증 성공: 사용자 ID {} ({:?})", user.user_id, user.scheme);
                    req.extensions_mut().insert(user);
                }
                (Ok(None), AuthMode::Optional) => {
                    log::debug!("선택적 인증: 인증 정보 없음, 요청 진행");
                }
                (Ok(None), AuthMode::Required) => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_required",
                        "message": "Authentication credentials were not provided."
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                // 잘못된 인증 정보는 공개 라우트에서도 거부합니다
                (Err(AppError::AuthenticationError(message)), _) => {
                    log::warn!("인증 실패: {}", message);
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_failed",
                        "message": message
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (Err(err), _) => {
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
