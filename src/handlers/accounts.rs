//! # 계정 핸들러 (`/api/v1/auth/users`)
//!
//! 회원가입과 이메일 기반 계정 플로우를 처리합니다. 스코프는 선택 인증으로
//! 감싸져 있고, 호출자가 필요한 라우트는 `AuthenticatedUser` 추출자로 401을 반환합니다.

use actix_web::{delete, patch, post, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::users::{
    ActivationRequest, CreateUserRequest, CreateUserResponse, EmailRequest, EmailResetConfirmRequest,
    PasswordResetConfirmRequest, SetPasswordRequest, UserFlagsRequest, UserResponse,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::path_object_id;

#[post("/users")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state.account_service.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreateUserResponse::from(&user)))
}

#[post("/users/activation")]
pub async fn activation(
    state: web::Data<AppState>,
    payload: web::Json<ActivationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.activate(payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/resend_activation")]
pub async fn resend_activation(
    state: web::Data<AppState>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.resend_activation(&payload.email).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/reset_password")]
pub async fn reset_password(
    state: web::Data<AppState>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.reset_password(&payload.email).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/reset_password_confirm")]
pub async fn reset_password_confirm(
    state: web::Data<AppState>,
    payload: web::Json<PasswordResetConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.reset_password_confirm(payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/reset_email")]
pub async fn reset_email(
    state: web::Data<AppState>,
    payload: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.reset_email(&payload.email).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/reset_email_confirm")]
pub async fn reset_email_confirm(
    state: web::Data<AppState>,
    payload: web::Json<EmailResetConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.reset_email_confirm(payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/users/set_password")]
pub async fn set_password(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: web::Json<SetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.account_service.set_password(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&user_id, "User not found")?;
    state.account_service.delete_user(&caller, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[patch("/users/{user_id}/flags")]
pub async fn update_flags(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<UserFlagsRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&user_id, "User not found")?;

    let user = state
        .account_service
        .update_flags(&caller, &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::new(&user, state.media_url())))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::handlers::test_support::{test_app, TestContext};

    fn link_parts(body: &str) -> (String, String) {
        let url = body
            .split_whitespace()
            .find(|word| word.starts_with("http://testserver/"))
            .unwrap();
        let mut parts = url.rsplit('/');
        let token = parts.next().unwrap().to_string();
        let uid = parts.next().unwrap().to_string();
        (uid, token)
    }

    #[actix_web::test]
    async fn test_register_activate_and_login() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users/")
            .set_json(json!({"email": "New@Example.COM", "password": "a decent password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"email": "New@example.com"}));

        let login = json!({"email": "New@example.com", "password": "a decent password"});
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/create")
            .set_json(&login)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let sent = ctx.mailer.sent().await;
        let (uid, token) = link_parts(&sent[0].body);
        let activation = json!({"uid": uid, "token": token});

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users/activation")
            .set_json(&activation)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users/activation")
            .set_json(&activation)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/create")
            .set_json(&login)
            .to_request();
        let tokens: Value = test::call_and_read_body_json(&app, req).await;
        assert!(tokens["access"].is_string());
        assert!(tokens["refresh"].is_string());
    }

    #[actix_web::test]
    async fn test_register_validation_errors() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users")
            .set_json(json!({"email": "not-an-email", "password": "a decent password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["fields"]["email"].is_array());

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users")
            .set_json(json!({"email": "ok@x.com", "password": "12345678"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["fields"]["password"].is_array());
    }

    #[actix_web::test]
    async fn test_reset_requests_do_not_reveal_accounts() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        for path in ["reset_password", "reset_email", "resend_activation"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/v1/auth/users/{}", path))
                .set_json(json!({"email": "ghost@x.com"}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        }
        assert!(ctx.mailer.sent().await.is_empty());
    }

    #[actix_web::test]
    async fn test_set_password_requires_authentication() {
        let ctx = TestContext::new();
        let (_, auth) = ctx.active_user("me@x.com", "first password").await;
        let app = test_app!(ctx);
        let body = json!({"current_password": "first password", "new_password": "second password"});

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users/set_password")
            .set_json(&body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/users/set_password")
            .insert_header(("Authorization", auth))
            .set_json(&body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_delete_user_current_user_or_admin() {
        let ctx = TestContext::new();
        let (victim, _) = ctx.active_user("victim@x.com", "secret1").await;
        let (_, stranger) = ctx.active_user("stranger@x.com", "secret1").await;
        let admin = ctx
            .state
            .user_service
            .create_superuser("root@x.com", "secret1", Default::default())
            .await
            .unwrap();
        let admin_auth = format!(
            "Bearer {}",
            ctx.state.token_service.generate_access_token(&admin).unwrap()
        );
        let app = test_app!(ctx);
        let uri = format!("/api/v1/auth/users/{}", victim.id.unwrap().to_hex());

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", stranger))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", admin_auth))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_flags_require_staff() {
        let ctx = TestContext::new();
        let (target, auth) = ctx.active_user("t@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/auth/users/{}/flags", target.id.unwrap().to_hex()))
            .insert_header(("Authorization", auth))
            .set_json(json!({"is_staff": true}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }
}
