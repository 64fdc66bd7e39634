//! # 토큰 발급 핸들러
//!
//! - `jwt/create`, `jwt/refresh`, `jwt/verify`: Bearer access/refresh 토큰
//! - `token/login`, `token/logout`: 40자 레거시 토큰
//! - `google`: Google ID 토큰 로그인, 내부 토큰 발급

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::tokens::{
    AccessTokenResponse, AuthTokenResponse, GoogleAuthRequest, RefreshRequest, TokenPairResponse, VerifyRequest,
};
use crate::domain::dto::users::LoginRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

#[post("/jwt/create")]
pub async fn jwt_create(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .verify_password(&payload.email, &payload.password)
        .await?;
    let pair = state.token_service.generate_token_pair(&user)?;

    log::info!("JWT 발급: {}", user.email);
    Ok(HttpResponse::Ok().json(TokenPairResponse {
        access: pair.access_token,
        refresh: pair.refresh_token,
    }))
}

#[post("/jwt/refresh")]
pub async fn jwt_refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let access = state.token_service.refresh(&payload.refresh)?;
    Ok(HttpResponse::Ok().json(AccessTokenResponse { access }))
}

#[post("/jwt/verify")]
pub async fn jwt_verify(
    state: web::Data<AppState>,
    payload: web::Json<VerifyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.token_service.verify_token(&payload.token)?;
    Ok(HttpResponse::Ok().json(json!({})))
}

#[post("/token/login")]
pub async fn token_login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let auth_token = state
        .user_service
        .obtain_auth_token(&payload.email, &payload.password)
        .await?;
    Ok(HttpResponse::Ok().json(AuthTokenResponse { auth_token }))
}

#[post("/token/logout")]
pub async fn token_logout(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.revoke_auth_token(&caller.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/google")]
pub async fn google_auth(
    state: web::Data<AppState>,
    payload: web::Json<GoogleAuthRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let token = state.google_auth_service.authenticate(&payload).await?;
    Ok(HttpResponse::Ok().json(token))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::handlers::test_support::{test_app, TestContext};

    #[actix_web::test]
    async fn test_jwt_refresh_and_verify() {
        let ctx = TestContext::new();
        ctx.active_user("j@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/create/")
            .set_json(json!({"email": "j@x.com", "password": "secret1"}))
            .to_request();
        let pair: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/refresh")
            .set_json(json!({"refresh": pair["refresh"]}))
            .to_request();
        let refreshed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(refreshed["access"].is_string());

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/verify")
            .set_json(json!({"token": refreshed["access"]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/verify")
            .set_json(json!({"token": "garbage"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", format!("Bearer {}", pair["refresh"].as_str().unwrap())))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_wrong_password_rejected() {
        let ctx = TestContext::new();
        ctx.active_user("j@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/jwt/create")
            .set_json(json!({"email": "j@x.com", "password": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("No active account"));
    }

    #[actix_web::test]
    async fn test_legacy_token_login_and_logout() {
        let ctx = TestContext::new();
        ctx.active_user("t@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/token/login")
            .set_json(json!({"email": "t@x.com", "password": "secret1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let key = body["auth_token"].as_str().unwrap().to_string();
        assert_eq!(key.len(), 40);
        let header = format!("Token {}", key);

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", header.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/token/logout")
            .insert_header(("Authorization", header.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", header))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_google_sign_in_issues_internal_token() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/google")
            .set_json(json!({"email": "g@x.com", "token": "valid"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["token_type"], "Token");

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", format!("Token {}", body["access_token"].as_str().unwrap())))
            .to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["id"], body["user_id"]);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/google")
            .set_json(json!({"email": "g@x.com", "token": "forged"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/google")
            .set_json(json!({"email": "not-an-email", "token": "valid"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
