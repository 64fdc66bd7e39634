//! 소셜 링크 CRUD 핸들러
//!
//! 모든 라우트는 인증이 필요하고, 개별 링크는 작성자만 다룰 수 있습니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::social_links::{SocialLinkPatch, SocialLinkRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::path_object_id;

const NOT_FOUND: &str = "Social link not found";

#[get("")]
pub async fn list_social_links(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let links = state.social_link_service.list(&caller).await?;
    Ok(HttpResponse::Ok().json(links))
}

#[post("")]
pub async fn create_social_link(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: web::Json<SocialLinkRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let link = state.social_link_service.create(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(link))
}

#[get("/{link_id}")]
pub async fn get_social_link(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    link_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&link_id, NOT_FOUND)?;
    let link = state.social_link_service.get(&caller, &id).await?;
    Ok(HttpResponse::Ok().json(link))
}

#[put("/{link_id}")]
pub async fn update_social_link(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    link_id: web::Path<String>,
    payload: web::Json<SocialLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&link_id, NOT_FOUND)?;
    payload.validate()?;

    let link = state.social_link_service.update(&caller, &id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(link))
}

#[patch("/{link_id}")]
pub async fn partial_update_social_link(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    link_id: web::Path<String>,
    payload: web::Json<SocialLinkPatch>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&link_id, NOT_FOUND)?;
    payload.validate()?;

    let link = state
        .social_link_service
        .partial_update(&caller, &id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(link))
}

#[delete("/{link_id}")]
pub async fn delete_social_link(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    link_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&link_id, NOT_FOUND)?;
    state.social_link_service.delete(&caller, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::handlers::test_support::{test_app, TestContext};

    #[actix_web::test]
    async fn test_crud_and_author_permission() {
        let ctx = TestContext::new();
        let (_, owner) = ctx.active_user("owner@x.com", "secret1").await;
        let (_, stranger) = ctx.active_user("stranger@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/social-links/")
            .insert_header(("Authorization", owner.clone()))
            .set_json(json!({"link": "https://a.example"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let uri = format!("/api/v1/social-links/{}", created["id"].as_str().unwrap());

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", stranger.clone()))
            .set_json(json!({"link": "https://evil.example"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("You do not have permission"));

        let req = test::TestRequest::patch()
            .uri(&uri)
            .insert_header(("Authorization", owner.clone()))
            .set_json(json!({"link": "https://b.example"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["link"], "https://b.example");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", stranger))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", owner.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(("Authorization", owner))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_invalid_link_rejected() {
        let ctx = TestContext::new();
        let (_, owner) = ctx.active_user("owner@x.com", "secret1").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/social-links")
            .insert_header(("Authorization", owner))
            .set_json(json!({"link": "not a url"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"]["link"][0], "Enter a valid URL.");
    }

    #[actix_web::test]
    async fn test_anonymous_cannot_create() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/api/v1/social-links")
            .set_json(json!({"link": "https://a.example"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
