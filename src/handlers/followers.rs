//! 팔로우 관계 핸들러

use actix_web::{delete, get, post, web, HttpResponse};

use crate::core::AppState;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::path_object_id;

/// 나를 팔로우하는 사용자 목록
#[get("")]
pub async fn list_subscribers(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.follower_service.subscribers(&caller).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// 내가 팔로우하는 사용자 목록
#[get("/following")]
pub async fn list_following(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = state.follower_service.following(&caller).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/{user_id}")]
pub async fn follow(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&user_id, "User not found")?;
    state.follower_service.follow(&caller, &id).await?;
    Ok(HttpResponse::Created().finish())
}

#[delete("/{user_id}")]
pub async fn unfollow(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&user_id, "You are not following this user.")?;
    state.follower_service.unfollow(&caller, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use crate::handlers::test_support::{test_app, TestContext};

    #[actix_web::test]
    async fn test_follow_flow() {
        let ctx = TestContext::new();
        let (_, alice) = ctx.active_user("alice@x.com", "secret1").await;
        let (bob, bob_auth) = ctx.active_user("bob@x.com", "secret1").await;
        let app = test_app!(ctx);
        let uri = format!("/api/v1/followers/{}", bob.id.unwrap().to_hex());

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", alice.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", alice.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri("/api/v1/followers")
            .insert_header(("Authorization", bob_auth.clone()))
            .to_request();
        let subscribers: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(subscribers.as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", alice.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/api/v1/followers/following")
            .insert_header(("Authorization", alice))
            .to_request();
        let following: Value = test::call_and_read_body_json(&app, req).await;
        assert!(following.as_array().unwrap().is_empty());

        let self_follow = test::TestRequest::post()
            .uri(&uri)
            .insert_header(("Authorization", bob_auth))
            .to_request();
        assert_eq!(test::call_service(&app, self_follow).await.status(), StatusCode::BAD_REQUEST);
    }
}
