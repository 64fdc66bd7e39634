//! 작성자 목록 핸들러 (읽기 전용, 인증 선택)

use actix_web::{get, web, HttpResponse};

use crate::core::AppState;
use crate::errors::AppError;
use crate::handlers::path_object_id;

#[get("")]
pub async fn list_authors(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let authors = state.author_service.list_authors().await?;
    Ok(HttpResponse::Ok().json(authors))
}

#[get("/{author_id}")]
pub async fn get_author(state: web::Data<AppState>, author_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let id = path_object_id(&author_id, "Author not found")?;
    let author = state.author_service.get_author(&id).await?;
    Ok(HttpResponse::Ok().json(author))
}
