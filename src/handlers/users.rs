//! # 내 프로필 핸들러
//!
//! `/api/v1/users`와 `/api/v1/users/{id}`는 경로의 ID와 관계없이 항상 호출자 본인을
//! 대상으로 합니다. 수정은 `multipart/form-data`로 받으며 `PUT`과 `PATCH` 모두
//! 본문에 있는 필드만 반영합니다.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::users::{AvatarUpload, UpdateProfileRequest, UserResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

/// 텍스트 필드 하나의 최대 크기
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

pub async fn get_current_user(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_current_user(&caller).await?;
    Ok(HttpResponse::Ok().json(UserResponse::new(&user, state.media_url())))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let max_avatar_bytes = state.config.media.avatar_max_bytes;
    let (request, avatar) = read_profile_form(payload, max_avatar_bytes).await?;
    request.validate()?;

    let user = state.user_service.update_profile(&caller, request, avatar).await?;
    Ok(HttpResponse::Ok().json(UserResponse::new(&user, state.media_url())))
}

pub async fn delete_current_user(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.delete_user(&caller.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// multipart 본문을 프로필 필드와 아바타 파일로 나눕니다
///
/// 아바타는 `max_avatar_bytes + 1`바이트까지만 보관하여 크기 검사를 서비스에 맡깁니다.
async fn read_profile_form(
    mut payload: Multipart,
    max_avatar_bytes: usize,
) -> Result<(UpdateProfileRequest, Option<AvatarUpload>), AppError> {
    let mut request = UpdateProfileRequest::default();
    let mut avatar = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::ValidationError(format!("Multipart form parse error - {}", e)))?;

        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let limit = if name == "avatar" {
            max_avatar_bytes + 1
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::ValidationError(format!("Multipart form parse error - {}", e)))?;
            let remaining = limit.saturating_sub(data.len());
            data.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
        }

        if name == "avatar" {
            // 빈 파일 필드는 "변경 없음"
            if data.is_empty() && filename.as_deref().unwrap_or("").is_empty() {
                continue;
            }
            avatar = Some(AvatarUpload {
                filename: filename.unwrap_or_default(),
                content: data,
            });
        } else {
            let value = String::from_utf8(data).map_err(|_| AppError::field(&name, "Invalid UTF-8 text."))?;
            if !request.set_field(&name, value) {
                log::debug!("알 수 없는 프로필 필드 무시: {}", name);
            }
        }
    }

    Ok((request, avatar))
}
