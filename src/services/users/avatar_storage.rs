//! 아바타 파일 저장소
//!
//! 업로드는 `.jpg` 확장자(대소문자 무시), JPEG 시그니처, 최대 크기를 모두 통과해야 합니다.
//! 파일은 `{MEDIA_ROOT}/avatar/user_{id}/{파일명}`에 기록되고,
//! 엔티티에는 `MEDIA_ROOT` 기준 상대 경로가 저장됩니다.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mongodb::bson::oid::ObjectId;

use crate::config::MediaConfig;
use crate::domain::dto::users::AvatarUpload;
use crate::errors::{AppError, ErrorContext};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg"];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone)]
pub struct AvatarStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl AvatarStorage {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: config.root.clone(),
            max_bytes: config.avatar_max_bytes,
        }
    }

    /// 확장자, 크기, 이미지 형식을 검사합니다. 모든 위반은 `avatar` 필드 에러로 모입니다.
    pub fn validate(&self, upload: &AvatarUpload) -> Result<(), AppError> {
        let mut problems = Vec::new();

        let extension = Path::new(&upload.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            problems.push(format!(
                "File extension \"{}\" is not allowed. Allowed extensions are: {}.",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            ));
        }

        if upload.content.len() > self.max_bytes {
            problems.push(format!("Maximum file size is {}MB.", self.max_bytes / (1024 * 1024)));
        }

        if !upload.content.starts_with(&JPEG_SIGNATURE) {
            problems.push(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
                    .to_string(),
            );
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let mut fields = BTreeMap::new();
            fields.insert("avatar".to_string(), problems);
            Err(AppError::InvalidFields(fields))
        }
    }

    /// 저장 경로 (`MEDIA_ROOT` 기준 상대 경로)
    pub fn upload_path(user_id: &ObjectId, filename: &str) -> String {
        format!("avatar/user_{}/{}", user_id.to_hex(), Self::sanitize_filename(filename))
    }

    /// 검증 후 파일을 기록하고 상대 경로를 반환합니다
    pub async fn save(&self, user_id: &ObjectId, upload: &AvatarUpload) -> Result<String, AppError> {
        self.validate(upload)?;

        let relative = Self::upload_path(user_id, &upload.filename);
        let absolute = self.root.join(&relative);

        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("아바타 디렉토리 생성 실패: {}", parent.display()))?;
        }

        tokio::fs::write(&absolute, &upload.content)
            .await
            .with_context(|| format!("아바타 저장 실패: {}", absolute.display()))?;

        log::debug!("아바타 저장: {} ({} bytes)", relative, upload.content.len());
        Ok(relative)
    }

    /// 이전 파일을 지웁니다. 실패해도 요청은 계속 진행됩니다.
    pub async fn remove(&self, relative: &str) {
        let absolute = self.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&absolute).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("아바타 삭제 실패 ({}): {}", absolute.display(), e);
            }
        }
    }

    /// 경로 구분자를 버리고 `[A-Za-z0-9_.-]` 이외 문자를 제거합니다
    fn sanitize_filename(filename: &str) -> String {
        let base = Path::new(filename.trim())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("avatar.jpg");

        let cleaned: String = base
            .replace(' ', "_")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect();

        // 이름 부분이 비거나 숨김 파일이 되면 정적 파일 서빙이 거부합니다
        let stem = cleaned.rsplit_once('.').map_or(cleaned.as_str(), |(stem, _)| stem);
        if stem.is_empty() || cleaned.starts_with('.') {
            "avatar.jpg".to_string()
        } else {
            cleaned
        }
    }
}
