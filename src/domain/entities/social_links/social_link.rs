//! 사용자 프로필에 연결되는 외부 링크 엔티티

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 링크 소유자
    pub user_id: ObjectId,
    pub link: String,
}

impl SocialLink {
    pub fn new(user_id: ObjectId, link: String) -> Self {
        Self {
            id: None,
            user_id,
            link,
        }
    }
}
