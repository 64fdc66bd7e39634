//! 사용자 간 팔로우 관계 엔티티
//!
//! `subscriber_id`가 `user_id`를 팔로우하는 방향성 있는 간선입니다.
//! 같은 쌍에 대한 간선은 하나만 존재합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 팔로우 대상
    pub user_id: ObjectId,
    /// 팔로우하는 사용자
    pub subscriber_id: ObjectId,
    pub created_at: DateTime,
}

impl Follower {
    pub fn new(user_id: ObjectId, subscriber_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            subscriber_id,
            created_at: DateTime::now(),
        }
    }
}
