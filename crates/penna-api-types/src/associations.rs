//! Join records for the platform's many-to-many tables.
//!
//! Each record is a pure link `{ id, <left>_id, <right>_id, created_at }`.
//! Uniqueness of the `(left, right)` pair is enforced server-side; clients
//! only avoid offering duplicate attachments in their pickers.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTagRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub tag_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTagDraft {
    pub post_id: Uuid,
    pub tag_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMediaRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub media_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMediaDraft {
    pub post_id: Uuid,
    pub media_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionRecord {
    pub id: Uuid,
    pub role_id: Uuid,
    pub permission_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionDraft {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFollowerRecord {
    pub id: Uuid,
    pub category_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFollowerDraft {
    pub category_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorFollowerRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorFollowerDraft {
    pub author_id: Uuid,
    pub user_id: Uuid,
}
