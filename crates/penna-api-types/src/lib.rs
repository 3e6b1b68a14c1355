//! Shared wire types for the blogging platform REST API.
//!
//! The admin console and any automation clients deserialize API responses
//! into these records and serialize drafts/patches from them. Field shapes
//! mirror the platform contracts exactly; no client-side behaviour lives
//! here.

mod associations;
mod entities;
mod pagination;

pub use associations::{
    AuthorFollowerDraft, AuthorFollowerRecord, CategoryFollowerDraft, CategoryFollowerRecord,
    PostMediaDraft, PostMediaRecord, PostTagDraft, PostTagRecord, RolePermissionDraft,
    RolePermissionRecord,
};
pub use entities::{
    CategoryDraft, CategoryPatch, CategoryRecord, CommentDraft, CommentPatch, CommentRecord,
    CommentStatus, MediaPatch, MediaRecord, MediaUpload, PermissionDraft, PermissionPatch,
    PermissionRecord, PostDraft, PostPatch, PostRecord, PostStatus, RoleDraft, RolePatch,
    RoleRecord, TagDraft, TagPatch, TagRecord, UserDraft, UserPatch, UserRecord,
};
pub use pagination::{ApiErrorBody, Page};
