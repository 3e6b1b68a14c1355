//! The resource abstraction every admin screen is parameterized by.
//!
//! A [`Resource`] names one platform collection and its wire types; an
//! [`AssociationKind`] names one many-to-many join table between two
//! resources. All controller, client, and screen machinery is generic over
//! these traits, so per-entity modules only contribute field shape.

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use penna_api_types::{
    AuthorFollowerDraft, AuthorFollowerRecord, CategoryDraft, CategoryFollowerDraft,
    CategoryFollowerRecord, CategoryPatch, CategoryRecord, CommentDraft, CommentPatch,
    CommentRecord, MediaPatch, MediaRecord, MediaUpload, PermissionDraft, PermissionPatch,
    PermissionRecord, PostDraft, PostMediaDraft, PostMediaRecord, PostPatch, PostRecord,
    PostTagDraft, PostTagRecord, RoleDraft, RolePatch, RolePermissionDraft, RolePermissionRecord,
    RoleRecord, TagDraft, TagPatch, TagRecord, UserDraft, UserPatch, UserRecord,
};

/// One platform collection with full CRUD semantics.
pub trait Resource: Send + Sync + 'static {
    type Record: Clone + Send + Sync + DeserializeOwned + 'static;
    type Draft: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    /// Singular, lowercase name used in messages ("post").
    const NAME: &'static str;
    /// Plural heading used on screens ("Posts").
    const TITLE: &'static str;
    /// Remote collection path relative to the API base ("posts").
    const COLLECTION: &'static str;
    /// Admin screen path prefix ("/posts").
    const SCREEN: &'static str;

    fn id(record: &Self::Record) -> Uuid;

    /// Short human label used in toasts and pickers.
    fn label(record: &Self::Record) -> String;
}

/// One join table between two resources.
pub trait AssociationKind: Send + Sync + 'static {
    type Left: Resource;
    type Right: Resource;
    type Record: Clone + Send + Sync + DeserializeOwned + 'static;
    type Draft: Serialize + Send + Sync;

    /// Remote collection path relative to the API base ("post-tags").
    const COLLECTION: &'static str;
    /// Query/body field naming the left side ("post_id").
    const LEFT_PARAM: &'static str;
    /// Heading shown above the picker in the owner's editor.
    const PICKER_HEADING: &'static str;

    fn id(record: &Self::Record) -> Uuid;
    fn right_id(record: &Self::Record) -> Uuid;
    fn draft(left: Uuid, right: Uuid) -> Self::Draft;
}

macro_rules! resource {
    ($marker:ident, $record:ty, $draft:ty, $patch:ty, $name:literal, $title:literal, $collection:literal, $label:ident) => {
        pub struct $marker;

        impl Resource for $marker {
            type Record = $record;
            type Draft = $draft;
            type Patch = $patch;

            const NAME: &'static str = $name;
            const TITLE: &'static str = $title;
            const COLLECTION: &'static str = $collection;
            const SCREEN: &'static str = concat!("/", $collection);

            fn id(record: &Self::Record) -> Uuid {
                record.id
            }

            fn label(record: &Self::Record) -> String {
                record.$label.clone()
            }
        }
    };
}

resource!(Posts, PostRecord, PostDraft, PostPatch, "post", "Posts", "posts", title);
resource!(
    Categories,
    CategoryRecord,
    CategoryDraft,
    CategoryPatch,
    "category",
    "Categories",
    "categories",
    name
);
resource!(Tags, TagRecord, TagDraft, TagPatch, "tag", "Tags", "tags", name);
resource!(Users, UserRecord, UserDraft, UserPatch, "user", "Users", "users", username);
resource!(Roles, RoleRecord, RoleDraft, RolePatch, "role", "Roles", "roles", name);
resource!(
    Permissions,
    PermissionRecord,
    PermissionDraft,
    PermissionPatch,
    "permission",
    "Permissions",
    "permissions",
    name
);
resource!(
    Comments,
    CommentRecord,
    CommentDraft,
    CommentPatch,
    "comment",
    "Comments",
    "comments",
    author_name
);
resource!(
    Media,
    MediaRecord,
    MediaUpload,
    MediaPatch,
    "media item",
    "Media",
    "media",
    file_name
);

macro_rules! association {
    ($marker:ident, $left:ty, $right:ty, $record:ty, $draft:ident, $collection:literal, $left_param:literal, $heading:literal, $right_field:ident) => {
        pub struct $marker;

        impl AssociationKind for $marker {
            type Left = $left;
            type Right = $right;
            type Record = $record;
            type Draft = $draft;

            const COLLECTION: &'static str = $collection;
            const LEFT_PARAM: &'static str = $left_param;
            const PICKER_HEADING: &'static str = $heading;

            fn id(record: &Self::Record) -> Uuid {
                record.id
            }

            fn right_id(record: &Self::Record) -> Uuid {
                record.$right_field
            }

            fn draft(left: Uuid, right: Uuid) -> Self::Draft {
                $draft::from_pair(left, right)
            }
        }
    };
}

// Draft constructors keep the macro free of per-type field names.
trait FromPair {
    fn from_pair(left: Uuid, right: Uuid) -> Self;
}

impl FromPair for PostTagDraft {
    fn from_pair(left: Uuid, right: Uuid) -> Self {
        Self {
            post_id: left,
            tag_id: right,
        }
    }
}

impl FromPair for PostMediaDraft {
    fn from_pair(left: Uuid, right: Uuid) -> Self {
        Self {
            post_id: left,
            media_id: right,
        }
    }
}

impl FromPair for RolePermissionDraft {
    fn from_pair(left: Uuid, right: Uuid) -> Self {
        Self {
            role_id: left,
            permission_id: right,
        }
    }
}

impl FromPair for CategoryFollowerDraft {
    fn from_pair(left: Uuid, right: Uuid) -> Self {
        Self {
            category_id: left,
            user_id: right,
        }
    }
}

impl FromPair for AuthorFollowerDraft {
    fn from_pair(left: Uuid, right: Uuid) -> Self {
        Self {
            author_id: left,
            user_id: right,
        }
    }
}

association!(
    PostTags,
    Posts,
    Tags,
    PostTagRecord,
    PostTagDraft,
    "post-tags",
    "post_id",
    "Tags",
    tag_id
);
association!(
    PostMedia,
    Posts,
    Media,
    PostMediaRecord,
    PostMediaDraft,
    "post-media",
    "post_id",
    "Attached media",
    media_id
);
association!(
    RolePermissions,
    Roles,
    Permissions,
    RolePermissionRecord,
    RolePermissionDraft,
    "role-permissions",
    "role_id",
    "Permissions",
    permission_id
);
association!(
    CategoryFollowers,
    Categories,
    Users,
    CategoryFollowerRecord,
    CategoryFollowerDraft,
    "category-followers",
    "category_id",
    "Followers",
    user_id
);
association!(
    AuthorFollowers,
    Users,
    Users,
    AuthorFollowerRecord,
    AuthorFollowerDraft,
    "author-followers",
    "author_id",
    "Followers",
    user_id
);
