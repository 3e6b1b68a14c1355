use std::sync::Arc;

use crate::application::controller::ResourceController;
use crate::application::resource::{
    AuthorFollowers, Categories, CategoryFollowers, Comments, Media, Permissions, PostMedia,
    PostTags, Posts, RolePermissions, Roles, Tags, Users,
};
use crate::config::UiSettings;
use crate::infra::api::{ApiClient, AssociationClient};

#[derive(Clone)]
pub struct AdminState {
    pub api: Arc<ApiClient>,
    pub ui: UiSettings,
    pub posts: Arc<ResourceController<Posts>>,
    pub categories: Arc<ResourceController<Categories>>,
    pub tags: Arc<ResourceController<Tags>>,
    pub users: Arc<ResourceController<Users>>,
    pub roles: Arc<ResourceController<Roles>>,
    pub permissions: Arc<ResourceController<Permissions>>,
    pub comments: Arc<ResourceController<Comments>>,
    pub media: Arc<ResourceController<Media>>,
    pub post_tags: AssociationClient<PostTags>,
    pub post_media: AssociationClient<PostMedia>,
    pub role_permissions: AssociationClient<RolePermissions>,
    pub category_followers: AssociationClient<CategoryFollowers>,
    pub author_followers: AssociationClient<AuthorFollowers>,
}

impl AdminState {
    pub fn new(api: Arc<ApiClient>, ui: UiSettings) -> Self {
        let staleness = ui.poll_interval;
        let picker_limit = ui.picker_limit.get();

        fn controller<R: crate::application::resource::Resource>(
            api: &Arc<ApiClient>,
            staleness: std::time::Duration,
            picker_limit: u32,
        ) -> Arc<ResourceController<R>> {
            Arc::new(ResourceController::new(
                Arc::clone(api),
                staleness,
                picker_limit,
            ))
        }

        Self {
            posts: controller(&api, staleness, picker_limit),
            categories: controller(&api, staleness, picker_limit),
            tags: controller(&api, staleness, picker_limit),
            users: controller(&api, staleness, picker_limit),
            roles: controller(&api, staleness, picker_limit),
            permissions: controller(&api, staleness, picker_limit),
            comments: controller(&api, staleness, picker_limit),
            media: controller(&api, staleness, picker_limit),
            post_tags: AssociationClient::new(Arc::clone(&api)),
            post_media: AssociationClient::new(Arc::clone(&api)),
            role_permissions: AssociationClient::new(Arc::clone(&api)),
            category_followers: AssociationClient::new(Arc::clone(&api)),
            author_followers: AssociationClient::new(Arc::clone(&api)),
            api,
            ui,
        }
    }
}
