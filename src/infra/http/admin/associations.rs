//! Generic attach/detach handlers for the join-table pickers.

use std::collections::{BTreeMap, BTreeSet};

use axum::{
    extract::{Form, Path, State},
    response::Response,
};
use uuid::Uuid;

use crate::{
    application::{
        controller::ResourceController,
        resource::{AssociationKind, Resource},
    },
    infra::api::{ApiError, AssociationClient},
    presentation::admin::views::{AttachedItemView, PickerView, SelectOptionView},
};

use super::{
    AdminState,
    shared::{RawForm, redirect_with_error, redirect_with_notice},
};

/// Wiring for one join table's picker and routes.
pub(super) trait AssociationScreen: AssociationKind + Sized {
    /// Path segment under the owner's screen ("tags" in `/posts/{id}/tags/attach`).
    const SEGMENT: &'static str;

    fn client(state: &AdminState) -> &AssociationClient<Self>;
    fn rights(state: &AdminState) -> &ResourceController<Self::Right>;
}

fn owner_edit_path<A: AssociationScreen>(left: Uuid) -> String {
    format!("{}/{left}/edit", <A::Left as Resource>::SCREEN)
}

/// Build the picker block for an owner's editor: attached rows with detach
/// actions, plus the full option list with already-attached entries
/// disabled. Fetched fresh on every render so new records appear
/// immediately.
pub(super) async fn build_picker<A: AssociationScreen>(
    state: &AdminState,
    left: Uuid,
) -> Result<PickerView, ApiError> {
    let rows = A::client(state).list_for(left).await?;
    let rights = A::rights(state).pick_list().await?;

    let attached_ids: BTreeSet<Uuid> = rows.iter().map(A::right_id).collect();
    let labels: BTreeMap<Uuid, String> = rights
        .items
        .iter()
        .map(|record| {
            (
                <A::Right as Resource>::id(record),
                <A::Right as Resource>::label(record),
            )
        })
        .collect();

    let attached = rows
        .iter()
        .map(|row| {
            let right_id = A::right_id(row);
            AttachedItemView {
                label: labels
                    .get(&right_id)
                    .cloned()
                    .unwrap_or_else(|| right_id.to_string()),
                detach_action: format!(
                    "{}/{left}/{}/{}/detach",
                    <A::Left as Resource>::SCREEN,
                    A::SEGMENT,
                    A::id(row)
                ),
            }
        })
        .collect();

    let options = rights
        .items
        .iter()
        .map(|record| SelectOptionView {
            value: <A::Right as Resource>::id(record).to_string(),
            label: <A::Right as Resource>::label(record),
            selected: false,
            disabled: attached_ids.contains(&<A::Right as Resource>::id(record)),
        })
        .collect();

    Ok(PickerView {
        heading: A::PICKER_HEADING,
        attach_action: format!(
            "{}/{left}/{}/attach",
            <A::Left as Resource>::SCREEN,
            A::SEGMENT
        ),
        options,
        attached,
    })
}

pub(super) async fn attach<A: AssociationScreen>(
    State(state): State<AdminState>,
    Path(left): Path<Uuid>,
    Form(form): Form<RawForm>,
) -> Response {
    let back = owner_edit_path::<A>(left);
    let Some(right) = form
        .get("right_id")
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
    else {
        return redirect_with_error(&back, "Select an item to attach.");
    };

    match A::client(&state).attach(left, right).await {
        Ok(_) => redirect_with_notice(&back, "Attached."),
        Err(err) => redirect_with_error(&back, &err.user_message()),
    }
}

pub(super) async fn detach<A: AssociationScreen>(
    State(state): State<AdminState>,
    Path((left, association_id)): Path<(Uuid, Uuid)>,
) -> Response {
    let back = owner_edit_path::<A>(left);
    match A::client(&state).detach(association_id).await {
        Ok(()) => redirect_with_notice(&back, "Detached."),
        Err(err) if err.is_not_found() => {
            redirect_with_notice(&back, "That attachment was already gone.")
        }
        Err(err) => redirect_with_error(&back, &err.user_message()),
    }
}

macro_rules! association_screen {
    ($marker:ty, $segment:literal, $client_field:ident, $rights_field:ident) => {
        impl AssociationScreen for $marker {
            const SEGMENT: &'static str = $segment;

            fn client(state: &AdminState) -> &AssociationClient<Self> {
                &state.$client_field
            }

            fn rights(state: &AdminState) -> &ResourceController<Self::Right> {
                &state.$rights_field
            }
        }
    };
}

use crate::application::resource::{
    AuthorFollowers, CategoryFollowers, PostMedia, PostTags, RolePermissions,
};

association_screen!(PostTags, "tags", post_tags, tags);
association_screen!(PostMedia, "media", post_media, media);
association_screen!(RolePermissions, "permissions", role_permissions, permissions);
association_screen!(CategoryFollowers, "followers", category_followers, users);
association_screen!(AuthorFollowers, "followers", author_followers, users);
