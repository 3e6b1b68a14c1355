//! The per-collection controller every admin screen talks to.
//!
//! Wires one [`QueryBinder`] and one [`MutationDispatcher`] to the same
//! collection so reads observe writes without waiting out the staleness
//! window.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use penna_api_types::Page;

use crate::application::mutation::{Confirmation, DeleteOutcome, MutationDispatcher};
use crate::application::pagination::ListQuery;
use crate::application::query::{BoundQuery, QueryBinder};
use crate::application::resource::Resource;
use crate::infra::api::{ApiClient, ApiError, ResourceClient};

pub struct ResourceController<R: Resource> {
    binder: Arc<QueryBinder<R>>,
    dispatcher: MutationDispatcher<R>,
    client: ResourceClient<R>,
    picker_limit: u32,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(api: Arc<ApiClient>, staleness: Duration, picker_limit: u32) -> Self {
        let client = ResourceClient::new(api);
        let binder = Arc::new(QueryBinder::new(client.clone(), staleness));
        let dispatcher = MutationDispatcher::new(client.clone(), Arc::clone(&binder));
        Self {
            binder,
            dispatcher,
            client,
            picker_limit,
        }
    }

    pub async fn list(&self, query: ListQuery) -> BoundQuery<R> {
        self.binder.bind(query).await
    }

    /// Fetch one record; `None` when the platform reports it missing.
    pub async fn find(&self, id: Uuid) -> Result<Option<R::Record>, ApiError> {
        match self.client.get(id).await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record, ApiError> {
        self.dispatcher.create(draft).await
    }

    pub async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<R::Record, ApiError> {
        self.dispatcher.update(id, patch).await
    }

    pub async fn delete(
        &self,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, ApiError> {
        self.dispatcher.delete(id, confirmation).await
    }

    /// Collection size, from a minimal envelope.
    pub async fn count(&self) -> Result<u64, ApiError> {
        let page = self.client.list(&ListQuery::new(1, 1)).await?;
        Ok(page.total)
    }

    /// First page of options for pickers and select fields, bypassing the
    /// snapshot so freshly created records appear immediately.
    pub async fn pick_list(&self) -> Result<Page<R::Record>, ApiError> {
        self.client.list(&ListQuery::new(1, self.picker_limit)).await
    }

    /// Record a remote write performed outside the dispatcher, such as a
    /// multipart upload, so the next list render refetches.
    pub async fn note_external_write(&self) {
        self.binder.invalidate().await;
    }
}
