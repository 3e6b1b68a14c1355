//! Typed collection clients layered over [`ApiClient`].

use std::marker::PhantomData;
use std::sync::Arc;

use uuid::Uuid;

use penna_api_types::Page;

use crate::application::pagination::{ListQuery, validate_envelope};
use crate::application::resource::{AssociationKind, Resource};

use super::client::{ApiClient, ApiError};

/// CRUD access to one remote collection.
#[derive(Debug)]
pub struct ResourceClient<R: Resource> {
    api: Arc<ApiClient>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    fn item_path(id: Uuid) -> String {
        format!("{}/{id}", R::COLLECTION)
    }

    /// Fetch one page of the collection, enforcing the envelope contract.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<R::Record>, ApiError> {
        let page: Page<R::Record> = self
            .api
            .get_json(R::COLLECTION, &query.query_pairs())
            .await?;
        Ok(validate_envelope(page)?)
    }

    pub async fn get(&self, id: Uuid) -> Result<R::Record, ApiError> {
        self.api.get_json(&Self::item_path(id), &[]).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record, ApiError> {
        self.api.post_json(R::COLLECTION, draft).await
    }

    pub async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<R::Record, ApiError> {
        self.api.patch_json(&Self::item_path(id), patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&Self::item_path(id)).await
    }
}

/// Attach/detach access to one remote join collection.
#[derive(Debug)]
pub struct AssociationClient<A: AssociationKind> {
    api: Arc<ApiClient>,
    _marker: PhantomData<fn() -> A>,
}

impl<A: AssociationKind> Clone for AssociationClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _marker: PhantomData,
        }
    }
}

impl<A: AssociationKind> AssociationClient<A> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    /// Every join row whose left side is the given owner, following the
    /// envelope across pages until `total` is covered.
    pub async fn list_for(&self, left: Uuid) -> Result<Vec<A::Record>, ApiError> {
        const PAGE_LIMIT: u32 = 200;

        let mut rows: Vec<A::Record> = Vec::new();
        let mut page_number = 1u32;
        loop {
            let query = [
                (A::LEFT_PARAM, left.to_string()),
                ("page", page_number.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            let page: Page<A::Record> = self.api.get_json(A::COLLECTION, &query).await?;
            let page = validate_envelope(page)?;
            let exhausted = page.items.is_empty();
            rows.extend(page.items);
            if exhausted || rows.len() as u64 >= page.total {
                return Ok(rows);
            }
            page_number += 1;
        }
    }

    pub async fn attach(&self, left: Uuid, right: Uuid) -> Result<A::Record, ApiError> {
        let draft = A::draft(left, right);
        self.api.post_json(A::COLLECTION, &draft).await
    }

    pub async fn detach(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("{}/{id}", A::COLLECTION)).await
    }
}
