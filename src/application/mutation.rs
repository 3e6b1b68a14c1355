//! Mutation dispatch: writes against one collection, tied to its binder.
//!
//! Every successful write invalidates the collection's bound snapshot so the
//! next list render reflects the change immediately instead of waiting out
//! the staleness window.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::query::QueryBinder;
use crate::application::resource::Resource;
use crate::infra::api::{ApiError, ResourceClient};

const METRIC_MUTATION_TOTAL: &str = "penna_mutation_total";
const METRIC_MUTATION_ERROR_TOTAL: &str = "penna_mutation_error_total";

/// Whether the operator confirmed a destructive action.
///
/// Confirmation arrives as a form flag posted by the screen; anything other
/// than an affirmative value counts as declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("on") | Some("true") | Some("1") => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation gate stopped the request before any remote call.
    Declined,
}

pub struct MutationDispatcher<R: Resource> {
    client: ResourceClient<R>,
    binder: Arc<QueryBinder<R>>,
}

impl<R: Resource> MutationDispatcher<R> {
    pub fn new(client: ResourceClient<R>, binder: Arc<QueryBinder<R>>) -> Self {
        Self { client, binder }
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record, ApiError> {
        let record = self.observe("create", self.client.create(draft).await)?;
        self.binder.invalidate().await;
        info!(collection = R::COLLECTION, id = %R::id(&record), "record created");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, patch: &R::Patch) -> Result<R::Record, ApiError> {
        let record = self.observe("update", self.client.update(id, patch).await)?;
        self.binder.invalidate().await;
        info!(collection = R::COLLECTION, %id, "record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid, confirmation: Confirmation) -> Result<DeleteOutcome, ApiError> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Declined);
        }
        self.observe("delete", self.client.delete(id).await)?;
        self.binder.invalidate().await;
        info!(collection = R::COLLECTION, %id, "record deleted");
        Ok(DeleteOutcome::Deleted)
    }

    fn observe<T>(&self, operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        counter!(METRIC_MUTATION_TOTAL).increment(1);
        if let Err(err) = &result {
            counter!(METRIC_MUTATION_ERROR_TOTAL).increment(1);
            warn!(
                collection = R::COLLECTION,
                operation,
                kind = err.kind(),
                error = %err,
                "mutation failed"
            );
        }
        result
    }
}
