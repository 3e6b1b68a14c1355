//! Query binding: a list screen's connection to one remote collection.
//!
//! A [`QueryBinder`] holds the most recent page fetched for a collection
//! together with the exact query that produced it. Rebinding the same query
//! inside the staleness window reuses the snapshot; a changed query, an
//! elapsed window, or an explicit invalidation forces a refetch. The window
//! equals the screen poll interval, so a polling screen observes at most one
//! remote fetch per cycle.

use std::time::{Duration, Instant};

use metrics::counter;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use penna_api_types::Page;

use crate::application::pagination::ListQuery;
use crate::application::resource::Resource;
use crate::infra::api::ResourceClient;

const METRIC_QUERY_FETCH_TOTAL: &str = "penna_query_fetch_total";
const METRIC_QUERY_CACHE_HIT_TOTAL: &str = "penna_query_cache_hit_total";
const METRIC_QUERY_FETCH_ERROR_TOTAL: &str = "penna_query_fetch_error_total";

/// Result of binding a query.
pub enum BoundQuery<R: Resource> {
    /// Fetched from the platform API on this call.
    Fresh(Page<R::Record>),
    /// Served from the held snapshot without a remote call.
    Cached(Page<R::Record>),
    /// The fetch failed and no usable snapshot existed.
    Failed { message: String },
}

struct Snapshot<R: Resource> {
    query: ListQuery,
    page: Page<R::Record>,
    fetched_at: Instant,
}

pub struct QueryBinder<R: Resource> {
    client: ResourceClient<R>,
    staleness: Duration,
    snapshot: Mutex<Option<Snapshot<R>>>,
}

impl<R: Resource> QueryBinder<R> {
    pub fn new(client: ResourceClient<R>, staleness: Duration) -> Self {
        Self {
            client,
            staleness,
            snapshot: Mutex::new(None),
        }
    }

    /// Resolve a query, from the snapshot when it is still valid for this
    /// exact query, otherwise from the platform API.
    pub async fn bind(&self, query: ListQuery) -> BoundQuery<R> {
        let mut guard = self.snapshot.lock().await;

        if let Some(held) = guard.as_ref()
            && held.query == query
            && held.fetched_at.elapsed() < self.staleness
        {
            counter!(METRIC_QUERY_CACHE_HIT_TOTAL).increment(1);
            return BoundQuery::Cached(held.page.clone());
        }

        match self.client.list(&query).await {
            Ok(page) => {
                counter!(METRIC_QUERY_FETCH_TOTAL).increment(1);
                debug!(
                    collection = R::COLLECTION,
                    page = query.page,
                    total = page.total,
                    "bound query refreshed"
                );
                *guard = Some(Snapshot {
                    query,
                    page: page.clone(),
                    fetched_at: Instant::now(),
                });
                BoundQuery::Fresh(page)
            }
            Err(err) => {
                counter!(METRIC_QUERY_FETCH_ERROR_TOTAL).increment(1);
                warn!(
                    collection = R::COLLECTION,
                    kind = err.kind(),
                    error = %err,
                    "list fetch failed"
                );
                // A snapshot for a different query or past its window does
                // not stand in for the requested one.
                *guard = None;
                BoundQuery::Failed {
                    message: err.user_message(),
                }
            }
        }
    }

    /// Drop the held snapshot so the next bind refetches. Called after every
    /// successful mutation on the collection.
    pub async fn invalidate(&self) {
        let mut guard = self.snapshot.lock().await;
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::application::resource::Tags;
    use crate::infra::api::ApiClient;

    use super::*;

    fn binder_for(server: &MockServer, staleness: Duration) -> QueryBinder<Tags> {
        let api = ApiClient::new(&server.base_url(), "secret", Duration::from_secs(2))
            .expect("client");
        QueryBinder::new(ResourceClient::new(Arc::new(api)), staleness)
    }

    fn tag_page(names: &[&str], total: u64, page: u32) -> serde_json::Value {
        let items: Vec<_> = names
            .iter()
            .map(|name| {
                json!({
                    "id": uuid::Uuid::new_v4(),
                    "name": name,
                    "slug": name,
                    "created_at": "2026-01-05T10:00:00Z",
                    "updated_at": "2026-01-05T10:00:00Z",
                })
            })
            .collect();
        json!({ "items": items, "total": total, "page": page, "limit": 20 })
    }

    #[tokio::test]
    async fn repeated_bind_of_same_query_hits_snapshot() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(200).json_body(tag_page(&["rust"], 1, 1));
            })
            .await;

        let binder = binder_for(&server, Duration::from_secs(60));
        let query = ListQuery::new(1, 20);

        let first = binder.bind(query.clone()).await;
        assert!(matches!(first, BoundQuery::Fresh(_)));

        let second = binder.bind(query).await;
        assert!(matches!(second, BoundQuery::Cached(_)));

        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn changed_query_forces_refetch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(200).json_body(tag_page(&["rust"], 1, 1));
            })
            .await;

        let binder = binder_for(&server, Duration::from_secs(60));
        binder.bind(ListQuery::new(1, 20)).await;
        binder
            .bind(ListQuery::new(1, 20).with_filter("search", "rust"))
            .await;

        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn elapsed_window_forces_refetch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(200).json_body(tag_page(&["rust"], 1, 1));
            })
            .await;

        let binder = binder_for(&server, Duration::ZERO);
        let query = ListQuery::new(1, 20);
        binder.bind(query.clone()).await;
        let rebound = binder.bind(query).await;

        assert!(matches!(rebound, BoundQuery::Fresh(_)));
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn invalidation_drops_snapshot() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(200).json_body(tag_page(&["rust"], 1, 1));
            })
            .await;

        let binder = binder_for(&server, Duration::from_secs(60));
        let query = ListQuery::new(1, 20);
        binder.bind(query.clone()).await;
        binder.invalidate().await;
        let rebound = binder.bind(query).await;

        assert!(matches!(rebound, BoundQuery::Fresh(_)));
        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn failed_fetch_reports_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(503).json_body(json!({ "message": "maintenance window" }));
            })
            .await;

        let binder = binder_for(&server, Duration::from_secs(60));
        let bound = binder.bind(ListQuery::new(1, 20)).await;

        match bound {
            BoundQuery::Failed { message } => assert_eq!(message, "maintenance window"),
            _ => panic!("expected the bind to fail"),
        }
    }

    #[tokio::test]
    async fn overfull_envelope_is_rejected() {
        let server = MockServer::start_async().await;
        let mut body = tag_page(&["a", "b", "c"], 3, 1);
        body["limit"] = json!(2);
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tags");
                then.status(200).json_body(body);
            })
            .await;

        let binder = binder_for(&server, Duration::from_secs(60));
        let bound = binder.bind(ListQuery::new(1, 2)).await;
        assert!(matches!(bound, BoundQuery::Failed { .. }));
    }
}
