//! Bulk record operations against a single bitable table
//!
//! Writes go out in chunks of at most 1000 records, strictly one after
//! another, with the context's pacing policy run between chunks. Deletion
//! drains the table page by page until the listing reports no more rows.

use larkbridge_domain::constants::NOTHING_TO_DELETE;
use larkbridge_domain::{LarkError, PageResult, Record, Result, TableHandle};
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::context::ApiContext;
use crate::endpoint::actions;

/// What a drain-all run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The first listing carried no `items`.
    NothingToDelete,
    Drained {
        /// `total` reported by the first page.
        total: i64,
        /// Ids actually sent for deletion.
        deleted: usize,
        /// Pages listed.
        pages: usize,
    },
}

impl DrainOutcome {
    /// Total reported by the first page, or `-1` when there was nothing to
    /// list.
    pub fn count(&self) -> i64 {
        match self {
            Self::NothingToDelete => NOTHING_TO_DELETE,
            Self::Drained { total, .. } => *total,
        }
    }
}

/// Record-level operations for one table.
#[derive(Debug, Clone)]
pub struct BulkRecordOperator {
    ctx: ApiContext,
    table: TableHandle,
}

impl BulkRecordOperator {
    /// Operator bound to `table`.
    pub fn new(ctx: ApiContext, table: TableHandle) -> Self {
        Self { ctx, table }
    }

    /// Table every operation targets.
    pub fn table(&self) -> &TableHandle {
        &self.table
    }

    fn path(&self, action: &str) -> Result<String> {
        let base_id = urlencoding::encode(&self.table.base_id);
        let table_id = urlencoding::encode(&self.table.table_id);
        self.ctx.resolve(action, &[("baseId", &*base_id), ("tableId", &*table_id)])
    }

    /// Raw listing response. No page cursor is sent.
    ///
    /// # Errors
    /// Transport failures.
    pub async fn list_records_raw(&self) -> Result<Value> {
        let path = self.path(actions::LIST_RECORDS)?;
        self.ctx.transport().get(&path).await
    }

    /// First page of records.
    ///
    /// # Errors
    /// Transport failures.
    pub async fn list_records(&self) -> Result<PageResult> {
        Ok(PageResult::from_response(&self.list_records_raw().await?))
    }

    /// Create a single record.
    ///
    /// # Errors
    /// Transport failures.
    pub async fn create_record(&self, fields: Record) -> Result<Value> {
        let path = self.path(actions::CREATE_RECORD)?;
        self.ctx.transport().post(&path, &json!({ "fields": fields })).await
    }

    /// Create `records` in order-preserving chunks and collect one response
    /// per chunk.
    ///
    /// An empty input makes no request. The first failing chunk aborts the
    /// run; chunks already sent stay created.
    ///
    /// # Errors
    /// Transport failures.
    #[instrument(skip_all, fields(base_id = %self.table.base_id, table_id = %self.table.table_id))]
    pub async fn batch_create<I>(&self, records: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: Send,
    {
        let path = self.path(actions::BATCH_CREATE)?;
        let chunk_size = self.ctx.chunk_size();
        let mut records = records.into_iter().peekable();
        let mut responses = Vec::new();
        let mut sent = 0usize;

        while records.peek().is_some() {
            if !responses.is_empty() {
                self.ctx.pacing().pause().await;
            }

            let chunk: Vec<Value> = records
                .by_ref()
                .take(chunk_size)
                .map(|fields| json!({ "fields": fields }))
                .collect();
            let chunk_len = chunk.len();

            debug!(chunk = responses.len(), records = chunk_len, "dispatching batch_create chunk");
            let response = self.ctx.transport().post(&path, &json!({ "records": chunk })).await?;

            sent += chunk_len;
            responses.push(response);
        }

        if !responses.is_empty() {
            info!(records = sent, chunks = responses.len(), "batch create finished");
        }
        Ok(responses)
    }

    /// Delete the given record ids in one request.
    ///
    /// # Errors
    /// `InvalidInput` for an empty id list, otherwise transport failures.
    pub async fn batch_delete(&self, record_ids: &[String]) -> Result<Value> {
        if record_ids.is_empty() {
            return Err(LarkError::InvalidInput("no record ids to delete".into()));
        }
        let path = self.path(actions::BATCH_DELETE)?;
        self.ctx.transport().post(&path, &json!({ "records": record_ids })).await
    }

    /// Delete every record in the table.
    ///
    /// Lists the first page, deletes the ids on it, and repeats while the
    /// listing reports `has_more`. The listing never carries a cursor, so
    /// each pass sees whatever the previous delete left behind. A page that
    /// claims more rows but yields no new ids ends the run.
    ///
    /// # Errors
    /// Transport failures from either the listing or the delete.
    #[instrument(skip_all, fields(base_id = %self.table.base_id, table_id = %self.table.table_id))]
    pub async fn drain_all(&self) -> Result<DrainOutcome> {
        let mut total = None;
        let mut deleted = 0usize;
        let mut pages = 0usize;
        let mut previous: Option<Vec<String>> = None;

        loop {
            let page = self.list_records().await?;
            if page.items.is_none() {
                if pages == 0 {
                    debug!("listing carried no items, nothing to delete");
                    return Ok(DrainOutcome::NothingToDelete);
                }
                warn!(pages, "listing stopped carrying items mid-drain");
                break;
            }

            pages += 1;
            let first_total = *total.get_or_insert(page.total);
            let ids = page.record_ids();

            if ids.is_empty() {
                if page.has_more {
                    warn!(pages, total = first_total, "listing claims more rows but returned none");
                }
                break;
            }
            if previous.as_ref() == Some(&ids) {
                warn!(pages, total = first_total, "listing repeated the previous page");
                break;
            }

            self.batch_delete(&ids).await?;
            deleted += ids.len();
            debug!(page = pages, deleted = ids.len(), has_more = page.has_more, "deleted page");

            if !page.has_more {
                break;
            }
            previous = Some(ids);
        }

        let total = total.unwrap_or(0);
        info!(total, deleted, pages, "drain finished");
        Ok(DrainOutcome::Drained { total, deleted, pages })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Map;

    use super::*;
    use crate::testing::{context_with, Call, CountingPacer, RecordingTransport};

    fn record(n: usize) -> Record {
        let mut fields = Map::new();
        fields.insert("n".into(), json!(n));
        fields
    }

    fn page(ids: std::ops::Range<usize>, total: i64, has_more: bool) -> Value {
        let items: Vec<Value> =
            ids.map(|i| json!({"record_id": format!("rec{i}"), "fields": {}})).collect();
        json!({"code": 0, "data": {"items": items, "total": total, "has_more": has_more}})
    }

    fn operator(
        transport: &Arc<RecordingTransport>,
        pacer: Arc<CountingPacer>,
    ) -> BulkRecordOperator {
        context_with(transport.clone())
            .with_pacing(pacer)
            .records(TableHandle::new("bascn1", "tbl1"))
    }

    #[tokio::test]
    async fn batch_create_splits_into_ordered_chunks() {
        let transport = RecordingTransport::new();
        let pacer = Arc::new(CountingPacer::default());
        let op = operator(&transport, pacer.clone());

        let responses = op.batch_create((0..2500).map(record)).await.unwrap();

        assert_eq!(responses.len(), 3);
        assert_eq!(pacer.pauses(), 2);

        let posts = transport.posts();
        let sizes: Vec<usize> =
            posts.iter().map(|(_, body)| body["records"].as_array().unwrap().len()).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
        assert!(posts
            .iter()
            .all(|(path, _)| path == "bitable/v1/apps/bascn1/tables/tbl1/records/batch_create"));

        assert_eq!(posts[0].1["records"][0], json!({"fields": {"n": 0}}));
        assert_eq!(posts[1].1["records"][0], json!({"fields": {"n": 1000}}));
        assert_eq!(posts[2].1["records"][499], json!({"fields": {"n": 2499}}));
    }

    #[tokio::test]
    async fn batch_create_with_no_records_makes_no_calls() {
        let transport = RecordingTransport::new();
        let pacer = Arc::new(CountingPacer::default());

        let responses = operator(&transport, pacer.clone()).batch_create(Vec::new()).await.unwrap();

        assert!(responses.is_empty());
        assert!(transport.calls().is_empty());
        assert_eq!(pacer.pauses(), 0);
    }

    #[tokio::test]
    async fn batch_create_exact_chunk_does_not_pause() {
        let transport = RecordingTransport::new();
        let pacer = Arc::new(CountingPacer::default());

        let responses =
            operator(&transport, pacer.clone()).batch_create((0..1000).map(record)).await.unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(pacer.pauses(), 0);
    }

    #[tokio::test]
    async fn batch_create_honours_configured_chunk_size() {
        let transport = RecordingTransport::new();
        let op = context_with(transport.clone())
            .with_chunk_size(2)
            .unwrap()
            .records(TableHandle::new("b", "t"));

        let responses = op.batch_create((0..5).map(record)).await.unwrap();

        assert_eq!(responses.len(), 3);
    }

    #[tokio::test]
    async fn batch_create_stops_at_first_failure() {
        let transport = RecordingTransport::new();
        transport.fail_posts_with("connection reset");
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let err = op.batch_create((0..2500).map(record)).await.unwrap_err();

        assert_eq!(err, LarkError::Transport("connection reset".into()));
        assert_eq!(transport.posts().len(), 1);
    }

    #[tokio::test]
    async fn drain_deletes_every_page_and_reports_first_total() {
        let transport = RecordingTransport::new();
        transport.queue_get(page(0..100, 150, true));
        transport.queue_get(page(100..150, 150, false));
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let outcome = op.drain_all().await.unwrap();

        assert_eq!(outcome.count(), 150);
        assert_eq!(outcome, DrainOutcome::Drained { total: 150, deleted: 150, pages: 2 });

        let posts = transport.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].0, "bitable/v1/apps/bascn1/tables/tbl1/records/batch_delete");
        assert_eq!(posts[0].1["records"].as_array().unwrap().len(), 100);
        assert_eq!(posts[1].1["records"][0], "rec100");
        assert_eq!(posts[1].1["records"].as_array().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn drain_without_items_returns_sentinel() {
        let transport = RecordingTransport::new();
        transport.queue_get(json!({"code": 91402, "msg": "NOTEXIST"}));
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let outcome = op.drain_all().await.unwrap();

        assert_eq!(outcome, DrainOutcome::NothingToDelete);
        assert_eq!(outcome.count(), -1);
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn drain_of_empty_table_skips_delete() {
        let transport = RecordingTransport::new();
        transport.queue_get(json!({"data": {"items": [], "total": 0, "has_more": false}}));
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let outcome = op.drain_all().await.unwrap();

        assert_eq!(outcome.count(), 0);
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn drain_stops_when_listing_repeats() {
        let transport = RecordingTransport::new();
        transport.queue_get(page(0..10, 30, true));
        transport.queue_get(page(0..10, 30, true));
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let outcome = op.drain_all().await.unwrap();

        assert_eq!(outcome, DrainOutcome::Drained { total: 30, deleted: 10, pages: 2 });
        assert_eq!(transport.posts().len(), 1);
    }

    #[tokio::test]
    async fn drain_stops_on_empty_page_claiming_more() {
        let transport = RecordingTransport::new();
        transport.queue_get(json!({"data": {"items": [], "total": 5, "has_more": true}}));
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        let outcome = op.drain_all().await.unwrap();

        assert_eq!(outcome, DrainOutcome::Drained { total: 5, deleted: 0, pages: 1 });
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn batch_delete_rejects_empty_ids() {
        let transport = RecordingTransport::new();
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        assert!(matches!(op.batch_delete(&[]).await, Err(LarkError::InvalidInput(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn identifiers_are_percent_encoded() {
        let transport = RecordingTransport::new();
        let op = context_with(transport.clone()).records(TableHandle::new("b/1", "t 2"));

        op.list_records().await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![Call::Get("bitable/v1/apps/b%2F1/tables/t%202/records".into())]
        );
    }

    #[tokio::test]
    async fn create_record_wraps_fields() {
        let transport = RecordingTransport::new();
        let op = operator(&transport, Arc::new(CountingPacer::default()));

        op.create_record(record(7)).await.unwrap();

        let posts = transport.posts();
        assert_eq!(posts[0].0, "bitable/v1/apps/bascn1/tables/tbl1/records");
        assert_eq!(posts[0].1, json!({"fields": {"n": 7}}));
    }
}
