//! Table service over the bulk record operator

use larkbridge_domain::{PageResult, Record, Result, TableHandle};
use serde_json::Value;

use super::BaseService;
use crate::records::{BulkRecordOperator, DrainOutcome};

/// A table opened from a [`BaseService`], borrowing it for its lifetime.
#[derive(Debug)]
pub struct TableService<'a> {
    base: &'a BaseService,
    records: BulkRecordOperator,
}

impl<'a> TableService<'a> {
    pub(crate) fn new(base: &'a BaseService, handle: TableHandle) -> Self {
        Self { base, records: BulkRecordOperator::new(base.context().clone(), handle) }
    }

    /// Base and table identifiers.
    pub fn handle(&self) -> &TableHandle {
        self.records.table()
    }

    /// # Errors
    /// Transport failures.
    pub async fn list_records(&self) -> Result<PageResult> {
        self.records.list_records().await
    }

    /// # Errors
    /// Transport failures.
    pub async fn create_record(&self, fields: Record) -> Result<Value> {
        self.records.create_record(fields).await
    }

    /// # Errors
    /// Transport failures.
    pub async fn batch_create_records(&self, records: Vec<Record>) -> Result<Vec<Value>> {
        self.records.batch_create(records).await
    }

    /// # Errors
    /// `InvalidInput` for an empty id list, otherwise transport failures.
    pub async fn batch_delete_records(&self, record_ids: &[String]) -> Result<Value> {
        self.records.batch_delete(record_ids).await
    }

    /// Drain the table; see [`BulkRecordOperator::drain_all`].
    ///
    /// # Errors
    /// Transport failures.
    pub async fn delete_all_records(&self) -> Result<DrainOutcome> {
        self.records.drain_all().await
    }

    /// Give back the base this table was opened from.
    pub fn close(self) -> &'a BaseService {
        self.base
    }
}
