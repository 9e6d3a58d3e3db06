//! In-memory [`ReportStore`] used by the workflow unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::report::ReportItem;
use crate::store::ReportStore;

#[derive(Debug, thiserror::Error)]
#[error("memory store: {0}")]
pub struct MemoryStoreError(pub String);

#[derive(Default)]
struct Inner {
    rows: Vec<ReportItem>,
    inserts: usize,
}

/// Vec-backed store with an optional injected insert failure.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    transactional: bool,
    /// Number of inserts allowed to succeed before every later insert fails.
    fail_after_inserts: Option<usize>,
}

impl MemoryStore {
    pub fn with_items(rows: Vec<ReportItem>) -> Self {
        Self {
            inner: Mutex::new(Inner { rows, inserts: 0 }),
            transactional: true,
            fail_after_inserts: None,
        }
    }

    pub fn non_transactional(mut self) -> Self {
        self.transactional = false;
        self
    }

    pub fn failing_after(mut self, inserts: usize) -> Self {
        self.fail_after_inserts = Some(inserts);
        self
    }

    pub fn push(&self, item: ReportItem) {
        self.inner.lock().unwrap().rows.push(item);
    }

    pub fn rows_for(&self, week_start: NaiveDate) -> Vec<ReportItem> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|r| r.week_start == week_start)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    fn try_insert(
        &self,
        inner: &mut Inner,
        rows: &mut Vec<ReportItem>,
        item: &ReportItem,
    ) -> Result<(), MemoryStoreError> {
        if let Some(limit) = self.fail_after_inserts {
            if inner.inserts >= limit {
                return Err(MemoryStoreError("injected insert failure".into()));
            }
        }
        if rows.iter().any(|r| r.id == item.id) {
            return Err(MemoryStoreError(format!("duplicate id {}", item.id)));
        }
        inner.inserts += 1;
        rows.push(item.clone());
        Ok(())
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn items_for_week(
        &self,
        week_start: NaiveDate,
    ) -> Result<Vec<ReportItem>, Self::Error> {
        Ok(self.rows_for(week_start))
    }

    fn supports_transactions(&self) -> bool {
        self.transactional
    }

    async fn replace_week_atomic(
        &self,
        week_start: NaiveDate,
        items: &[ReportItem],
    ) -> Result<u64, Self::Error> {
        if !self.transactional {
            return Err(MemoryStoreError("transactions unsupported".into()));
        }
        let mut inner = self.inner.lock().unwrap();
        let mut staged: Vec<ReportItem> = inner
            .rows
            .iter()
            .filter(|r| r.week_start != week_start)
            .cloned()
            .collect();
        let inserts_before = inner.inserts;
        for item in items {
            if let Err(e) = self.try_insert(&mut inner, &mut staged, item) {
                inner.inserts = inserts_before;
                return Err(e);
            }
        }
        inner.rows = staged;
        Ok(items.len() as u64)
    }

    async fn delete_week(&self, week_start: NaiveDate) -> Result<u64, Self::Error> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.week_start != week_start);
        Ok((before - inner.rows.len()) as u64)
    }

    async fn insert_item(&self, item: &ReportItem) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().unwrap();
        let mut rows = std::mem::take(&mut inner.rows);
        let result = self.try_insert(&mut inner, &mut rows, item);
        inner.rows = rows;
        result
    }
}

pub fn week(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn item(
    id: &str,
    week_start: NaiveDate,
    division: &str,
    project: &str,
    prev: &str,
    curr: &str,
) -> ReportItem {
    ReportItem {
        id: id.to_string(),
        week_start,
        division: division.to_string(),
        project: project.to_string(),
        prev_progress: prev.to_string(),
        curr_progress: curr.to_string(),
        remarks: String::new(),
        created_at: None,
    }
}
