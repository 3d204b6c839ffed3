//! In-memory stand-in for one database, with per-operation failure
//! injection, so reconciliation sequences can be driven through partial
//! failure without a live Postgres.
#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use planta_core::database::{Record, StoreError, SupervisionStatus, SupervisionStore};
use planta_core::query::{ListPage, ListQuery};
use planta_core::registry::TableSpec;

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<String, Record>>,
    failures: Mutex<HashSet<&'static str>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(spec: &TableSpec, rows: Vec<Record>) -> Self {
        let store = Self::new();
        for record in rows {
            store.insert_row(spec, record);
        }
        store
    }

    pub fn insert_row(&self, spec: &TableSpec, record: Record) {
        let key = key_of(spec, &record);
        self.rows.lock().unwrap().insert(key, record);
    }

    /// Make one operation (`update`, `fetch`, `insert`, `delete`, `list`,
    /// `ping`) fail as if the database were unreachable.
    pub fn fail_on(&self, operation: &'static str) {
        self.failures.lock().unwrap().insert(operation);
    }

    pub fn get(&self, id: &str) -> Option<Record> {
        self.rows.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_failure(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.failures.lock().unwrap().contains(operation) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn key_of(spec: &TableSpec, record: &Record) -> String {
    match record.get(spec.primary_key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => panic!("test record is missing its primary key {}", spec.primary_key),
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => value_text(a).cmp(&value_text(b)),
    }
}

#[async_trait]
impl SupervisionStore for MemoryStore {
    async fn update_supervision(
        &self,
        _spec: &TableSpec,
        id: &str,
        status: SupervisionStatus,
    ) -> Result<u64, StoreError> {
        self.check_failure("update")?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(id) {
            Some(record) => {
                record.insert(
                    "supervision".to_string(),
                    Value::String(status.as_str().to_string()),
                );
                record.insert("check".to_string(), Value::Bool(status.check_flag()));
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn fetch_record(
        &self,
        _spec: &TableSpec,
        id: &str,
    ) -> Result<Option<Record>, StoreError> {
        self.check_failure("fetch")?;
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn insert_record(&self, spec: &TableSpec, record: &Record) -> Result<u64, StoreError> {
        self.check_failure("insert")?;
        let key = key_of(spec, record);
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&key) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint".to_string(),
            )));
        }
        rows.insert(key, record.clone());
        Ok(1)
    }

    async fn delete_record(&self, _spec: &TableSpec, id: &str) -> Result<u64, StoreError> {
        self.check_failure("delete")?;
        match self.rows.lock().unwrap().remove(id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    async fn list_records(
        &self,
        _spec: &TableSpec,
        query: &ListQuery,
    ) -> Result<ListPage, StoreError> {
        self.check_failure("list")?;
        let rows = self.rows.lock().unwrap();

        let mut filtered: Vec<Record> = rows
            .values()
            .filter(|record| {
                query.filters.iter().all(|(column, needle)| {
                    value_text(record.get(column))
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                })
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            let ordering = compare_values(a.get(&query.order_by), b.get(&query.order_by));
            if query.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        let total = filtered.len() as i64;
        let datos = filtered
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .map(Value::Object)
            .collect();

        Ok(ListPage { datos, total })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_failure("ping")
    }
}
