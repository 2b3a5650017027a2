//! Common test collaborators: an in-memory storage backend, a search
//! collaborator that executes against it, and recording menu/notifier
//! doubles.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{json, Value};

use typecrud::fields::FieldSpec;
use typecrud::hooks::{HookBus, RequestContext};
use typecrud::menu::{Menu, MenuTarget};
use typecrud::notify::Notifier;
use typecrud::registry::TypeRegistry;
use typecrud::search::Search;
use typecrud::storage::{
    FieldHooks, ModelSource, Page, PageRequest, Query, Record, Storage, StorageError,
};
use typecrud::request::DataMap;
use typecrud::Dispatcher;

/// Field specs a test model supplies through its callback capability.
#[derive(Default)]
pub struct ModelFieldHooks {
    pub table: Option<Vec<FieldSpec>>,
    pub form: Option<Vec<FieldSpec>>,
}

impl FieldHooks for ModelFieldHooks {
    fn table_fields(&self, _ctx: &RequestContext) -> Option<Vec<FieldSpec>> {
        self.table.clone()
    }

    fn form_fields(&self, _ctx: &RequestContext) -> Option<Vec<FieldSpec>> {
        self.form.clone()
    }
}

/// In-memory storage collaborator. Records validate on save: `title` must
/// be a non-empty string, mirroring a typical required-field rule.
pub struct MemoryStorage {
    name: String,
    columns: Vec<String>,
    records: Mutex<IndexMap<String, Record>>,
    next_id: AtomicU32,
    fail_deletes: AtomicBool,
    hooks: Option<ModelFieldHooks>,
}

impl MemoryStorage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: ["id", "title", "body", "created", "modified"]
                .map(String::from)
                .to_vec(),
            records: Mutex::new(IndexMap::new()),
            next_id: AtomicU32::new(1),
            fail_deletes: AtomicBool::new(false),
            hooks: None,
        }
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_hooks(mut self, hooks: ModelFieldHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Insert a record directly, bypassing validation. Returns its id.
    pub fn seed(&self, fields: &[(&str, Value)]) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut record = Record::new().with_id(id.clone());
        for (field, value) in fields {
            record.set(*field, value.clone());
        }
        self.records.lock().unwrap().insert(id.clone(), record);
        id
    }

    /// The stored record, as persisted.
    pub fn stored(&self, id: &str) -> Option<Record> {
        self.records.lock().unwrap().get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Vec<Record> {
        self.records.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find(&self) -> Result<Query, StorageError> {
        Ok(Query::new())
    }

    async fn get(&self, id: &str, contain: &[String]) -> Result<Record, StorageError> {
        let mut record = self
            .records
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::RecordNotFound(id.to_string()))?;
        if !contain.is_empty() {
            record.set("contained", json!(contain));
        }
        Ok(record)
    }

    fn new_record(&self, data: Option<&DataMap>) -> Record {
        data.map(Record::from_data).unwrap_or_default()
    }

    fn patch(&self, record: &mut Record, data: &DataMap) {
        record.apply(data);
    }

    async fn save(&self, record: &mut Record) -> Result<bool, StorageError> {
        let title_ok = record
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|title| !title.is_empty());
        if !title_ok {
            record.add_error("title", "This field cannot be left empty");
            return Ok(false);
        }

        if record.id.is_none() {
            record.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        }
        let id = record.id.clone().unwrap();
        self.records.lock().unwrap().insert(id, record.clone());
        Ok(true)
    }

    async fn delete(&self, record: &Record) -> Result<bool, StorageError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let Some(id) = &record.id else {
            return Ok(false);
        };
        Ok(self.records.lock().unwrap().shift_remove(id).is_some())
    }

    async fn columns(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.columns.clone())
    }

    fn field_hooks(&self) -> Option<&dyn FieldHooks> {
        self.hooks.as_ref().map(|hooks| {
            let hooks: &dyn FieldHooks = hooks;
            hooks
        })
    }
}

/// Search collaborator executing against a [`MemoryStorage`]: equality
/// filters, primary-key ordering, fixed-window pagination.
pub struct MemorySearch {
    store: Arc<MemoryStorage>,
}

impl MemorySearch {
    pub fn new(store: Arc<MemoryStorage>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Search for MemorySearch {
    fn filter(&self, mut query: Query, filters: &IndexMap<String, Value>) -> Query {
        for (name, value) in filters {
            query.conditions.insert(name.clone(), value.clone());
        }
        query
    }

    async fn paginate(&self, query: Query, page: PageRequest) -> Result<Page, StorageError> {
        let mut records: Vec<Record> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|record| {
                query
                    .conditions
                    .iter()
                    .all(|(field, expected)| record.get(field) == Some(expected))
            })
            .collect();

        records.sort_by_key(|record| {
            record
                .id
                .as_deref()
                .and_then(|id| id.parse::<u64>().ok())
                .unwrap_or(0)
        });
        if !page.ascending {
            records.reverse();
        }

        let total = records.len() as u64;
        let limit = page.limit.max(1) as usize;
        let page_count = records.len().div_ceil(limit).max(1) as u32;
        let start = (page.page.max(1) as usize - 1) * limit;
        let window: Vec<Record> = records.into_iter().skip(start).take(limit).collect();

        Ok(Page {
            records: window,
            page: page.page.max(1),
            page_count,
            total,
        })
    }
}

/// Records every notification the dispatcher emits.
#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Records every navigation entry registration asks for.
#[derive(Default)]
pub struct RecordingMenu {
    pub entries: Mutex<Vec<(String, MenuTarget)>>,
}

impl Menu for RecordingMenu {
    fn add(&self, label: &str, target: &MenuTarget) {
        self.entries
            .lock()
            .unwrap()
            .push((label.to_string(), target.clone()));
    }
}

/// Model source over a fixed set of named storages.
#[derive(Default)]
pub struct StaticModels {
    models: HashMap<String, Arc<dyn Storage>>,
}

impl StaticModels {
    pub fn with(mut self, name: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        self.models.insert(name.into(), storage);
        self
    }
}

impl ModelSource for StaticModels {
    fn model(&self, name: &str) -> Option<Arc<dyn Storage>> {
        self.models.get(name).cloned()
    }
}

/// Everything a dispatcher test needs, wired around one storage.
pub struct TestEnv {
    pub dispatcher: Dispatcher,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build a dispatcher around `registry` and `hooks`, with the storage
/// registered under the model name `model`.
pub fn build_env(registry: TypeRegistry, hooks: HookBus, model: &str) -> TestEnv {
    let storage = Arc::new(MemoryStorage::new(model));
    build_env_with_storage(registry, hooks, model, storage)
}

pub fn build_env_with_storage(
    registry: TypeRegistry,
    hooks: HookBus,
    model: &str,
    storage: Arc<MemoryStorage>,
) -> TestEnv {
    let notifier = Arc::new(RecordingNotifier::default());
    let search = Arc::new(MemorySearch::new(storage.clone()));
    let storage_dyn: Arc<dyn Storage> = storage.clone();
    let models = Arc::new(StaticModels::default().with(model, storage_dyn));

    let dispatcher = Dispatcher::new(
        registry.into_shared(),
        hooks.into_shared(),
        models,
        search,
        notifier.clone(),
    );

    TestEnv {
        dispatcher,
        storage,
        notifier,
    }
}
