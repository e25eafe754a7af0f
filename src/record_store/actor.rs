use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use super::protocol::{
    DeletePayload, FetchQuery, FieldError, FieldSpec, FilterOperator, Record, RecordId, RecordResult,
    RecordsPayload, SortType, StoreResponse, WhereClause, ID_FIELD,
};
use super::{RecordStore, StoreError};

// =============================================================================
// 1. THE MESSAGES
// =============================================================================

pub type Response = oneshot::Sender<StoreResponse>;

#[derive(Debug)]
pub enum StoreRequest {
    Fetch {
        table: String,
        query: FetchQuery,
        respond_to: Response,
    },
    Get {
        table: String,
        id: RecordId,
        query: FetchQuery,
        respond_to: Response,
    },
    Create {
        table: String,
        payload: RecordsPayload,
        respond_to: Response,
    },
    Update {
        table: String,
        payload: RecordsPayload,
        respond_to: Response,
    },
    Delete {
        table: String,
        payload: DeletePayload,
        respond_to: Response,
    },
}

// =============================================================================
// 2. THE ACTOR SERVER
// =============================================================================

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<RecordId, Record>,
    required: Vec<String>,
}

/// In-memory record store. Owns every table; answers one request at a time.
///
/// Ids are assigned from a single counter shared by all tables. Tables come
/// into existence on first write; fetching an unknown table yields no rows.
pub struct RecordStoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    tables: HashMap<String, Table>,
    next_id: RecordId,
}

impl RecordStoreActor {
    pub fn new(buffer_size: usize) -> (Self, RecordStoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            tables: HashMap::new(),
            next_id: 1,
        };
        (actor, RecordStoreClient::new(sender))
    }

    /// Reject creates (and updates that null out) missing any of `fields`.
    pub fn require_fields(mut self, table: &str, fields: &[&str]) -> Self {
        self.tables.entry(table.to_string()).or_default().required =
            fields.iter().map(|field| field.to_string()).collect();
        self
    }

    pub fn seed(mut self, table: &str, records: impl IntoIterator<Item = Record>) -> Self {
        for record in records {
            self.insert(table, record);
        }
        self
    }

    #[instrument(name = "record_store", skip(self))]
    pub async fn run(mut self) {
        info!(tables = self.tables.len(), "Record store starting");
        while let Some(msg) = self.receiver.recv().await {
            let (response, respond_to) = match msg {
                StoreRequest::Fetch { table, query, respond_to } => (self.handle_fetch(&table, &query), respond_to),
                StoreRequest::Get { table, id, query, respond_to } => (self.handle_get(&table, id, &query), respond_to),
                StoreRequest::Create { table, payload, respond_to } => (self.handle_create(&table, payload), respond_to),
                StoreRequest::Update { table, payload, respond_to } => (self.handle_update(&table, payload), respond_to),
                StoreRequest::Delete { table, payload, respond_to } => (self.handle_delete(&table, payload), respond_to),
            };
            let _ = respond_to.send(response);
        }
        info!("Record store stopped");
    }

    fn insert(&mut self, table: &str, mut record: Record) -> Record {
        let id = self.next_id;
        self.next_id += 1;
        record.insert(ID_FIELD.to_string(), Value::from(id));
        self.tables
            .entry(table.to_string())
            .or_default()
            .rows
            .insert(id, record.clone());
        record
    }

    fn required_fields(&self, table: &str) -> Vec<String> {
        self.tables.get(table).map(|t| t.required.clone()).unwrap_or_default()
    }

    fn handle_fetch(&self, table: &str, query: &FetchQuery) -> StoreResponse {
        let Some(rows) = self.tables.get(table).map(|t| &t.rows) else {
            debug!(table, "Fetch against empty table");
            return StoreResponse::with_data(Value::Array(Vec::new()));
        };

        let mut matched: Vec<&Record> = rows
            .values()
            .filter(|record| matches_filters(record, &query.filters))
            .collect();

        // Stable sorts applied last-key-first give a lexicographic ordering.
        for clause in query.order_by.iter().rev() {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(&clause.field_name), b.get(&clause.field_name));
                match clause.sorttype {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        let (offset, limit) = query.paging.map_or((0, usize::MAX), |p| (p.offset, p.limit));
        let data: Vec<Value> = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| Value::Object(project(record, &query.fields)))
            .collect();

        debug!(table, count = data.len(), "Fetched records");
        StoreResponse::with_data(Value::Array(data))
    }

    fn handle_get(&self, table: &str, id: RecordId, query: &FetchQuery) -> StoreResponse {
        match self.tables.get(table).and_then(|t| t.rows.get(&id)) {
            Some(record) => StoreResponse::with_data(Value::Object(project(record, &query.fields))),
            None => {
                debug!(table, id, "Record not found");
                StoreResponse::failure(format!("Record {id} not found in {table}"))
            }
        }
    }

    fn handle_create(&mut self, table: &str, payload: RecordsPayload) -> StoreResponse {
        let required = self.required_fields(table);
        let mut results = Vec::with_capacity(payload.records.len());

        for mut record in payload.records {
            let errors = missing_required(&record, &required, true);
            if !errors.is_empty() {
                results.push(RecordResult::failed("Validation failed", errors));
                continue;
            }
            record.remove(ID_FIELD);
            let stored = self.insert(table, record);
            results.push(RecordResult::succeeded(Some(Value::Object(stored))));
        }

        debug!(table, count = results.len(), "Processed create");
        StoreResponse::with_results(results)
    }

    fn handle_update(&mut self, table: &str, payload: RecordsPayload) -> StoreResponse {
        let required = self.required_fields(table);
        let mut results = Vec::with_capacity(payload.records.len());

        for record in payload.records {
            let Some(id) = record.get(ID_FIELD).and_then(Value::as_i64) else {
                results.push(RecordResult::failed("Record Id is required", Vec::new()));
                continue;
            };
            let errors = missing_required(&record, &required, false);
            if !errors.is_empty() {
                results.push(RecordResult::failed("Validation failed", errors));
                continue;
            }

            match self.tables.get_mut(table).and_then(|t| t.rows.get_mut(&id)) {
                Some(existing) => {
                    for (field, value) in record {
                        if field != ID_FIELD {
                            existing.insert(field, value);
                        }
                    }
                    results.push(RecordResult::succeeded(Some(Value::Object(existing.clone()))));
                }
                None => results.push(RecordResult::failed(format!("Record {id} not found"), Vec::new())),
            }
        }

        debug!(table, count = results.len(), "Processed update");
        StoreResponse::with_results(results)
    }

    fn handle_delete(&mut self, table: &str, payload: DeletePayload) -> StoreResponse {
        let results = payload
            .record_ids
            .into_iter()
            .map(|id| {
                let removed = self.tables.get_mut(table).and_then(|t| t.rows.remove(&id));
                match removed {
                    Some(_) => RecordResult::succeeded(None),
                    None => RecordResult::failed(format!("Record {id} not found"), Vec::new()),
                }
            })
            .collect();

        StoreResponse::with_results(results)
    }
}

fn matches_filters(record: &Record, filters: &[WhereClause]) -> bool {
    filters.iter().all(|clause| match clause.operator {
        FilterOperator::EqualTo => record
            .get(&clause.field_name)
            .is_some_and(|value| clause.values.contains(value)),
    })
}

/// Missing values sort first; mismatched kinds fall back to their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn project(record: &Record, fields: &[FieldSpec]) -> Record {
    if fields.is_empty() {
        return record.clone();
    }
    let mut projected = Record::new();
    if let Some(id) = record.get(ID_FIELD) {
        projected.insert(ID_FIELD.to_string(), id.clone());
    }
    for spec in fields {
        if let Some(value) = record.get(spec.name()) {
            projected.insert(spec.name().to_string(), value.clone());
        }
    }
    projected
}

/// On create an absent field counts as missing; on update only an explicit null does.
fn missing_required(record: &Record, required: &[String], absent_is_missing: bool) -> Vec<FieldError> {
    required
        .iter()
        .filter(|field| match record.get(field.as_str()) {
            None => absent_is_missing,
            Some(value) => value.is_null(),
        })
        .map(|field| FieldError {
            field_label: field.clone(),
            message: "is required".to_string(),
        })
        .collect()
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// Cheap, cloneable handle to a running [`RecordStoreActor`].
#[derive(Clone)]
pub struct RecordStoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl RecordStoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request(&self, build: impl FnOnce(Response) -> StoreRequest + Send) -> Result<StoreResponse, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }
}

#[async_trait]
impl RecordStore for RecordStoreClient {
    async fn fetch_records(&self, table: &str, query: FetchQuery) -> Result<StoreResponse, StoreError> {
        self.request(|respond_to| StoreRequest::Fetch {
            table: table.to_string(),
            query,
            respond_to,
        })
        .await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: FetchQuery,
    ) -> Result<StoreResponse, StoreError> {
        self.request(|respond_to| StoreRequest::Get {
            table: table.to_string(),
            id,
            query,
            respond_to,
        })
        .await
    }

    async fn create_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError> {
        self.request(|respond_to| StoreRequest::Create {
            table: table.to_string(),
            payload,
            respond_to,
        })
        .await
    }

    async fn update_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            table: table.to_string(),
            payload,
            respond_to,
        })
        .await
    }

    async fn delete_record(&self, table: &str, payload: DeletePayload) -> Result<StoreResponse, StoreError> {
        self.request(|respond_to| StoreRequest::Delete {
            table: table.to_string(),
            payload,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn start(actor: RecordStoreActor) {
        tokio::spawn(actor.run());
    }

    fn catalog() -> Vec<Record> {
        vec![
            record(json!({"name_c": "Mug", "category_c": "Home", "price_c": 8.5})),
            record(json!({"name_c": "Headphones", "category_c": "Electronics", "price_c": 99.0})),
            record(json!({"name_c": "Blue Shirt", "category_c": "Apparel", "price_c": 25.0})),
            record(json!({"name_c": "Camera", "category_c": "Electronics", "price_c": 450.0})),
        ]
    }

    #[tokio::test]
    async fn test_fetch_filters_orders_and_projects() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor.seed("product_c", catalog()));

        let query = FetchQuery::fields(&["name_c"])
            .filter_eq("category_c", "Electronics")
            .order_by("name_c", SortType::Asc);
        let response = client.fetch_records("product_c", query).await.unwrap();

        assert!(response.success);
        assert_eq!(
            response.data.unwrap(),
            json!([{"Id": 4, "name_c": "Camera"}, {"Id": 2, "name_c": "Headphones"}])
        );
    }

    #[tokio::test]
    async fn test_fetch_pages_in_descending_id_order() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor.seed("product_c", catalog()));

        let query = FetchQuery::fields(&[]).order_by("Id", SortType::Desc).page(2, 1);
        let response = client.fetch_records("product_c", query).await.unwrap();

        let ids: Vec<i64> = response.data.unwrap().as_array().unwrap().iter().map(|r| r["Id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_unknown_table_is_empty_not_an_error() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor);

        let response = client.fetch_records("cart_item_c", FetchQuery::default()).await.unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(json!([])));
    }

    #[tokio::test]
    async fn test_create_reports_missing_required_fields_per_record() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor.require_fields("product_c", &["name_c", "price_c"]));

        let payload = RecordsPayload {
            records: vec![
                record(json!({"name_c": "Lamp", "price_c": 30.0})),
                record(json!({"price_c": 12.0})),
            ],
        };
        let response = client.create_record("product_c", payload).await.unwrap();
        let results = response.results.unwrap();

        assert!(results[0].success);
        assert_eq!(results[0].data.as_ref().unwrap()["Id"], json!(1));
        assert!(!results[1].success);
        assert_eq!(results[1].errors[0].field_label, "name_c");
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_reports_unknown_ids() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor.seed("order_c", vec![record(json!({"status_c": "Confirmed", "total_c": 10.0}))]));

        let payload = RecordsPayload {
            records: vec![
                record(json!({"Id": 1, "status_c": "Shipped"})),
                record(json!({"Id": 9, "status_c": "Shipped"})),
            ],
        };
        let results = client.update_record("order_c", payload).await.unwrap().results.unwrap();

        assert_eq!(
            results[0].data,
            Some(json!({"Id": 1, "status_c": "Shipped", "total_c": 10.0}))
        );
        assert!(!results[1].success);
        assert_eq!(results[1].message.as_deref(), Some("Record 9 not found"));
    }

    #[tokio::test]
    async fn test_delete_then_get_fails() {
        let (actor, client) = RecordStoreActor::new(8);
        start(actor.seed("product_c", catalog()));

        let deleted = client
            .delete_record("product_c", DeletePayload { record_ids: vec![1, 42] })
            .await
            .unwrap()
            .results
            .unwrap();
        assert!(deleted[0].success);
        assert!(!deleted[1].success);

        let response = client.get_record_by_id("product_c", 1, FetchQuery::default()).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Record 1 not found in product_c"));
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = RecordStoreActor::new(1);
        drop(actor);

        let result = client.fetch_records("product_c", FetchQuery::default()).await;
        assert!(matches!(result, Err(StoreError::ActorClosed)));
    }
}
