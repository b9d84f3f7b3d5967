//! In-memory stand-in for the record store the todo core talks to.
//!
//! Rows live in per-`{contract}/{table}` vectors, in insertion order. Each
//! row gets a fresh `entry_id` on store; its `data` object is whatever the
//! client sent. Updates merge the sent fields into the existing object.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub entry_id: String,
    pub data: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Record>,
}

#[derive(Deserialize)]
pub struct StoreRequest {
    pub table_name: String,
    pub data: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub entry_id: String,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    pub data: Map<String, Value>,
}

#[derive(Debug, Default)]
pub struct Tables {
    rows: HashMap<String, Vec<Record>>,
}

impl Tables {
    /// Insert a row as-is. Lets tests seed rows the todo client never wrote.
    pub fn insert(&mut self, contract: &str, table: &str, record: Record) {
        self.rows.entry(table_key(contract, table)).or_default().push(record);
    }

    pub fn rows(&self, contract: &str, table: &str) -> &[Record] {
        self.rows.get(&table_key(contract, table)).map(Vec::as_slice).unwrap_or_default()
    }
}

pub type Db = Arc<RwLock<Tables>>;

fn table_key(contract: &str, table: &str) -> String {
    format!("{contract}/{table}")
}

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/{contract}/data/store", post(store_record))
        .route("/{contract}/data/{table}/all", get(list_records))
        .route("/{contract}/data/{table}/update/{entry_id}", put(update_record))
        .route("/{contract}/data/{table}/delete/{entry_id}", delete(delete_record))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_db(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

async fn list_records(State(db): State<Db>, Path((contract, table)): Path<(String, String)>) -> Json<ListResponse> {
    let tables = db.read().await;
    Json(ListResponse {
        data: tables.rows(&contract, &table).to_vec(),
    })
}

async fn store_record(
    State(db): State<Db>,
    Path(contract): Path<String>,
    Json(input): Json<StoreRequest>,
) -> Json<StoreResponse> {
    let record = Record {
        entry_id: Uuid::new_v4().to_string(),
        data: input.data,
    };
    let entry_id = record.entry_id.clone();
    db.write().await.insert(&contract, &input.table_name, record);
    tracing::debug!(%contract, table = %input.table_name, %entry_id, "stored row");
    Json(StoreResponse { entry_id })
}

async fn update_record(
    State(db): State<Db>,
    Path((contract, table, entry_id)): Path<(String, String, String)>,
    Json(input): Json<UpdateRequest>,
) -> Result<Json<Record>, StatusCode> {
    let mut tables = db.write().await;
    let rows = tables.rows.get_mut(&table_key(&contract, &table)).ok_or(StatusCode::NOT_FOUND)?;
    let record = rows.iter_mut().find(|r| r.entry_id == entry_id).ok_or(StatusCode::NOT_FOUND)?;
    record.data.extend(input.data);
    Ok(Json(record.clone()))
}

async fn delete_record(
    State(db): State<Db>,
    Path((contract, table, entry_id)): Path<(String, String, String)>,
) -> StatusCode {
    let mut tables = db.write().await;
    let Some(rows) = tables.rows.get_mut(&table_key(&contract, &table)) else {
        return StatusCode::NOT_FOUND;
    };
    let before = rows.len();
    rows.retain(|r| r.entry_id != entry_id);
    if rows.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_to_store_shape() {
        let mut data = Map::new();
        data.insert("name".to_string(), Value::from("Test"));
        let record = Record {
            entry_id: "row-1".to_string(),
            data,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["entry_id"], "row-1");
        assert_eq!(json["data"]["name"], "Test");
    }

    #[test]
    fn store_request_requires_table_name() {
        let result: Result<StoreRequest, _> = serde_json::from_str(r#"{"data":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn tables_are_scoped_by_contract() {
        let mut tables = Tables::default();
        tables.insert(
            "a",
            "todos",
            Record {
                entry_id: "r1".to_string(),
                data: Map::new(),
            },
        );
        assert_eq!(tables.rows("a", "todos").len(), 1);
        assert!(tables.rows("b", "todos").is_empty());
    }
}
