//! Stateless HTTP request builder and response parser for the record store.
//!
//! # Design
//! `StoreClient` holds the base URL, contract key and table name and carries
//! no mutable state between calls. Each store operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. `RemoteStore` in `store.rs` pairs the
//! two with a `Transport`.
//!
//! The store answers 200 for every successful operation. Rows are returned
//! as raw JSON so the mapper can read malformed ones without failing the
//! whole list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::TodoError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::TodoFields;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Serialize)]
struct CreateBody<'a> {
    table_name: &'a str,
    data: &'a TodoFields,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    data: &'a TodoFields,
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Synchronous, stateless client for the record store's four operations.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    contract_key: String,
    table: String,
}

impl StoreClient {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            contract_key: config.contract_key.clone(),
            table: config.table.clone(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn table_url(&self) -> String {
        format!("{}/{}/data/{}", self.base_url, self.contract_key, self.table)
    }

    pub fn build_list_records(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/all?format=json", self.table_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_record(&self, fields: &TodoFields) -> Result<HttpRequest, TodoError> {
        let body = CreateBody {
            table_name: &self.table,
            data: fields,
        };
        let body = serde_json::to_string(&body).map_err(|e| TodoError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/{}/data/store", self.base_url, self.contract_key),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_record(&self, entry_id: &str, fields: &TodoFields) -> Result<HttpRequest, TodoError> {
        let body = serde_json::to_string(&UpdateBody { data: fields }).map_err(|e| TodoError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/update/{entry_id}", self.table_url()),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_record(&self, entry_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/delete/{entry_id}", self.table_url()),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Value>, TodoError> {
        check_status(&response, "")?;
        let envelope: ListEnvelope =
            serde_json::from_str(&response.body).map_err(|e| TodoError::Decode(e.to_string()))?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn parse_create_record(&self, response: HttpResponse) -> Result<(), TodoError> {
        check_status(&response, "")
    }

    pub fn parse_update_record(&self, entry_id: &str, response: HttpResponse) -> Result<(), TodoError> {
        check_status(&response, entry_id)
    }

    pub fn parse_delete_record(&self, entry_id: &str, response: HttpResponse) -> Result<(), TodoError> {
        check_status(&response, entry_id)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())]
}

/// Map non-200 status codes to the appropriate `TodoError` variant.
fn check_status(response: &HttpResponse, entry_id: &str) -> Result<(), TodoError> {
    match response.status {
        200 => Ok(()),
        404 => Err(TodoError::NotFound {
            id: entry_id.to_string(),
        }),
        status => Err(TodoError::Status {
            status,
            body: response.body.clone(),
        }),
    }
}
