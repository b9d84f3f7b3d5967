//! Remote store client: `StoreClient` requests executed over a `Transport`.

use serde_json::Value;

use crate::client::StoreClient;
use crate::config::StoreConfig;
use crate::error::TodoError;
use crate::http::Transport;
use crate::types::TodoFields;

/// Performs the store's list/create/update/delete calls. No business logic.
#[derive(Debug, Clone)]
pub struct RemoteStore<T> {
    client: StoreClient,
    transport: T,
}

impl<T: Transport> RemoteStore<T> {
    pub fn new(config: &StoreConfig, transport: T) -> Self {
        Self {
            client: StoreClient::new(config),
            transport,
        }
    }

    pub async fn list_records(&self) -> Result<Vec<Value>, TodoError> {
        let response = self.transport.execute(self.client.build_list_records()).await?;
        self.client.parse_list_records(response)
    }

    pub async fn create_record(&self, fields: &TodoFields) -> Result<(), TodoError> {
        let request = self.client.build_create_record(fields)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_record(response)
    }

    pub async fn update_record(&self, entry_id: &str, fields: &TodoFields) -> Result<(), TodoError> {
        let request = self.client.build_update_record(entry_id, fields)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_record(entry_id, response)
    }

    pub async fn delete_record(&self, entry_id: &str) -> Result<(), TodoError> {
        let response = self.transport.execute(self.client.build_delete_record(entry_id)).await?;
        self.client.parse_delete_record(entry_id, response)
    }
}
