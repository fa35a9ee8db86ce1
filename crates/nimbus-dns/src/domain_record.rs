//! DNS domain records

use crate::client::Client;
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};

/// A DNS domain record.
#[derive(Debug, Clone, Default)]
pub struct DomainRecord {
    pub id: i64,
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub priority: u32,
    pub ttl: u32,
    pub domain_id: i64,

    pub(crate) client: Option<Client>,
}

impl DomainRecord {
    /// Update the record.
    ///
    /// `None` keeps the corresponding current value; `Some` replaces it,
    /// including with an empty string. Descriptive fields are refreshed
    /// from the server response afterwards, so server-side normalization
    /// is reflected; identity fields (`id`, `record_type`, `domain_id`)
    /// never change.
    pub async fn update(
        &mut self,
        name: Option<&str>,
        content: Option<&str>,
        priority: Option<u32>,
        ttl: Option<u32>,
    ) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        let res = nimbus_api::execute(
            &*client.bus,
            &UpdateDnsRecord {
                domain_id: self.domain_id,
                id: self.id,
                record_type: self.record_type.clone(),
                name: name.map_or_else(|| self.name.clone(), str::to_string),
                content: content.map_or_else(|| self.content.clone(), str::to_string),
                priority: priority.unwrap_or(self.priority),
                ttl: ttl.unwrap_or(self.ttl),
            },
        )
        .await?;

        let record: ApiDnsRecord = serde_json::from_value(res)?;
        self.name = record.name;
        self.content = record.content;
        self.priority = record.priority;
        self.ttl = record.ttl;

        Ok(())
    }

    /// Delete the record, tombstoning the value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        client
            .boolean(&DeleteDnsRecord {
                domain_id: self.domain_id,
                id: self.id,
            })
            .await?;

        *self = Self::default();

        Ok(())
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDnsRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Debug, Serialize)]
struct UpdateDnsRecord {
    domain_id: i64,
    id: i64,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    content: String,
    priority: u32,
    ttl: u32,
}

impl Command for UpdateDnsRecord {
    const NAME: &'static str = "updateDnsRecord";
}

#[derive(Debug, Serialize)]
struct DeleteDnsRecord {
    domain_id: i64,
    id: i64,
}

impl Command for DeleteDnsRecord {
    const NAME: &'static str = "deleteDnsRecord";
}
