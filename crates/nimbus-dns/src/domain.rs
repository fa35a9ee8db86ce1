//! DNS domains

use crate::client::Client;
use crate::domain_record::{ApiDnsRecord, DomainRecord};
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};

/// A DNS domain.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    pub id: i64,
    pub name: String,

    client: Option<Client>,
}

impl Domain {
    /// List the domain's records.
    pub async fn records(&self) -> Result<Vec<DomainRecord>> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        let res = nimbus_api::list(
            &*client.bus,
            &ListDnsRecords {
                domain_id: self.id,
            },
        )
        .await?;

        let mut records = Vec::with_capacity(res.len());
        for item in res {
            records.push(client.domain_record_from_api(serde_json::from_value(item)?, self.id));
        }

        Ok(records)
    }

    /// Add a record to the domain.
    pub async fn add_record(
        &self,
        name: &str,
        record_type: &str,
        content: &str,
        priority: u32,
        ttl: u32,
    ) -> Result<DomainRecord> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        tracing::debug!(domain = %self.name, name, record_type, "creating DNS record");

        let res = nimbus_api::execute(
            &*client.bus,
            &CreateDnsRecord {
                domain_id: self.id,
                name: name.to_string(),
                record_type: record_type.to_string(),
                content: content.to_string(),
                priority,
                ttl,
            },
        )
        .await?;

        Ok(client.domain_record_from_api(serde_json::from_value(res)?, self.id))
    }

    /// Delete the domain, tombstoning the value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        client
            .boolean(&DeleteDnsDomain {
                name: self.name.clone(),
            })
            .await?;

        *self = Self::default();

        Ok(())
    }
}

impl Client {
    /// Create a new DNS domain.
    pub async fn create_domain(&self, name: &str) -> Result<Domain> {
        tracing::debug!(name, "creating DNS domain");

        let res = nimbus_api::execute(
            &*self.bus,
            &CreateDnsDomain {
                name: name.to_string(),
            },
        )
        .await?;

        Ok(self.domain_from_api(serde_json::from_value(res)?))
    }

    /// List all DNS domains.
    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        let res = nimbus_api::list(&*self.bus, &ListDnsDomains { name: String::new() }).await?;

        let mut domains = Vec::with_capacity(res.len());
        for item in res {
            domains.push(self.domain_from_api(serde_json::from_value(item)?));
        }

        Ok(domains)
    }

    /// Look up a DNS domain by name.
    pub async fn get_domain(&self, name: &str) -> Result<Domain> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListDnsDomains {
                name: name.to_string(),
            },
        )
        .await?;

        match res.into_iter().next() {
            Some(item) => Ok(self.domain_from_api(serde_json::from_value(item)?)),
            None => Err(Error::ResourceNotFound),
        }
    }

    fn domain_from_api(&self, domain: ApiDnsDomain) -> Domain {
        Domain {
            id: domain.id,
            name: domain.name,
            client: Some(self.clone()),
        }
    }

    pub(crate) fn domain_record_from_api(
        &self,
        record: ApiDnsRecord,
        domain_id: i64,
    ) -> DomainRecord {
        DomainRecord {
            id: record.id,
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            priority: record.priority,
            ttl: record.ttl,
            domain_id,
            client: Some(self.clone()),
        }
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
struct ApiDnsDomain {
    id: i64,
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateDnsDomain {
    name: String,
}

impl Command for CreateDnsDomain {
    const NAME: &'static str = "createDnsDomain";
}

#[derive(Debug, Serialize)]
struct ListDnsDomains {
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
}

impl Command for ListDnsDomains {
    const NAME: &'static str = "listDnsDomains";
}

#[derive(Debug, Serialize)]
struct DeleteDnsDomain {
    name: String,
}

impl Command for DeleteDnsDomain {
    const NAME: &'static str = "deleteDnsDomain";
}

#[derive(Debug, Serialize)]
struct ListDnsRecords {
    domain_id: i64,
}

impl Command for ListDnsRecords {
    const NAME: &'static str = "listDnsRecords";
}

#[derive(Debug, Serialize)]
struct CreateDnsRecord {
    domain_id: i64,
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    content: String,
    priority: u32,
    ttl: u32,
}

impl Command for CreateDnsRecord {
    const NAME: &'static str = "createDnsRecord";
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_api::mock::MockBus;
    use serde_json::json;
    use std::sync::Arc;

    fn mock_client() -> (Client, Arc<MockBus>) {
        let bus = Arc::new(MockBus::new());
        (Client::with_bus(bus.clone()), bus)
    }

    #[tokio::test]
    async fn test_create_domain() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 42, "name": "example.net"})));

        let domain = client.create_domain("example.net").await.unwrap();
        assert_eq!(domain.id, 42);
        assert_eq!(domain.name, "example.net");

        assert_eq!(bus.calls()[0].0, "createDnsDomain");
    }

    #[tokio::test]
    async fn test_get_domain_not_found() {
        let (client, bus) = mock_client();
        bus.push_list(Ok(Vec::new()));

        assert!(matches!(
            client.get_domain("definitely-absent-name").await.unwrap_err(),
            Error::ResourceNotFound
        ));
    }

    #[tokio::test]
    async fn test_domain_records() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 42, "name": "example.net"})));
        bus.push_list(Ok(vec![
            json!({"id": 1, "type": "MX", "name": "", "content": "mx1.example.net", "priority": 10, "ttl": 3600}),
            json!({"id": 2, "type": "A", "name": "www", "content": "203.0.113.1", "ttl": 3600}),
        ]));

        let domain = client.create_domain("example.net").await.unwrap();
        let records = domain.records().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_type, "MX");
        assert_eq!(records[0].priority, 10);
        assert_eq!(records[1].name, "www");
        assert_eq!(records[1].domain_id, 42);

        let (command, params) = bus.calls().remove(1);
        assert_eq!(command, "listDnsRecords");
        assert_eq!(params, json!({"domain_id": 42}));
    }

    #[tokio::test]
    async fn test_add_record() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 42, "name": "example.net"})));
        bus.push_execute(Ok(json!({
            "id": 7, "type": "MX", "name": "mail", "content": "mx1.example.net",
            "priority": 10, "ttl": 1042,
        })));

        let domain = client.create_domain("example.net").await.unwrap();
        let record = domain
            .add_record("mail", "MX", "mx1.example.net", 10, 1042)
            .await
            .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.record_type, "MX");
        assert_eq!(record.ttl, 1042);
        assert_eq!(record.domain_id, 42);
    }

    #[tokio::test]
    async fn test_delete_tombstones_domain() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 42, "name": "example.net"})));
        bus.push_boolean(Ok(true));

        let mut domain = client.create_domain("example.net").await.unwrap();
        domain.delete().await.unwrap();

        assert_eq!(domain.id, 0);
        assert_eq!(domain.name, "");
        assert!(matches!(domain.delete().await.unwrap_err(), Error::AlreadyDeleted));
        assert!(matches!(domain.records().await.unwrap_err(), Error::AlreadyDeleted));
    }
}
