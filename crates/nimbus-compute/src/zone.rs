//! Zones

use crate::client::Client;
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};

/// A Nimbus zone. Read-only: zones are listed and looked up, never
/// mutated through this client.
#[derive(Debug, Clone, Default)]
pub struct Zone {
    pub id: String,
    pub name: String,

    #[allow(dead_code)]
    client: Option<Client>,
}

impl Client {
    /// List all available zones.
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListZones {
                id: String::new(),
                name: String::new(),
            },
        )
        .await?;

        let mut zones = Vec::with_capacity(res.len());
        for item in res {
            zones.push(self.zone_from_api(serde_json::from_value(item)?));
        }

        Ok(zones)
    }

    /// Look up a zone by name.
    pub async fn get_zone_by_name(&self, name: &str) -> Result<Zone> {
        self.get_zone("", name).await
    }

    /// Look up a zone by its unique identifier.
    pub async fn get_zone_by_id(&self, id: &str) -> Result<Zone> {
        self.get_zone(id, "").await
    }

    async fn get_zone(&self, id: &str, name: &str) -> Result<Zone> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListZones {
                id: id.to_string(),
                name: name.to_string(),
            },
        )
        .await?;

        match res.into_iter().next() {
            Some(item) => Ok(self.zone_from_api(serde_json::from_value(item)?)),
            None => Err(Error::ResourceNotFound),
        }
    }

    fn zone_from_api(&self, zone: ApiZone) -> Zone {
        Zone {
            id: zone.id,
            name: zone.name,
            client: Some(self.clone()),
        }
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
struct ApiZone {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct ListZones {
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
}

impl Command for ListZones {
    const NAME: &'static str = "listZones";
}
