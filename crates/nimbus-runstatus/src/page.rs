//! Status pages

use crate::client::Client;
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};

/// A public status page, addressed by its subdomain.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub id: i64,
    pub subdomain: String,
    pub title: String,

    client: Option<Client>,
}

impl Page {
    /// Delete the status page, tombstoning the value on success.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        client
            .boolean(&DeletePage {
                subdomain: self.subdomain.clone(),
            })
            .await?;

        *self = Self::default();

        Ok(())
    }
}

impl Client {
    /// Create a new status page.
    pub async fn create_page(&self, subdomain: &str, title: &str) -> Result<Page> {
        tracing::debug!(subdomain, "creating status page");

        let res = nimbus_api::execute(
            &*self.bus,
            &CreatePage {
                subdomain: subdomain.to_string(),
                title: title.to_string(),
            },
        )
        .await?;

        Ok(self.page_from_api(serde_json::from_value(res)?))
    }

    /// List all status pages.
    pub async fn list_pages(&self) -> Result<Vec<Page>> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListPages {
                subdomain: String::new(),
            },
        )
        .await?;

        let mut pages = Vec::with_capacity(res.len());
        for item in res {
            pages.push(self.page_from_api(serde_json::from_value(item)?));
        }

        Ok(pages)
    }

    /// Look up a status page by subdomain.
    pub async fn get_page(&self, subdomain: &str) -> Result<Page> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListPages {
                subdomain: subdomain.to_string(),
            },
        )
        .await?;

        match res.into_iter().next() {
            Some(item) => Ok(self.page_from_api(serde_json::from_value(item)?)),
            None => Err(Error::ResourceNotFound),
        }
    }

    fn page_from_api(&self, page: ApiPage) -> Page {
        Page {
            id: page.id,
            subdomain: page.subdomain,
            title: page.title,
            client: Some(self.clone()),
        }
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
struct ApiPage {
    id: i64,
    subdomain: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Serialize)]
struct CreatePage {
    subdomain: String,
    title: String,
}

impl Command for CreatePage {
    const NAME: &'static str = "createPage";
}

#[derive(Debug, Serialize)]
struct ListPages {
    #[serde(skip_serializing_if = "String::is_empty")]
    subdomain: String,
}

impl Command for ListPages {
    const NAME: &'static str = "listPages";
}

#[derive(Debug, Serialize)]
struct DeletePage {
    subdomain: String,
}

impl Command for DeletePage {
    const NAME: &'static str = "deletePage";
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
    async fn test_create_page() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 1, "subdomain": "acme", "title": "ACME status"})));

        let page = client.create_page("acme", "ACME status").await.unwrap();
        assert_eq!(page.id, 1);
        assert_eq!(page.subdomain, "acme");

        assert_eq!(bus.calls()[0].0, "createPage");
    }

    #[tokio::test]
    async fn test_list_pages_empty() {
        let (client, bus) = mock_client();
        bus.push_list(Ok(Vec::new()));

        assert!(client.list_pages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_page_not_found() {
        let (client, bus) = mock_client();
        bus.push_list(Ok(Vec::new()));

        assert!(matches!(
            client.get_page("definitely-absent-name").await.unwrap_err(),
            Error::ResourceNotFound
        ));
    }

    #[tokio::test]
    async fn test_delete_tombstones_page() {
        let (client, bus) = mock_client();
        bus.push_execute(Ok(json!({"id": 1, "subdomain": "acme", "title": "ACME status"})));
        bus.push_boolean(Ok(true));

        let mut page = client.create_page("acme", "ACME status").await.unwrap();
        page.delete().await.unwrap();

        assert_eq!(page.id, 0);
        assert_eq!(page.subdomain, "");
        assert_eq!(page.title, "");
        assert!(matches!(page.delete().await.unwrap_err(), Error::AlreadyDeleted));
    }
}
