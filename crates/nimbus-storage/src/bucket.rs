//! Storage buckets

use crate::client::Client;
use nimbus_api::{Command, Error, Result};
use serde::{Deserialize, Serialize};

/// An object storage bucket.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub name: String,
    pub zone: String,

    client: Option<Client>,
}

impl Bucket {
    /// Delete the bucket, tombstoning the value on success. The bucket
    /// must already be empty; the API refuses to delete a non-empty one.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::AlreadyDeleted)?;

        client
            .boolean(&DeleteBucket {
                name: self.name.clone(),
            })
            .await?;

        *self = Self::default();

        Ok(())
    }
}

impl Client {
    /// Create a new bucket in this client's zone.
    pub async fn create_bucket(&self, name: &str) -> Result<Bucket> {
        tracing::debug!(name, zone = %self.zone, "creating bucket");

        let res = nimbus_api::execute(
            &*self.bus,
            &CreateBucket {
                name: name.to_string(),
                zone: self.zone.clone(),
            },
        )
        .await?;

        Ok(self.bucket_from_api(serde_json::from_value(res)?))
    }

    /// List all buckets.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>> {
        let res = nimbus_api::list(&*self.bus, &ListBuckets { name: String::new() }).await?;

        let mut buckets = Vec::with_capacity(res.len());
        for item in res {
            buckets.push(self.bucket_from_api(serde_json::from_value(item)?));
        }

        Ok(buckets)
    }

    /// Look up a bucket by name.
    pub async fn get_bucket(&self, name: &str) -> Result<Bucket> {
        let res = nimbus_api::list(
            &*self.bus,
            &ListBuckets {
                name: name.to_string(),
            },
        )
        .await?;

        match res.into_iter().next() {
            Some(item) => Ok(self.bucket_from_api(serde_json::from_value(item)?)),
            None => Err(Error::ResourceNotFound),
        }
    }

    fn bucket_from_api(&self, bucket: ApiBucket) -> Bucket {
        Bucket {
            name: bucket.name,
            zone: if bucket.zone.is_empty() {
                self.zone.clone()
            } else {
                bucket.zone
            },
            client: Some(self.clone()),
        }
    }
}

// ============ Wire types ============

#[derive(Debug, Deserialize)]
struct ApiBucket {
    name: String,
    #[serde(default)]
    zone: String,
}

#[derive(Debug, Serialize)]
struct CreateBucket {
    name: String,
    zone: String,
}

impl Command for CreateBucket {
    const NAME: &'static str = "createBucket";
}

#[derive(Debug, Serialize)]
struct ListBuckets {
    #[serde(skip_serializing_if = "String::is_empty")]
    name: String,
}

impl Command for ListBuckets {
    const NAME: &'static str = "listBuckets";
}

#[derive(Debug, Serialize)]
struct DeleteBucket {
    name: String,
}

impl Command for DeleteBucket {
    const NAME: &'static str = "deleteBucket";
}
