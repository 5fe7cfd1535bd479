//! MongoDB aggregation backend.
//!
//! Holds one client for the lifetime of the process. The driver pools
//! connections internally, so every request shares this handle.

use super::backend::RecordBackend;
use super::pipeline::Pipeline;
use super::types::{Record, RecordDocument};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document, doc};
use mongodb::{Client, Collection};
use tracing::{debug, info};

/// Aggregation backend for a MongoDB collection.
#[derive(Clone)]
pub struct MongoBackend {
    client: Client,
    collection: Collection<Document>,
}

impl MongoBackend {
    /// Connects to `uri` and verifies the deployment answers a `ping`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is malformed or the server cannot be
    /// reached.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("Failed to reach MongoDB database '{database}'"))?;

        info!(database, collection, "Connected to MongoDB");

        Ok(Self {
            collection: db.collection(collection),
            client,
        })
    }
}

#[async_trait]
impl RecordBackend for MongoBackend {
    async fn aggregate(&self, pipeline: &Pipeline) -> Result<Vec<Record>> {
        let mut cursor = self
            .collection
            .aggregate(pipeline.stages())
            .await
            .context("MongoDB aggregate failed")?;

        let mut records = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .context("Failed to read aggregation cursor")?
        {
            let raw: RecordDocument =
                bson::from_document(document).context("Failed to decode record document")?;
            records.push(Record::try_from(raw)?);
        }

        debug!(matched = records.len(), "MongoDB aggregation finished");
        Ok(records)
    }

    async fn shutdown(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
        Ok(())
    }
}
