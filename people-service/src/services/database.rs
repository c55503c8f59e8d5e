use crate::error::PersonError;
use crate::models::{PersonDocument, PersonId};
use crate::services::store::{PersonFilter, PersonStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

pub const COLLECTION: &str = "people";

const PING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Connects with Stable API v1 and pings the deployment; a deployment that
    /// does not answer within ten seconds is a startup failure.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        let mongo = Self { client, db };

        tokio::time::timeout(PING_TIMEOUT, mongo.health_check())
            .await
            .map_err(|_| {
                tracing::error!("MongoDB ping timed out after {:?}", PING_TIMEOUT);
                AppError::DatabaseError(anyhow::anyhow!(
                    "MongoDB ping timed out after {:?}",
                    PING_TIMEOUT
                ))
            })??;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn people(&self) -> Collection<PersonDocument> {
        self.db.collection(COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    /// Closes pooled connections once outstanding operations finish.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl PersonStore for MongoDb {
    async fn find_all(&self) -> Result<Vec<PersonDocument>, PersonError> {
        let cursor = self.people().find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, filter: &PersonFilter) -> Result<Option<PersonDocument>, PersonError> {
        Ok(self.people().find_one(filter.to_document(), None).await?)
    }

    async fn insert(&self, person: &PersonDocument) -> Result<PersonId, PersonError> {
        let result = self.people().insert_one(person, None).await?;
        result
            .inserted_id
            .as_object_id()
            .map(PersonId::from)
            .ok_or_else(|| {
                PersonError::Store(anyhow::anyhow!(
                    "store assigned a non-ObjectId id: {}",
                    result.inserted_id
                ))
            })
    }

    async fn update_one(
        &self,
        filter: &PersonFilter,
        person: &PersonDocument,
    ) -> Result<u64, PersonError> {
        let result = self
            .people()
            .update_one(filter.to_document(), person.replacement(), None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, filter: &PersonFilter) -> Result<u64, PersonError> {
        let result = self.people().delete_one(filter.to_document(), None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), PersonError> {
        self.health_check().await.map_err(|e| PersonError::Store(e.into()))
    }
}
