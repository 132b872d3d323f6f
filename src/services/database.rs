//! Database operations for the numerology service.
//!
//! Wraps the MongoDB client and owns the `users` collection.

use chrono::NaiveDate;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};

use crate::error::AppError;
use crate::models::User;

#[derive(Clone)]
pub struct NumerologyDb {
    client: MongoClient,
    db: Database,
}

impl NumerologyDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        let users = self.users();

        // Non-unique: two identical signups create two distinct records.
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().name("email_idx".to_string()).build())
            .build();

        users.create_index(email_index, None).await.map_err(|e| {
            tracing::error!("Failed to create email index: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_idx".to_string())
                    .build(),
            )
            .build();

        users
            .create_index(created_at_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create created_at index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(())
    }

    /// Parse the date of birth and persist one new user record.
    ///
    /// The date must render as an ISO calendar date; a parse failure fails
    /// the request before anything is written.
    pub async fn create_user(&self, name: &str, dob: &str, email: &str) -> Result<User, AppError> {
        let dob = parse_dob(dob)?;
        let user = User::new(name.to_string(), dob, email.to_string());

        self.users().insert_one(&user, None).await.map_err(|e| {
            tracing::error!("Failed to insert user record: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        Ok(user)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }
}

fn parse_dob(dob: &str) -> Result<NaiveDate, AppError> {
    dob.parse::<NaiveDate>().map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("invalid date of birth {:?}: {}", dob, e))
    })
}
