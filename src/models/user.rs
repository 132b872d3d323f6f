use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted user record. Created once per successful request;
/// never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, dob: NaiveDate, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            dob,
            email,
            created_at: Utc::now(),
        }
    }
}
