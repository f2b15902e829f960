use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A spy cat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cat {
    pub id: i64,
    pub name: String,
    /// Breed name as accepted by the breed catalog.
    pub breed: String,
    pub years_of_experience: i32,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for hiring a new cat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCatInput {
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default)]
    pub salary: f64,
}

/// Input for updating an existing cat. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCatInput {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub years_of_experience: Option<i32>,
    pub salary: Option<f64>,
}
