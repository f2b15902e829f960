//! Cat breed validation.
//!
//! The remote catalog is TheCatAPI breed list by default. Names match
//! case-insensitively.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

/// Default URL of the remote breed list.
pub const DEFAULT_BREEDS_URL: &str = "https://api.thecatapi.com/v1/breeds";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of valid breed names.
#[derive(Debug, Clone)]
pub enum BreedCatalog {
    /// Fetch the list from a remote JSON endpoint on every check.
    Remote(RemoteBreeds),
    /// A fixed, in-process list.
    Fixed(Vec<String>),
    /// Accept any non-empty breed.
    Disabled,
}

impl BreedCatalog {
    pub fn remote(url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self::Remote(RemoteBreeds::new(url)?))
    }

    pub fn fixed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fixed(names.into_iter().map(Into::into).collect())
    }

    /// Check that `breed` names a known breed.
    pub async fn validate(&self, breed: &str) -> ServiceResult<()> {
        let breed = breed.trim();
        if breed.is_empty() {
            return Err(ServiceError::validation("cat breed cannot be empty"));
        }

        let known = match self {
            Self::Disabled => return Ok(()),
            Self::Fixed(names) => contains_breed(names.iter().map(String::as_str), breed),
            Self::Remote(remote) => {
                let names = remote.fetch().await?;
                contains_breed(names.iter().map(String::as_str), breed)
            }
        };

        if known {
            Ok(())
        } else {
            tracing::debug!("Rejected unknown breed {:?}", breed);
            Err(ServiceError::validation(format!("invalid cat breed: {breed}")))
        }
    }
}

fn contains_breed<'a>(mut names: impl Iterator<Item = &'a str>, breed: &str) -> bool {
    names.any(|name| name.eq_ignore_ascii_case(breed))
}

/// HTTP client for a remote breed list shaped like `[{"name": "..."}]`.
#[derive(Debug, Clone)]
pub struct RemoteBreeds {
    url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct BreedEntry {
    name: String,
}

impl RemoteBreeds {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> ServiceResult<Vec<String>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ServiceError::BreedLookup(format!("could not reach {}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::BreedLookup(format!(
                "{} responded with status {}",
                self.url, status
            )));
        }

        let entries: Vec<BreedEntry> = response
            .json()
            .await
            .map_err(|e| ServiceError::BreedLookup(format!("could not decode breed data: {e}")))?;

        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }
}
