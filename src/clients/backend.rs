//! Client for the hosted relational backend.
//!
//! The backend exposes its tables over a PostgREST-style HTTP interface:
//! filters are query parameters (`city_id=eq.3`, `id=in.(1,2)`), errors come
//! back as a `{code, message}` body, and the "no rows" code is distinct from
//! real failures. The client performs no joins server-side beyond embedded
//! selects; enrichment joins happen in the services.

use crate::domain::{CityId, RestaurantId};
use crate::models::{City, Restaurant, VideoRef};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// PostgREST code for "JSON object requested, multiple (or no) rows returned".
const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend error {code}: {message}")]
    Api { code: String, message: String },

    #[error("row not found")]
    NotFound,

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Whether this is the recognised "no row" outcome rather than a failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Wire row of `restaurant_cuisines` with the cuisine name embedded.
#[derive(Debug, Deserialize)]
struct CuisineLinkRow {
    restaurant_id: RestaurantId,
    cuisines: Option<CuisineNameRow>,
}

#[derive(Debug, Deserialize)]
struct CuisineNameRow {
    name: String,
}

/// A cuisine association row after unwrapping the embedded name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuisineAssignment {
    pub restaurant_id: RestaurantId,
    pub tag: crate::domain::CuisineTag,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    anon_key: String,
}

impl BackendClient {
    /// Creates a client reusing a shared HTTP client for connection pooling.
    pub fn with_shared_client(
        client: Client,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .client
            .get(self.table_url(table)?)
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Maps non-success responses to the error taxonomy.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }

        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            code: String::new(),
            message: "unparseable error body".to_string(),
        });

        if body.code == NO_ROWS_CODE {
            Err(BackendError::NotFound)
        } else {
            Err(BackendError::Api {
                code: body.code,
                message: body.message,
            })
        }
    }

    fn in_list(ids: &[RestaurantId]) -> String {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("in.({joined})")
    }

    /// All cities, ordered by display name.
    pub async fn fetch_cities(&self) -> Result<Vec<City>, BackendError> {
        self.select(
            "cities",
            &[
                ("select", "*".to_string()),
                ("order", "name.asc".to_string()),
            ],
        )
        .await
    }

    /// All restaurants of a city, newest first.
    pub async fn fetch_restaurants(&self, city: CityId) -> Result<Vec<Restaurant>, BackendError> {
        self.select(
            "restaurants",
            &[
                ("select", "*".to_string()),
                ("city_id", format!("eq.{city}")),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Featured video references for a restaurant set.
    pub async fn fetch_featured_videos(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<VideoRef>, BackendError> {
        if restaurants.is_empty() {
            return Ok(Vec::new());
        }
        self.select(
            "tiktoks",
            &[
                ("select", "*".to_string()),
                ("restaurant_id", Self::in_list(restaurants)),
                ("featured", "eq.true".to_string()),
            ],
        )
        .await
    }

    /// Cuisine associations for a restaurant set, with names embedded.
    pub async fn fetch_cuisine_assignments(
        &self,
        restaurants: &[RestaurantId],
    ) -> Result<Vec<CuisineAssignment>, BackendError> {
        if restaurants.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<CuisineLinkRow> = self
            .select(
                "restaurant_cuisines",
                &[
                    ("select", "restaurant_id,cuisines(name)".to_string()),
                    ("restaurant_id", Self::in_list(restaurants)),
                ],
            )
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                r.cuisines.map(|c| CuisineAssignment {
                    restaurant_id: r.restaurant_id,
                    tag: crate::domain::CuisineTag::new(c.name),
                })
            })
            .collect())
    }

    /// Exact row count for a table, via the range header contract.
    pub async fn count_rows(&self, table: &str) -> Result<u64, BackendError> {
        let response = self
            .client
            .get(self.table_url(table)?)
            .query(&[("select", "id"), ("limit", "1")])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let response = Self::check(response).await?;
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|v| v.parse::<u64>().ok());

        total.ok_or_else(|| BackendError::Api {
            code: "range".to_string(),
            message: "missing content-range header".to_string(),
        })
    }

    /// Inserts a single row.
    pub async fn insert_row<T: serde::Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.table_url(table)?)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        Self::check(response).await.map(|_| ())
    }

    /// Deletes rows matching an equality filter on one column.
    pub async fn delete_rows(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.table_url(table)?)
            .query(&[(column, format!("eq.{}", urlencoding::encode(value)))])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        Self::check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_list_renders_postgrest_syntax() {
        let ids = vec![
            RestaurantId::new(1),
            RestaurantId::new(2),
            RestaurantId::new(9),
        ];
        assert_eq!(BackendClient::in_list(&ids), "in.(1,2,9)");
    }

    #[test]
    fn no_rows_code_maps_to_not_found() {
        let err = BackendError::NotFound;
        assert!(err.is_not_found());
        let err = BackendError::Api {
            code: "PGRST301".to_string(),
            message: "jwt expired".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let client = Client::new();
        let result = BackendClient::with_shared_client(client, "not a url", "key");
        assert!(matches!(result, Err(BackendError::InvalidUrl(_))));
    }
}
