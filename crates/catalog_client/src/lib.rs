use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use shared::{
    domain::{Country, ExpertId, Specialist, VisaType},
    error::ErrorBody,
};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub mod mock;

/// Transport-level request timeout; there is no retry or backoff below it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("server rejected request for {context}: status {status}")]
    Server {
        context: String,
        status: StatusCode,
        body: ErrorBody,
    },
    #[error("no response received from server for {context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid response format from {context}")]
    Decode { context: String },
    #[error("{context} not found")]
    NotFound { context: String },
    #[error("invalid catalog endpoint: {0}")]
    Endpoint(String),
}

impl CatalogError {
    /// User-facing message, resolved server message first, then the legacy
    /// server error field, then the transport error text, then generic text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { body, status, .. } => body
                .user_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("server returned status {status}")),
            Self::Transport { source, .. } => source.to_string(),
            Self::Decode { context } => format!("invalid response format from {context}"),
            Self::NotFound { context } => format!("{context} not found"),
            Self::Endpoint(_) => "An error occurred".to_string(),
        }
    }
}

/// Optional filters for the generic expert listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpertSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(rename = "visaType", skip_serializing_if = "Option::is_none")]
    pub visa_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "minRating", skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

/// The remote catalog the admin core synchronizes against.
///
/// Listing records come back as raw JSON values; alias resolution and
/// defaulting happen in the admin core's normalization boundary, not here.
/// Expert listings swallow their failures into an empty roster; everything
/// else surfaces a typed [`CatalogError`].
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn list_countries(&self) -> Result<Vec<Country>, CatalogError>;
    async fn list_visa_types(&self, country: &Country) -> Result<Vec<Value>, CatalogError>;
    async fn create_visa(
        &self,
        country: &Country,
        visa: &VisaType,
    ) -> Result<Value, CatalogError>;
    async fn update_visa(
        &self,
        country: &Country,
        visa_type: &str,
        visa: &VisaType,
    ) -> Result<Value, CatalogError>;
    async fn delete_visa(&self, country: &Country, visa_type: &str) -> Result<(), CatalogError>;

    async fn list_experts(&self, search: &ExpertSearch) -> Vec<Value>;
    async fn get_expert(&self, id: &ExpertId) -> Result<Value, CatalogError>;
    async fn create_expert(&self, expert: &Specialist) -> Result<Value, CatalogError>;
    async fn update_expert(
        &self,
        id: &ExpertId,
        expert: &Specialist,
    ) -> Result<Value, CatalogError>;
    async fn delete_expert(&self, id: &ExpertId) -> Result<(), CatalogError>;
    async fn list_experts_by_country(&self, country: &Country) -> Vec<Value>;
    async fn list_experts_by_visa_type(&self, visa_type: &str) -> Vec<Value>;
    async fn list_experts_by_country_and_visa(
        &self,
        country: &Country,
        visa_type: &str,
    ) -> Vec<Value>;
}

/// HTTP implementation of [`RemoteCatalog`] over the admin gateway.
pub struct HttpRemoteCatalog {
    http: Client,
    base_url: Url,
}

impl HttpRemoteCatalog {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(base_url).map_err(|_| CatalogError::Endpoint(base_url.to_string()))?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| CatalogError::Transport {
                context: "building http client".to_string(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| CatalogError::Endpoint(self.base_url.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send_checked(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Response, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                context: context.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                context: context.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            return Err(CatalogError::Server {
                context: context.to_string(),
                status,
                body,
            });
        }
        Ok(response)
    }

    async fn read_json(response: Response, context: &str) -> Result<Value, CatalogError> {
        response
            .json::<Value>()
            .await
            .map_err(|_| CatalogError::Decode {
                context: context.to_string(),
            })
    }

    /// Extracts the array under `key` from an enveloped list body; anything
    /// else is a decode failure, matching the gateway's documented shape.
    fn enveloped_list(body: &Value, key: &str, context: &str) -> Result<Vec<Value>, CatalogError> {
        body.get(key)
            .and_then(Value::as_array)
            .map(|items| items.to_vec())
            .ok_or_else(|| CatalogError::Decode {
                context: context.to_string(),
            })
    }

    /// Expert endpoints answer with either a bare array or `{"experts": [...]}`.
    fn expert_list(body: Value, context: &str) -> Result<Vec<Value>, CatalogError> {
        match body {
            Value::Array(items) => Ok(items),
            other => Self::enveloped_list(&other, "experts", context),
        }
    }

    async fn fetch_expert_list(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Vec<Value>, CatalogError> {
        let response = self.send_checked(request, context).await?;
        let body = Self::read_json(response, context).await?;
        Self::expert_list(body, context)
    }

    /// Expert listings degrade to an empty roster instead of failing; the
    /// admin core decides whether mock data stands in for the empty result.
    async fn swallow_expert_list(&self, request: RequestBuilder, context: &str) -> Vec<Value> {
        match self.fetch_expert_list(request, context).await {
            Ok(items) => items,
            Err(err) => {
                warn!(context, error = %err, "expert listing failed; returning empty roster");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl RemoteCatalog for HttpRemoteCatalog {
    async fn list_countries(&self) -> Result<Vec<Country>, CatalogError> {
        let context = "countries";
        let url = self.endpoint(&["countries"])?;
        let response = self.send_checked(self.http.get(url), context).await?;
        let body = Self::read_json(response, context).await?;
        let items = Self::enveloped_list(&body, "countries", context)?;
        Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(Country::from)
            .collect())
    }

    async fn list_visa_types(&self, country: &Country) -> Result<Vec<Value>, CatalogError> {
        let context = format!("visa types for {country}");
        let url = self.endpoint(&["visas", country.as_str()])?;
        let response = self.send_checked(self.http.get(url), &context).await?;
        let body = Self::read_json(response, &context).await?;
        Self::enveloped_list(&body, "visa_types", &context)
    }

    async fn create_visa(
        &self,
        country: &Country,
        visa: &VisaType,
    ) -> Result<Value, CatalogError> {
        let context = format!("creating visa for {country}");
        let url = self.endpoint(&["visas", country.as_str()])?;
        let response = self
            .send_checked(self.http.post(url).json(visa), &context)
            .await?;
        Self::read_json(response, &context).await
    }

    async fn update_visa(
        &self,
        country: &Country,
        visa_type: &str,
        visa: &VisaType,
    ) -> Result<Value, CatalogError> {
        let context = format!("updating visa {visa_type} for {country}");
        let url = self.endpoint(&["visas", country.as_str(), visa_type])?;
        let response = self
            .send_checked(self.http.put(url).json(visa), &context)
            .await?;
        Self::read_json(response, &context).await
    }

    async fn delete_visa(&self, country: &Country, visa_type: &str) -> Result<(), CatalogError> {
        let context = format!("deleting visa {visa_type} for {country}");
        let url = self.endpoint(&["visas", country.as_str(), visa_type])?;
        self.send_checked(self.http.delete(url), &context).await?;
        Ok(())
    }

    async fn list_experts(&self, search: &ExpertSearch) -> Vec<Value> {
        let context = "experts";
        let url = match self.endpoint(&["experts"]) {
            Ok(url) => url,
            Err(err) => {
                warn!(context, error = %err, "expert listing failed; returning empty roster");
                return Vec::new();
            }
        };
        self.swallow_expert_list(self.http.get(url).query(search), context)
            .await
    }

    async fn get_expert(&self, id: &ExpertId) -> Result<Value, CatalogError> {
        let context = format!("expert {id}");
        let url = self.endpoint(&["experts", id.as_str()])?;
        let response = self.send_checked(self.http.get(url), &context).await?;
        Self::read_json(response, &context).await
    }

    async fn create_expert(&self, expert: &Specialist) -> Result<Value, CatalogError> {
        let context = format!("creating expert {}", expert.name);
        let url = self.endpoint(&["experts"])?;
        let response = self
            .send_checked(self.http.post(url).json(expert), &context)
            .await?;
        Self::read_json(response, &context).await
    }

    async fn update_expert(
        &self,
        id: &ExpertId,
        expert: &Specialist,
    ) -> Result<Value, CatalogError> {
        let context = format!("updating expert {id}");
        let url = self.endpoint(&["experts", id.as_str()])?;
        let response = self
            .send_checked(self.http.put(url).json(expert), &context)
            .await?;
        Self::read_json(response, &context).await
    }

    async fn delete_expert(&self, id: &ExpertId) -> Result<(), CatalogError> {
        let context = format!("deleting expert {id}");
        let url = self.endpoint(&["experts", id.as_str()])?;
        self.send_checked(self.http.delete(url), &context).await?;
        Ok(())
    }

    async fn list_experts_by_country(&self, country: &Country) -> Vec<Value> {
        let context = format!("experts for {country}");
        let url = match self.endpoint(&["experts", "country", country.as_str()]) {
            Ok(url) => url,
            Err(err) => {
                warn!(context = %context, error = %err, "expert listing failed; returning empty roster");
                return Vec::new();
            }
        };
        self.swallow_expert_list(self.http.get(url), &context).await
    }

    async fn list_experts_by_visa_type(&self, visa_type: &str) -> Vec<Value> {
        let context = format!("experts for visa type {visa_type}");
        let url = match self.endpoint(&["experts", "visa", visa_type]) {
            Ok(url) => url,
            Err(err) => {
                warn!(context = %context, error = %err, "expert listing failed; returning empty roster");
                return Vec::new();
            }
        };
        self.swallow_expert_list(self.http.get(url), &context).await
    }

    async fn list_experts_by_country_and_visa(
        &self,
        country: &Country,
        visa_type: &str,
    ) -> Vec<Value> {
        let context = format!("experts for {country} visa type {visa_type}");
        let url = match self.endpoint(&["experts", "country", country.as_str(), "visa", visa_type])
        {
            Ok(url) => url,
            Err(err) => {
                warn!(context = %context, error = %err, "expert listing failed; returning empty roster");
                return Vec::new();
            }
        };
        self.swallow_expert_list(self.http.get(url), &context).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
