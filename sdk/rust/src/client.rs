use reqwest::{header, Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: u64,
    pub model: String,
    pub name: String,
    pub price: Decimal,
}

/// Body for create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub model: String,
    pub name: String,
    pub price: Decimal,
}

/// Query parameters for listing.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub model: Option<String>,
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub start: Option<usize>,
    pub max: Option<usize>,
}

impl ListFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(model) = &self.model {
            pairs.push(("model", model.clone()));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(start) = self.start {
            pairs.push(("start", start.to_string()));
        }
        if let Some(max) = self.max {
            pairs.push(("max", max.to_string()));
        }
        pairs
    }
}

/// Outcome of a (possibly conditional) fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Car { car: Car, etag: Option<String> },
    NotModified,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status returned by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct CarsClient {
    client: Client,
    base_url: String,
}

impl CarsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self.client.get(format!("{}/health", self.base_url)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Car>, ClientError> {
        let resp = self
            .client
            .get(format!("{}/cars", self.base_url))
            .query(&filter.query_pairs())
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn count(&self) -> Result<u64, ClientError> {
        let resp = self
            .client
            .get(format!("{}/cars/count", self.base_url))
            .send()
            .await?;
        let text = check(resp).await?.text().await?;
        text.trim().parse().map_err(|_| ClientError::Api {
            status: 200,
            message: format!("unexpected count body {:?}", text),
        })
    }

    /// Fetch a car, sending `etag` as `If-None-Match` when given.
    pub async fn get(&self, id: u64, etag: Option<&str>) -> Result<Fetched, ClientError> {
        let mut req = self.client.get(format!("{}/cars/{}", self.base_url, id));
        if let Some(tag) = etag {
            req = req.header(header::IF_NONE_MATCH, tag);
        }
        let resp = req.send().await?;
        if resp.status() == StatusCode::NOT_MODIFIED {
            return Ok(Fetched::NotModified);
        }

        let resp = check(resp).await?;
        let etag = resp
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let car = resp.json().await?;
        Ok(Fetched::Car { car, etag })
    }

    /// Create a car. Returns the new id when the service reports one.
    pub async fn create(&self, car: &NewCar) -> Result<Option<u64>, ClientError> {
        let resp = self
            .client
            .post(format!("{}/cars", self.base_url))
            .json(car)
            .send()
            .await?;
        let resp = check(resp).await?;
        let id = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|loc| loc.rsplit('/').next())
            .and_then(|id| id.parse().ok());
        Ok(id)
    }

    pub async fn update(&self, id: u64, car: &NewCar) -> Result<(), ClientError> {
        let resp = self
            .client
            .put(format!("{}/cars/{}", self.base_url, id))
            .json(car)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Delete a car as `user`.
    pub async fn delete(&self, id: u64, user: Option<&str>) -> Result<(), ClientError> {
        let mut req = self.client.delete(format!("{}/cars/{}", self.base_url, id));
        if let Some(user) = user {
            req = req.header("user", user);
        }
        check(req.send().await?).await?;
        Ok(())
    }
}

/// Turn non-success responses into `ClientError::Api`.
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
