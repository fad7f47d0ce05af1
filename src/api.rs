use std::marker::PhantomData;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::ApiConfig;
use crate::constants::ERR_IMPORT_MEMBERS;
use crate::error::ApiError;
use crate::import::{BatchImportFailure, BatchImportResponse, ImportReport, MemberPayload};
use crate::provider::CollectionSource;

/// REST resources and the parent scope their collections are fetched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Expenses,
    Events,
    Services,
    Presences,
    Members,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Expenses => "expenses",
            Resource::Events => "events",
            Resource::Services => "services",
            Resource::Presences => "presences",
            Resource::Members => "users",
        }
    }

    pub fn scope_segment(&self) -> &'static str {
        match self {
            Resource::Presences => "service",
            _ => "church",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

impl Reply {
    fn into_status_error(self) -> ApiError {
        let message = serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| String::from_utf8_lossy(&self.body).trim().to_string());
        ApiError::Status {
            status: self.status.as_u16(),
            message,
        }
    }
}

/// API client for the church administration backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Reply, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(Reply { status, body })
    }

    async fn send_json<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R, ApiError> {
        let reply = self.send(builder).await?;
        if !reply.status.is_success() {
            return Err(reply.into_status_error());
        }
        Ok(serde_json::from_slice(&reply.body)?)
    }

    /// Fetches the collection of `resource` bounded to `scope_id`.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: Resource,
        scope_id: &str,
    ) -> Result<Vec<T>, ApiError> {
        let scope_id = scope_id.trim();
        if scope_id.is_empty() {
            return Err(ApiError::MissingScope);
        }
        let path = format!(
            "{}/{}/{}",
            resource.path(),
            resource.scope_segment(),
            scope_id
        );
        tracing::debug!(%path, "fetching collection");

        let body: CollectionBody<T> = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(match body {
            CollectionBody::Bare(items) | CollectionBody::Wrapped { data: items } => items,
        })
    }

    pub async fn create<P, R>(&self, resource: Resource, payload: &P) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let created = self
            .send_json(self.request(Method::POST, resource.path()).json(payload))
            .await?;
        tracing::info!(resource = resource.path(), "record created");
        Ok(created)
    }

    pub async fn update<P, R>(&self, resource: Resource, id: &str, payload: &P) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let path = format!("{}/{}", resource.path(), id);
        let updated = self
            .send_json(self.request(Method::PUT, &path).json(payload))
            .await?;
        tracing::info!(resource = resource.path(), %id, "record updated");
        Ok(updated)
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", resource.path(), id);
        let reply = self.send(self.request(Method::DELETE, &path)).await?;
        if !reply.status.is_success() {
            return Err(reply.into_status_error());
        }
        tracing::info!(resource = resource.path(), %id, "record deleted");
        Ok(())
    }

    /// Sends imported members in one batch. A rejection that lists per-row
    /// errors is a partial failure and comes back as `Ok`; a reply flagged
    /// `success: false` is an error whatever its status.
    pub async fn import_members(&self, members: &[MemberPayload]) -> Result<ImportReport, ApiError> {
        let path = format!("{}/import", Resource::Members.path());
        let reply = self
            .send(self.request(Method::POST, &path).json(members))
            .await?;

        if reply.status.is_success() {
            let response: BatchImportResponse = serde_json::from_slice(&reply.body)?;
            if !response.success {
                tracing::warn!(
                    inserted = response.inserted_count,
                    "member import reported failure"
                );
                return Err(ApiError::Status {
                    status: reply.status.as_u16(),
                    message: ERR_IMPORT_MEMBERS.to_string(),
                });
            }
            tracing::info!(inserted = response.inserted_count, "members imported");
            return Ok(response.into());
        }

        match serde_json::from_slice::<BatchImportFailure>(&reply.body) {
            Ok(failure) if !failure.errors.is_empty() => {
                tracing::warn!(
                    inserted = failure.inserted_count,
                    rejected = failure.errors.len(),
                    "member import partially failed"
                );
                Ok(failure.into())
            }
            _ => Err(reply.into_status_error()),
        }
    }

    /// A collection source bound to one resource, for `RemoteCollection`.
    pub fn source<T>(&self, resource: Resource) -> ResourceSource<T> {
        ResourceSource {
            client: self.clone(),
            resource,
            _marker: PhantomData,
        }
    }
}

pub struct ResourceSource<T> {
    client: ApiClient,
    resource: Resource,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionSource<T> for ResourceSource<T>
where
    T: DeserializeOwned + Send,
{
    async fn fetch(&self, scope_id: &str) -> Result<Vec<T>, ApiError> {
        self.client.fetch_collection(self.resource, scope_id).await
    }
}
