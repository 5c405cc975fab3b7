//! HTTP client for the container-infra endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use coecreds_core::{
    CertificateAuthority, Cluster, ClusterCertificate, ClusterId, ClusterLookup, ClusterTemplate,
    ClusterTemplateId, RemoteError,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::wire::{CertificateResponse, CreateCertificateRequest, ErrorResponse};

const AUTH_TOKEN_HEADER: &str = "x-auth-token";
const API_VERSION_HEADER: &str = "openstack-api-version";

/// Client for the cluster, cluster template and certificate endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ContainerInfraClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl ContainerInfraClient {
    /// Create a new client.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot hold a path".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.auth_token {
            let mut value = HeaderValue::from_str(token)
                .map_err(|_| ClientError::InvalidHeader(AUTH_TOKEN_HEADER))?;
            value.set_sensitive(true);
            headers.insert(AUTH_TOKEN_HEADER, value);
        }
        if let Some(version) = &config.api_version {
            let value = HeaderValue::from_str(&format!("container-infra {}", version))
                .map_err(|_| ClientError::InvalidHeader(API_VERSION_HEADER))?;
            headers.insert(API_VERSION_HEADER, value);
        }

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { inner, base_url })
    }

    /// Resolve `segments` below the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET the resource at `segments` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, RemoteError> {
        let url = self.url(segments);
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        decode(response, url.path()).await
    }

    /// POST `body` as JSON to `segments` and decode the JSON response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, RemoteError> {
        let url = self.url(segments);
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        decode(response, url.path()).await
    }
}

/// Decode a successful response, or map an error response onto `RemoteError`.
async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = error_from_status(status, &body, path);
        warn!(path = %path, status = status.as_u16(), error = %error, "Request failed");
        return Err(error);
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    serde_json::from_slice(&body).map_err(|e| RemoteError::Decode(format!("{}: {}", path, e)))
}

fn error_from_status(status: StatusCode, body: &str, path: &str) -> RemoteError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                format!("{} returned {}", path, status)
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized(message),
        StatusCode::CONFLICT => RemoteError::InvalidState(message),
        other => RemoteError::Api {
            status: other.as_u16(),
            message,
        },
    }
}

fn into_certificate(response: CertificateResponse) -> Result<ClusterCertificate, RemoteError> {
    ClusterCertificate::from_pem(response.cluster_uuid, &response.pem)
}

#[async_trait]
impl ClusterLookup for ContainerInfraClient {
    async fn get_cluster(&self, id: &ClusterId) -> Result<Cluster, RemoteError> {
        self.get_json(&["clusters", id.as_str()]).await
    }

    async fn get_cluster_template(
        &self,
        id: &ClusterTemplateId,
    ) -> Result<ClusterTemplate, RemoteError> {
        self.get_json(&["clustertemplates", id.as_str()]).await
    }
}

#[async_trait]
impl CertificateAuthority for ContainerInfraClient {
    async fn submit_csr(
        &self,
        cluster_id: &ClusterId,
        csr_pem: &str,
    ) -> Result<ClusterCertificate, RemoteError> {
        let request = CreateCertificateRequest {
            cluster_uuid: cluster_id.as_str(),
            csr: csr_pem,
        };
        let response: CertificateResponse = self.post_json(&["certificates"], &request).await?;
        into_certificate(response)
    }

    async fn fetch_ca_certificate(
        &self,
        cluster_id: &ClusterId,
    ) -> Result<ClusterCertificate, RemoteError> {
        let response: CertificateResponse = self
            .get_json(&["certificates", cluster_id.as_str()])
            .await?;
        into_certificate(response)
    }
}
