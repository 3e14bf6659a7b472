//! HTTP transport for GraphQL requests
//!
//! Plain operations are posted as JSON. File uploads use the GraphQL
//! multipart request convention: an `operations` part with the file variable
//! set to null, a `map` part pointing at it, and the file itself.

use crate::error::{TransportError, ValidationError};
use crate::product::PendingFile;
use crate::{ClientConfig, Result};
use log::{debug, trace};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Response envelope shared by every GraphQL operation
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Serialize)]
struct Operation<'a, V: Serialize> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Debug, Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQlClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(ValidationError::missing_field("client.api_url").into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            token: config.auth_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self) -> RequestBuilder {
        let request = self.client.post(&self.endpoint);
        match &self.token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Run an operation and return its `data` object
    pub async fn execute<V: Serialize + Sync>(&self, query: &str, variables: &V) -> Result<Value> {
        trace!("GraphQL request to {}: {query}", self.endpoint);
        let response = self
            .request()
            .json(&Operation { query, variables })
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Run an operation whose `file` variable is uploaded as a multipart part
    pub async fn upload(&self, query: &str, file: &PendingFile) -> Result<Value> {
        debug!(
            "Uploading {} ({} bytes) to {}",
            file.file_name,
            file.content.len(),
            self.endpoint
        );

        let operations = json!({ "query": query, "variables": { "file": null } });
        let map = json!({ "0": ["variables.file"] });

        let mut part = Part::bytes(file.content.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new()
            .text("operations", operations.to_string())
            .text("map", map.to_string())
            .part("0", part);

        let response = self.request().multipart(form).send().await?;
        Self::handle_response(response).await
    }

    /// Run an operation and deserialize one top-level field of its data
    pub async fn execute_field<V, T>(&self, query: &str, variables: &V, field: &str) -> Result<T>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let data = self.execute(query, variables).await?;
        take_field(data, field)
    }

    async fn handle_response(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TransportError::server_error(status.as_u16(), &text).into());
        }

        let envelope: Envelope = response.json().await?;
        if !envelope.errors.is_empty() {
            let messages = envelope
                .errors
                .into_iter()
                .map(|error| error.message)
                .collect();
            return Err(TransportError::graphql(messages).into());
        }

        envelope
            .data
            .ok_or_else(|| TransportError::decode("response has no data").into())
    }
}

/// Deserialize `data[field]`
pub fn take_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| TransportError::decode(format!("response is missing '{field}'")))?;
    Ok(serde_json::from_value(value)?)
}
