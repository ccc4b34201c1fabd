// src/client/service.rs
use std::time::Duration;

use log::debug;
use reqwest::header::COOKIE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{ClientError, Result};
use crate::api::types::{AckResponse, CheckRequest, CheckResult, ErrorResponse, GenerationResult, HistoryResponse};
use crate::api::utils::SESSION_COOKIE;
use crate::models::{GenerationRequest, HistoryEntry};

/// The remote half of the contract: the operations the controller needs from
/// the password service
#[allow(async_fn_in_trait)]
pub trait PasswordService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;
    async fn check(&self, password: &str) -> Result<CheckResult>;
    async fn history(&self) -> Result<Vec<HistoryEntry>>;
    async fn clear_history(&self) -> Result<()>;
}

/// `PasswordService` over HTTP with JSON bodies
#[derive(Debug, Clone)]
pub struct HttpPasswordService {
    client: Client,
    base_url: String,
    session_id: String,
}

impl HttpPasswordService {
    pub fn new(base_url: &str, session_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id: session_id.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(COOKIE, format!("{}={}", SESSION_COOKIE, self.session_id))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("⬅️ {} {}", status.as_u16(), response.url().path());

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
            };
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl PasswordService for HttpPasswordService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.send(self.request(Method::POST, "/generate").json(request)).await
    }

    async fn check(&self, password: &str) -> Result<CheckResult> {
        let body = CheckRequest {
            password: password.to_string(),
        };
        self.send(self.request(Method::POST, "/check").json(&body)).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let response: HistoryResponse = self.send(self.request(Method::GET, "/history")).await?;
        Ok(response.history)
    }

    async fn clear_history(&self) -> Result<()> {
        let ack: AckResponse = self.send(self.request(Method::POST, "/clear-history")).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ClientError::Server {
                status: 200,
                message: "Server did not acknowledge the history clear".to_string(),
            })
        }
    }
}
