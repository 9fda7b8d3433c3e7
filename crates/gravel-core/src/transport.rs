//! Request/response transport for Bot API calls.
//!
//! [`Transport`] owns the contract: encode the payload, perform one round-trip
//! through an [`HttpBackend`], and classify the HTTP-level result. Backends
//! only move bytes.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;

use crate::{errors::Error, Result};

/// The only status code treated as success.
pub const STATUS_OK: u16 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A fully formed outbound request. `body` is already-encoded JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

/// Status plus the complete response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Port for a single HTTP round-trip.
///
/// Implementations must read the whole body before returning, and report
/// connection, timeout, DNS and body-read failures as [`Error::Transport`].
/// They must not interpret the status code.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

#[derive(Clone)]
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    log_traffic: bool,
}

impl Transport {
    pub fn new(backend: Arc<dyn HttpBackend>, log_traffic: bool) -> Self {
        Self {
            backend,
            log_traffic,
        }
    }

    pub async fn get(&self, label: &str, url: String) -> Result<Vec<u8>> {
        self.execute(label, Method::Get, url, None).await
    }

    /// Encode `payload` as JSON and POST it.
    pub async fn post<P>(&self, label: &str, url: String, payload: &P) -> Result<Vec<u8>>
    where
        P: Serialize + ?Sized,
    {
        let body = match serde_json::to_vec(payload) {
            Ok(b) => b,
            Err(e) => {
                if self.log_traffic {
                    tracing::error!(method = label, error = %e, "failed to encode payload");
                }
                return Err(Error::Encoding(e));
            }
        };
        self.execute(label, Method::Post, url, Some(body)).await
    }

    /// Perform one request and return the raw body of a `200` response.
    ///
    /// `label` names the Bot API method in log lines; the URL itself embeds the
    /// bot token and is never logged.
    pub async fn execute(
        &self,
        label: &str,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        if self.log_traffic {
            match &body {
                Some(b) => tracing::info!(
                    method = label,
                    http = %method,
                    payload = %String::from_utf8_lossy(b),
                    "sending request"
                ),
                None => tracing::info!(method = label, http = %method, "sending request"),
            }
        }

        let resp = match self.backend.send(HttpRequest { method, url, body }).await {
            Ok(r) => r,
            Err(e) => {
                if self.log_traffic {
                    tracing::error!(method = label, error = %e, "request failed");
                }
                return Err(e);
            }
        };

        if resp.status != STATUS_OK {
            let body = String::from_utf8_lossy(&resp.body).into_owned();
            if self.log_traffic {
                tracing::error!(method = label, status = resp.status, body = %body, "unexpected status code");
            }
            return Err(Error::UnexpectedStatus {
                status: resp.status,
                body,
            });
        }

        if self.log_traffic {
            tracing::info!(
                method = label,
                status = resp.status,
                body = %String::from_utf8_lossy(&resp.body),
                "received response"
            );
        }

        Ok(resp.body)
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("log_traffic", &self.log_traffic)
            .finish_non_exhaustive()
    }
}
