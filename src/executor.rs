//! Execution of prepared requests against the network.

use crate::{request::RequestDescriptor, Error};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt::{Debug, Formatter};

/// Raw outcome of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// HTTP status code.
    pub status: u16,
    /// Full response body.
    pub body: Option<String>,
}

impl CommandResult {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    /// Returns `true` if the status code is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one network round trip for a prepared request.
///
/// Implementations must:
/// - perform exactly one exchange per call, without retrying;
/// - always read the full response body, whatever the status code;
/// - return [`Error::Communication`] when the exchange could not be completed at all.
///
/// This is the seam used to replace the network with a test double.
#[async_trait]
pub trait CommandExecutor: Send + Sync + Debug {
    async fn execute(&self, request: RequestDescriptor) -> Result<CommandResult, Error>;
}

/// [`CommandExecutor`] sending requests over HTTP with a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpCommandExecutor {
    client: ClientWithMiddleware,
}

impl HttpCommandExecutor {
    /// Wraps a long-lived client. The client is expected not to follow redirects,
    /// otherwise `302` responses never reach the caller.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

impl Debug for HttpCommandExecutor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCommandExecutor").finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandExecutor for HttpCommandExecutor {
    async fn execute(&self, request: RequestDescriptor) -> Result<CommandResult, Error> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!("HTTP exchange failed: {}", e);
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Communication(e.into()))?;

        Ok(CommandResult {
            status,
            body: Some(body),
        })
    }
}
