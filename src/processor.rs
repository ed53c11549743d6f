//! Request execution and error classification pipeline.

use crate::{
    auth::AuthCredential,
    error::{ApiError, ErrorPayload},
    executor::CommandExecutor,
    request::RequestDescriptor,
    Error,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Builds, executes and classifies requests to Bambora APIs.
///
/// Holds no per-call state: a single processor can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct TransactionProcessor {
    executor: Arc<dyn CommandExecutor>,
}

impl TransactionProcessor {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Sends one request and returns the raw body of a successful (`2xx`) response.
    ///
    /// Any other status is turned into an [`Error::Api`] whose kind depends on the status code.
    /// Transport failures are returned as [`Error::Communication`], and requests that cannot
    /// be built fail with [`Error::Configuration`] before reaching the executor.
    #[tracing::instrument(
        name = "Process Transaction",
        level = "debug",
        skip(self, credential, payload)
    )]
    pub async fn process<P>(
        &self,
        method: Method,
        url: &str,
        credential: Option<&AuthCredential>,
        sub_merchant_id: Option<&str>,
        payload: Option<&P>,
    ) -> Result<String, Error>
    where
        P: Serialize + ?Sized,
    {
        let request =
            RequestDescriptor::assemble(method, url, credential, sub_merchant_id, payload)?;

        let result = self.executor.execute(request).await?;

        if result.is_success() {
            return Ok(result.body.unwrap_or_default());
        }

        tracing::debug!("Failed HTTP request. Status code: {}", result.status);

        let payload = ErrorPayload::parse_or_default(result.body.as_deref());
        Err(ApiError::classify(result.status, &payload, result.body).into())
    }

    /// Same as [`process`](Self::process), deserializing the successful response body.
    pub async fn process_json<P, T>(
        &self,
        method: Method,
        url: &str,
        credential: Option<&AuthCredential>,
        sub_merchant_id: Option<&str>,
        payload: Option<&P>,
    ) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .process(method, url, credential, sub_merchant_id, payload)
            .await?;

        serde_json::from_str(&body).map_err(Error::Deserialization)
    }
}
