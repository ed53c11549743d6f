//! Clients for the various Bambora APIs.

use crate::{auth::AuthCredential, client::Environment, processor::TransactionProcessor, Error};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

pub mod payments;
pub mod profiles;
pub mod reporting;

/// Credentials of each API. Calls to an API without a passcode are sent unauthenticated.
#[derive(Debug, Clone, Default)]
pub(crate) struct ApiCredentials {
    pub(crate) payments: Option<AuthCredential>,
    pub(crate) profiles: Option<AuthCredential>,
    pub(crate) reporting: Option<AuthCredential>,
}

#[derive(Debug)]
pub(crate) struct BamboraClientInner {
    pub(crate) processor: TransactionProcessor,
    pub(crate) environment: Environment,
    pub(crate) merchant_id: u32,
    pub(crate) sub_merchant_id: Option<String>,
    pub(crate) credentials: ApiCredentials,
}

impl BamboraClientInner {
    /// Sends a request on behalf of the configured (sub-)merchant and decodes the response.
    pub(crate) async fn send<P, T>(
        &self,
        method: Method,
        url: &str,
        credential: Option<&AuthCredential>,
        payload: Option<&P>,
    ) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.processor
            .process_json(
                method,
                url,
                credential,
                self.sub_merchant_id.as_deref(),
                payload,
            )
            .await
    }
}

/// Fails with [`Error::Configuration`] if a required identifier is empty.
pub(crate) fn ensure_not_empty(name: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::Configuration(format!("{} must not be empty", name)));
    }

    Ok(())
}

/// Wraps a request body with the merchant id the call is made for.
#[derive(Serialize, Debug)]
pub(crate) struct MerchantStamped<'a, T: Serialize> {
    pub(crate) merchant_id: String,
    #[serde(flatten)]
    pub(crate) inner: &'a T,
}
