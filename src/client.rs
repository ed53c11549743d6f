//! Module containing the main Bambora API client.

use crate::{
    apis::{
        payments::PaymentsApi, profiles::ProfilesApi, reporting::ReportingApi, ApiCredentials,
        BamboraClientInner,
    },
    auth::{AuthCredential, Passcode},
    common::{DEFAULT_API_VERSION, DEFAULT_PLATFORM, DEFAULT_TIMEOUT_SECS, FALLBACK_PLATFORM},
    executor::{CommandExecutor, HttpCommandExecutor},
    middlewares::inject_user_agent::InjectUserAgentMiddleware,
    processor::TransactionProcessor,
    Error,
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::{DefaultSpanBackend, TracingMiddleware};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use urlencoding::encode;

/// Client for Bambora North America public APIs.
#[derive(Debug, Clone)]
pub struct BamboraClient {
    /// Payments APIs client.
    pub payments: PaymentsApi,
    /// Payment profiles APIs client.
    pub profiles: ProfilesApi,
    /// Reporting APIs client.
    pub reporting: ReportingApi,
}

impl BamboraClient {
    /// Returns a new builder to configure a new [`BamboraClient`](crate::client::BamboraClient).
    pub fn builder(merchant_id: u32) -> BamboraClientBuilder {
        BamboraClientBuilder::new(merchant_id)
    }

    /// Builds a new [`BamboraClient`](crate::client::BamboraClient) from a settings record.
    pub fn from_configuration(configuration: &Configuration) -> Result<BamboraClient, Error> {
        let environment = Environment::live(&configuration.platform)?
            .with_version(&configuration.version);

        let mut builder = BamboraClientBuilder::new(configuration.merchant_id)
            .with_environment(environment);

        if let Some(sub_merchant_id) = configuration.sub_merchant_id {
            builder = builder.with_sub_merchant_id(sub_merchant_id);
        }
        if let Some(passcode) = &configuration.payments_passcode {
            builder = builder.with_payments_passcode(passcode.clone());
        }
        if let Some(passcode) = &configuration.profiles_passcode {
            builder = builder.with_profiles_passcode(passcode.clone());
        }
        if let Some(passcode) = &configuration.reporting_passcode {
            builder = builder.with_reporting_passcode(passcode.clone());
        }

        builder.build()
    }
}

/// Settings needed to connect to Bambora.
///
/// Can be loaded from any `serde` source, for example with the `config` crate:
///
/// ```toml
/// merchant_id = 300200578
/// payments_passcode = "4BaD82D9197b4cc4b70a221911eE9f70"
/// platform = "api.na"
/// version = "v1"
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct Configuration {
    pub merchant_id: u32,
    #[serde(default)]
    pub sub_merchant_id: Option<u32>,
    #[serde(default)]
    pub payments_passcode: Option<Passcode>,
    #[serde(default)]
    pub profiles_passcode: Option<Passcode>,
    #[serde(default)]
    pub reporting_passcode: Option<Passcode>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Builder for a [`BamboraClient`](crate::client::BamboraClient).
#[derive(Debug)]
pub struct BamboraClientBuilder {
    merchant_id: u32,
    sub_merchant_id: Option<u32>,
    payments_passcode: Option<Passcode>,
    profiles_passcode: Option<Passcode>,
    reporting_passcode: Option<Passcode>,
    environment: Environment,
    client: Option<reqwest::Client>,
    timeout: Duration,
    application: Option<String>,
    executor: Option<Arc<dyn CommandExecutor>>,
}

impl BamboraClientBuilder {
    /// Creates a new builder to configure a [`BamboraClient`](crate::client::BamboraClient).
    pub fn new(merchant_id: u32) -> Self {
        Self {
            merchant_id,
            sub_merchant_id: None,
            payments_passcode: None,
            profiles_passcode: None,
            reporting_passcode: None,
            environment: Environment::default(),
            client: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            application: None,
            executor: None,
        }
    }

    /// Consumes the builder and builds a new [`BamboraClient`](crate::client::BamboraClient).
    ///
    /// Fails with [`Error::Configuration`] if the merchant id is `0`, the application
    /// product cannot be sent as a header, or the HTTP client cannot be initialized.
    pub fn build(self) -> Result<BamboraClient, Error> {
        if self.merchant_id == 0 {
            return Err(Error::Configuration("Merchant id must be set".to_string()));
        }

        let executor = match self.executor {
            Some(executor) => executor,
            None => {
                let client = match self.client {
                    Some(client) => client,
                    None => default_http_client(self.timeout)?,
                };
                let user_agent = match &self.application {
                    Some(application) => InjectUserAgentMiddleware::with_application(application)?,
                    None => InjectUserAgentMiddleware::new(),
                };
                let client = build_client_with_middleware(client, user_agent);
                Arc::new(HttpCommandExecutor::new(client))
            }
        };

        let identity = self.merchant_id.to_string();
        let credential =
            |passcode: Option<Passcode>| passcode.map(|p| AuthCredential::new(identity.clone(), p));

        let inner = Arc::new(BamboraClientInner {
            processor: TransactionProcessor::new(executor),
            environment: self.environment,
            merchant_id: self.merchant_id,
            sub_merchant_id: self.sub_merchant_id.map(|id| id.to_string()),
            credentials: ApiCredentials {
                payments: credential(self.payments_passcode),
                profiles: credential(self.profiles_passcode),
                reporting: credential(self.reporting_passcode),
            },
        });

        Ok(BamboraClient {
            payments: PaymentsApi::new(inner.clone()),
            profiles: ProfilesApi::new(inner.clone()),
            reporting: ReportingApi::new(inner),
        })
    }

    /// Sends every request on behalf of the given sub-merchant.
    pub fn with_sub_merchant_id(mut self, sub_merchant_id: u32) -> Self {
        self.sub_merchant_id = Some(sub_merchant_id);
        self
    }

    /// Sets the passcode used by the payments APIs.
    pub fn with_payments_passcode(mut self, passcode: impl Into<Passcode>) -> Self {
        self.payments_passcode = Some(passcode.into());
        self
    }

    /// Sets the passcode used by the payment profiles APIs.
    pub fn with_profiles_passcode(mut self, passcode: impl Into<Passcode>) -> Self {
        self.profiles_passcode = Some(passcode.into());
        self
    }

    /// Sets the passcode used by the reporting APIs.
    pub fn with_reporting_passcode(mut self, passcode: impl Into<Passcode>) -> Self {
        self.reporting_passcode = Some(passcode.into());
        self
    }

    /// Sets the environment to which this client should connect.
    ///
    /// Defaults to [`Environment::default`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    ///
    /// The client should not follow redirects: `302` responses carry data the caller needs.
    /// The timeout set with [`with_timeout`](Self::with_timeout) is not applied to it.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the timeout of a whole HTTP exchange.
    ///
    /// Defaults to 100 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Identifies the calling application in the `User-Agent` header,
    /// after the crate's own `bambora-rust/<version>` token.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Replaces the network layer altogether.
    pub fn with_command_executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }
}

fn default_http_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Configuration(format!("Cannot build the HTTP client: {}", e)))
}

fn build_client_with_middleware(
    client: reqwest::Client,
    user_agent: InjectUserAgentMiddleware,
) -> ClientWithMiddleware {
    reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::<DefaultSpanBackend>::new())
        .with(user_agent)
        .build()
}

/// Bambora environment to which a [`BamboraClient`](crate::client::BamboraClient) should connect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    base_url: Url,
    version: String,
}

impl Default for Environment {
    /// Production North America platform, API `v1`.
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://api.na.bambora.com").unwrap(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Environment {
    /// Bambora platform host `https://{platform}.bambora.com`.
    ///
    /// An empty platform falls back to `www`.
    pub fn live(platform: &str) -> Result<Self, Error> {
        let platform = match platform.trim() {
            "" => FALLBACK_PLATFORM,
            p => p,
        };

        let base_url = Url::parse(&format!("https://{}.bambora.com", platform))
            .map_err(|e| Error::Configuration(format!("Invalid platform {:?}: {}", platform, e)))?;

        Ok(Self {
            base_url,
            version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Sends every request to the given base URL. Useful for mock servers and proxies.
    pub fn from_single_url(url: &Url) -> Self {
        Self {
            base_url: url.clone(),
            version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Sets the API version. A bare number like `1` becomes `v1`, an empty string means `v1`.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = match version.trim() {
            "" => DEFAULT_API_VERSION.to_string(),
            v if v.starts_with('v') => v.to_string(),
            v => format!("v{}", v),
        };
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn root(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn versioned(&self, path: &str) -> String {
        format!("{}/{}{}", self.root(), self.version, path)
    }

    pub(crate) fn payments_url(&self) -> String {
        self.versioned("/payments")
    }

    pub(crate) fn payment_url(&self, payment_id: &str) -> String {
        self.versioned(&format!("/payments/{}", encode(payment_id)))
    }

    pub(crate) fn completions_url(&self, payment_id: &str) -> String {
        self.versioned(&format!("/payments/{}/completions", encode(payment_id)))
    }

    pub(crate) fn returns_url(&self, payment_id: &str) -> String {
        self.versioned(&format!("/payments/{}/returns", encode(payment_id)))
    }

    pub(crate) fn void_url(&self, payment_id: &str) -> String {
        self.versioned(&format!("/payments/{}/void", encode(payment_id)))
    }

    pub(crate) fn continuation_url(&self, merchant_data: &str) -> String {
        self.versioned(&format!("/payments/{}/continue", encode(merchant_data)))
    }

    pub(crate) fn reports_url(&self) -> String {
        self.versioned("/reports")
    }

    pub(crate) fn profiles_url(&self) -> String {
        self.versioned("/profiles")
    }

    pub(crate) fn profile_url(&self, profile_id: &str) -> String {
        self.versioned(&format!("/profiles/{}", encode(profile_id)))
    }

    pub(crate) fn cards_url(&self, profile_id: &str) -> String {
        self.versioned(&format!("/profiles/{}/cards", encode(profile_id)))
    }

    pub(crate) fn card_url(&self, profile_id: &str, card_id: u32) -> String {
        self.versioned(&format!("/profiles/{}/cards/{}", encode(profile_id), card_id))
    }

    /// Tokenization is not versioned.
    pub(crate) fn tokens_url(&self) -> String {
        format!("{}/scripts/tokenization/tokens", self.root())
    }

    pub(crate) fn card_auth_request_url(&self) -> String {
        self.versioned("/EMV3DS/AuthRequest")
    }

    pub(crate) fn card_auth_response_url(&self) -> String {
        self.versioned("/EMV3DS/AuthResponse")
    }

    pub(crate) fn card_auth_data_url(&self, session_data: &str) -> String {
        self.versioned(&format!("/EMV3DS/{}", encode(session_data)))
    }
}
