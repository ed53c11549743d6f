//! Credentials used to authenticate against Bambora's APIs.

use crate::Error;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Authorization scheme used by every Bambora API.
pub static PASSCODE_AUTH_SCHEME: &str = "Passcode";

/// Wrapper for an API passcode that makes it harder to accidentally expose it
/// and ensures the backing memory is wiped on drop.
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret).
///
/// ```rust
/// # use bambora_rust::auth::Passcode;
/// let passcode = Passcode::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", passcode).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`
/// assert_eq!(passcode.expose_secret(), "supersecret");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Passcode(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl Passcode {
    /// Wraps a secret string in a new `Passcode`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for Passcode
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Passcode::new(s)
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}

/// Identity and secret sent in the `Authorization` header of a request.
#[derive(Clone, Debug)]
pub struct AuthCredential {
    identity: String,
    secret: Passcode,
    scheme: &'static str,
}

impl AuthCredential {
    /// Builds a credential for the `Passcode` scheme.
    pub fn new(identity: impl Into<String>, secret: impl Into<Passcode>) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
            scheme: PASSCODE_AUTH_SCHEME,
        }
    }

    /// The merchant identifier this credential authenticates.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Name of the authorization scheme.
    pub fn scheme(&self) -> &str {
        self.scheme
    }

    /// Builds the `Authorization` header value: `<scheme> <base64(identity:secret)>`.
    ///
    /// The identity and secret are joined with a colon as is, no escaping is performed.
    /// The returned value is flagged as sensitive.
    pub fn authorization_header(&self) -> Result<HeaderValue, Error> {
        let encoded = BASE64.encode(format!(
            "{}:{}",
            self.identity,
            self.secret.expose_secret()
        ));

        let mut header_value = HeaderValue::from_str(&format!("{} {}", self.scheme, encoded))
            .map_err(|_| {
                Error::Configuration(format!(
                    "Cannot build the authorization header for merchant {}",
                    self.identity
                ))
            })?;
        header_value.set_sensitive(true);

        Ok(header_value)
    }
}
