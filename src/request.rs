//! Assembly of transport-ready requests.

use crate::{auth::AuthCredential, common::SUB_MERCHANT_ID_HEADER, Error};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, Url,
};
use serde::Serialize;
use serde_json::Value;

/// A request ready to be handed to a [`CommandExecutor`](crate::executor::CommandExecutor).
///
/// Immutable once assembled.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestDescriptor {
    /// Builds a new request.
    ///
    /// - The `Authorization` header is attached only if a credential is given.
    /// - The `Sub-Merchant-Id` header is attached only if the id is present and non-empty.
    /// - The payload, if any, is serialized to indented JSON with all `null` members removed.
    ///
    /// Fails with [`Error::Configuration`] if `url` is not an absolute `http(s)` URL.
    pub fn assemble<P>(
        method: Method,
        url: &str,
        credential: Option<&AuthCredential>,
        sub_merchant_id: Option<&str>,
        payload: Option<&P>,
    ) -> Result<Self, Error>
    where
        P: Serialize + ?Sized,
    {
        let url = parse_url(url)?;
        let mut headers = HeaderMap::new();

        // Some requests are sent without authorization
        if let Some(credential) = credential {
            headers.insert(AUTHORIZATION, credential.authorization_header()?);
        }

        if let Some(sub_merchant_id) = sub_merchant_id.filter(|id| !id.is_empty()) {
            let header_value = HeaderValue::from_str(sub_merchant_id).map_err(|_| {
                Error::Configuration(format!("Invalid sub-merchant id: {:?}", sub_merchant_id))
            })?;
            headers.insert(SUB_MERCHANT_ID_HEADER, header_value);
        }

        let body = payload.map(serialize_payload).transpose()?;
        if body.is_some() {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            );
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, if the request carries a payload.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Method, Url, HeaderMap, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}

fn parse_url(url: &str) -> Result<Url, Error> {
    let parsed =
        Url::parse(url).map_err(|e| Error::Configuration(format!("Invalid URL {}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::Configuration(format!(
            "Invalid URL {}: unsupported scheme {}",
            url, scheme
        ))),
    }
}

/// Serializes a payload to indented JSON, omitting every `null` object member.
fn serialize_payload<P>(payload: &P) -> Result<String, Error>
where
    P: Serialize + ?Sized,
{
    let mut value = serde_json::to_value(payload).map_err(Error::Serialization)?;
    strip_nulls(&mut value);
    serde_json::to_string_pretty(&value).map_err(Error::Serialization)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
