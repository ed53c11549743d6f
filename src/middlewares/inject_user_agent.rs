use crate::Error;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, USER_AGENT},
    Request, Response,
};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Product token of this crate, `bambora-rust/<version>`.
const PRODUCT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Middleware stamping every outgoing request with a `User-Agent` header.
///
/// The header starts with `bambora-rust/<version>`, optionally followed by the
/// product token of the application using the crate (e.g. `my-shop/2.1`).
#[derive(Debug, Clone)]
pub struct InjectUserAgentMiddleware {
    user_agent: HeaderValue,
}

impl InjectUserAgentMiddleware {
    pub fn new() -> Self {
        Self {
            user_agent: HeaderValue::from_static(PRODUCT),
        }
    }

    /// Appends `application` after the crate's own product token.
    ///
    /// A blank `application` leaves the header untouched. Characters that are not
    /// allowed in a header value yield [`Error::Configuration`].
    pub fn with_application(application: &str) -> Result<Self, Error> {
        let application = application.trim();
        if application.is_empty() {
            return Ok(Self::new());
        }

        let user_agent = HeaderValue::from_str(&format!("{} {}", PRODUCT, application))
            .map_err(|_| {
                Error::Configuration(format!("Invalid User-Agent product: {:?}", application))
            })?;

        Ok(Self { user_agent })
    }
}

impl Default for InjectUserAgentMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for InjectUserAgentMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.headers_mut().insert(USER_AGENT, self.user_agent.clone());
        next.run(req, extensions).await
    }
}
