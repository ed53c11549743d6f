//! Rust client for the [Bambora North America](https://www.bambora.com/) payment APIs.
//!
//! Check out also the official Bambora [API documentation](https://dev.na.bambora.com/docs/).
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Sign up for a Bambora sandbox account. From the merchant portal, note your merchant id and
//! generate one API passcode for each API you want to use (payments, profiles, reporting).
//!
//! ## Initialize a new `BamboraClient`
//!
//! Create a new [`BamboraClient`](crate::client::BamboraClient) and provide your merchant id
//! and passcodes.
//!
//! ```rust,no_run
//! # use bambora_rust::{BamboraClient, Error};
//! # fn main() -> Result<(), Error> {
//! let bambora = BamboraClient::builder(300200578)
//!     .with_payments_passcode("4BaD82D9197b4cc4b70a221911eE9f70")
//!     .with_profiles_passcode("D97D3BE1EE964A6193D17A571D9FBC80")
//!     .with_reporting_passcode("4e6Ff318bee64EA391609de89aD4CF5d")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! By default, a `BamboraClient` connects to `https://api.na.bambora.com` using version `v1`
//! of the APIs. To connect elsewhere, use
//! [`with_environment`](crate::client::BamboraClientBuilder::with_environment).
//!
//! ## Make a payment
//!
//! ```rust,no_run
//! # use bambora_rust::{BamboraClient, Error, apis::payments::*};
//! # use rust_decimal::Decimal;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let bambora: BamboraClient = unreachable!();
//! #
//! let payment_request = PaymentRequestBuilder::default()
//!     .amount(Decimal::new(1050, 2))
//!     .order_number("order-1234")
//!     .payment_method(PaymentMethod::Card {
//!         card: CardBuilder::default()
//!             .name("John Doe")
//!             .number("5100000010001004")
//!             .expiry_month("12")
//!             .expiry_year("30")
//!             .cvd("123")
//!             .build()
//!             .unwrap(),
//!     })
//!     .build()
//!     .unwrap();
//!
//! let res = bambora.payments.make_payment(&payment_request).await?;
//!
//! println!("Payment {} approved: {}", res.id, res.is_approved());
//! # Ok(())
//! # }
//! ```
//!
//! ## Handle errors
//!
//! Every non-success answer is returned as an [`Error::Api`](crate::error::Error::Api),
//! classified by its status code:
//!
//! ```rust,no_run
//! # use bambora_rust::{BamboraClient, Error, error::ApiErrorKind, apis::payments::*};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let bambora: BamboraClient = unreachable!();
//! # let payment_request: PaymentRequest = unreachable!();
//! #
//! match bambora.payments.make_payment(&payment_request).await {
//!     Ok(res) => println!("Approved: {}", res.is_approved()),
//!     Err(e) if e.api_error_kind() == Some(ApiErrorKind::BusinessRule) => {
//!         println!("Declined: {}", e)
//!     }
//!     Err(e) if e.api_error_kind() == Some(ApiErrorKind::Redirection) => {
//!         let redirect: RedirectResponse = e.as_api_error().unwrap().deserialize_body()?;
//!         println!("Redirect the customer, merchant data {}", redirect.merchant_data)
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! To run an example, use `cargo run` like this:
//!
//! ```shell
//! cargo run --example make_payment
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod auth;
pub mod client;
mod common;
pub mod error;
pub mod executor;
mod middlewares;
pub mod processor;
pub mod request;

pub use client::BamboraClient;
pub use error::Error;
