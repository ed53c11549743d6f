//! APIs and models related to payments, returns, voids and 3-D Secure authentication.

mod api;
mod model;

pub use api::PaymentsApi;
pub use model::*;
