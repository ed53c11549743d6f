//! APIs and models related to payment profiles, their cards and single-use tokens.

mod api;
mod model;

pub use api::ProfilesApi;
pub use model::*;
