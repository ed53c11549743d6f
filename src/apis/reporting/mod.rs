//! APIs and models related to transaction reports.

mod api;
mod model;

pub use api::ReportingApi;
pub use model::*;
