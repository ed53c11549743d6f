use crate::{
    apis::{
        ensure_not_empty,
        payments::PaymentResponse,
        reporting::{
            model::{RecordsResponse, SearchRequest},
            SearchQuery, TransactionRecord,
        },
        BamboraClientInner,
    },
    Error,
};
use reqwest::Method;
use std::sync::Arc;

/// Bambora reporting APIs client.
#[derive(Clone, Debug)]
pub struct ReportingApi {
    inner: Arc<BamboraClientInner>,
}

impl ReportingApi {
    pub(crate) fn new(inner: Arc<BamboraClientInner>) -> Self {
        Self { inner }
    }

    /// Gets the details of an existing transaction.
    #[tracing::instrument(name = "Get Transaction", skip(self))]
    pub async fn get_transaction(&self, payment_id: &str) -> Result<PaymentResponse, Error> {
        ensure_not_empty("payment_id", payment_id)?;

        self.inner
            .send::<(), _>(
                Method::GET,
                &self.inner.environment.payment_url(payment_id),
                self.inner.credentials.reporting.as_ref(),
                None,
            )
            .await
    }

    /// Searches transactions.
    ///
    /// Fails with [`Error::Configuration`] if the row window or the date range is empty.
    #[tracing::instrument(
        name = "Query Transactions",
        skip(self, query),
        fields(start_row = query.start_row, end_row = query.end_row)
    )]
    pub async fn query(&self, query: &SearchQuery) -> Result<Vec<TransactionRecord>, Error> {
        if query.start_row < 1 || query.end_row < query.start_row {
            return Err(Error::Configuration(format!(
                "Invalid row window {}..={}",
                query.start_row, query.end_row
            )));
        }
        if query.end_date < query.start_date {
            return Err(Error::Configuration(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let body = SearchRequest {
            name: "Search",
            query,
        };

        let res: RecordsResponse = self
            .inner
            .send(
                Method::POST,
                &self.inner.environment.reports_url(),
                self.inner.credentials.reporting.as_ref(),
                Some(&body),
            )
            .await?;

        Ok(res.records)
    }
}
