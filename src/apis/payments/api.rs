use crate::{
    apis::{
        ensure_not_empty,
        payments::{
            model::VoidRequest, CardAuthDataResponse, CardAuthRequest, CardAuthResponse,
            CardAuthResponseRequest, CompletionRequest, ContinuationRequest, PaymentRequest,
            PaymentResponse, ReturnInstrument, ReturnRequest, UnreferencedReturnRequest,
        },
        BamboraClientInner, MerchantStamped,
    },
    Error,
};
use reqwest::Method;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Bambora payments APIs client.
#[derive(Clone, Debug)]
pub struct PaymentsApi {
    inner: Arc<BamboraClientInner>,
}

impl PaymentsApi {
    pub(crate) fn new(inner: Arc<BamboraClientInner>) -> Self {
        Self { inner }
    }

    async fn post<P, T>(&self, url: &str, payload: &P) -> Result<T, Error>
    where
        P: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        self.inner
            .send(
                Method::POST,
                url,
                self.inner.credentials.payments.as_ref(),
                Some(payload),
            )
            .await
    }

    /// Makes a payment.
    ///
    /// Payments requiring a redirection (3-D Secure v1, Interac) fail with an
    /// [`ApiErrorKind::Redirection`](crate::error::ApiErrorKind::Redirection) error
    /// carrying a [`RedirectResponse`](crate::apis::payments::RedirectResponse) body.
    #[tracing::instrument(
        name = "Make Payment",
        skip(self, payment_request),
        fields(amount = %payment_request.amount)
    )]
    pub async fn make_payment(
        &self,
        payment_request: &PaymentRequest,
    ) -> Result<PaymentResponse, Error> {
        self.post(&self.inner.environment.payments_url(), payment_request)
            .await
    }

    /// Pre-authorizes a payment. The funds are held until the pre-authorization
    /// is completed with [`complete_pre_auth`](Self::complete_pre_auth).
    #[tracing::instrument(
        name = "Pre-Authorize Payment",
        skip(self, payment_request),
        fields(amount = %payment_request.amount)
    )]
    pub async fn pre_auth(
        &self,
        payment_request: &PaymentRequest,
    ) -> Result<PaymentResponse, Error> {
        let mut payment_request = payment_request.clone();
        payment_request.payment_method.set_complete(false);

        self.post(&self.inner.environment.payments_url(), &payment_request)
            .await
    }

    /// Completes a pre-authorized payment for up to the pre-authorized amount.
    #[tracing::instrument(name = "Complete Pre-Authorization", skip(self, completion_request))]
    pub async fn complete_pre_auth(
        &self,
        payment_id: &str,
        completion_request: &CompletionRequest,
    ) -> Result<PaymentResponse, Error> {
        ensure_not_empty("payment_id", payment_id)?;

        self.post(
            &self.inner.environment.completions_url(payment_id),
            completion_request,
        )
        .await
    }

    /// Refunds a payment, partially or in full.
    #[tracing::instrument(name = "Return Payment", skip(self, return_request))]
    pub async fn return_payment(
        &self,
        payment_id: &str,
        return_request: &ReturnRequest,
    ) -> Result<PaymentResponse, Error> {
        ensure_not_empty("payment_id", payment_id)?;

        let body = MerchantStamped {
            merchant_id: self.inner.merchant_id.to_string(),
            inner: return_request,
        };

        self.post(&self.inner.environment.returns_url(payment_id), &body)
            .await
    }

    /// Refunds a card that was not charged through a previous payment,
    /// either from its details or from the track data of a card reader.
    #[tracing::instrument(name = "Unreferenced Return", skip_all)]
    pub async fn unreferenced_return(
        &self,
        return_request: &UnreferencedReturnRequest,
    ) -> Result<PaymentResponse, Error> {
        if let ReturnInstrument::Swipe(swipe) = &return_request.instrument {
            ensure_not_empty("swipe", swipe)?;
        }

        let body = MerchantStamped {
            merchant_id: self.inner.merchant_id.to_string(),
            inner: return_request,
        };

        // No payment backs this return
        self.post(&self.inner.environment.returns_url("0"), &body)
            .await
    }

    /// Voids a payment. Only possible on the same day, before settlement.
    #[tracing::instrument(name = "Void Payment", skip(self))]
    pub async fn void_payment(
        &self,
        payment_id: &str,
        amount: Decimal,
    ) -> Result<PaymentResponse, Error> {
        ensure_not_empty("payment_id", payment_id)?;

        let body = VoidRequest {
            merchant_id: self.inner.merchant_id,
            amount,
        };

        self.post(&self.inner.environment.void_url(payment_id), &body)
            .await
    }

    /// Finishes a payment after the customer came back from a redirection.
    ///
    /// `merchant_data` is the value received in the
    /// [`RedirectResponse`](crate::apis::payments::RedirectResponse) of the original payment.
    #[tracing::instrument(name = "Continue Payment", skip_all)]
    pub async fn continue_payment(
        &self,
        merchant_data: &str,
        continuation_request: &ContinuationRequest,
    ) -> Result<PaymentResponse, Error> {
        ensure_not_empty("merchant_data", merchant_data)?;

        self.post(
            &self.inner.environment.continuation_url(merchant_data),
            continuation_request,
        )
        .await
    }

    /// Starts an EMV 3-D Secure authentication of a card.
    #[tracing::instrument(name = "Card Auth Request", skip_all)]
    pub async fn card_auth_request(
        &self,
        request: &CardAuthRequest,
    ) -> Result<CardAuthResponse, Error> {
        self.post(&self.inner.environment.card_auth_request_url(), request)
            .await
    }

    /// Submits the challenge result of an EMV 3-D Secure authentication.
    #[tracing::instrument(name = "Card Auth Response", skip_all)]
    pub async fn card_auth_response(
        &self,
        request: &CardAuthResponseRequest,
    ) -> Result<CardAuthResponse, Error> {
        self.post(&self.inner.environment.card_auth_response_url(), request)
            .await
    }

    /// Gets the outcome of an EMV 3-D Secure authentication.
    #[tracing::instrument(name = "Get Card Auth Data", skip_all)]
    pub async fn get_card_auth_data(
        &self,
        session_data: &str,
    ) -> Result<CardAuthDataResponse, Error> {
        ensure_not_empty("session_data", session_data)?;

        self.inner
            .send::<(), _>(
                Method::GET,
                &self.inner.environment.card_auth_data_url(session_data),
                self.inner.credentials.payments.as_ref(),
                None,
            )
            .await
    }
}
