use crate::{
    apis::{
        ensure_not_empty,
        payments::{Card, Token},
        profiles::{
            model::{CardWrapper, ProfileCardsResponse, TokenWrapper, UpdateProfileRequest},
            CreateProfileRequest, PaymentProfile, ProfileInstrument, ProfileResponse,
            TokenRequest, TokenResponse,
        },
        BamboraClientInner,
    },
    auth::AuthCredential,
    Error,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Bambora payment profiles APIs client.
#[derive(Clone, Debug)]
pub struct ProfilesApi {
    inner: Arc<BamboraClientInner>,
}

impl ProfilesApi {
    pub(crate) fn new(inner: Arc<BamboraClientInner>) -> Self {
        Self { inner }
    }

    fn credential(&self) -> Option<&AuthCredential> {
        self.inner.credentials.profiles.as_ref()
    }

    async fn send<P, T>(&self, method: Method, url: &str, payload: Option<&P>) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.inner
            .send(method, url, self.credential(), payload)
            .await
    }

    /// Exchanges card details for a single-use token, usable in place of the card
    /// for one payment or to create a profile.
    ///
    /// The tokenization endpoint does not need a passcode: the request is sent unauthenticated.
    #[tracing::instrument(name = "Create Token", skip_all)]
    pub async fn create_token(&self, token_request: &TokenRequest) -> Result<TokenResponse, Error> {
        ensure_not_empty("number", &token_request.number)?;
        ensure_not_empty("expiry_month", &token_request.expiry_month)?;
        ensure_not_empty("expiry_year", &token_request.expiry_year)?;
        ensure_not_empty("cvd", &token_request.cvd)?;

        self.inner
            .send(
                Method::POST,
                &self.inner.environment.tokens_url(),
                None,
                Some(token_request),
            )
            .await
    }

    /// Creates a payment profile from a card or a single-use token.
    #[tracing::instrument(name = "Create Profile", skip_all)]
    pub async fn create_profile(
        &self,
        request: &CreateProfileRequest,
    ) -> Result<ProfileResponse, Error> {
        match &request.instrument {
            ProfileInstrument::Card(card) => {
                ensure_not_empty("card.number", card.number.as_deref().unwrap_or_default())?;
                ensure_not_empty("card.name", card.name.as_deref().unwrap_or_default())?;
                ensure_not_empty(
                    "card.expiry_month",
                    card.expiry_month.as_deref().unwrap_or_default(),
                )?;
                ensure_not_empty(
                    "card.expiry_year",
                    card.expiry_year.as_deref().unwrap_or_default(),
                )?;
            }
            ProfileInstrument::Token(token) => {
                ensure_not_empty("token.name", &token.name)?;
                ensure_not_empty("token.code", &token.code)?;
            }
        }

        self.send(Method::POST, &self.inner.environment.profiles_url(), Some(request))
            .await
    }

    /// Gets a payment profile.
    #[tracing::instrument(name = "Get Profile", skip(self))]
    pub async fn get_profile(&self, profile_id: &str) -> Result<PaymentProfile, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        let mut profile: PaymentProfile = self
            .send::<(), _>(
                Method::GET,
                &self.inner.environment.profile_url(profile_id),
                None,
            )
            .await?;
        profile.id = profile_id.to_string();

        Ok(profile)
    }

    /// Updates the billing address, custom fields, language and comment of a profile.
    #[tracing::instrument(name = "Update Profile", skip_all, fields(profile_id = %profile.id))]
    pub async fn update_profile(&self, profile: &PaymentProfile) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile.id", &profile.id)?;

        let body = UpdateProfileRequest {
            billing: profile.billing.as_ref(),
            custom: profile.custom.as_ref(),
            language: profile.language.as_deref(),
            comment: profile.comment.as_deref(),
        };

        self.send(
            Method::PUT,
            &self.inner.environment.profile_url(&profile.id),
            Some(&body),
        )
        .await
    }

    /// Deletes a payment profile.
    #[tracing::instrument(name = "Delete Profile", skip(self))]
    pub async fn delete_profile(&self, profile_id: &str) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        self.send::<(), _>(
            Method::DELETE,
            &self.inner.environment.profile_url(profile_id),
            None,
        )
        .await
    }

    /// Lists the cards of a profile.
    #[tracing::instrument(name = "Get Cards", skip(self))]
    pub async fn get_cards(&self, profile_id: &str) -> Result<Vec<Card>, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        let res: ProfileCardsResponse = self
            .send::<(), _>(
                Method::GET,
                &self.inner.environment.cards_url(profile_id),
                None,
            )
            .await?;

        Ok(res.cards.unwrap_or_default())
    }

    /// Gets a card of a profile. Card ids start from `1`.
    ///
    /// If the profile holds no such card, `None` is returned.
    #[tracing::instrument(name = "Get Card", skip(self))]
    pub async fn get_card(&self, profile_id: &str, card_id: u32) -> Result<Option<Card>, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        let res: ProfileCardsResponse = self
            .send::<(), _>(
                Method::GET,
                &self.inner.environment.card_url(profile_id, card_id),
                None,
            )
            .await?;

        Ok(res.cards.and_then(|cards| cards.into_iter().next()))
    }

    /// Adds a card to a profile.
    #[tracing::instrument(name = "Add Card", skip(self, card))]
    pub async fn add_card(&self, profile_id: &str, card: &Card) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        self.send(
            Method::POST,
            &self.inner.environment.cards_url(profile_id),
            Some(&CardWrapper { card }),
        )
        .await
    }

    /// Adds a card to a profile from a single-use token.
    #[tracing::instrument(name = "Add Token", skip(self, token))]
    pub async fn add_token(
        &self,
        profile_id: &str,
        token: &Token,
    ) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        self.send(
            Method::POST,
            &self.inner.environment.cards_url(profile_id),
            Some(&TokenWrapper { token }),
        )
        .await
    }

    /// Updates a card of a profile, identified by its `card_id`.
    ///
    /// Masked card numbers, as returned by [`get_card`](Self::get_card), are not sent back.
    #[tracing::instrument(name = "Update Card", skip(self, card))]
    pub async fn update_card(
        &self,
        profile_id: &str,
        card: &Card,
    ) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile_id", profile_id)?;
        let card_id = card
            .card_id
            .ok_or_else(|| Error::Configuration("card.card_id must be set".to_string()))?;

        let mut card = card.clone();
        if card.number.as_deref().map_or(false, |n| n.contains('X')) {
            card.number = None;
        }

        self.send(
            Method::PUT,
            &self.inner.environment.card_url(profile_id, card_id),
            Some(&CardWrapper { card: &card }),
        )
        .await
    }

    /// Removes a card from a profile.
    #[tracing::instrument(name = "Remove Card", skip(self))]
    pub async fn remove_card(
        &self,
        profile_id: &str,
        card_id: u32,
    ) -> Result<ProfileResponse, Error> {
        ensure_not_empty("profile_id", profile_id)?;

        self.send::<(), _>(
            Method::DELETE,
            &self.inner.environment.card_url(profile_id, card_id),
            None,
        )
        .await
    }
}
