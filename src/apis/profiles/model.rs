use crate::apis::payments::{Address, Card, CustomFields, Token};
use serde::{Deserialize, Serialize};

/// Card details exchanged for a single-use token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvd: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Instrument stored in a new payment profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfileInstrument {
    Card(Card),
    Token(Token),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileRequest {
    #[serde(flatten)]
    pub instrument: ProfileInstrument,
    pub billing: Option<Address>,
    pub custom: Option<CustomFields>,
    pub language: Option<String>,
    pub comment: Option<String>,
}

impl CreateProfileRequest {
    pub fn new(instrument: ProfileInstrument) -> Self {
        Self {
            instrument,
            billing: None,
            custom: None,
            language: None,
            comment: None,
        }
    }

    pub fn with_billing(mut self, billing: Address) -> Self {
        self.billing = Some(billing);
        self
    }
}

/// Outcome of a write operation on payment profiles.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub customer_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentProfile {
    /// Profile identifier, the `customer_code` it was created with.
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub customer_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub billing: Option<Address>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub card: Option<Card>,
}

#[derive(Serialize, Debug)]
pub(crate) struct UpdateProfileRequest<'a> {
    pub(crate) billing: Option<&'a Address>,
    pub(crate) custom: Option<&'a CustomFields>,
    pub(crate) language: Option<&'a str>,
    pub(crate) comment: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ProfileCardsResponse {
    #[serde(default, rename = "card")]
    pub(crate) cards: Option<Vec<Card>>,
}

#[derive(Serialize, Debug)]
pub(crate) struct CardWrapper<'a> {
    pub(crate) card: &'a Card,
}

#[derive(Serialize, Debug)]
pub(crate) struct TokenWrapper<'a> {
    pub(crate) token: &'a Token,
}
