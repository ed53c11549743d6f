use chrono::NaiveDateTime;
use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
pub struct PaymentRequest {
    #[builder(setter(into))]
    pub amount: Decimal,
    #[serde(flatten)]
    pub payment_method: PaymentMethod,
    #[builder(default, setter(into, strip_option))]
    pub order_number: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub language: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub customer_ip: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub term_url: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub comments: Option<String>,
    #[builder(default, setter(strip_option))]
    pub billing: Option<Address>,
    #[builder(default, setter(strip_option))]
    pub shipping: Option<Address>,
    #[builder(default, setter(strip_option))]
    pub custom: Option<CustomFields>,
}

/// Instrument used to pay, serialized next to its `payment_method` discriminator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card {
        card: Card,
    },
    Token {
        token: Token,
    },
    PaymentProfile {
        payment_profile: PaymentProfileField,
    },
    ApplePay {
        apple_pay: ApplePayField,
    },
    AndroidPay {
        android_pay: AndroidPayField,
    },
    #[serde(rename = "3d_secure_token")]
    ThreeDSecureToken {
        #[serde(rename = "3d_secure_token")]
        three_d_secure_token: ThreeDSTokenField,
    },
    Cash,
    Cheque,
    Interac,
}

impl PaymentMethod {
    /// Marks the instrument as a pre-authorization. Has no effect on cash, cheque and Interac.
    pub(crate) fn set_complete(&mut self, complete: bool) {
        let flag = match self {
            PaymentMethod::Card { card } => &mut card.complete,
            PaymentMethod::Token { token } => &mut token.complete,
            PaymentMethod::PaymentProfile { payment_profile } => &mut payment_profile.complete,
            PaymentMethod::ApplePay { apple_pay } => &mut apple_pay.complete,
            PaymentMethod::AndroidPay { android_pay } => &mut android_pay.complete,
            PaymentMethod::ThreeDSecureToken {
                three_d_secure_token,
            } => &mut three_d_secure_token.complete,
            PaymentMethod::Cash | PaymentMethod::Cheque | PaymentMethod::Interac => return,
        };

        *flag = Some(complete);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct Card {
    pub name: Option<String>,
    pub number: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub cvd: Option<String>,
    pub complete: Option<bool>,
    pub function: Option<String>,
    pub card_type: Option<String>,
    pub card_id: Option<u32>,
    pub last_four: Option<String>,
    pub avs_result: Option<String>,
    pub cvd_result: Option<String>,
    pub cavv_result: Option<String>,
    #[serde(rename = "3d_secure")]
    pub three_d_secure: Option<ThreeDSData>,
}

/// Single-use token returned by
/// [`ProfilesApi::create_token`](crate::apis::profiles::ProfilesApi::create_token).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub code: String,
    pub complete: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaymentProfileField {
    pub customer_code: String,
    /// Index of the card in the profile, starting from `1`.
    pub card_id: u32,
    pub complete: Option<bool>,
    #[serde(rename = "3d_secure")]
    pub three_d_secure: Option<ThreeDSData>,
}

impl PaymentProfileField {
    /// Pays with the first card of a profile.
    pub fn new(customer_code: impl Into<String>) -> Self {
        Self {
            customer_code: customer_code.into(),
            card_id: 1,
            complete: None,
            three_d_secure: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApplePayField {
    pub apple_pay_merchant_id: String,
    pub payment_token: String,
    pub complete: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AndroidPayField {
    pub android_pay_merchant_id: String,
    pub payment_token: String,
    pub complete: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ThreeDSTokenField {
    #[serde(rename = "threeDS_session_data")]
    pub three_ds_session_data: String,
    pub complete: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreeDSData {
    pub version: Option<u8>,
    pub auth_required: Option<bool>,
    pub enabled: Option<bool>,
    pub browser: Option<BrowserData>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserData {
    pub accept_header: Option<String>,
    pub ip_address: Option<String>,
    pub java_enabled: Option<bool>,
    pub javascript_enabled: Option<bool>,
    pub language: Option<String>,
    pub color_depth: Option<u32>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    /// Offset from UTC, in minutes.
    pub time_zone: Option<i32>,
    pub user_agent: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct Address {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
}

/// Free-form merchant references attached to a transaction or profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFields {
    pub ref1: Option<String>,
    pub ref2: Option<String>,
    pub ref3: Option<String>,
    pub ref4: Option<String>,
    pub ref5: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub amount: Decimal,
    pub order_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReturnRequest {
    pub amount: Decimal,
    pub order_number: Option<String>,
}

/// Refund not linked to an existing payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnreferencedReturnRequest {
    pub amount: Decimal,
    pub order_number: Option<String>,
    #[serde(flatten)]
    pub instrument: ReturnInstrument,
}

/// Card credited by an unreferenced return.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReturnInstrument {
    Card(Card),
    /// Raw track data read by a card reader.
    Swipe(String),
}

#[derive(Serialize, Debug)]
pub(crate) struct VoidRequest {
    pub(crate) merchant_id: u32,
    pub(crate) amount: Decimal,
}

/// Result of a redirect-based flow, sent back to finish the payment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "payment_method", rename_all = "snake_case")]
pub enum ContinuationRequest {
    CreditCard { card_response: CardResponse },
    Interac { interac_response: InteracRedirectResponse },
}

/// Answer of the card issuer to a 3-D Secure v1 challenge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardResponse {
    pub pa_res: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InteracRedirectResponse {
    pub funded: bool,
    pub idebit_track2: Option<String>,
    pub idebit_isslang: Option<String>,
    pub idebit_version: Option<String>,
    pub idebit_issconf: Option<String>,
    pub idebit_issname: Option<String>,
    pub idebit_amount: Option<String>,
    pub idebit_invoice: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentResponse {
    pub id: String,
    #[serde(default)]
    pub authorizing_merchant_id: Option<u32>,
    /// `"1"` if approved.
    pub approved: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub auth_code: Option<String>,
    #[serde(default)]
    pub created: Option<NaiveDateTime>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub risk_score: Option<Decimal>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub custom: Option<CustomFields>,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl PaymentResponse {
    pub fn is_approved(&self) -> bool {
        self.approved == "1"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: String,
}

/// Body of a `302` answer to a payment that needs the customer to be redirected
/// (3-D Secure v1 or Interac). Read it with
/// [`ApiError::deserialize_body`](crate::error::ApiError::deserialize_body).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub merchant_data: String,
    #[serde(default)]
    pub contents: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardData {
    pub number: String,
    pub expiry: CardExpiryData,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardExpiryData {
    pub year: String,
    pub month: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDataEx {
    pub bin: Option<String>,
    pub last_four: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
}

/// Starts an EMV 3-D Secure authentication.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
pub struct CardAuthRequest {
    pub browser: BrowserData,
    #[builder(setter(into))]
    pub redirect_url: String,
    #[builder(setter(into))]
    pub amount: Decimal,
    #[builder(default, setter(strip_option))]
    pub card: Option<CardData>,
    #[builder(default, setter(strip_option))]
    pub payment_profile: Option<PaymentProfileField>,
    #[builder(default, setter(into, strip_option))]
    pub token: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub reference: Option<String>,
}

/// Forwards the challenge result (`cres`) of an EMV 3-D Secure authentication.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardAuthResponseRequest {
    #[serde(rename = "threeDS_session_data")]
    pub three_ds_session_data: String,
    pub cres: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardAuthResponse {
    #[serde(default, rename = "threeDS_session_data")]
    pub three_ds_session_data: Option<String>,
    #[serde(default)]
    pub redirection: Option<RedirectionData>,
    #[serde(default)]
    pub authorization: Option<AuthorizationData>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub response_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RedirectionData {
    pub url: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationData {
    pub eci: Option<String>,
    pub cavv: Option<String>,
    pub xid: Option<String>,
    pub ds_transaction_id: Option<String>,
    pub protocol_version: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardAuthDataResponse {
    #[serde(default, rename = "threeDS_session_data")]
    pub three_ds_session_data: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub card: Option<CardDataEx>,
    #[serde(default)]
    pub flow_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub authorization: Option<AuthorizationData>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_datetime_utc: Option<String>,
}
