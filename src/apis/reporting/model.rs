use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Search over the transactions of the merchant.
///
/// Rows are numbered from `1` and both bounds are inclusive.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    #[serde(serialize_with = "serialize_whole_seconds")]
    pub start_date: NaiveDateTime,
    #[serde(serialize_with = "serialize_whole_seconds")]
    pub end_date: NaiveDateTime,
    pub start_row: u32,
    pub end_row: u32,
    pub criteria: Vec<Criteria>,
}

impl SearchQuery {
    pub fn new(
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        start_row: u32,
        end_row: u32,
    ) -> Self {
        Self {
            start_date,
            end_date,
            start_row,
            end_row,
            criteria: Vec::new(),
        }
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria.push(criteria);
        self
    }
}

fn serialize_whole_seconds<S: Serializer>(
    date: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%dT%H:%M:%S"))
}

#[derive(Serialize, Debug)]
pub(crate) struct SearchRequest<'a> {
    pub(crate) name: &'static str,
    #[serde(flatten)]
    pub(crate) query: &'a SearchQuery,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub field: QueryField,
    pub operator: Operator,
    pub value: String,
}

impl Criteria {
    pub fn new(field: QueryField, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

/// Transaction field a [`Criteria`] applies to. Sent as its numeric identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    TransactionId,
    Amount,
    MaskedCardNumber,
    CardOwner,
    OrderNumber,
    IpAddress,
    AuthorizationCode,
    TransactionType,
    CardType,
    Response,
    BillingName,
    BillingEmail,
    BillingPhone,
    ProcessedBy,
    Ref1,
    Ref2,
    Ref3,
    Ref4,
    Ref5,
    ProductName,
    ProductId,
    CustomerCode,
    IdAdjustmentTo,
    IdAdjustedBy,
}

impl QueryField {
    pub fn id(&self) -> u8 {
        match self {
            QueryField::TransactionId => 1,
            QueryField::Amount => 2,
            QueryField::MaskedCardNumber => 3,
            QueryField::CardOwner => 4,
            QueryField::OrderNumber => 5,
            QueryField::IpAddress => 6,
            QueryField::AuthorizationCode => 7,
            QueryField::TransactionType => 8,
            QueryField::CardType => 9,
            QueryField::Response => 10,
            QueryField::BillingName => 11,
            QueryField::BillingEmail => 12,
            QueryField::BillingPhone => 13,
            QueryField::ProcessedBy => 14,
            QueryField::Ref1 => 15,
            QueryField::Ref2 => 16,
            QueryField::Ref3 => 17,
            QueryField::Ref4 => 18,
            QueryField::Ref5 => 19,
            QueryField::ProductName => 20,
            QueryField::ProductId => 21,
            QueryField::CustomerCode => 22,
            QueryField::IdAdjustmentTo => 23,
            QueryField::IdAdjustedBy => 24,
        }
    }
}

impl Serialize for QueryField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

/// Comparison operators, sent URL-encoded as the reporting API expects.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    #[serde(rename = "%3D")]
    Equals,
    #[serde(rename = "%3C")]
    LessThan,
    #[serde(rename = "%3E")]
    GreaterThan,
    #[serde(rename = "%3C%3D")]
    LessThanOrEqual,
    #[serde(rename = "%3E%3D")]
    GreaterThanOrEqual,
    #[serde(rename = "START%20WITH")]
    StartWith,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RecordsResponse {
    #[serde(default)]
    pub(crate) records: Vec<TransactionRecord>,
}

/// One row of a transaction report.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TransactionRecord {
    pub row_id: Option<u32>,
    pub trn_id: Option<u64>,
    pub trn_date_time: Option<String>,
    pub trn_type: Option<String>,
    pub trn_order_number: Option<String>,
    pub trn_payment_method: Option<String>,
    pub trn_comments: Option<String>,
    pub trn_masked_card: Option<String>,
    pub trn_amount: Option<Decimal>,
    pub trn_returns: Option<Decimal>,
    pub trn_completions: Option<Decimal>,
    pub trn_voided: Option<u8>,
    pub trn_response: Option<u8>,
    pub trn_card_type: Option<String>,
    pub trn_batch_no: Option<u64>,
    pub trn_avs_result: Option<String>,
    pub trn_cvd_result: Option<u8>,
    pub trn_card_expiry: Option<String>,
    pub message_id: Option<u32>,
    pub message_text: Option<String>,
    pub trn_card_owner: Option<String>,
    pub trn_ip: Option<String>,
    pub trn_approval_code: Option<String>,
    pub trn_reference: Option<u64>,
    pub b_name: Option<String>,
    pub b_email: Option<String>,
    pub b_phone: Option<String>,
    pub b_address1: Option<String>,
    pub b_address2: Option<String>,
    pub b_city: Option<String>,
    pub b_province: Option<String>,
    pub b_postal: Option<String>,
    pub b_country: Option<String>,
    pub ref1: Option<String>,
    pub ref2: Option<String>,
    pub ref3: Option<String>,
    pub ref4: Option<String>,
    pub ref5: Option<String>,
    pub customer_code: Option<String>,
    pub merchant_id: Option<u32>,
    pub merchant_name: Option<String>,
}
