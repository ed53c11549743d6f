use crate::common::{mock_server::MockServerStorage, DECLINED_CARD_NUMBER};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::{Request, Respond, ResponseTemplate};

fn error(status: u16, code: i32, category: i32, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "code": code,
        "category": category,
        "message": message
    }))
}

fn invalid_request() -> ResponseTemplate {
    error(400, 52, 3, "Invalid request")
}

fn not_found() -> ResponseTemplate {
    error(404, 16, 3, "Resource not found")
}

fn decline() -> ResponseTemplate {
    error(402, 7, 1, "DECLINE")
}

/// Path segment at the given position, `/v1/payments/{id}` has the id at `3`.
fn path_segment(request: &Request, position: usize) -> String {
    request
        .url
        .path()
        .split('/')
        .nth(position)
        .unwrap_or_default()
        .to_string()
}

fn mask(number: &str) -> String {
    let last_four = &number[number.len().saturating_sub(4)..];
    format!("{}XXXXXXXX{}", &number[..4.min(number.len())], last_four)
}

fn now() -> String {
    Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn new_transaction(
    storage: &MockServerStorage,
    transaction_type: &str,
    amount: &Value,
    order_number: &Value,
    card_number: &str,
) -> Value {
    let mut storage = storage.write().unwrap();
    storage.next_payment_id += 1;
    let id = (10000000 + storage.next_payment_id).to_string();

    let transaction = json!({
        "id": id,
        "authorizing_merchant_id": 300200578,
        "approved": "1",
        "message_id": "1",
        "message": "Approved",
        "auth_code": "TEST",
        "created": now(),
        "order_number": order_number,
        "type": transaction_type,
        "payment_method": "CC",
        "amount": amount,
        "card": {
            "card_type": "VI",
            "last_four": &card_number[card_number.len().saturating_sub(4)..]
        },
        "links": []
    });
    storage.payments.insert(id, transaction.clone());

    transaction
}

/// POST /scripts/tokenization/tokens
pub(super) struct CreateToken(pub(super) MockServerStorage);

impl Respond for CreateToken {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return invalid_request(),
        };
        if ["number", "expiry_month", "expiry_year", "cvd"]
            .iter()
            .any(|field| body[field].as_str().unwrap_or_default().is_empty())
        {
            return invalid_request();
        }

        let token = format!("gt6-{}", Uuid::new_v4());
        self.0.write().unwrap().tokens.insert(token.clone(), body);

        ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "code": 1,
            "version": 1,
            "message": ""
        }))
    }
}

/// POST /v1/payments
pub(super) struct CreatePayment(pub(super) MockServerStorage);

impl Respond for CreatePayment {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return invalid_request(),
        };

        let payment_method = body["payment_method"].as_str().unwrap_or_default();
        let card_number = match payment_method {
            "card" => body["card"]["number"].as_str().unwrap_or_default().to_string(),
            "token" => {
                let storage = self.0.read().unwrap();
                match storage.tokens.get(body["token"]["code"].as_str().unwrap_or_default()) {
                    Some(card) => card["number"].as_str().unwrap_or_default().to_string(),
                    None => return invalid_request(),
                }
            }
            "payment_profile" => {
                let storage = self.0.read().unwrap();
                let customer_code = body["payment_profile"]["customer_code"]
                    .as_str()
                    .unwrap_or_default();
                match storage.profiles.get(customer_code) {
                    Some(profile) => profile["card"][0]["number"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string(),
                    None => return not_found(),
                }
            }
            _ => return invalid_request(),
        };

        if card_number == DECLINED_CARD_NUMBER {
            return decline();
        }

        let complete = body[payment_method]["complete"].as_bool().unwrap_or(true);
        let transaction = new_transaction(
            &self.0,
            if complete { "P" } else { "PA" },
            &body["amount"],
            &body["order_number"],
            &card_number,
        );

        ResponseTemplate::new(200).set_body_json(transaction)
    }
}

enum Adjustment {
    Completion,
    Refund,
    Void,
}

/// POST /v1/payments/{id}/completions, /v1/payments/{id}/returns and /v1/payments/{id}/void
pub(super) struct Adjust {
    storage: MockServerStorage,
    adjustment: Adjustment,
}

impl Adjust {
    pub(super) fn completion(storage: MockServerStorage) -> Self {
        Self {
            storage,
            adjustment: Adjustment::Completion,
        }
    }

    pub(super) fn refund(storage: MockServerStorage) -> Self {
        Self {
            storage,
            adjustment: Adjustment::Refund,
        }
    }

    pub(super) fn void(storage: MockServerStorage) -> Self {
        Self {
            storage,
            adjustment: Adjustment::Void,
        }
    }
}

impl Respond for Adjust {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return invalid_request(),
        };
        if body["merchant_id"].is_null() && !matches!(self.adjustment, Adjustment::Completion) {
            return invalid_request();
        }

        let payment_id = path_segment(request, 3);

        // Unreferenced returns carry the card to refund, in clear or as track data
        if payment_id == "0" {
            let number = body["card"]["number"].as_str().or_else(|| {
                body["swipe"]
                    .as_str()
                    .and_then(|swipe| swipe.trim_start_matches(';').split('=').next())
            });
            return match (&self.adjustment, number) {
                (Adjustment::Refund, Some(number)) if !number.is_empty() => {
                    ResponseTemplate::new(200).set_body_json(new_transaction(
                        &self.storage,
                        "R",
                        &body["amount"],
                        &body["order_number"],
                        number,
                    ))
                }
                _ => invalid_request(),
            };
        }

        let original = match self.storage.read().unwrap().payments.get(&payment_id) {
            Some(original) => original.clone(),
            None => return not_found(),
        };

        let amount = body["amount"].as_f64().unwrap_or_default();
        if amount > original["amount"].as_f64().unwrap_or_default() {
            return error(402, 14, 1, "Amount exceeds the original transaction");
        }

        let transaction_type = match self.adjustment {
            Adjustment::Completion if original["type"] != "PA" => {
                return error(402, 3, 1, "Transaction is not a pre-authorization")
            }
            Adjustment::Completion => "PAC",
            Adjustment::Refund => "R",
            Adjustment::Void => "VP",
        };

        let card_number = format!(
            "XXXX{}",
            original["card"]["last_four"].as_str().unwrap_or_default()
        );
        ResponseTemplate::new(200).set_body_json(new_transaction(
            &self.storage,
            transaction_type,
            &body["amount"],
            &original["order_number"],
            &card_number,
        ))
    }
}

/// GET /v1/payments/{id}
pub(super) struct GetPayment(pub(super) MockServerStorage);

impl Respond for GetPayment {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match self.0.read().unwrap().payments.get(&path_segment(request, 3)) {
            Some(payment) => ResponseTemplate::new(200).set_body_json(payment),
            None => not_found(),
        }
    }
}

/// POST /v1/reports
pub(super) struct Search(pub(super) MockServerStorage);

impl Respond for Search {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return invalid_request(),
        };
        if body["name"] != "Search" {
            return invalid_request();
        }

        // Only equality on the order number is supported
        let order_number = body["criteria"]
            .as_array()
            .into_iter()
            .flatten()
            .find(|c| c["field"] == 5 && c["operator"] == "%3D")
            .and_then(|c| c["value"].as_str());

        let storage = self.0.read().unwrap();
        let mut payments: Vec<&Value> = storage
            .payments
            .values()
            .filter(|p| order_number.map_or(true, |o| p["order_number"] == o))
            .collect();
        payments.sort_by_key(|p| p["id"].as_str().unwrap_or_default().to_string());

        let start_row = body["start_row"].as_u64().unwrap_or(1) as usize;
        let end_row = body["end_row"].as_u64().unwrap_or(1) as usize;

        let records: Vec<Value> = payments
            .into_iter()
            .enumerate()
            .map(|(i, p)| (i + 1, p))
            .filter(|(row, _)| (start_row..=end_row).contains(row))
            .map(|(row, p)| {
                let trn_id: u64 = p["id"].as_str().unwrap_or_default().parse().unwrap_or_default();
                let last_four = p["card"]["last_four"].as_str().unwrap_or_default();
                json!({
                    "row_id": row,
                    "trn_id": trn_id,
                    "trn_date_time": p["created"],
                    "trn_type": p["type"],
                    "trn_order_number": p["order_number"],
                    "trn_amount": p["amount"],
                    "trn_masked_card": format!("XXXX{}", last_four),
                    "merchant_id": 300200578
                })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "records": records }))
    }
}

/// POST /v1/profiles
pub(super) struct CreateProfile(pub(super) MockServerStorage);

impl Respond for CreateProfile {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return invalid_request(),
        };

        let mut storage = self.0.write().unwrap();
        let (name, card) = if body["card"].is_object() {
            (body["card"]["name"].clone(), body["card"].clone())
        } else if body["token"].is_object() {
            match storage.tokens.remove(body["token"]["code"].as_str().unwrap_or_default()) {
                Some(card) => (body["token"]["name"].clone(), card),
                None => return invalid_request(),
            }
        } else {
            return invalid_request();
        };

        let customer_code = Uuid::new_v4().simple().to_string().to_uppercase();
        let number = card["number"].as_str().unwrap_or_default();
        storage.profiles.insert(
            customer_code.clone(),
            json!({
                "customer_code": customer_code,
                "status": "A",
                "language": body["language"],
                "comment": body["comment"],
                "billing": body["billing"],
                "custom": body["custom"],
                "card": [
                    {
                        "card_id": 1,
                        "name": name,
                        "number": mask(number),
                        "expiry_month": card["expiry_month"],
                        "expiry_year": card["expiry_year"],
                        "card_type": "VI"
                    }
                ]
            }),
        );

        ResponseTemplate::new(200).set_body_json(json!({
            "code": 1,
            "message": "Operation Successful",
            "customer_code": customer_code
        }))
    }
}

/// GET /v1/profiles/{id}
pub(super) struct GetProfile(pub(super) MockServerStorage);

impl Respond for GetProfile {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match self.0.read().unwrap().profiles.get(&path_segment(request, 3)) {
            Some(profile) => {
                let mut profile = profile.clone();
                // The profile exposes its default card only
                profile["card"] = profile["card"][0].clone();
                ResponseTemplate::new(200).set_body_json(profile)
            }
            None => not_found(),
        }
    }
}

/// GET /v1/profiles/{id}/cards
pub(super) struct GetCards(pub(super) MockServerStorage);

impl Respond for GetCards {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match self.0.read().unwrap().profiles.get(&path_segment(request, 3)) {
            Some(profile) => ResponseTemplate::new(200).set_body_json(json!({
                "code": 1,
                "message": "Operation Successful",
                "card": profile["card"]
            })),
            None => not_found(),
        }
    }
}
