use crate::{
    common::{test_context::TestContext, APPROVED_CARD_NUMBER, DECLINED_CARD_NUMBER},
    integration_tests::helpers::{card, card_payment},
};
use bambora_rust::{
    apis::payments::{
        CompletionRequest, ReturnInstrument, ReturnRequest, UnreferencedReturnRequest,
    },
    error::ApiErrorKind,
};
use rust_decimal_macros::dec;

#[tokio::test]
async fn approved_card_payment() {
    let ctx = TestContext::start().await;
    let request = card_payment(APPROVED_CARD_NUMBER, dec!(10.50));

    let res = ctx.client.payments.make_payment(&request).await.unwrap();

    assert!(res.is_approved());
    assert!(!res.id.is_empty());
    assert_eq!(res.amount, Some(dec!(10.50)));
    assert_eq!(res.order_number, request.order_number);
    assert_eq!(res.transaction_type.as_deref(), Some("P"));
}

#[tokio::test]
async fn declined_card_payment_is_a_business_rule_error() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .payments
        .make_payment(&card_payment(DECLINED_CARD_NUMBER, dec!(10)))
        .await
        .unwrap_err();

    let api_error = err.as_api_error().unwrap();
    assert_eq!(api_error.kind, ApiErrorKind::BusinessRule);
    assert_eq!(api_error.status, 402);
    assert_eq!(api_error.code, 7);
    assert_eq!(api_error.category, 1);
    assert_eq!(api_error.message, "DECLINE");
}

#[tokio::test]
async fn wrong_passcode_is_unauthorized() {
    let ctx = TestContext::start().await;

    let err = ctx
        .unauthorized_client()
        .payments
        .make_payment(&card_payment(APPROVED_CARD_NUMBER, dec!(10)))
        .await
        .unwrap_err();

    assert_eq!(err.api_error_kind(), Some(ApiErrorKind::Unauthorized));
}

#[tokio::test]
async fn pre_auth_then_complete() {
    let ctx = TestContext::start().await;

    let pre_auth = ctx
        .client
        .payments
        .pre_auth(&card_payment(APPROVED_CARD_NUMBER, dec!(20)))
        .await
        .unwrap();
    assert!(pre_auth.is_approved());
    assert_eq!(pre_auth.transaction_type.as_deref(), Some("PA"));

    let completion = ctx
        .client
        .payments
        .complete_pre_auth(
            &pre_auth.id,
            &CompletionRequest {
                amount: dec!(15),
                order_number: None,
            },
        )
        .await
        .unwrap();

    assert!(completion.is_approved());
    assert_ne!(completion.id, pre_auth.id);
    assert_eq!(completion.transaction_type.as_deref(), Some("PAC"));
    assert_eq!(completion.amount, Some(dec!(15)));
}

#[tokio::test]
async fn return_payment() {
    let ctx = TestContext::start().await;
    let payment = ctx
        .client
        .payments
        .make_payment(&card_payment(APPROVED_CARD_NUMBER, dec!(30)))
        .await
        .unwrap();

    let refund = ctx
        .client
        .payments
        .return_payment(
            &payment.id,
            &ReturnRequest {
                amount: dec!(12.25),
                order_number: None,
            },
        )
        .await
        .unwrap();

    assert!(refund.is_approved());
    assert_eq!(refund.transaction_type.as_deref(), Some("R"));
    assert_eq!(refund.amount, Some(dec!(12.25)));
}

#[tokio::test]
async fn void_payment() {
    let ctx = TestContext::start().await;
    let payment = ctx
        .client
        .payments
        .make_payment(&card_payment(APPROVED_CARD_NUMBER, dec!(5)))
        .await
        .unwrap();

    let void = ctx
        .client
        .payments
        .void_payment(&payment.id, dec!(5))
        .await
        .unwrap();

    assert!(void.is_approved());
    assert_eq!(void.transaction_type.as_deref(), Some("VP"));
}

#[cfg(not(feature = "acceptance-tests"))]
#[tokio::test]
async fn unreferenced_return() {
    let ctx = TestContext::start().await;

    let refund = ctx
        .client
        .payments
        .unreferenced_return(&UnreferencedReturnRequest {
            amount: dec!(3),
            order_number: Some("unreferenced-1".to_string()),
            instrument: ReturnInstrument::Card(card(APPROVED_CARD_NUMBER)),
        })
        .await
        .unwrap();

    assert!(refund.is_approved());
    assert_eq!(refund.transaction_type.as_deref(), Some("R"));
}

#[cfg(not(feature = "acceptance-tests"))]
#[tokio::test]
async fn unreferenced_swipe_return() {
    let ctx = TestContext::start().await;
    let track_data = format!(";{}=30121010000000000?", APPROVED_CARD_NUMBER);

    let refund = ctx
        .client
        .payments
        .unreferenced_return(&UnreferencedReturnRequest {
            amount: dec!(4),
            order_number: None,
            instrument: ReturnInstrument::Swipe(track_data),
        })
        .await
        .unwrap();

    assert!(refund.is_approved());
    assert_eq!(refund.card.unwrap().last_four.as_deref(), Some("1234"));
}

#[cfg(not(feature = "acceptance-tests"))]
#[tokio::test]
async fn adjusting_an_unknown_payment_is_not_found() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .payments
        .void_payment("99999999", dec!(1))
        .await
        .unwrap_err();

    assert_eq!(err.api_error_kind(), Some(ApiErrorKind::NotFound));
}

#[tokio::test]
async fn invalid_payment_ids_are_not_sent() {
    let ctx = TestContext::start().await;

    let err = ctx
        .client
        .payments
        .void_payment(" ", dec!(1))
        .await
        .unwrap_err();

    assert!(matches!(err, bambora_rust::Error::Configuration(_)));
    #[cfg(not(feature = "acceptance-tests"))]
    assert_eq!(ctx.received_requests().await, 0);
}
