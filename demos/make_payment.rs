use anyhow::Context;
use bambora_rust::{
    apis::payments::{CardBuilder, PaymentMethod, PaymentRequestBuilder, ReturnRequest},
    client::Configuration,
    error::ApiErrorKind,
    BamboraClient,
};
use rust_decimal::Decimal;

fn read_configuration() -> anyhow::Result<Configuration> {
    config::Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::with_prefix("BAMBORA"))
        .build()?
        .try_deserialize()
        .context("Failed to assemble the required configuration")
}

async fn run() -> anyhow::Result<()> {
    let configuration = read_configuration()?;

    // Setup Bambora client
    let bambora = BamboraClient::from_configuration(&configuration)?;

    let payment_request = PaymentRequestBuilder::default()
        .amount(Decimal::new(1050, 2))
        .order_number(format!("demo-{}", uuid::Uuid::new_v4().simple()))
        .payment_method(PaymentMethod::Card {
            card: CardBuilder::default()
                .name("John Doe")
                .number("4030000010001234")
                .expiry_month("12")
                .expiry_year("30")
                .cvd("123")
                .build()?,
        })
        .build()?;

    let payment = match bambora.payments.make_payment(&payment_request).await {
        Ok(payment) => payment,
        Err(e) if e.api_error_kind() == Some(ApiErrorKind::BusinessRule) => {
            tracing::warn!("Payment declined: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "Payment {} approved: {} ({})",
        payment.id,
        payment.is_approved(),
        payment.message.as_deref().unwrap_or_default()
    );

    // Refund part of it
    let refund = bambora
        .payments
        .return_payment(
            &payment.id,
            &ReturnRequest {
                amount: Decimal::new(500, 2),
                order_number: None,
            },
        )
        .await?;

    tracing::info!("Refund {} approved: {}", refund.id, refund.is_approved());

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
