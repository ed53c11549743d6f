use bambora_rust::{client::Environment, BamboraClient};

pub struct TestContext {
    pub client: BamboraClient,
    pub merchant_id: u32,
}

impl TestContext {
    pub async fn start() -> Self {
        // Take the required credentials from the env
        let merchant_id = std::env::var("ACCEPTANCE_TESTS_MERCHANT_ID")
            .unwrap()
            .parse()
            .unwrap();
        let payments_passcode = std::env::var("ACCEPTANCE_TESTS_PAYMENTS_PASSCODE").unwrap();
        let profiles_passcode = std::env::var("ACCEPTANCE_TESTS_PROFILES_PASSCODE").unwrap();
        let reporting_passcode = std::env::var("ACCEPTANCE_TESTS_REPORTING_PASSCODE").unwrap();

        // Configure a new BamboraClient to point to the live API with test credentials
        let client = BamboraClient::builder(merchant_id)
            .with_payments_passcode(payments_passcode)
            .with_profiles_passcode(profiles_passcode)
            .with_reporting_passcode(reporting_passcode)
            .build()
            .unwrap();

        Self {
            client,
            merchant_id,
        }
    }

    pub fn environment(&self) -> Environment {
        Environment::default()
    }

    /// A client whose passcodes are not accepted.
    pub fn unauthorized_client(&self) -> BamboraClient {
        BamboraClient::builder(self.merchant_id)
            .with_payments_passcode("not-a-valid-passcode")
            .with_profiles_passcode("not-a-valid-passcode")
            .with_reporting_passcode("not-a-valid-passcode")
            .with_environment(self.environment())
            .build()
            .unwrap()
    }
}
