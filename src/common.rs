// Default environment
pub static DEFAULT_PLATFORM: &str = "api.na";
pub static FALLBACK_PLATFORM: &str = "www";
pub static DEFAULT_API_VERSION: &str = "v1";

// Header names
pub static SUB_MERCHANT_ID_HEADER: &str = "Sub-Merchant-Id";

// Transport
pub static DEFAULT_TIMEOUT_SECS: u64 = 100;
