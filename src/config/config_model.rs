#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub api: Api,
    pub checkout: Checkout,
}

#[derive(Debug, Clone)]
pub struct Api {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Merchant identity shown inside the external checkout widget.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub merchant_name: String,
    pub merchant_description: String,
}
